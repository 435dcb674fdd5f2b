//! Best-profit leaderboard
//!
//! Persisted as JSON next to saved rounds, tracks the top 10 profits.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence::PersistError;
use crate::sim::RoundRecord;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub profit: i64,
    pub produced: i64,
    pub taxed: i64,
    /// Round the score came from, if it had an id
    pub round_id: Option<String>,
}

/// High score leaderboard, sorted by profit descending
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a profit makes the board
    pub fn qualifies(&self, profit: i64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| profit > e.profit).unwrap_or(true)
    }

    /// Get the rank a profit would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, profit: i64) -> Option<usize> {
        if !self.qualifies(profit) {
            return None;
        }
        let rank = self.entries.iter().position(|e| profit > e.profit);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a finished round to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_record(&mut self, record: &RoundRecord, round_id: Option<&str>) -> Option<usize> {
        let profit = record.profit;
        if !self.qualifies(profit) {
            return None;
        }

        let entry = HighScoreEntry {
            profit,
            produced: record.produced,
            taxed: record.taxed,
            round_id: round_id.map(str::to_string),
        };

        // Ties keep the earlier entry ahead
        let pos = self.entries.iter().position(|e| profit > e.profit);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best profit so far (if any)
    pub fn best(&self) -> Option<i64> {
        self.entries.first().map(|e| e.profit)
    }

    /// Load the leaderboard; a missing or unreadable file starts fresh
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<HighScores>(&json) {
                Ok(scores) => {
                    log::info!("Loaded {} high scores", scores.entries.len());
                    scores
                }
                Err(e) => {
                    log::warn!("Ignoring corrupt high scores at {}: {}", path.display(), e);
                    Self::new()
                }
            },
            Err(_) => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}
