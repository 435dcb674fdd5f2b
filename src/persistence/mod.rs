//! Round record persistence
//!
//! The simulation hands each finalized record to a `ResultsSink` keyed by
//! the configured round id. Storage failures never reach the round; the
//! session logs them and moves on.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::sim::RoundRecord;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("round id {0:?} cannot be used as a file name")]
    InvalidRoundId(String),
    #[error("failed to write round record: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode round record: {0}")]
    Json(#[from] serde_json::Error),
}

/// Destination for finalized round records
pub trait ResultsSink {
    fn submit(&mut self, round_id: &str, record: &RoundRecord) -> Result<(), PersistError>;
}

/// Writes `<dir>/<round_id>.json`
#[derive(Debug, Clone)]
pub struct JsonDirSink {
    dir: PathBuf,
}

impl JsonDirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a record with this id is written to
    pub fn record_path(&self, round_id: &str) -> Result<PathBuf, PersistError> {
        let valid = !round_id.is_empty()
            && round_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(PersistError::InvalidRoundId(round_id.to_string()));
        }
        Ok(self.dir.join(format!("{round_id}.json")))
    }
}

impl ResultsSink for JsonDirSink {
    fn submit(&mut self, round_id: &str, record: &RoundRecord) -> Result<(), PersistError> {
        let path = self.record_path(round_id)?;
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&path, json)?;
        log::info!("Round {} saved to {}", round_id, path.display());
        Ok(())
    }
}

/// Keeps submitted records in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub records: Vec<(String, RoundRecord)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultsSink for MemorySink {
    fn submit(&mut self, round_id: &str, record: &RoundRecord) -> Result<(), PersistError> {
        self.records.push((round_id.to_string(), record.clone()));
        Ok(())
    }
}
