//! End-of-round results
//!
//! Turns the economy's raw logs into the record handed to persistence.

use serde::{Deserialize, Serialize};

use super::economy::Economy;
use crate::config::RoundConfig;

/// Finalized, consumer-facing round record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRecord {
    /// Production credited per scored second
    pub scores_by_seconds: Vec<u32>,
    /// Tax debited per scored second (non-positive)
    pub taxes_by_seconds: Vec<i64>,
    /// Timer seconds of each flap; negative for taps during the lead-in
    pub flaps_by_seconds: Vec<f64>,
    pub flaps_by_score_per_second: Vec<u32>,
    pub flaps_by_tax_per_second: Vec<u32>,
    pub produced: i64,
    pub taxed: i64,
    pub profit: i64,
}

/// Timer seconds at a round-relative frame
pub fn frame_to_timer_seconds(frame: u64, config: &RoundConfig) -> f64 {
    frame as f64 * f64::from(config.frame_duration_ms) / 1000.0
        - f64::from(config.timer_start_delay_seconds)
}

/// Build the final record. Called once, when the round enters Finished.
pub fn finalize(economy: &Economy, config: &RoundConfig) -> RoundRecord {
    let produced = economy.score_produced;
    let taxed = economy.score_taxed;

    let record = RoundRecord {
        scores_by_seconds: economy.scores_by_second.clone(),
        taxes_by_seconds: economy.taxes_by_second.clone(),
        flaps_by_seconds: economy
            .flaps
            .iter()
            .map(|flap| frame_to_timer_seconds(flap.frame, config))
            .collect(),
        flaps_by_score_per_second: economy.flaps.iter().map(|f| f.score_per_second).collect(),
        flaps_by_tax_per_second: economy.flaps.iter().map(|f| f.tax_per_second).collect(),
        produced,
        taxed,
        profit: produced + taxed,
    };

    log::info!(
        "Round finalized: produced {}, taxed {}, profit {}, {} flaps",
        record.produced,
        record.taxed,
        record.profit,
        record.flaps_by_seconds.len()
    );
    record
}
