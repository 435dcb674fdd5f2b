//! Production and tax accounting
//!
//! Rates are refreshed every Playing frame; totals only move on the
//! once-per-second scoring cadence.

use serde::{Deserialize, Serialize};

/// A tap, with the rates in force when it happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlapEvent {
    /// Round-relative frame of the tap
    pub frame: u64,
    pub score_per_second: u32,
    pub tax_per_second: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Economy {
    /// Total produced so far (never decreases)
    pub score_produced: i64,
    /// Total taxed so far, kept negative (never increases)
    pub score_taxed: i64,
    /// Production rate from the ball's current height
    pub score_per_second: u32,
    /// Rate of the tax zone covering the ball, 0 if none
    pub current_tax_rate: u32,
    /// Production credited each scored second
    pub scores_by_second: Vec<u32>,
    /// Tax debited each scored second (non-positive)
    pub taxes_by_second: Vec<i64>,
    pub flaps: Vec<FlapEvent>,
}

impl Economy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh the instantaneous rates for this frame
    pub fn set_rates(&mut self, score_per_second: u32, tax_rate: u32) {
        self.score_per_second = score_per_second;
        self.current_tax_rate = tax_rate;
    }

    /// Credit one second of production and debit one second of tax
    pub fn score_tick(&mut self, frame: u64) {
        let produced = self.score_per_second;
        let taxed = -i64::from(self.current_tax_rate);

        self.score_produced += i64::from(produced);
        self.score_taxed += taxed;
        self.scores_by_second.push(produced);
        self.taxes_by_second.push(taxed);

        log::debug!(
            "Second {} (frame {}): +{} {} -> produced {}, taxed {}",
            self.scores_by_second.len(),
            frame,
            produced,
            taxed,
            self.score_produced,
            self.score_taxed
        );
    }

    pub fn record_flap(&mut self, frame: u64) {
        self.flaps.push(FlapEvent {
            frame,
            score_per_second: self.score_per_second,
            tax_per_second: self.current_tax_rate,
        });
    }

    /// Net income; `score_taxed` is already negative
    #[inline]
    pub fn profit(&self) -> i64 {
        self.score_produced + self.score_taxed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_tick_accumulates() {
        let mut economy = Economy::new();
        economy.set_rates(40, 3);
        economy.score_tick(50);
        economy.set_rates(60, 0);
        economy.score_tick(100);

        assert_eq!(economy.score_produced, 100);
        assert_eq!(economy.score_taxed, -3);
        assert_eq!(economy.profit(), 97);
        assert_eq!(economy.scores_by_second, vec![40, 60]);
        assert_eq!(economy.taxes_by_second, vec![-3, 0]);
    }

    #[test]
    fn test_rates_alone_do_not_score() {
        let mut economy = Economy::new();
        economy.set_rates(100, 50);
        assert_eq!(economy.score_produced, 0);
        assert_eq!(economy.score_taxed, 0);
        assert!(economy.scores_by_second.is_empty());
    }

    #[test]
    fn test_record_flap_snapshots_rates() {
        let mut economy = Economy::new();
        economy.set_rates(12, 4);
        economy.record_flap(321);
        economy.set_rates(80, 0);
        economy.record_flap(400);

        assert_eq!(
            economy.flaps,
            vec![
                FlapEvent {
                    frame: 321,
                    score_per_second: 12,
                    tax_per_second: 4
                },
                FlapEvent {
                    frame: 400,
                    score_per_second: 80,
                    tax_per_second: 0
                },
            ]
        );
    }

    #[test]
    fn test_taxed_never_increases() {
        let mut economy = Economy::new();
        let mut last = 0;
        for rate in [0, 5, 0, 2, 9] {
            economy.set_rates(10, rate);
            economy.score_tick(0);
            assert!(economy.score_taxed <= last);
            last = economy.score_taxed;
        }
        assert_eq!(economy.score_taxed, -16);
    }
}
