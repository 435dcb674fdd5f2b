//! Input sources
//!
//! Polled once per tick, before the tick runs. Whatever they return is
//! applied immediately, in order.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{RoundInput, Snapshot, Stage};

pub trait InputSource {
    fn poll(&mut self, snapshot: &Snapshot) -> Vec<RoundInput>;
}

/// No input at all
impl InputSource for () {
    fn poll(&mut self, _snapshot: &Snapshot) -> Vec<RoundInput> {
        Vec::new()
    }
}

/// Inputs keyed by poll index (0 = before the first tick)
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    script: BTreeMap<u64, Vec<RoundInput>>,
    polls: u64,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(mut self, poll: u64, input: RoundInput) -> Self {
        self.script.entry(poll).or_default().push(input);
        self
    }

    /// Start on the first poll, then tap every `every` polls. An interval
    /// of zero means no taps.
    pub fn start_then_tap_every(every: u64, until: u64) -> Self {
        let mut script = Self::new().at(0, RoundInput::Start);
        if every == 0 {
            return script;
        }
        for poll in (every..until).step_by(every as usize) {
            script = script.at(poll, RoundInput::Tap);
        }
        script
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _snapshot: &Snapshot) -> Vec<RoundInput> {
        let inputs = self.script.remove(&self.polls).unwrap_or_default();
        self.polls += 1;
        inputs
    }
}

/// Demo player: waits out a short idle period, then taps to hover around a
/// target production rate that wanders every second.
#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    /// Idle frames before pressing start
    pub start_after: u64,
    /// Current production rate the autopilot aims for
    pub target_rate: u32,
    /// Chance of acting on a tap decision (makes the play imperfect)
    pub reaction: f64,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            start_after: 25,
            target_rate: 50,
            reaction: 0.8,
        }
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, snapshot: &Snapshot) -> Vec<RoundInput> {
        match snapshot.stage {
            Stage::ReadyToPlay if snapshot.frame >= self.start_after => vec![RoundInput::Start],
            Stage::ReadyToPlay | Stage::Finished => Vec::new(),
            Stage::Playing => {
                if snapshot.frame % 50 == 0 {
                    // Duck under taxes, climb when untaxed
                    self.target_rate = if snapshot.current_tax_rate > 0 {
                        self.rng.random_range(10..40)
                    } else {
                        self.rng.random_range(40..90)
                    };
                }
                let below_target = snapshot.production_rate < self.target_rate;
                let falling = snapshot.falling_speed > 0.0;
                if below_target && falling && self.rng.random_bool(self.reaction) {
                    vec![RoundInput::Tap]
                } else {
                    Vec::new()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoundConfig;
    use crate::sim::{Round, apply_input, tick};

    fn snapshot() -> Snapshot {
        Round::new(RoundConfig::default()).unwrap().snapshot()
    }

    #[test]
    fn test_scripted_input_by_poll() {
        let mut script = ScriptedInput::new()
            .at(0, RoundInput::Start)
            .at(2, RoundInput::Tap)
            .at(2, RoundInput::Tap);
        let snap = snapshot();
        assert_eq!(script.poll(&snap), vec![RoundInput::Start]);
        assert!(script.poll(&snap).is_empty());
        assert_eq!(script.poll(&snap), vec![RoundInput::Tap, RoundInput::Tap]);
        assert!(script.poll(&snap).is_empty());
    }

    #[test]
    fn test_start_then_tap_every() {
        let mut script = ScriptedInput::start_then_tap_every(10, 35);
        let snap = snapshot();
        let taps: Vec<u64> = (0..40)
            .filter(|_| !script.poll(&snap).is_empty())
            .collect();
        assert_eq!(taps, vec![0, 10, 20, 30]);
    }

    #[test]
    fn test_zero_interval_only_starts() {
        let mut script = ScriptedInput::start_then_tap_every(0, 50);
        let snap = snapshot();
        assert_eq!(script.poll(&snap), vec![RoundInput::Start]);
        assert!((1..50).all(|_| script.poll(&snap).is_empty()));
    }

    #[test]
    fn test_autopilot_waits_then_starts() {
        let mut pilot = Autopilot::new(7);
        let mut round = Round::new(RoundConfig::default()).unwrap();
        let mut started_at = None;
        for _ in 0..100 {
            for input in pilot.poll(&round.snapshot()) {
                if input == RoundInput::Start {
                    started_at.get_or_insert(round.clock.frames_passed);
                }
                apply_input(&mut round, input);
            }
            tick(&mut round);
        }
        assert_eq!(started_at, Some(25));
        assert_eq!(round.stage(), Stage::Playing);
    }

    #[test]
    fn test_autopilot_is_seeded() {
        let run = |seed| {
            let mut pilot = Autopilot::new(seed);
            let mut round = Round::new(RoundConfig::default()).unwrap();
            for _ in 0..2000 {
                for input in pilot.poll(&round.snapshot()) {
                    apply_input(&mut round, input);
                }
                tick(&mut round);
            }
            round.economy.flaps.len()
        };
        assert_eq!(run(42), run(42));
        assert!(run(42) > 0);
    }
}
