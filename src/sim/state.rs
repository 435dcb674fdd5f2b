//! Round state and render snapshots
//!
//! A `Round` owns everything one play-through needs. Nothing is global, so
//! any number of rounds can run side by side.

use glam::Vec2;
use serde::Serialize;

use super::ball::Ball;
use super::clock::Clock;
use super::economy::Economy;
use super::results::RoundRecord;
use super::stage::{Stage, StageMachine};
use super::tax::{TaxRect, TaxSchedule};
use crate::config::{ConfigError, RoundConfig};

/// Complete state of one round
#[derive(Debug, Clone)]
pub struct Round {
    pub config: RoundConfig,
    pub clock: Clock,
    pub ball: Ball,
    pub schedule: TaxSchedule,
    pub economy: Economy,
    pub stages: StageMachine,
    /// Set exactly once, when the round enters Finished
    pub record: Option<RoundRecord>,
}

impl Round {
    /// Validate the config and lay out a fresh round in ReadyToPlay
    pub fn new(config: RoundConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            clock: Clock::new(config.ticks_per_second()),
            ball: Ball::new(&config),
            schedule: TaxSchedule::new(&config),
            economy: Economy::new(),
            stages: StageMachine::new(),
            record: None,
            config,
        })
    }

    #[inline]
    pub fn stage(&self) -> Stage {
        self.stages.stage()
    }

    /// Finalized record, once the round is over
    pub fn record(&self) -> Option<&RoundRecord> {
        self.record.as_ref()
    }

    /// Whole seconds on the round timer (negative during the lead-in)
    pub fn timer_seconds(&self) -> i64 {
        match self.stage() {
            Stage::ReadyToPlay => -i64::from(self.config.timer_start_delay_seconds),
            Stage::Playing | Stage::Finished => {
                self.clock.timer_seconds(self.config.delay_frames())
            }
        }
    }

    /// Everything a renderer needs for the current frame
    pub fn snapshot(&self) -> Snapshot {
        let frame = self.clock.frames_passed;
        let tax_rects = match self.stage() {
            Stage::ReadyToPlay => Vec::new(),
            Stage::Playing | Stage::Finished => self.schedule.visible_rects(frame),
        };
        Snapshot {
            stage: self.stage(),
            frame,
            ball_position: self.ball.pos(),
            ball_radius: self.ball.radius,
            production_rate: self.ball.production_rate(),
            gravity: self.ball.gravity,
            falling_speed: self.ball.falling_speed,
            trail: self.ball.trail.iter().copied().collect(),
            tax_rects,
            score_produced: self.economy.score_produced,
            score_taxed: self.economy.score_taxed,
            profit: self.economy.profit(),
            current_tax_rate: self.economy.current_tax_rate,
            timer_seconds: self.timer_seconds(),
            idle_frame: self.clock.idle_frame,
        }
    }
}

/// Per-frame view handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub stage: Stage,
    pub frame: u64,
    pub ball_position: Vec2,
    pub ball_radius: f32,
    pub production_rate: u32,
    pub gravity: f32,
    pub falling_speed: f32,
    /// Scrolled history, oldest first
    pub trail: Vec<Vec2>,
    pub tax_rects: Vec<TaxRect>,
    pub score_produced: i64,
    pub score_taxed: i64,
    pub profit: i64,
    pub current_tax_rate: u32,
    pub timer_seconds: i64,
    pub idle_frame: u8,
}
