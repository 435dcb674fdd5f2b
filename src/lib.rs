//! Taxflap - hover a ball to produce income while scrolling tax zones bite
//!
//! Core modules:
//! - `sim`: Deterministic round simulation (ball, tax schedule, economy, stages, results)
//! - `config`: Validated round configuration
//! - `platform`: Tick scheduling, input sources and the session driver
//! - `persistence`: Sinks for finalized round records
//! - `highscores`: Best-profit leaderboard

pub mod config;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod sim;

pub use config::{ConfigError, RoundConfig, TaxWindow, Tuning};
pub use highscores::HighScores;

/// Canonical game constants
pub mod consts {
    /// Nominal tick interval (50 Hz)
    pub const FRAME_DURATION_MS: u32 = 20;
    /// World scroll per Playing frame
    pub const SCROLL_SPEED: f32 = 2.0;

    /// Playfield
    pub const SCENE_WIDTH: f32 = 1000.0;
    pub const CEILING_Y: f32 = 100.0;
    pub const FLOOR_Y: f32 = 600.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 35.0;
    pub const BALL_X: f32 = 250.0;
    pub const BALL_START_Y: f32 = 350.0;
    /// Flaps are ignored while the ball is above this y
    pub const OUT_OF_BOUNDS_Y: f32 = 0.0;
    /// Trail points kept for rendering
    pub const TRAIL_LENGTH: usize = 250;

    /// Gravity at 0% production (pixels/frame²)
    pub const MIN_GRAVITY: f32 = 0.125;
    /// Extra gravity share at 100% production
    pub const GRAVITY_FACTOR: f32 = 1.23;
    /// Flap impulse at 0% production (pixels/frame)
    pub const THRUST_BASE: f32 = 5.31;
    pub const THRUST_DIVISOR: f32 = 1.5;

    /// Production rate range
    pub const MAX_PRODUCTION_RATE: u32 = 100;

    /// Round timing
    pub const ROUND_DURATION_SECONDS: u32 = 60;
    pub const TIMER_START_DELAY_SECONDS: u32 = 6;
    pub const PRESENTATION_DELAY_MS: u32 = 1500;

    /// Idle "tap" prompt animation
    pub const IDLE_FRAME_INTERVAL: u64 = 10;
    pub const IDLE_FRAME_COUNT: u8 = 2;
}

/// Linear remap of `value` from `[from_a, from_b]` onto `[to_a, to_b]`
#[inline]
pub fn remap(value: f32, from_a: f32, from_b: f32, to_a: f32, to_b: f32) -> f32 {
    // Normalize first so `value == from_b` lands exactly on `to_b`
    let t = (value - from_a) / (from_b - from_a);
    to_a + t * (to_b - to_a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remap_endpoints() {
        assert_eq!(remap(565.0, 565.0, 135.0, 0.0, 100.0), 0.0);
        assert_eq!(remap(135.0, 565.0, 135.0, 0.0, 100.0), 100.0);
        assert_eq!(remap(350.0, 565.0, 135.0, 0.0, 100.0), 50.0);
    }
}
