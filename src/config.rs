//! Round configuration
//!
//! Built once per round by whatever layer parses URLs or files, validated
//! here, then treated as immutable by the simulation.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised when a round configuration is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("round duration must be positive (got {0}s)")]
    NonPositiveDuration(u32),
    #[error("tax window #{index} ends at {end}s, not after its start at {start}s")]
    EmptyTaxWindow { index: usize, start: u32, end: u32 },
    #[error("frame duration {0}ms must be positive and divide 1000 evenly")]
    FrameDuration(u32),
    #[error("{field} must be finite and positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be finite and non-negative (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("thrust base {thrust_base} leaves no upward flap at full production (thrust {thrust})")]
    WeakThrust { thrust_base: f32, thrust: f32 },
    #[error("playfield too small: ceiling {ceiling}, floor {floor}, ball radius {radius}")]
    Playfield { ceiling: f32, floor: f32, radius: f32 },
    #[error("invalid round config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read round config: {0}")]
    Io(#[from] std::io::Error),
}

/// A declared tax window, in timer seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxWindow {
    pub start_second: u32,
    pub end_second: u32,
    /// Flat levy per scored second while the zone covers the ball
    pub rate_per_second: u32,
}

impl TaxWindow {
    pub fn new(start_second: u32, end_second: u32, rate_per_second: u32) -> Self {
        Self {
            start_second,
            end_second,
            rate_per_second,
        }
    }
}

/// Engine coefficients that earlier builds hard-coded with drifting values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Tuning {
    /// How much extra gravity the ball feels at 100% production
    pub gravity_factor: f32,
    /// Flap impulse at zero production
    pub thrust_base: f32,
    /// Divisor inside the logarithmic thrust falloff
    pub thrust_divisor: f32,
}

impl Tuning {
    /// Upward impulse of a flap at the given production rate
    #[inline]
    pub fn thrust_at(&self, score_per_second: u32) -> f32 {
        self.thrust_base - (1.0 + score_per_second as f32 / self.thrust_divisor).ln()
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity_factor: GRAVITY_FACTOR,
            thrust_base: THRUST_BASE,
            thrust_divisor: THRUST_DIVISOR,
        }
    }
}

/// Everything needed to play one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoundConfig {
    // === Clock ===
    /// Nominal tick interval
    pub frame_duration_ms: u32,
    /// Horizontal scroll applied to the world each Playing frame
    pub scroll_speed_px_per_frame: f32,

    // === Playfield ===
    pub ceiling_y: f32,
    pub floor_y: f32,
    pub scene_width: f32,
    pub ball_radius: f32,
    /// Fixed horizontal position of the ball
    pub ball_x: f32,
    pub ball_start_y: f32,

    // === Physics ===
    pub min_gravity: f32,
    pub tuning: Tuning,

    // === Round timing ===
    pub round_duration_seconds: u32,
    /// Lead-in before the round timer starts counting
    pub timer_start_delay_seconds: u32,
    /// Wait between Finished and the round-complete signal
    pub presentation_delay_ms: u32,

    // === Economy ===
    pub tax_zones: Vec<TaxWindow>,

    /// Key under which the finalized record is persisted. No id, no upload.
    pub round_id: Option<String>,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            frame_duration_ms: FRAME_DURATION_MS,
            scroll_speed_px_per_frame: SCROLL_SPEED,

            ceiling_y: CEILING_Y,
            floor_y: FLOOR_Y,
            scene_width: SCENE_WIDTH,
            ball_radius: BALL_RADIUS,
            ball_x: BALL_X,
            ball_start_y: BALL_START_Y,

            min_gravity: MIN_GRAVITY,
            tuning: Tuning::default(),

            round_duration_seconds: ROUND_DURATION_SECONDS,
            timer_start_delay_seconds: TIMER_START_DELAY_SECONDS,
            presentation_delay_ms: PRESENTATION_DELAY_MS,

            tax_zones: Vec::new(),
            round_id: None,
        }
    }
}

impl RoundConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!(
            "Loaded round config from {} ({} tax zones)",
            path.display(),
            config.tax_zones.len()
        );
        Ok(config)
    }

    /// Builder-style helper for adding a tax window
    pub fn with_tax_zone(mut self, start_second: u32, end_second: u32, rate: u32) -> Self {
        self.tax_zones
            .push(TaxWindow::new(start_second, end_second, rate));
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.round_duration_seconds == 0 {
            return Err(ConfigError::NonPositiveDuration(self.round_duration_seconds));
        }
        for (index, window) in self.tax_zones.iter().enumerate() {
            if window.end_second <= window.start_second {
                return Err(ConfigError::EmptyTaxWindow {
                    index,
                    start: window.start_second,
                    end: window.end_second,
                });
            }
        }
        if self.frame_duration_ms == 0 || 1000 % self.frame_duration_ms != 0 {
            return Err(ConfigError::FrameDuration(self.frame_duration_ms));
        }
        positive("scrollSpeedPxPerFrame", self.scroll_speed_px_per_frame)?;
        positive("ballRadius", self.ball_radius)?;
        positive("minGravity", self.min_gravity)?;
        positive("thrustDivisor", self.tuning.thrust_divisor)?;
        positive("thrustBase", self.tuning.thrust_base)?;
        non_negative("gravityFactor", self.tuning.gravity_factor)?;

        // Thrust falls as the rate climbs, so full production is the weakest flap
        let thrust = self.tuning.thrust_at(MAX_PRODUCTION_RATE);
        if thrust.is_nan() || thrust <= 0.0 {
            return Err(ConfigError::WeakThrust {
                thrust_base: self.tuning.thrust_base,
                thrust,
            });
        }

        let depth = self.floor_y - self.ceiling_y;
        if depth.is_nan() || depth <= 2.0 * self.ball_radius {
            return Err(ConfigError::Playfield {
                ceiling: self.ceiling_y,
                floor: self.floor_y,
                radius: self.ball_radius,
            });
        }
        Ok(())
    }

    /// Frames per simulated second
    #[inline]
    pub fn ticks_per_second(&self) -> u64 {
        u64::from(1000 / self.frame_duration_ms)
    }

    /// Frame at which the round timer reads zero
    #[inline]
    pub fn delay_frames(&self) -> u64 {
        u64::from(self.timer_start_delay_seconds) * self.ticks_per_second()
    }

    /// Frame at which the round timer reaches the round duration
    #[inline]
    pub fn end_frame(&self) -> u64 {
        self.delay_frames() + u64::from(self.round_duration_seconds) * self.ticks_per_second()
    }

    /// Highest (smallest) y the ball center may take
    #[inline]
    pub fn top_limit(&self) -> f32 {
        self.ceiling_y + self.ball_radius
    }

    /// Lowest (largest) y the ball center may take
    #[inline]
    pub fn bottom_limit(&self) -> f32 {
        self.floor_y - self.ball_radius
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}
