//! Ball dynamics
//!
//! The ball only moves vertically. Its height sets the production rate, and
//! the production rate feeds back into both gravity and flap strength: the
//! higher you fly, the harder you fall and the weaker each tap gets.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::{RoundConfig, Tuning};
use crate::consts::{MAX_PRODUCTION_RATE, OUT_OF_BOUNDS_Y, TRAIL_LENGTH};
use crate::remap;

/// Map a ball height onto the integer production rate.
///
/// `bottom` maps to 0 and `top` to 100. The floor is taken before the
/// absolute value so a hair of float overshoot at either end cannot produce
/// a negative rate.
pub fn production_rate(y: f32, top: f32, bottom: f32) -> u32 {
    let rate = remap(y, bottom, top, 0.0, MAX_PRODUCTION_RATE as f32)
        .floor()
        .abs();
    (rate as u32).min(MAX_PRODUCTION_RATE)
}

/// Upward impulse for a flap at the given production rate
pub fn flap_thrust(score_per_second: u32, tuning: &Tuning) -> f32 {
    tuning.thrust_at(score_per_second)
}

/// The player's ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Fixed horizontal position
    pub x: f32,
    pub y: f32,
    /// Positive is downward
    pub falling_speed: f32,
    /// Gravity used on the last step
    pub gravity: f32,
    pub radius: f32,
    /// Smallest y the center may reach (ceiling + radius)
    top: f32,
    /// Largest y the center may reach (floor - radius)
    bottom: f32,
    min_gravity: f32,
    tuning: Tuning,
    /// Scrolled position history for rendering (oldest first)
    #[serde(skip)]
    pub trail: VecDeque<Vec2>,
}

impl Ball {
    pub fn new(config: &RoundConfig) -> Self {
        let top = config.top_limit();
        let bottom = config.bottom_limit();
        Self {
            x: config.ball_x,
            y: config.ball_start_y.clamp(top, bottom),
            falling_speed: 0.0,
            gravity: config.min_gravity,
            radius: config.ball_radius,
            top,
            bottom,
            min_gravity: config.min_gravity,
            tuning: config.tuning,
            trail: VecDeque::with_capacity(TRAIL_LENGTH),
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Current production rate, 0 on the floor and 100 against the ceiling
    #[inline]
    pub fn production_rate(&self) -> u32 {
        production_rate(self.y, self.top, self.bottom)
    }

    /// Vertical range the ball center is clamped to
    #[inline]
    pub fn limits(&self) -> (f32, f32) {
        (self.top, self.bottom)
    }

    /// Integrate one frame.
    ///
    /// Hitting the floor or ceiling pins `y` to the boundary but leaves
    /// `falling_speed` untouched; there is no bounce.
    pub fn step(&mut self) {
        let rate = self.production_rate() as f32 / MAX_PRODUCTION_RATE as f32;
        self.gravity = self.min_gravity * (1.0 + self.tuning.gravity_factor * rate);
        self.falling_speed += self.gravity;

        let next_y = self.y + self.falling_speed;
        if next_y > self.bottom {
            self.y = self.bottom;
        } else if next_y < self.top {
            self.y = self.top;
        } else {
            self.y = next_y;
        }
    }

    /// Apply a tap. Returns false when the ball is out of bounds and the tap
    /// is ignored.
    pub fn flap(&mut self, score_per_second: u32) -> bool {
        if self.y < OUT_OF_BOUNDS_Y {
            return false;
        }
        self.falling_speed = -flap_thrust(score_per_second, &self.tuning);
        true
    }

    /// Scroll the trail left and append the current position
    pub fn record_trail(&mut self, scroll: f32) {
        for point in self.trail.iter_mut() {
            point.x -= scroll;
        }
        self.trail.push_back(self.pos());
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MIN_GRAVITY;
    use proptest::prelude::*;

    fn ball() -> Ball {
        Ball::new(&RoundConfig::default())
    }

    #[test]
    fn test_production_rate_endpoints() {
        let config = RoundConfig::default();
        let (top, bottom) = (config.top_limit(), config.bottom_limit());
        assert_eq!(production_rate(top, top, bottom), 100);
        assert_eq!(production_rate(bottom, top, bottom), 0);
        assert_eq!(production_rate(350.0, top, bottom), 50);
    }

    #[test]
    fn test_gravity_grows_with_altitude() {
        let mut low = ball();
        low.y = low.bottom;
        low.step();
        assert_eq!(low.gravity, MIN_GRAVITY);

        let mut high = ball();
        high.y = high.top;
        high.falling_speed = 0.0;
        high.step();
        assert!((high.gravity - MIN_GRAVITY * 2.23).abs() < 1e-6);
    }

    #[test]
    fn test_floor_clamp_keeps_velocity() {
        let mut b = ball();
        b.y = b.bottom - 1.0;
        b.falling_speed = 10.0;
        b.step();
        assert_eq!(b.y, b.bottom);
        // No bounce and no zeroing
        assert!(b.falling_speed > 10.0);

        let before = b.falling_speed;
        b.step();
        assert_eq!(b.y, b.bottom);
        assert!(b.falling_speed > before);
    }

    #[test]
    fn test_ceiling_clamp() {
        let mut b = ball();
        b.y = b.top + 2.0;
        b.falling_speed = -20.0;
        b.step();
        assert_eq!(b.y, b.top);
        assert!(b.falling_speed < 0.0);
    }

    #[test]
    fn test_flap_sets_upward_speed() {
        let mut b = ball();
        b.falling_speed = 7.0;
        assert!(b.flap(0));
        assert!((b.falling_speed + 5.31).abs() < 1e-6);

        assert!(b.flap(100));
        let expected = -(5.31 - (1.0f32 + 100.0 / 1.5).ln());
        assert!((b.falling_speed - expected).abs() < 1e-6);
    }

    #[test]
    fn test_flap_ignored_out_of_bounds() {
        let mut b = ball();
        b.y = -5.0;
        b.falling_speed = 3.0;
        assert!(!b.flap(0));
        assert_eq!(b.falling_speed, 3.0);
    }

    #[test]
    fn test_trail_scrolls_and_is_bounded() {
        let mut b = ball();
        b.record_trail(2.0);
        b.record_trail(2.0);
        assert_eq!(b.trail.len(), 2);
        assert_eq!(b.trail[0].x, b.x - 2.0);
        assert_eq!(b.trail[1].x, b.x);

        for _ in 0..(TRAIL_LENGTH * 2) {
            b.record_trail(2.0);
        }
        assert_eq!(b.trail.len(), TRAIL_LENGTH);
        assert_eq!(b.trail.back().map(|p| p.x), Some(b.x));
    }

    proptest! {
        #[test]
        fn prop_ball_stays_in_bounds(taps in proptest::collection::vec(any::<bool>(), 1..600)) {
            let mut b = ball();
            for tap in taps {
                if tap {
                    let rate = b.production_rate();
                    b.flap(rate);
                }
                b.step();
                prop_assert!(b.y >= b.top && b.y <= b.bottom);
                prop_assert!(b.production_rate() <= 100);
            }
        }

        #[test]
        fn prop_flap_always_upward(rate in 0u32..=100) {
            let mut b = ball();
            b.flap(rate);
            prop_assert!(b.falling_speed < 0.0);
        }

        #[test]
        fn prop_flap_upward_for_any_accepted_tuning(
            gravity_factor in 0.0f32..5.0,
            thrust_base in 0.1f32..12.0,
            thrust_divisor in 0.05f32..10.0,
            rate in 0u32..=100,
        ) {
            let config = RoundConfig {
                tuning: Tuning { gravity_factor, thrust_base, thrust_divisor },
                ..Default::default()
            };
            prop_assume!(config.validate().is_ok());
            let mut b = Ball::new(&config);
            b.falling_speed = 9.0;
            prop_assert!(b.flap(rate));
            prop_assert!(b.falling_speed < 0.0);
        }

        #[test]
        fn prop_rate_monotonic(a in 135.0f32..=565.0, b in 135.0f32..=565.0) {
            let (hi, lo) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(production_rate(hi, 135.0, 565.0) >= production_rate(lo, 135.0, 565.0));
        }

        #[test]
        fn prop_endpoints_exact(ceiling in -200.0f32..200.0, depth in 100.0f32..900.0, radius in 1.0f32..40.0) {
            let config = RoundConfig {
                ceiling_y: ceiling,
                floor_y: ceiling + depth,
                ball_radius: radius,
                ..Default::default()
            };
            let (top, bottom) = (config.top_limit(), config.bottom_limit());
            prop_assert_eq!(production_rate(top, top, bottom), 100);
            prop_assert_eq!(production_rate(bottom, top, bottom), 0);
        }
    }
}
