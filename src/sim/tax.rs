//! Scrolling tax zones
//!
//! Each declared window becomes a rectangle laid out in world space ahead of
//! the ball. The world scrolls left at a fixed speed per frame, so the frames
//! during which a rectangle covers the ball's (fixed) x are known up front.
//! Evaluating a zone is then an interval test on the same frame counter that
//! drives physics, backed by the on-screen extent for that frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::RoundConfig;

/// A tax window resolved to round-relative frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxZone {
    pub rate: u32,
    /// First frame the leading edge sits at or left of the ball
    pub frame_in: u64,
    /// First frame the trailing edge has passed the ball
    pub frame_out: u64,
}

impl TaxZone {
    #[inline]
    pub fn is_active(&self, frame: u64) -> bool {
        (self.frame_in..self.frame_out).contains(&frame)
    }
}

/// A tax rectangle as it appears on screen for a given frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxRect {
    /// Top-left corner
    pub origin: Vec2,
    pub size: Vec2,
    pub rate: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxSchedule {
    /// Zones in declaration order
    zones: Vec<TaxZone>,
    ball_x: f32,
    scroll_speed: f32,
    ceiling_y: f32,
    floor_y: f32,
    scene_width: f32,
}

impl TaxSchedule {
    pub fn new(config: &RoundConfig) -> Self {
        let tps = config.ticks_per_second();
        let delay = u64::from(config.timer_start_delay_seconds);
        let zones = config
            .tax_zones
            .iter()
            .map(|window| TaxZone {
                rate: window.rate_per_second,
                frame_in: (delay + u64::from(window.start_second)) * tps,
                frame_out: (delay + u64::from(window.end_second)) * tps,
            })
            .collect();

        Self {
            zones,
            ball_x: config.ball_x,
            scroll_speed: config.scroll_speed_px_per_frame,
            ceiling_y: config.ceiling_y,
            floor_y: config.floor_y,
            scene_width: config.scene_width,
        }
    }

    pub fn zones(&self) -> &[TaxZone] {
        &self.zones
    }

    /// Horizontal screen extent `[left, right)` of a zone at `frame`.
    ///
    /// Measured from the ball so the edges land exactly on `ball_x` at
    /// `frame_in` and `frame_out`. Summed in f64 so far edges keep their
    /// frame resolution.
    pub fn screen_span(&self, zone: &TaxZone, frame: u64) -> (f32, f32) {
        let edge = |edge_frame: u64| {
            let frames_ahead = edge_frame as f64 - frame as f64;
            (f64::from(self.ball_x) + frames_ahead * f64::from(self.scroll_speed)) as f32
        };
        (edge(zone.frame_in), edge(zone.frame_out))
    }

    /// Tax rate covering the ball at `frame`.
    ///
    /// The frame interval decides coverage; the on-screen span is derived
    /// from it and only used for drawing. When zones overlap, the last one in
    /// declaration order wins.
    pub fn evaluate(&self, frame: u64) -> u32 {
        self.zones
            .iter()
            .rev()
            .find(|zone| zone.is_active(frame))
            .map_or(0, |zone| zone.rate)
    }

    /// Rectangles at least partly on screen at `frame`
    pub fn visible_rects(&self, frame: u64) -> Vec<TaxRect> {
        let height = self.floor_y - self.ceiling_y;
        self.zones
            .iter()
            .filter_map(|zone| {
                let (left, right) = self.screen_span(zone, frame);
                (left < self.scene_width && right > 0.0).then(|| TaxRect {
                    origin: Vec2::new(left, self.ceiling_y),
                    size: Vec2::new(right - left, height),
                    rate: zone.rate,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn single_zone() -> TaxSchedule {
        let config = RoundConfig {
            timer_start_delay_seconds: 6,
            scroll_speed_px_per_frame: 2.0,
            frame_duration_ms: 20,
            ..Default::default()
        }
        .with_tax_zone(10, 20, 5);
        TaxSchedule::new(&config)
    }

    #[test]
    fn test_zone_frames_from_config() {
        let schedule = single_zone();
        assert_eq!(
            schedule.zones(),
            &[TaxZone {
                rate: 5,
                frame_in: 800,
                frame_out: 1300
            }]
        );
    }

    #[test]
    fn test_evaluate_exact_window() {
        let schedule = single_zone();
        assert_eq!(schedule.evaluate(0), 0);
        assert_eq!(schedule.evaluate(799), 0);
        assert_eq!(schedule.evaluate(800), 5);
        assert_eq!(schedule.evaluate(1000), 5);
        assert_eq!(schedule.evaluate(1299), 5);
        assert_eq!(schedule.evaluate(1300), 0);
        assert_eq!(schedule.evaluate(5000), 0);
    }

    #[test]
    fn test_screen_span_edges_meet_ball() {
        let schedule = single_zone();
        let zone = schedule.zones()[0];
        assert_eq!(schedule.screen_span(&zone, 800).0, 250.0);
        assert_eq!(schedule.screen_span(&zone, 1300).1, 250.0);
        // 100 frames before entry the leading edge is 200px to the right
        assert_eq!(schedule.screen_span(&zone, 700), (450.0, 1450.0));
    }

    #[test]
    fn test_later_zone_wins_overlap() {
        let config = RoundConfig {
            timer_start_delay_seconds: 0,
            ..Default::default()
        }
        .with_tax_zone(10, 20, 5)
        .with_tax_zone(5, 30, 9);
        let schedule = TaxSchedule::new(&config);

        // Only the enclosing zone
        assert_eq!(schedule.evaluate(6 * 50), 9);
        // Both match, later declaration wins
        assert_eq!(schedule.evaluate(10 * 50), 9);
        assert_eq!(schedule.evaluate(15 * 50), 9);
        assert_eq!(schedule.evaluate(30 * 50), 0);

        let reversed = RoundConfig {
            timer_start_delay_seconds: 0,
            ..Default::default()
        }
        .with_tax_zone(5, 30, 9)
        .with_tax_zone(10, 20, 5);
        let schedule = TaxSchedule::new(&reversed);
        assert_eq!(schedule.evaluate(6 * 50), 9);
        assert_eq!(schedule.evaluate(15 * 50), 5);
        assert_eq!(schedule.evaluate(25 * 50), 9);
    }

    #[test]
    fn test_visible_rects() {
        let schedule = single_zone();
        // Far ahead: leading edge at 250 + 800*2 = 1850, off screen
        assert!(schedule.visible_rects(0).is_empty());

        let rects = schedule.visible_rects(700);
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].origin, Vec2::new(450.0, 100.0));
        assert_eq!(rects[0].size, Vec2::new(1000.0, 500.0));
        assert_eq!(rects[0].rate, 5);

        // Trailing edge at 250 - 200 = 50, still visible
        assert_eq!(schedule.visible_rects(1400).len(), 1);
        // Trailing edge at 0, gone
        assert!(schedule.visible_rects(1425).is_empty());
    }

    #[test]
    fn test_slow_scroll_keeps_last_frame() {
        let config = RoundConfig {
            timer_start_delay_seconds: 0,
            scroll_speed_px_per_frame: 1e-6,
            ..Default::default()
        }
        .with_tax_zone(10, 20, 5);
        let schedule = TaxSchedule::new(&config);
        let zone = schedule.zones()[0];
        assert_eq!(schedule.evaluate(zone.frame_in), 5);
        assert_eq!(schedule.evaluate(zone.frame_out - 1), 5);
        assert_eq!(schedule.evaluate(zone.frame_out), 0);

        let visible = RoundConfig {
            timer_start_delay_seconds: 0,
            scroll_speed_px_per_frame: 1e-4,
            ..Default::default()
        }
        .with_tax_zone(10, 20, 5);
        let schedule = TaxSchedule::new(&visible);
        let (left, right) = schedule.screen_span(&zone, zone.frame_out - 1);
        assert!(left < 250.0 && right > 250.0);
    }

    #[test]
    fn test_no_zones_is_untaxed() {
        let schedule = TaxSchedule::new(&RoundConfig::default());
        assert!(schedule.zones().is_empty());
        assert_eq!(schedule.evaluate(1234), 0);
    }

    proptest! {
        #[test]
        fn prop_evaluate_idempotent(frame in 0u64..5000) {
            let schedule = single_zone();
            let first = schedule.evaluate(frame);
            prop_assert_eq!(first, schedule.evaluate(frame));
            prop_assert_eq!(first, schedule.evaluate(frame));
        }

        #[test]
        fn prop_geometry_matches_interval(frame in 0u64..5000) {
            let schedule = single_zone();
            let zone = schedule.zones()[0];
            let expected = if zone.is_active(frame) { 5 } else { 0 };
            prop_assert_eq!(schedule.evaluate(frame), expected);

            let (left, right) = schedule.screen_span(&zone, frame);
            prop_assert_eq!(left <= 250.0 && 250.0 < right, zone.is_active(frame));
        }
    }
}
