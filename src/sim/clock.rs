//! Frame clock
//!
//! One frame per external tick. Every cadence in the game (scoring, the
//! round timer, the idle prompt animation) is derived from this counter.

use serde::{Deserialize, Serialize};

use crate::consts::{IDLE_FRAME_COUNT, IDLE_FRAME_INTERVAL};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clock {
    /// Frames since the round started (or since creation before that)
    pub frames_passed: u64,
    /// Frames per simulated second
    pub ticks_per_second: u64,
    /// Current frame of the idle "tap" prompt
    pub idle_frame: u8,
}

impl Clock {
    pub fn new(ticks_per_second: u64) -> Self {
        Self {
            frames_passed: 0,
            ticks_per_second,
            idle_frame: 0,
        }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.frames_passed += 1;
    }

    /// Rewind to frame zero; all round-relative arithmetic starts here
    pub fn reset(&mut self) {
        self.frames_passed = 0;
    }

    /// True on frames that close a simulated second
    #[inline]
    pub fn is_second_boundary(&self) -> bool {
        self.frames_passed % self.ticks_per_second == 0
    }

    /// Step the idle prompt animation (only meaningful outside Playing)
    pub fn advance_idle_animation(&mut self) {
        if self.frames_passed % IDLE_FRAME_INTERVAL == 0 {
            self.idle_frame = (self.idle_frame + 1) % IDLE_FRAME_COUNT;
        }
    }

    /// Whole seconds on the round timer; negative during the lead-in
    pub fn timer_seconds(&self, delay_frames: u64) -> i64 {
        let since_delay = self.frames_passed as i64 - delay_frames as i64;
        since_delay.div_euclid(self.ticks_per_second as i64)
    }
}
