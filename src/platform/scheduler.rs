//! Tick scheduling
//!
//! One tick per nominal interval. A late tick is delivered as soon as
//! possible but never doubled up, so a lagging host just plays slower.

use std::thread;
use std::time::{Duration, Instant};

pub trait TickScheduler {
    /// Wait for the next tick. Returns false once cancelled.
    fn next_tick(&mut self) -> bool;

    /// Stop delivering ticks
    fn cancel(&mut self);

    fn is_cancelled(&self) -> bool;

    /// Wait outside the tick cadence (presentation delay)
    fn pause(&mut self, duration: Duration);
}

/// Real-time scheduler backed by the thread clock
#[derive(Debug)]
pub struct IntervalScheduler {
    interval: Duration,
    last_tick: Option<Instant>,
    cancelled: bool,
}

impl IntervalScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: None,
            cancelled: false,
        }
    }

    pub fn from_frame_ms(frame_duration_ms: u32) -> Self {
        Self::new(Duration::from_millis(u64::from(frame_duration_ms)))
    }
}

impl TickScheduler for IntervalScheduler {
    fn next_tick(&mut self) -> bool {
        if self.cancelled {
            return false;
        }
        if let Some(last) = self.last_tick {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                thread::sleep(self.interval - elapsed);
            }
        }
        self.last_tick = Some(Instant::now());
        true
    }

    fn cancel(&mut self) {
        self.cancelled = true;
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn pause(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Scheduler that never sleeps; for tests and fast offline runs
#[derive(Debug, Clone, Default)]
pub struct HeadlessScheduler {
    /// Ticks delivered so far
    pub ticks: u64,
    /// Stop on its own after this many ticks
    pub max_ticks: Option<u64>,
    /// Number of `cancel` calls
    pub cancellations: u32,
    /// Pauses requested, in order
    pub pauses: Vec<Duration>,
}

impl HeadlessScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_ticks(max_ticks: u64) -> Self {
        Self {
            max_ticks: Some(max_ticks),
            ..Self::default()
        }
    }
}

impl TickScheduler for HeadlessScheduler {
    fn next_tick(&mut self) -> bool {
        if self.is_cancelled() || self.max_ticks.is_some_and(|max| self.ticks >= max) {
            return false;
        }
        self.ticks += 1;
        true
    }

    fn cancel(&mut self) {
        self.cancellations += 1;
    }

    fn is_cancelled(&self) -> bool {
        self.cancellations > 0
    }

    fn pause(&mut self, duration: Duration) {
        self.pauses.push(duration);
    }
}
