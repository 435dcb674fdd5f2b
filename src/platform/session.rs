//! Session driver
//!
//! Owns one round and connects it to the outside world: input events in,
//! snapshots and the finalized record out.

use std::time::Duration;

use super::input::InputSource;
use super::scheduler::TickScheduler;
use crate::config::{ConfigError, RoundConfig};
use crate::persistence::ResultsSink;
use crate::sim::{Round, RoundInput, RoundRecord, Snapshot, TickOutcome, apply_input, tick};

/// Events delivered to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Start,
    Tap,
    Tick,
}

impl From<RoundInput> for InputEvent {
    fn from(input: RoundInput) -> Self {
        match input {
            RoundInput::Start => InputEvent::Start,
            RoundInput::Tap => InputEvent::Tap,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    Finished,
}

/// Presentation-side hooks
pub trait RoundObserver {
    /// Called after every tick with the frame to draw
    fn on_frame(&mut self, _snapshot: &Snapshot) {}

    /// Called once, a presentation delay after the round finished
    fn on_round_complete(&mut self, _record: &RoundRecord) {}
}

impl RoundObserver for () {}

pub struct Session<S: ResultsSink, O: RoundObserver> {
    round: Round,
    sink: S,
    observer: O,
    /// Set once the round-complete signal has gone out
    completed: bool,
}

impl<S: ResultsSink, O: RoundObserver> Session<S, O> {
    pub fn new(config: RoundConfig, sink: S, observer: O) -> Result<Self, ConfigError> {
        Ok(Self {
            round: Round::new(config)?,
            sink,
            observer,
            completed: false,
        })
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_parts(self) -> (Round, S, O) {
        (self.round, self.sink, self.observer)
    }

    /// Apply one event synchronously
    pub fn handle(&mut self, event: InputEvent) -> SessionStatus {
        match event {
            InputEvent::Start => {
                apply_input(&mut self.round, RoundInput::Start);
            }
            InputEvent::Tap => {
                apply_input(&mut self.round, RoundInput::Tap);
            }
            InputEvent::Tick => match tick(&mut self.round) {
                TickOutcome::Idle | TickOutcome::Advanced => {
                    self.observer.on_frame(&self.round.snapshot());
                }
                TickOutcome::Finished => {
                    self.observer.on_frame(&self.round.snapshot());
                    self.persist();
                    return SessionStatus::Finished;
                }
                TickOutcome::Halted => return SessionStatus::Finished,
            },
        }
        if self.round.record().is_some() {
            SessionStatus::Finished
        } else {
            SessionStatus::Running
        }
    }

    /// Hand the record to the sink, if the round has an id
    fn persist(&mut self) {
        let Some(record) = self.round.record.as_ref() else {
            return;
        };
        match self.round.config.round_id.as_deref() {
            Some(round_id) => {
                if let Err(e) = self.sink.submit(round_id, record) {
                    log::warn!("Failed to persist round {}: {}", round_id, e);
                }
            }
            None => log::info!("No round id configured, results not persisted"),
        }
    }

    /// Whether the round-complete signal has been emitted
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Drive the round until it finishes or the scheduler stops.
    ///
    /// On finish the scheduler is cancelled, the presentation delay elapses,
    /// then the observer is told the round is complete. A session that has
    /// already signalled completion returns its record without ticking.
    pub fn run<T, I>(&mut self, scheduler: &mut T, input: &mut I) -> Option<&RoundRecord>
    where
        T: TickScheduler + ?Sized,
        I: InputSource + ?Sized,
    {
        if self.completed {
            return self.round.record();
        }
        while scheduler.next_tick() {
            for event in input.poll(&self.round.snapshot()) {
                self.handle(event.into());
            }
            if self.handle(InputEvent::Tick) == SessionStatus::Finished {
                self.complete(scheduler);
                break;
            }
        }
        self.round.record()
    }

    fn complete<T: TickScheduler + ?Sized>(&mut self, scheduler: &mut T) {
        scheduler.cancel();
        let delay = u64::from(self.round.config.presentation_delay_ms);
        scheduler.pause(Duration::from_millis(delay));
        if let Some(record) = self.round.record.as_ref() {
            self.observer.on_round_complete(record);
            self.completed = true;
        }
    }
}
