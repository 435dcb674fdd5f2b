//! Fixed cadence simulation tick
//!
//! One call to `tick` is one frame. Inputs are applied as they arrive via
//! `apply_input`, between ticks, and are ignored when the stage does not
//! accept them.

use super::results;
use super::stage::Stage;
use super::state::Round;

/// Discrete player inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundInput {
    /// Begin the round (ReadyToPlay only)
    Start,
    /// Flap (Playing only)
    Tap,
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Round not started; only the idle animation moved
    Idle,
    /// A Playing frame was simulated
    Advanced,
    /// This frame ended the round and finalized its record
    Finished,
    /// Round already over; nothing ran
    Halted,
}

/// Apply an input immediately. Returns whether it had any effect.
pub fn apply_input(round: &mut Round, input: RoundInput) -> bool {
    match input {
        RoundInput::Start => {
            if !round.stages.start() {
                return false;
            }
            round.clock.reset();
            let tax = round.schedule.evaluate(0);
            round.economy.set_rates(round.ball.production_rate(), tax);
            log::info!(
                "Round started: {}s after a {}s lead-in, {} tax zones",
                round.config.round_duration_seconds,
                round.config.timer_start_delay_seconds,
                round.schedule.zones().len()
            );
            true
        }
        RoundInput::Tap => match round.stage() {
            Stage::Playing => {
                let frame = round.clock.frames_passed;
                round.ball.flap(round.economy.score_per_second);
                round.economy.record_flap(frame);
                true
            }
            Stage::ReadyToPlay | Stage::Finished => false,
        },
    }
}

/// Advance the round by one frame
pub fn tick(round: &mut Round) -> TickOutcome {
    match round.stage() {
        Stage::ReadyToPlay => {
            round.clock.advance();
            round.clock.advance_idle_animation();
            TickOutcome::Idle
        }
        Stage::Finished => TickOutcome::Halted,
        Stage::Playing => {
            round.clock.advance();
            let frame = round.clock.frames_passed;

            round.ball.step();
            round.ball.record_trail(round.config.scroll_speed_px_per_frame);

            let tax = round.schedule.evaluate(frame);
            round.economy.set_rates(round.ball.production_rate(), tax);

            let end_frame = round.config.end_frame();
            let timer_running = frame >= round.config.delay_frames() && frame < end_frame;
            if timer_running && round.clock.is_second_boundary() {
                round.economy.score_tick(frame);
            }

            if frame >= end_frame {
                finish(round);
                TickOutcome::Finished
            } else {
                TickOutcome::Advanced
            }
        }
    }
}

fn finish(round: &mut Round) {
    if !round.stages.finish() {
        return;
    }
    debug_assert!(round.record.is_none(), "round finalized twice");
    round.record = Some(results::finalize(&round.economy, &round.config));
    log::info!(
        "Round finished at frame {} (timer {}s)",
        round.clock.frames_passed,
        round.timer_seconds()
    );
}
