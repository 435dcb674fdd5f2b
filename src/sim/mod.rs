//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One frame per tick, no wall clock
//! - Every cadence derived from the frame counter
//! - Zones evaluated in declaration order
//! - No rendering or platform dependencies

pub mod ball;
pub mod clock;
pub mod economy;
pub mod results;
pub mod stage;
pub mod state;
pub mod tax;
pub mod tick;

pub use ball::{Ball, flap_thrust, production_rate};
pub use clock::Clock;
pub use economy::{Economy, FlapEvent};
pub use results::{RoundRecord, finalize, frame_to_timer_seconds};
pub use stage::{Stage, StageMachine};
pub use state::{Round, Snapshot};
pub use tax::{TaxRect, TaxSchedule, TaxZone};
pub use tick::{RoundInput, TickOutcome, apply_input, tick};
