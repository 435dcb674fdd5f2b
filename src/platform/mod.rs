//! Platform abstraction layer
//!
//! Handles everything between the pure simulation and a host:
//! - Tick scheduling (real-time or headless)
//! - Input events
//! - Session lifecycle (persistence hand-off, round-complete signal)

pub mod input;
pub mod scheduler;
pub mod session;

pub use input::{Autopilot, InputSource, ScriptedInput};
pub use scheduler::{HeadlessScheduler, IntervalScheduler, TickScheduler};
pub use session::{InputEvent, RoundObserver, Session, SessionStatus};
