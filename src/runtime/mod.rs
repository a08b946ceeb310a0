//! Runtime Module
//!
//! Non-deterministic outer shell: where elapsed time comes from and what
//! drives frames. Everything under `game/` stays pure of both.
//!
//! - `clock`: Elapsed-time sources
//! - `runner`: Session driver and the paced async frame loop

pub mod clock;
pub mod runner;

pub use clock::{Clock, ManualClock, SystemClock};
pub use runner::GameLoop;
