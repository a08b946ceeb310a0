//! Game Logic Module
//!
//! All per-frame simulation code. Deterministic for a given seed,
//! input sequence and elapsed-time sequence.
//!
//! ## Module Structure
//!
//! - `config`: Tunables and loading
//! - `input`: Input aggregation, frames and recording
//! - `state`: Avatar, pickups and the game state
//! - `physics`: Avatar movement integration
//! - `collision`: Avatar-vs-pickup distance tests
//! - `pickup`: Pickup spawning, animation and collection
//! - `respawn`: Deferred respawn queue
//! - `camera`: Orbiting follow camera
//! - `events`: Frame events
//! - `tick`: The frame scheduler and replay

pub mod config;
pub mod input;
pub mod state;
pub mod physics;
pub mod collision;
pub mod pickup;
pub mod respawn;
pub mod camera;
pub mod events;
pub mod tick;

// Re-export key types
pub use config::{GameConfig, ConfigError};
pub use input::{Direction, InputAggregator, InputFrame, InputRecording};
pub use state::{AvatarState, GameState, Pickup, VerticalState};
pub use camera::CameraState;
pub use events::{GameEvent, GameEventData};
pub use tick::{frame, replay, FrameResult};
