//! # Cube Chase
//!
//! Frame-driven simulation core for a small 3D collection game: steer an
//! avatar around a bounded floor, jump, and touch floating cubes to score.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         CUBE CHASE                           │
//! ├──────────────────────────────────────────────────────────────┤
//! │  core/            - Deterministic primitives                 │
//! │  ├── rng.rs       - Seeded Xorshift128+ PRNG                 │
//! │  └── hash.rs      - State fingerprints                       │
//! │                                                              │
//! │  game/            - Per-frame simulation (deterministic)     │
//! │  ├── config.rs    - Tunables, JSON/env loading               │
//! │  ├── input.rs     - Keyboard + touch merge, recording        │
//! │  ├── state.rs     - Avatar, pickups, score                   │
//! │  ├── physics.rs   - Movement, jump, gravity, bounds          │
//! │  ├── collision.rs - Avatar-vs-pickup reach tests             │
//! │  ├── pickup.rs    - Spawn, bob, collect                      │
//! │  ├── respawn.rs   - Deferred respawn queue                   │
//! │  ├── camera.rs    - Orbiting follow camera                   │
//! │  └── tick.rs      - Frame scheduler and replay               │
//! │                                                              │
//! │  scene/           - Render surface seam + headless scene     │
//! │  runtime/         - Clocks and the frame loop (async)        │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//!
//! Given the same seed, the same per-frame input and the same elapsed-time
//! sequence, `game/` produces bit-identical state:
//! - No HashMap (BTreeMap/Vec for ordered iteration)
//! - No wall-clock reads (elapsed time is passed in)
//! - All randomness from the seeded Xorshift128+

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod scene;
pub mod runtime;

// Re-export commonly used types
pub use core::rng::DeterministicRng;
pub use game::config::{ConfigError, GameConfig};
pub use game::input::{InputAggregator, InputFrame, InputRecording};
pub use game::state::GameState;
pub use scene::{HeadlessScene, Scene};
pub use runtime::{GameLoop, ManualClock, SystemClock};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Display refresh rate the real-time loop paces itself to (Hz)
pub const DEFAULT_FRAME_RATE: u32 = 60;
