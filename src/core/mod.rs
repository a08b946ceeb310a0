//! Core deterministic primitives.
//!
//! Seeded randomness and state fingerprinting. Everything the simulation
//! needs to replay a session bit-for-bit lives here.

pub mod rng;
pub mod hash;

// Re-export core types
pub use rng::DeterministicRng;
pub use hash::{compute_state_hash, StateHash, StateHasher};
