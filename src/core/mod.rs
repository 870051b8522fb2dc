//! Core deterministic primitives.
//!
//! Grid geometry, the seeded RNG and state hashing. Nothing in here knows
//! about players or coins.

pub mod grid;
pub mod rng;
pub mod hash;

// Re-export core types
pub use grid::{FieldSize, GridPos, reach_squared, within_reach};
pub use rng::DeterministicRng;
pub use hash::{StateHash, StateHasher, compute_state_hash};
