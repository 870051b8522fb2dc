//! # Coin Arena Server
//!
//! Deterministic per-tick simulation for a top-down grid arena: players
//! move, pick up coins to grow, blast each other, and absorb smaller
//! players on contact.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    COIN ARENA SERVER                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── grid.rs     - Grid positions, field bounds, reach test  │
//! │  ├── rng.rs      - Deterministic Xorshift128+ PRNG           │
//! │  └── hash.rs     - State hashing for verification            │
//! │                                                              │
//! │  game/           - Game logic (deterministic)                │
//! │  ├── command.rs  - Actions and command batches               │
//! │  ├── config.rs   - Tuning values and config loading          │
//! │  ├── state.rs    - Arena, player and coin state              │
//! │  ├── evaluate.rs - Move and attack application               │
//! │  ├── collision.rs- Coin pickup and player absorption         │
//! │  ├── coin.rs     - Coin repopulation                         │
//! │  ├── events.rs   - Events emitted during a tick              │
//! │  └── tick.rs     - Authoritative simulation pipeline         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! Given identical initial state, RNG seed and command batches, the
//! simulation produces identical results. All randomness comes from the
//! seeded Xorshift128+ owned by the state.
//!
//! Transport, sessions and player spawning policy belong to the caller.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;

// Re-export commonly used types
pub use core::grid::{FieldSize, GridPos};
pub use core::rng::DeterministicRng;
pub use game::command::{Action, CommandBatch};
pub use game::config::ArenaConfig;
pub use game::state::{GameState, Player, PlayerId, Coin, get_initial_state};
pub use game::coin::get_unoccupied_location;
pub use game::tick::{tick, game_logic, TickResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tick rate the demo binary simulates (Hz)
pub const TICK_RATE: u32 = 10;
