//! Game Logic Module
//!
//! All game simulation code. Deterministic given the state's RNG seed.
//!
//! ## Module Structure
//!
//! - `state`: Arena, player and coin state
//! - `command`: Actions and ordered command batches
//! - `config`: Tuning values for the pipeline
//! - `evaluate`: Command evaluation (moves, attacks)
//! - `collision`: Coin pickup and player absorption
//! - `coin`: Coin repopulation and free-cell search
//! - `tick`: The per-tick pipeline
//! - `events`: Events emitted during a tick

pub mod state;
pub mod command;
pub mod config;
pub mod evaluate;
pub mod collision;
pub mod coin;
pub mod tick;
pub mod events;

// Re-export key types
pub use state::{GameState, Player, PlayerId, Coin, StateError, get_initial_state};
pub use command::{Action, CommandBatch, CommandError};
pub use config::{ArenaConfig, ConfigError};
pub use coin::get_unoccupied_location;
pub use tick::{tick, game_logic, TickResult};
pub use events::{GameEvent, GameEventData};
