//! Coin Spawning
//!
//! Deterministic coin placement from the state's seeded RNG.

use tracing::{debug, warn};

use crate::core::grid::GridPos;
use crate::game::config::{ArenaConfig, SPAWN_ATTEMPTS};
use crate::game::events::GameEvent;
use crate::game::state::{Coin, GameState};

/// Pick a random cell no player or coin is standing on, using the default
/// attempt budget.
pub fn get_unoccupied_location(state: &mut GameState) -> Option<GridPos> {
    find_unoccupied_location(state, SPAWN_ATTEMPTS)
}

/// Pick a random cell no player or coin is standing on.
///
/// Samples `[0, width) x [0, height)` up to `attempts` times, then scans the
/// field row by row for the first free cell. `None` only when every cell is
/// taken.
pub fn find_unoccupied_location(state: &mut GameState, attempts: u32) -> Option<GridPos> {
    for _ in 0..attempts {
        let cell = state.rng.random_cell(&state.field)?;
        if !state.is_occupied(cell) {
            return Some(cell);
        }
    }

    debug!("Random placement exhausted after {} attempts, scanning", attempts);
    state.field.spawn_cells().find(|cell| !state.is_occupied(*cell))
}

/// Top the coin pool back up to `config.coin_target`.
///
/// Each new coin is deadly with probability 1/2. Stops early if the field
/// has no free cell left.
pub fn repopulate_coins(state: &mut GameState, config: &ArenaConfig) {
    while state.coins.len() < config.coin_target {
        let Some(position) = find_unoccupied_location(state, config.spawn_attempts) else {
            warn!(
                "Field full, only {} of {} coins placed",
                state.coins.len(),
                config.coin_target
            );
            return;
        };

        let is_deadly = state.rng.next_coin_flip();
        state.coins.push(Coin::new(position, is_deadly));

        let tick = state.tick;
        state.push_event(GameEvent::coin_spawned(tick, position, is_deadly));
    }
}
