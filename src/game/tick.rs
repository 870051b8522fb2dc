//! Authoritative Simulation Tick
//!
//! The four-stage pipeline run once per game tick. Deterministic for a
//! given seed and command sequence.

use tracing::debug;

use crate::game::coin::repopulate_coins;
use crate::game::collision::{resolve_coin_collisions, resolve_player_collisions};
use crate::game::command::CommandBatch;
use crate::game::config::ArenaConfig;
use crate::game::evaluate::evaluate_commands;
use crate::game::events::GameEvent;
use crate::game::state::{GameState, PlayerId};

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick
    pub events: Vec<GameEvent>,
    /// Players eliminated this tick, in elimination order
    pub eliminated: Vec<PlayerId>,
}

/// Run one simulation tick.
///
/// # Stages
///
/// 1. Apply commands (moves and attacks)
/// 2. Collect coins
/// 3. Merge overlapping players
/// 4. Refill coins
///
/// Each stage sees the previous stage's removals. The tick counter is
/// advanced after the last stage, so events carry the number of the tick
/// that produced them.
pub fn tick(state: &mut GameState, commands: &CommandBatch, config: &ArenaConfig) -> TickResult {
    evaluate_commands(state, commands, config);
    resolve_coin_collisions(state, config);
    resolve_player_collisions(state);
    repopulate_coins(state, config);

    let events = state.take_events();
    let eliminated: Vec<PlayerId> = events
        .iter()
        .filter_map(|e| e.eliminated_player().cloned())
        .collect();

    debug!(
        "Tick {}: {} commands, {} players, {} coins, {} eliminated",
        state.tick,
        commands.len(),
        state.players.len(),
        state.coins.len(),
        eliminated.len()
    );

    state.tick += 1;

    TickResult { events, eliminated }
}

/// Run one tick with the default rules and hand the state back.
pub fn game_logic<'a>(state: &'a mut GameState, commands: &CommandBatch) -> &'a mut GameState {
    tick(state, commands, &ArenaConfig::default());
    state
}

/// Replay a recorded command sequence from an initial state.
///
/// Returns the final state and every event produced.
pub fn replay(
    initial_state: GameState,
    frames: &[CommandBatch],
    config: &ArenaConfig,
) -> (GameState, Vec<GameEvent>) {
    let mut state = initial_state;
    let mut all_events = Vec::new();

    for commands in frames {
        let result = tick(&mut state, commands, config);
        all_events.extend(result.events);
    }

    (state, all_events)
}
