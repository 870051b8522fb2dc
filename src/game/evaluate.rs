//! Command Evaluation
//!
//! First pipeline stage: applies each queued command to the roster in
//! batch order. Commands for unknown or already-eliminated players are
//! skipped.

use tracing::{debug, info};
#[cfg(feature = "debug-tracing")]
use tracing::trace;

use crate::game::command::{Action, CommandBatch};
use crate::game::config::ArenaConfig;
use crate::game::events::{EliminationCause, GameEvent};
use crate::game::state::{GameState, PlayerId, clamp_score};

/// Apply every command in the batch, in order.
pub fn evaluate_commands(state: &mut GameState, commands: &CommandBatch, config: &ArenaConfig) {
    for (player_id, action) in commands.iter() {
        let Some(index) = state.player_index(player_id) else {
            debug!("Ignoring {} for inactive player {}", action, player_id);
            continue;
        };

        match action.step() {
            Some((dx, dy)) => apply_move(state, index, dx, dy, config),
            None => apply_attack(state, index, config),
        }
    }
}

/// Step one cell, paying the movement cost. Off-field steps do nothing.
fn apply_move(state: &mut GameState, index: usize, dx: i32, dy: i32, config: &ArenaConfig) {
    let field = state.field;
    let tick = state.tick;
    let player = &mut state.players[index];
    let target = player.position.offset(dx, dy);

    if !field.allows_move_to(target) {
        debug!("Rejected move of {} to {}", player.id, target);
        let event = GameEvent::move_rejected(tick, player.id.clone(), target);
        state.push_event(event);
        return;
    }

    player.position = target;
    player.score = clamp_score(player.score - player.score * config.move_cost_rate);

    let event = GameEvent::player_moved(tick, player.id.clone(), target, player.score);
    state.push_event(event);
}

/// Blast every other player, then remove the attacker.
///
/// Damage falls off with squared distance and can never take a target
/// below the score floor, so the attacker is the only one eliminated.
fn apply_attack(state: &mut GameState, index: usize, config: &ArenaConfig) {
    let tick = state.tick;
    let attacker_id = state.players[index].id.clone();
    let origin = state.players[index].position;
    let damage = state.players[index].score * config.attack_multiplier;

    let mut events = Vec::new();
    for (i, target) in state.players.iter_mut().enumerate() {
        if i == index {
            continue;
        }

        let distance = origin.distance_squared(target.position);
        let actual = (damage - distance).max(0.0);
        target.score = clamp_score(target.score - actual);

        #[cfg(feature = "debug-tracing")]
        trace!("{} hits {} for {:.3}", attacker_id, target.id, actual);

        if actual > 0.0 {
            events.push(GameEvent::player_damaged(
                tick,
                target.id.clone(),
                attacker_id.clone(),
                actual,
                target.score,
            ));
        }
    }

    state.pending_events.extend(events);
    self_destruct(state, &attacker_id);
}

fn self_destruct(state: &mut GameState, attacker_id: &PlayerId) {
    if state.eliminate(attacker_id, attacker_id).is_some() {
        info!("Player {} self-destructed", attacker_id);
        let event = GameEvent::player_eliminated(
            state.tick,
            attacker_id.clone(),
            attacker_id.clone(),
            EliminationCause::SelfDestruct,
        );
        state.push_event(event);
    }
}

/// Convenience for applying a single action outside a full tick.
pub fn apply_action(state: &mut GameState, player_id: &PlayerId, action: Action, config: &ArenaConfig) {
    let batch = CommandBatch::new().with(player_id.clone(), action);
    evaluate_commands(state, &batch, config);
}
