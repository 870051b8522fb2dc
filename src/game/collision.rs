//! Collision Resolution
//!
//! Coin pickup and player-vs-player absorption. Both use the reach test
//! from [`crate::core::grid`]: something of score `s` reaches every cell
//! within squared distance `s² / 100`.

use tracing::{info, trace};

use crate::core::grid::within_reach;
use crate::game::config::ArenaConfig;
use crate::game::events::{EliminationCause, GameEvent};
use crate::game::state::{Coin, GameState, Player, PlayerId};

// =============================================================================
// COINS
// =============================================================================

/// Does this player reach the coin?
#[inline]
pub fn reaches_coin(player: &Player, coin: &Coin) -> bool {
    within_reach(coin.position, player.position, player.score)
}

/// Remove every coin some player reaches and grow that player.
///
/// Coins are visited in order; the first player in roster order that
/// reaches a coin takes it. Growth applies immediately, so a player's
/// reach can widen within the same pass.
pub fn resolve_coin_collisions(state: &mut GameState, config: &ArenaConfig) {
    let coins = std::mem::take(&mut state.coins);
    let mut kept = Vec::with_capacity(coins.len());
    let mut events = Vec::new();

    for coin in coins {
        let Some(player) = state.players.iter_mut().find(|p| reaches_coin(p, &coin)) else {
            kept.push(coin);
            continue;
        };

        let growth = config.coin_growth(player.score);
        player.score += growth;
        trace!("{} collected coin at {} (+{:.3})", player.id, coin.position, growth);

        events.push(GameEvent::coin_collected(
            state.tick,
            player.id.clone(),
            coin.position,
            growth,
            player.score,
        ));
    }

    state.coins = kept;
    state.pending_events.extend(events);
}

// =============================================================================
// PLAYERS
// =============================================================================

/// Outcome of two overlapping players meeting.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerCollision {
    /// The larger player
    pub winner: PlayerId,
    /// The smaller player, to be removed
    pub loser: PlayerId,
}

/// Do two players overlap?
///
/// The larger score's reach decides, which makes the test symmetric:
/// `overlaps(a, b) == overlaps(b, a)`.
#[inline]
pub fn players_overlap(a: &Player, b: &Player) -> bool {
    within_reach(a.position, b.position, a.score.max(b.score))
}

/// Decide a meeting between two players.
///
/// Returns `None` if they don't overlap or their scores are exactly equal.
pub fn check_player_collision(a: &Player, b: &Player) -> Option<PlayerCollision> {
    if a.id == b.id || !players_overlap(a, b) {
        return None;
    }

    if a.score > b.score {
        Some(PlayerCollision { winner: a.id.clone(), loser: b.id.clone() })
    } else if b.score > a.score {
        Some(PlayerCollision { winner: b.id.clone(), loser: a.id.clone() })
    } else {
        None
    }
}

/// First other player, in roster order, overlapping the player at `index`.
pub fn find_overlapping(players: &[Player], index: usize) -> Option<usize> {
    let subject = players.get(index)?;
    players
        .iter()
        .enumerate()
        .find(|(i, other)| *i != index && players_overlap(subject, other))
        .map(|(i, _)| i)
}

/// Merge overlapping players, smaller into larger.
///
/// Walks a snapshot of the roster taken on entry. Players removed earlier
/// in the pass are skipped. Each subject meets only its first overlapping
/// player; a tie with that player leaves both untouched.
pub fn resolve_player_collisions(state: &mut GameState) {
    let snapshot: Vec<PlayerId> = state.players.iter().map(|p| p.id.clone()).collect();

    for subject_id in &snapshot {
        let Some(index) = state.player_index(subject_id) else {
            continue;
        };
        let Some(other) = find_overlapping(&state.players, index) else {
            continue;
        };

        let Some(collision) = check_player_collision(&state.players[index], &state.players[other])
        else {
            trace!("{} and {} tie, no absorption", subject_id, state.players[other].id);
            continue;
        };

        absorb(state, &collision);
    }
}

/// Move the loser's whole score to the winner and eliminate the loser.
fn absorb(state: &mut GameState, collision: &PlayerCollision) {
    let Some(loser) = state.eliminate(&collision.loser, &collision.winner) else {
        return;
    };
    let Some(winner) = state.player_mut(&collision.winner) else {
        return;
    };

    winner.score += loser.score;
    let new_score = winner.score;

    info!(
        "Player {} absorbed {} (+{:.3}, now {:.3})",
        collision.winner, collision.loser, loser.score, new_score
    );

    let tick = state.tick;
    state.push_event(GameEvent::player_absorbed(
        tick,
        collision.winner.clone(),
        collision.loser.clone(),
        loser.score,
        new_score,
    ));
    state.push_event(GameEvent::player_eliminated(
        tick,
        collision.loser.clone(),
        collision.winner.clone(),
        EliminationCause::Absorbed,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::GridPos;

    fn id(s: &str) -> PlayerId {
        PlayerId::from(s)
    }

    fn state_with(players: &[(&str, i32, i32, f64)]) -> GameState {
        let mut state = GameState::new(1);
        for (name, x, y, score) in players {
            state.add_player(*name, GridPos::new(*x, *y), *score).unwrap();
        }
        state
    }

    #[test]
    fn test_coin_in_reach_collected() {
        let mut state = state_with(&[("a", 10, 10, 30.0)]);
        // reach² = 9
        state.coins.push(Coin::new(GridPos::new(13, 10), false));
        state.coins.push(Coin::new(GridPos::new(14, 10), true));

        resolve_coin_collisions(&mut state, &ArenaConfig::default());

        assert_eq!(state.coins, vec![Coin::new(GridPos::new(14, 10), true)]);
        // 4 - 4 * 30 / 300 = 3.6
        assert!((state.players[0].score - 33.6).abs() < 1e-12);
    }

    #[test]
    fn test_coin_goes_to_first_player_in_order() {
        let mut state = state_with(&[("a", 5, 5, 10.0), ("b", 5, 5, 10.0)]);
        state.coins.push(Coin::new(GridPos::new(5, 5), false));

        resolve_coin_collisions(&mut state, &ArenaConfig::default());

        assert!(state.coins.is_empty());
        assert!(state.player(&id("a")).unwrap().score > 10.0);
        assert_eq!(state.player(&id("b")).unwrap().score, 10.0);
    }

    #[test]
    fn test_coin_growth_vanishes_at_cap() {
        let mut state = state_with(&[("a", 5, 5, 300.0)]);
        state.coins.push(Coin::new(GridPos::new(6, 6), false));

        resolve_coin_collisions(&mut state, &ArenaConfig::default());

        assert!(state.coins.is_empty());
        assert_eq!(state.players[0].score, 300.0);
    }

    #[test]
    fn test_untouched_coins_kept_in_order() {
        let mut state = state_with(&[("a", 0, 0, 1.0)]);
        let far = [GridPos::new(50, 50), GridPos::new(20, 3), GridPos::new(7, 90)];
        for pos in far {
            state.coins.push(Coin::new(pos, false));
        }

        resolve_coin_collisions(&mut state, &ArenaConfig::default());

        let positions: Vec<_> = state.coins.iter().map(|c| c.position).collect();
        assert_eq!(positions, far.to_vec());
    }

    #[test]
    fn test_larger_absorbs_smaller() {
        // reach² of a = 25, distance² = 25
        let mut state = state_with(&[("a", 0, 0, 50.0), ("b", 3, 4, 10.0)]);

        resolve_player_collisions(&mut state);

        assert_eq!(state.players.len(), 1);
        assert_eq!(state.player(&id("a")).unwrap().score, 60.0);
        assert_eq!(state.eliminated_players.get(&id("b")), Some(&id("a")));
    }

    #[test]
    fn test_smaller_subject_still_loses() {
        // b comes first in roster order; a's reach still decides
        let mut state = state_with(&[("b", 3, 4, 10.0), ("a", 0, 0, 50.0)]);

        resolve_player_collisions(&mut state);

        assert_eq!(state.players.len(), 1);
        assert_eq!(state.players[0].id, id("a"));
        assert_eq!(state.eliminated_players.get(&id("b")), Some(&id("a")));
    }

    #[test]
    fn test_equal_scores_tie() {
        let mut state = state_with(&[("a", 0, 0, 20.0), ("b", 1, 1, 20.0)]);

        resolve_player_collisions(&mut state);

        assert_eq!(state.players.len(), 2);
        assert_eq!(state.players[0].score, 20.0);
        assert_eq!(state.players[1].score, 20.0);
        assert!(state.eliminated_players.is_empty());
    }

    #[test]
    fn test_no_overlap_is_normal_skip() {
        let mut state = state_with(&[("a", 0, 0, 10.0), ("b", 50, 50, 5.0)]);
        resolve_player_collisions(&mut state);
        assert_eq!(state.players.len(), 2);

        let mut lonely = state_with(&[("solo", 0, 0, 10.0)]);
        resolve_player_collisions(&mut lonely);
        assert_eq!(lonely.players.len(), 1);
    }

    #[test]
    fn test_chain_absorption_in_one_pass() {
        // a eats b, then the grown a eats c
        let mut state = state_with(&[
            ("a", 0, 0, 30.0),
            ("b", 1, 0, 20.0),
            ("c", 3, 3, 25.0),
        ]);

        resolve_player_collisions(&mut state);

        assert_eq!(state.players.len(), 1);
        assert_eq!(state.players[0].score, 75.0);
        assert_eq!(state.eliminated_players.get(&id("b")), Some(&id("a")));
        assert_eq!(state.eliminated_players.get(&id("c")), Some(&id("a")));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let small = Player::new("s", GridPos::new(0, 0), 5.0);
        let big = Player::new("b", GridPos::new(3, 3), 50.0);
        assert!(players_overlap(&small, &big));
        assert!(players_overlap(&big, &small));

        let collision = check_player_collision(&small, &big).unwrap();
        assert_eq!(collision.winner, id("b"));
        assert_eq!(collision.loser, id("s"));
    }

    #[test]
    fn test_find_overlapping_skips_self() {
        let players = vec![Player::new("a", GridPos::ZERO, 10.0)];
        assert_eq!(find_overlapping(&players, 0), None);
        assert_eq!(find_overlapping(&players, 3), None);
    }
}
