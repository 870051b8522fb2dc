//! Game Events
//!
//! Events generated during a tick. The simulation does not consume them;
//! they exist so the caller can broadcast or log what happened.

use serde::{Serialize, Deserialize};
use crate::core::grid::GridPos;
use crate::game::state::PlayerId;

/// Why a player left the roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EliminationCause {
    /// Used the attack action
    SelfDestruct,
    /// Absorbed by a larger player
    Absorbed,
}

/// Game event data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEventData {
    /// Player stepped to a new cell
    PlayerMoved {
        /// Who moved
        player_id: PlayerId,
        /// Destination cell
        to: GridPos,
        /// Score after the move cost
        new_score: f64,
    },

    /// Move would have left the field
    MoveRejected {
        /// Who tried to move
        player_id: PlayerId,
        /// Out-of-bounds cell
        attempted: GridPos,
    },

    /// Player took blast damage from an attack
    PlayerDamaged {
        /// Player hit by the blast
        target_id: PlayerId,
        /// Player who attacked
        attacker_id: PlayerId,
        /// Damage after distance falloff
        amount: f64,
        /// Target score after the floor
        new_score: f64,
    },

    /// Player left the roster
    PlayerEliminated {
        /// Removed player
        victim_id: PlayerId,
        /// Responsible player (the victim itself for a self-destruct)
        eliminated_by: PlayerId,
        /// How it happened
        cause: EliminationCause,
    },

    /// Player picked up a coin
    CoinCollected {
        /// Collector
        player_id: PlayerId,
        /// Cell the coin was on
        position: GridPos,
        /// Score gained
        growth: f64,
        /// Score after growth
        new_score: f64,
    },

    /// Larger player absorbed a smaller one
    PlayerAbsorbed {
        /// Larger player
        winner_id: PlayerId,
        /// Absorbed player
        loser_id: PlayerId,
        /// Loser's score, added to the winner
        gained: f64,
        /// Winner score after absorbing
        new_score: f64,
    },

    /// Coin placed by the repopulator
    CoinSpawned {
        /// Cell the coin was placed on
        position: GridPos,
        /// Rolled deadliness
        is_deadly: bool,
    },
}

/// A game event with the tick it happened on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Tick number
    pub tick: u64,
    /// Event payload
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(tick: u64, data: GameEventData) -> Self {
        Self { tick, data }
    }

    /// Player moved.
    pub fn player_moved(tick: u64, player_id: PlayerId, to: GridPos, new_score: f64) -> Self {
        Self::new(tick, GameEventData::PlayerMoved { player_id, to, new_score })
    }

    /// Move rejected at the field edge.
    pub fn move_rejected(tick: u64, player_id: PlayerId, attempted: GridPos) -> Self {
        Self::new(tick, GameEventData::MoveRejected { player_id, attempted })
    }

    /// Attack damage dealt.
    pub fn player_damaged(
        tick: u64,
        target_id: PlayerId,
        attacker_id: PlayerId,
        amount: f64,
        new_score: f64,
    ) -> Self {
        Self::new(tick, GameEventData::PlayerDamaged {
            target_id,
            attacker_id,
            amount,
            new_score,
        })
    }

    /// Player eliminated.
    pub fn player_eliminated(
        tick: u64,
        victim_id: PlayerId,
        eliminated_by: PlayerId,
        cause: EliminationCause,
    ) -> Self {
        Self::new(tick, GameEventData::PlayerEliminated {
            victim_id,
            eliminated_by,
            cause,
        })
    }

    /// Coin collected.
    pub fn coin_collected(
        tick: u64,
        player_id: PlayerId,
        position: GridPos,
        growth: f64,
        new_score: f64,
    ) -> Self {
        Self::new(tick, GameEventData::CoinCollected {
            player_id,
            position,
            growth,
            new_score,
        })
    }

    /// Player absorbed.
    pub fn player_absorbed(
        tick: u64,
        winner_id: PlayerId,
        loser_id: PlayerId,
        gained: f64,
        new_score: f64,
    ) -> Self {
        Self::new(tick, GameEventData::PlayerAbsorbed {
            winner_id,
            loser_id,
            gained,
            new_score,
        })
    }

    /// Coin spawned.
    pub fn coin_spawned(tick: u64, position: GridPos, is_deadly: bool) -> Self {
        Self::new(tick, GameEventData::CoinSpawned { position, is_deadly })
    }

    /// Id of the eliminated player, if this is an elimination.
    pub fn eliminated_player(&self) -> Option<&PlayerId> {
        match &self.data {
            GameEventData::PlayerEliminated { victim_id, .. } => Some(victim_id),
            _ => None,
        }
    }

    /// Serialize to JSON for the transport layer.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eliminated_player() {
        let id = PlayerId::from("a");
        let event = GameEvent::player_eliminated(3, id.clone(), id.clone(), EliminationCause::SelfDestruct);
        assert_eq!(event.eliminated_player(), Some(&id));

        let spawn = GameEvent::coin_spawned(3, GridPos::new(1, 2), false);
        assert_eq!(spawn.eliminated_player(), None);
    }

    #[test]
    fn test_event_json_shape() {
        let event = GameEvent::player_absorbed(7, PlayerId::from("a"), PlayerId::from("b"), 10.0, 60.0);
        let json = event.to_json().unwrap();
        assert!(json.contains("\"tick\":7"));
        assert!(json.contains("PlayerAbsorbed"));
        assert!(json.contains("\"winner_id\":\"a\""));

        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
