//! Game State Definitions
//!
//! All state types for the arena simulation. Players and coins keep
//! insertion order; the elimination record uses a BTreeMap so hashing
//! iterates deterministically.

use std::collections::BTreeMap;
use std::fmt;
use serde::{Serialize, Deserialize};

use crate::core::grid::{FieldSize, GridPos};
use crate::core::rng::DeterministicRng;
use crate::core::hash::{StateHash, StateHasher, compute_state_hash};
use crate::game::coin::get_unoccupied_location;
use crate::game::events::GameEvent;

/// Lowest score a player can have.
pub const MIN_SCORE: f64 = 1.0;

/// Floor a score at [`MIN_SCORE`].
#[inline]
pub fn clamp_score(score: f64) -> f64 {
    score.max(MIN_SCORE)
}

// =============================================================================
// PLAYER ID
// =============================================================================

/// Unique player identifier as supplied by the session layer.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Create from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow as str.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Debug for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayerId({})", self.0)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// PLAYER
// =============================================================================

/// An active player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Unique player ID
    pub id: PlayerId,

    /// Current cell
    pub position: GridPos,

    /// Health and size in one; never below [`MIN_SCORE`]
    pub score: f64,
}

impl Player {
    /// Create a new player.
    pub fn new(id: impl Into<PlayerId>, position: GridPos, score: f64) -> Self {
        Self {
            id: id.into(),
            position,
            score: clamp_score(score),
        }
    }

    /// Hash this player's state for verification.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_str(self.id.as_str());
        hasher.update_pos(self.position);
        hasher.update_f64(self.score);
    }
}

// =============================================================================
// COIN
// =============================================================================

/// A collectible coin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    /// Cell the coin sits on
    pub position: GridPos,

    /// Rolled at spawn; no resolution rule reads it yet
    pub is_deadly: bool,
}

impl Coin {
    /// Create a new coin.
    pub const fn new(position: GridPos, is_deadly: bool) -> Self {
        Self { position, is_deadly }
    }
}

// =============================================================================
// GAME STATE
// =============================================================================

/// Complete state of an arena.
///
/// Owned by the caller between ticks and mutated in place by
/// [`crate::game::tick::tick`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    /// Active players in insertion order
    pub players: Vec<Player>,

    /// Coins on the field in insertion order
    pub coins: Vec<Coin>,

    /// Field bounds
    pub field: FieldSize,

    /// Eliminated id -> id responsible (itself for a self-destruct)
    pub eliminated_players: BTreeMap<PlayerId, PlayerId>,

    /// Ticks completed so far
    pub tick: u64,

    /// RNG seed (for verification)
    pub rng_seed: u64,

    /// Deterministic RNG state; part of snapshots so a restored arena
    /// continues the same coin sequence
    pub rng: DeterministicRng,

    /// Events generated this tick (cleared each tick)
    #[serde(skip)]
    pub pending_events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Initial state with the default seed: no players, no coins, 100x100.
pub fn get_initial_state() -> GameState {
    GameState::default()
}

impl GameState {
    /// Create an empty 100x100 arena seeded with `rng_seed`.
    pub fn new(rng_seed: u64) -> Self {
        Self::with_field(FieldSize::default(), rng_seed)
    }

    /// Create an empty arena with a custom field size.
    pub fn with_field(field: FieldSize, rng_seed: u64) -> Self {
        Self {
            players: Vec::new(),
            coins: Vec::new(),
            field,
            eliminated_players: BTreeMap::new(),
            tick: 0,
            rng_seed,
            rng: DeterministicRng::new(rng_seed),
            pending_events: Vec::new(),
        }
    }

    /// Replace the random source.
    pub fn reseed(&mut self, rng_seed: u64) {
        self.rng_seed = rng_seed;
        self.rng = DeterministicRng::new(rng_seed);
    }

    /// Add a player at a given cell.
    pub fn add_player(
        &mut self,
        id: impl Into<PlayerId>,
        position: GridPos,
        score: f64,
    ) -> Result<(), StateError> {
        let id = id.into();
        if self.player_index(&id).is_some() {
            return Err(StateError::DuplicatePlayer(id));
        }
        if self.eliminated_players.contains_key(&id) {
            return Err(StateError::PlayerEliminated(id));
        }
        self.players.push(Player::new(id, position, score));
        Ok(())
    }

    /// Add a player with score 1 on a random free cell.
    pub fn spawn_player(&mut self, id: impl Into<PlayerId>) -> Result<GridPos, StateError> {
        let position = get_unoccupied_location(self)
            .ok_or(StateError::FieldFull)?;
        self.add_player(id, position, MIN_SCORE)?;
        Ok(position)
    }

    /// Roster index of a player.
    pub fn player_index(&self, id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| &p.id == id)
    }

    /// Get a player by ID.
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// Get a player mutably by ID.
    pub fn player_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| &p.id == id)
    }

    /// Is a player or coin on this cell?
    pub fn is_occupied(&self, pos: GridPos) -> bool {
        self.players.iter().any(|p| p.position == pos)
            || self.coins.iter().any(|c| c.position == pos)
    }

    /// Remove a player from the roster and record who eliminated them.
    ///
    /// Returns the removed player, or `None` if they were not active.
    pub fn eliminate(&mut self, victim_id: &PlayerId, eliminated_by: &PlayerId) -> Option<Player> {
        let index = self.player_index(victim_id)?;
        let victim = self.players.remove(index);
        self.eliminated_players
            .insert(victim.id.clone(), eliminated_by.clone());
        Some(victim)
    }

    /// Was this id eliminated at some point?
    pub fn is_eliminated(&self, id: &PlayerId) -> bool {
        self.eliminated_players.contains_key(id)
    }

    /// Compute hash of current state for verification.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.tick, self.rng_seed, |hasher| {
            hasher.update_i32(self.field.width);
            hasher.update_i32(self.field.height);

            hasher.update_u32(self.players.len() as u32);
            for player in &self.players {
                player.hash_into(hasher);
            }

            hasher.update_u32(self.coins.len() as u32);
            for coin in &self.coins {
                hasher.update_pos(coin.position);
                hasher.update_bool(coin.is_deadly);
            }

            // BTreeMap iterates sorted
            for (victim, by) in &self.eliminated_players {
                hasher.update_str(victim.as_str());
                hasher.update_str(by.as_str());
            }

            let rng_state = self.rng.state();
            hasher.update_u64(rng_state[0]);
            hasher.update_u64(rng_state[1]);
        })
    }

    /// Serialize a snapshot for the transport layer.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Push a game event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }
}

/// Errors from roster management outside the tick.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StateError {
    /// Player id already active.
    #[error("Player {0} is already in the arena")]
    DuplicatePlayer(PlayerId),

    /// Player id was eliminated earlier.
    #[error("Player {0} was eliminated and cannot rejoin")]
    PlayerEliminated(PlayerId),

    /// No free cell to spawn on.
    #[error("No unoccupied cell left on the field")]
    FieldFull,
}

// =============================================================================
// TESTS
// =============================================================================
