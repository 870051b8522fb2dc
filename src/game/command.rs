//! Player Commands
//!
//! One action per player per tick, kept in the order the caller supplied
//! them. Command order decides same-tick interactions, so the batch is an
//! ordered list rather than a sorted map.

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::game::state::PlayerId;

// =============================================================================
// ACTION
// =============================================================================

/// A single player's intended action for the tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// y - 1
    Up,
    /// y + 1
    Down,
    /// x - 1
    Left,
    /// x + 1
    Right,
    /// Blast every other player, then self-destruct
    Space,
}

impl Action {
    /// Every action in token order.
    pub const ALL: [Action; 5] = [
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::Space,
    ];

    /// Grid step for movement actions; `None` for the attack.
    #[inline]
    pub fn step(self) -> Option<(i32, i32)> {
        match self {
            Action::Up => Some((0, -1)),
            Action::Down => Some((0, 1)),
            Action::Left => Some((-1, 0)),
            Action::Right => Some((1, 0)),
            Action::Space => None,
        }
    }

    /// Wire token.
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Up => "up",
            Action::Down => "down",
            Action::Left => "left",
            Action::Right => "right",
            Action::Space => "space",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Action::Up),
            "down" => Ok(Action::Down),
            "left" => Ok(Action::Left),
            "right" => Ok(Action::Right),
            "space" => Ok(Action::Space),
            other => Err(CommandError::UnknownAction(other.to_owned())),
        }
    }
}

/// Command parsing errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommandError {
    /// Token is not one of the five actions.
    #[error("Unknown action: {0:?}")]
    UnknownAction(String),

    /// Batch is not a JSON object of id -> token.
    #[error("Malformed command batch: {0}")]
    Malformed(String),
}

// =============================================================================
// COMMAND BATCH
// =============================================================================

/// Commands for one tick, in insertion order, at most one per player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandBatch {
    commands: Vec<(PlayerId, Action)>,
}

impl CommandBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a player's command.
    ///
    /// A second command for the same player replaces the action but keeps
    /// its existing position in the batch.
    pub fn insert(&mut self, player_id: impl Into<PlayerId>, action: Action) {
        let player_id = player_id.into();
        if let Some(slot) = self.commands.iter_mut().find(|(id, _)| *id == player_id) {
            slot.1 = action;
        } else {
            self.commands.push((player_id, action));
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, player_id: impl Into<PlayerId>, action: Action) -> Self {
        self.insert(player_id, action);
        self
    }

    /// Command for a player, if any.
    pub fn get(&self, player_id: &PlayerId) -> Option<Action> {
        self.commands
            .iter()
            .find(|(id, _)| id == player_id)
            .map(|(_, action)| *action)
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, Action)> {
        self.commands.iter().map(|(id, action)| (id, *action))
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Is the batch empty?
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Parse a `{ "<player id>": "<action>" }` JSON object.
    ///
    /// Entries keep document order. Entries whose value is not a known
    /// action token are dropped.
    pub fn from_json(json: &str) -> Result<Self, CommandError> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| CommandError::Malformed(e.to_string()))?;
        let object = value
            .as_object()
            .ok_or_else(|| CommandError::Malformed("expected a JSON object".to_owned()))?;

        let mut batch = Self::new();
        for (player_id, token) in object {
            match token.as_str().map(str::parse::<Action>) {
                Some(Ok(action)) => batch.insert(player_id.as_str(), action),
                Some(Err(e)) => debug!("Ignoring command for {}: {}", player_id, e),
                None => debug!("Ignoring non-string command for {}", player_id),
            }
        }
        Ok(batch)
    }
}

impl<I: Into<PlayerId>> FromIterator<(I, Action)> for CommandBatch {
    fn from_iter<T: IntoIterator<Item = (I, Action)>>(iter: T) -> Self {
        let mut batch = Self::new();
        for (id, action) in iter {
            batch.insert(id, action);
        }
        batch
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_tokens() {
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), action);
        }
        assert_eq!(
            "jump".parse::<Action>().unwrap_err(),
            CommandError::UnknownAction("jump".to_owned())
        );
        assert!("UP".parse::<Action>().is_err());
    }

    #[test]
    fn test_action_steps() {
        assert_eq!(Action::Up.step(), Some((0, -1)));
        assert_eq!(Action::Down.step(), Some((0, 1)));
        assert_eq!(Action::Left.step(), Some((-1, 0)));
        assert_eq!(Action::Right.step(), Some((1, 0)));
        assert_eq!(Action::Space.step(), None);
    }

    #[test]
    fn test_batch_keeps_insertion_order() {
        let batch = CommandBatch::new()
            .with("zed", Action::Up)
            .with("amy", Action::Space)
            .with("mia", Action::Left);

        let ids: Vec<_> = batch.iter().map(|(id, _)| id.as_str().to_owned()).collect();
        assert_eq!(ids, vec!["zed", "amy", "mia"]);
    }

    #[test]
    fn test_batch_replaces_in_place() {
        let mut batch = CommandBatch::new()
            .with("a", Action::Up)
            .with("b", Action::Down);
        batch.insert("a", Action::Space);

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.get(&PlayerId::from("a")), Some(Action::Space));
        assert_eq!(batch.iter().next().map(|(id, _)| id.as_str()), Some("a"));
    }

    #[test]
    fn test_from_json_document_order() {
        let batch = CommandBatch::from_json(
            r#"{ "zed": "right", "amy": "space", "bob": "fly", "cat": 3 }"#,
        )
        .unwrap();

        let entries: Vec<_> = batch
            .iter()
            .map(|(id, action)| (id.as_str().to_owned(), action))
            .collect();
        assert_eq!(
            entries,
            vec![("zed".to_owned(), Action::Right), ("amy".to_owned(), Action::Space)]
        );
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            CommandBatch::from_json("[\"up\"]"),
            Err(CommandError::Malformed(_))
        ));
        assert!(matches!(
            CommandBatch::from_json("{ not json"),
            Err(CommandError::Malformed(_))
        ));
    }

    #[test]
    fn test_action_serde_lowercase() {
        let json = serde_json::to_string(&Action::Space).unwrap();
        assert_eq!(json, "\"space\"");
    }
}
