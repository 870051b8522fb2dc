//! Arena Configuration
//!
//! Tuning values for the tick pipeline. The defaults are the canonical
//! rules; tests and custom arenas may override them.

use std::path::Path;
use serde::{Serialize, Deserialize};

/// Coin count the repopulator tops up to.
pub const COIN_TARGET: usize = 100;

/// Random placement attempts before falling back to a scan.
pub const SPAWN_ATTEMPTS: u32 = 1000;

/// Configuration for the tick pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Coins kept on the field after every tick
    pub coin_target: usize,
    /// Fraction of score lost per successful move step
    pub move_cost_rate: f64,
    /// Attack damage is `score * attack_multiplier`
    pub attack_multiplier: f64,
    /// Growth from a coin at score 0
    pub coin_growth_max: f64,
    /// Score at which coins stop granting growth
    pub coin_growth_score_cap: f64,
    /// Random placement attempts before scanning for a free cell
    pub spawn_attempts: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            coin_target: COIN_TARGET,
            move_cost_rate: 0.01,
            attack_multiplier: 10.0,
            coin_growth_max: 4.0,
            coin_growth_score_cap: 300.0,
            spawn_attempts: SPAWN_ATTEMPTS,
        }
    }
}

impl ArenaConfig {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Reject values that would break the score floor or growth curve.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.move_cost_rate) {
            return Err(ConfigError::Invalid("move_cost_rate must be in [0, 1)"));
        }
        if !(self.attack_multiplier >= 0.0) {
            return Err(ConfigError::Invalid("attack_multiplier must be non-negative"));
        }
        if !(self.coin_growth_max >= 0.0) {
            return Err(ConfigError::Invalid("coin_growth_max must be non-negative"));
        }
        if !(self.coin_growth_score_cap > 0.0) {
            return Err(ConfigError::Invalid("coin_growth_score_cap must be positive"));
        }
        Ok(())
    }

    /// Growth granted by one coin at the given score.
    ///
    /// Shrinks linearly to zero as `score` approaches the cap; never negative.
    #[inline]
    pub fn coin_growth(&self, score: f64) -> f64 {
        let penalty = (self.coin_growth_max * score / self.coin_growth_score_cap)
            .min(self.coin_growth_max);
        self.coin_growth_max - penalty
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that was opened
        path: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Config is not valid JSON for this shape.
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Config value out of range.
    #[error("Invalid config: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ArenaConfig::default();
        assert_eq!(config.coin_target, 100);
        assert_eq!(config.move_cost_rate, 0.01);
        assert_eq!(config.attack_multiplier, 10.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_coin_growth_curve() {
        let config = ArenaConfig::default();
        assert_eq!(config.coin_growth(0.0), 4.0);
        assert_eq!(config.coin_growth(150.0), 2.0);
        assert_eq!(config.coin_growth(300.0), 0.0);
        assert_eq!(config.coin_growth(1000.0), 0.0);
    }

    #[test]
    fn test_from_json_partial() {
        let config = ArenaConfig::from_json(r#"{ "coin_target": 5 }"#).unwrap();
        assert_eq!(config.coin_target, 5);
        assert_eq!(config.attack_multiplier, 10.0);
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        let err = ArenaConfig::from_json(r#"{ "move_cost_rate": 1.5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = ArenaConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let err = ArenaConfig::from_json("42").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ArenaConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
