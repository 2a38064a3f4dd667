//! Table configuration models.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::errors::ConfigError;
use crate::{
    constants::{
        DEFAULT_BIG_BLIND, DEFAULT_BUY_IN, DEFAULT_MAX_PLAYERS, DEFAULT_MAX_TIME_PER_TURN_MS,
        DEFAULT_MIN_PLAYERS, DEFAULT_SMALL_BLIND,
    },
    engine::EngineSettings,
    entities::Usd,
};

/// Table configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Table name
    pub name: String,

    /// Small blind amount
    pub small_blind: Usd,

    /// Big blind amount
    pub big_blind: Usd,

    /// Players needed before a round can start
    pub min_players: usize,

    /// Maximum number of seated players
    pub max_players: usize,

    /// Starting stack of every seated player
    pub buy_in: Usd,

    /// Time a player may take to act, in milliseconds
    pub max_time_per_turn_ms: u64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            name: "Default Table".to_string(),
            small_blind: DEFAULT_SMALL_BLIND,
            big_blind: DEFAULT_BIG_BLIND,
            min_players: DEFAULT_MIN_PLAYERS,
            max_players: DEFAULT_MAX_PLAYERS,
            buy_in: DEFAULT_BUY_IN,
            max_time_per_turn_ms: DEFAULT_MAX_TIME_PER_TURN_MS,
        }
    }
}

impl TableConfig {
    /// Default configuration with a custom buy-in
    pub fn with_buy_in(buy_in: Usd) -> Self {
        Self {
            buy_in,
            ..Self::default()
        }
    }

    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to the defaults.
    ///
    /// | Variable | Field |
    /// |---|---|
    /// | `TABLE_NAME` | `name` |
    /// | `TABLE_SMALL_BLIND` | `small_blind` |
    /// | `TABLE_BIG_BLIND` | `big_blind` |
    /// | `TABLE_MIN_PLAYERS` | `min_players` |
    /// | `TABLE_MAX_PLAYERS` | `max_players` |
    /// | `TABLE_BUY_IN` | `buy_in` |
    /// | `TABLE_MAX_TIME_PER_TURN_MS` | `max_time_per_turn_ms` |
    ///
    /// # Errors
    ///
    /// Returns error if the resulting configuration fails [`TableConfig::validate`]
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            name: std::env::var("TABLE_NAME").unwrap_or(defaults.name),
            small_blind: parse_env_or("TABLE_SMALL_BLIND", defaults.small_blind),
            big_blind: parse_env_or("TABLE_BIG_BLIND", defaults.big_blind),
            min_players: parse_env_or("TABLE_MIN_PLAYERS", defaults.min_players),
            max_players: parse_env_or("TABLE_MAX_PLAYERS", defaults.max_players),
            buy_in: parse_env_or("TABLE_BUY_IN", defaults.buy_in),
            max_time_per_turn_ms: parse_env_or(
                "TABLE_MAX_TIME_PER_TURN_MS",
                defaults.max_time_per_turn_ms,
            ),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.small_blind == 0 {
            return Err(invalid("small_blind", "Must be greater than 0"));
        }

        if self.big_blind <= self.small_blind {
            return Err(invalid(
                "big_blind",
                format!("Must be greater than small blind ({})", self.small_blind),
            ));
        }

        if self.min_players < 2 {
            return Err(invalid("min_players", "Must be at least 2"));
        }

        if self.max_players < self.min_players {
            return Err(invalid(
                "max_players",
                format!("Must be at least min players ({})", self.min_players),
            ));
        }

        if self.max_players > 23 {
            return Err(invalid(
                "max_players",
                "Must be at most 23 (max players with 52-card deck)",
            ));
        }

        if self.buy_in < self.big_blind {
            return Err(invalid(
                "buy_in",
                format!("Must cover at least the big blind ({})", self.big_blind),
            ));
        }

        if self.max_time_per_turn_ms == 0 {
            return Err(invalid("max_time_per_turn_ms", "Must be greater than 0"));
        }

        Ok(())
    }

    /// Settings the betting engine is constructed with
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            small_blind: self.small_blind,
            big_blind: self.big_blind,
            min_players: self.min_players,
            max_players: self.max_players,
        }
    }

    pub fn max_time_per_turn(&self) -> Duration {
        Duration::from_millis(self.max_time_per_turn_ms)
    }
}

fn invalid(var: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        var: var.to_string(),
        reason: reason.into(),
    }
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ENV_VARS: [&str; 7] = [
        "TABLE_NAME",
        "TABLE_SMALL_BLIND",
        "TABLE_BIG_BLIND",
        "TABLE_MIN_PLAYERS",
        "TABLE_MAX_PLAYERS",
        "TABLE_BUY_IN",
        "TABLE_MAX_TIME_PER_TURN_MS",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            // SAFETY: env tests run serially, no other thread reads these vars
            unsafe { std::env::remove_var(var) };
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = TableConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.small_blind, 10);
        assert_eq!(config.big_blind, 20);
        assert_eq!(config.min_players, 2);
        assert_eq!(config.max_players, 5);
        assert_eq!(config.buy_in, 1000);
        assert_eq!(config.max_time_per_turn(), Duration::from_secs(15));
    }

    #[test]
    fn test_with_buy_in() {
        let config = TableConfig::with_buy_in(2500);
        assert_eq!(config.buy_in, 2500);
        assert_eq!(config.big_blind, DEFAULT_BIG_BLIND);
    }

    #[test]
    fn test_validation_big_blind_too_small() {
        let config = TableConfig {
            big_blind: 10,
            ..TableConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref var, .. } if var == "big_blind"));
    }

    #[test]
    fn test_validation_player_bounds() {
        let config = TableConfig {
            min_players: 1,
            ..TableConfig::default()
        };
        assert!(config.validate().is_err());

        let config = TableConfig {
            min_players: 4,
            max_players: 3,
            ..TableConfig::default()
        };
        assert!(config.validate().is_err());

        let config = TableConfig {
            max_players: 24,
            ..TableConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_buy_in_below_big_blind() {
        let config = TableConfig::with_buy_in(5);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("buy_in"));
    }

    #[test]
    fn test_engine_settings_mirror_config() {
        let config = TableConfig::default();
        let settings = config.engine_settings();
        assert_eq!(settings.small_blind, config.small_blind);
        assert_eq!(settings.big_blind, config.big_blind);
        assert_eq!(settings.min_players, config.min_players);
        assert_eq!(settings.max_players, config.max_players);
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = TableConfig::with_buy_in(3000);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: TableConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = TableConfig::from_env().unwrap();
        assert_eq!(config, TableConfig::default());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        // SAFETY: env tests run serially
        unsafe {
            std::env::set_var("TABLE_NAME", "High Stakes");
            std::env::set_var("TABLE_SMALL_BLIND", "50");
            std::env::set_var("TABLE_BIG_BLIND", "100");
            std::env::set_var("TABLE_MAX_PLAYERS", "9");
            std::env::set_var("TABLE_BUY_IN", "5000");
            std::env::set_var("TABLE_MAX_TIME_PER_TURN_MS", "30000");
        }

        let config = TableConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.name, "High Stakes");
        assert_eq!(config.small_blind, 50);
        assert_eq!(config.big_blind, 100);
        assert_eq!(config.min_players, DEFAULT_MIN_PLAYERS);
        assert_eq!(config.max_players, 9);
        assert_eq!(config.buy_in, 5000);
        assert_eq!(config.max_time_per_turn(), Duration::from_secs(30));
    }

    #[test]
    #[serial]
    fn test_from_env_ignores_garbage() {
        clear_env();
        // SAFETY: env tests run serially
        unsafe { std::env::set_var("TABLE_BUY_IN", "lots") };

        let config = TableConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.buy_in, DEFAULT_BUY_IN);
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_invalid_result() {
        clear_env();
        // SAFETY: env tests run serially
        unsafe { std::env::set_var("TABLE_BIG_BLIND", "5") };

        let result = TableConfig::from_env();
        clear_env();

        assert!(result.is_err());
    }
}
