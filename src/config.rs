use crate::card::DeckConfig;
use crate::error::ConfigError;
use crate::score::{ScoreTable, LONGEST_ROUTE_BONUS};

use serde::{Deserialize, Serialize};

/// Read-only settings of a game, built once and then shared by reference.
///
/// # JSON
/// Every field is optional and falls back to the standard rules:
/// ```
/// use route_board::config::GameConfig;
///
/// let config = GameConfig::from_json(r#"{"scoring": {"1": 1, "2": 3}}"#).unwrap();
/// assert_eq!(config.deck.total(), 110);
/// assert_eq!(config.scoring.distances().count(), 2);
/// assert_eq!(config.longest_route_bonus, 10);
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct GameConfig {
    /// How many cards of each color the deck starts with.
    pub deck: DeckConfig,
    /// Points granted per route length.
    pub scoring: ScoreTable,
    /// Points granted to every holder of the longest continuous route.
    pub longest_route_bonus: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            deck: DeckConfig::default(),
            scoring: ScoreTable::default(),
            longest_route_bonus: LONGEST_ROUTE_BONUS,
        }
    }
}

impl GameConfig {
    /// Parses and validates a configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations no game could be played with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.deck.total() == 0 {
            return Err(ConfigError::Invalid(String::from(
                "The deck must hold at least one card.",
            )));
        }

        if self.scoring.is_empty() {
            return Err(ConfigError::Invalid(String::from(
                "The score table must have at least one route length.",
            )));
        }

        if self.scoring.distances().any(|distance| distance == 0) {
            return Err(ConfigError::Invalid(String::from(
                "The score table cannot score routes of length 0.",
            )));
        }

        Ok(())
    }
}
