//! Session configuration.

use crate::error::ConfigError;
use crate::game::player::MAX_PLAYERS;

/// Settings for a new game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Number of players (1-4).
    pub players: u8,
    /// Board seed; `None` draws one at random.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: 2,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Check the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the player count is outside `1..=4`.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.players == 0 || self.players as usize > MAX_PLAYERS {
            return Err(ConfigError::PlayerCount {
                got: self.players,
                max: MAX_PLAYERS,
            });
        }
        Ok(())
    }

    /// The seed to use, drawing one if none was configured.
    #[must_use]
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.players, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_player_count_bounds() {
        for players in [1, 4] {
            assert!(GameConfig { players, seed: None }.validate().is_ok());
        }
        for players in [0, 5] {
            assert_eq!(
                GameConfig { players, seed: None }.validate(),
                Err(ConfigError::PlayerCount {
                    got: players,
                    max: MAX_PLAYERS
                })
            );
        }
    }

    #[test]
    fn test_fixed_seed_is_kept() {
        let config = GameConfig {
            players: 2,
            seed: Some(99),
        };
        assert_eq!(config.resolve_seed(), 99);
    }
}
