//! Error types for the Jackal engine.

use thiserror::Error;

use crate::game::Coord;

/// Top-level error for creating and running a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// The board could not be generated.
    #[error(transparent)]
    BoardGen(#[from] BoardGenError),
    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Board generation failures.
///
/// Any of these means the tile inventory table and the board geometry disagree;
/// the partially built board must be discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardGenError {
    /// Land cells ran out before the inventory did.
    #[error("tile inventory not exhausted: {remaining} tiles left over")]
    InventoryLeftover {
        /// Tiles still in the inventory after every land cell was filled.
        remaining: u32,
    },
    /// The inventory ran out before every land cell was filled.
    #[error("tile inventory exhausted with {cells} land cells still empty")]
    InventoryExhausted {
        /// Land cells that could not be filled.
        cells: usize,
    },
}

/// Reasons a move request is rejected. Rejection never mutates the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The destination lies outside the board.
    #[error("destination {0} is off the board")]
    OutOfBounds(Coord),
    /// The destination is on the board but not among the legal destinations.
    #[error("destination {0} is not a legal move")]
    NotLegal(Coord),
    /// No player has a living character.
    #[error("no character can act")]
    NoActiveCharacter,
}

/// Reasons a free action (character switch, pick up, drop) is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The active character already moved this turn.
    #[error("the active character already moved this turn")]
    AlreadyMoved,
    /// The character already carries an object.
    #[error("the character already carries an object")]
    AlreadyCarrying,
    /// There is nothing on the tile to pick up.
    #[error("there is nothing to pick up here")]
    NothingToTake,
    /// The character carries nothing.
    #[error("the character carries nothing")]
    NothingCarried,
    /// No player has a living character.
    #[error("no character can act")]
    NoActiveCharacter,
}

/// Invalid configuration values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Unsupported number of players.
    #[error("player count must be between 1 and {max}, got {got}")]
    PlayerCount {
        /// Requested number of players.
        got: u8,
        /// Maximum supported.
        max: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_error_display() {
        let err = MoveError::NotLegal(Coord::new(3, 4));
        assert_eq!(err.to_string(), "destination (3, 4) is not a legal move");
    }

    #[test]
    fn test_game_error_from_board_gen() {
        let err: GameError = BoardGenError::InventoryLeftover { remaining: 2 }.into();
        assert!(err.to_string().contains("2 tiles left over"));
    }
}
