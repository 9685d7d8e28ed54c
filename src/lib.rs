// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Jackal: rules engine for the pirate treasure-hunt board game.
//!
//! The engine decides which cells a pirate may move to, what happens when it
//! arrives on or leaves a tile, and whose turn it is. Rendering and input are
//! left to front ends, which read [`GameSnapshot`]s and drive a
//! [`GameSession`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Turn controller (GameSession)     │
//! ├─────────────────────────────────────┤
//! │  Movement · Legality · Enter · Exit │
//! ├─────────────────────────────────────┤
//! │   Board · Players · Characters      │
//! └─────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod game;

pub use config::GameConfig;
pub use error::{ActionError, BoardGenError, ConfigError, GameError, MoveError};

// Re-export key game types at crate root for convenience
pub use game::{
    Board, Coord, GameSession, GameSnapshot, GameState, Heading, MoveOutcome, MoveRequest,
    TileType,
};
