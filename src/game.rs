//! Game layer for Jackal.
//!
//! Implements the rules of the island:
//! - Board of typed tiles and its random generation
//! - Players, ships and pirates
//! - Per-tile movement, legality, entry and exit tables
//! - Forced-loop detection and the turn controller

pub mod coord;
pub mod cycle;
pub mod enter;
pub mod exit;
pub mod invariants;
pub mod legality;
pub mod map;
pub mod mapgen;
pub mod movement;
pub mod player;
pub mod snapshot;
pub mod state;
pub mod turn;

pub use coord::{Coord, Heading, Relative, Rotation};
pub use cycle::{ChainStep, CycleTable};
pub use map::{Board, Loot, ObjectKind, Tile, TileType};
pub use player::{Character, CharacterId, CharacterState, Color, Player, PlayerId};
pub use snapshot::{BoardSnapshot, CharacterView, GameSnapshot, PlayerView, TileView};
pub use state::GameState;
pub use turn::{GameSession, MoveOutcome, MoveRequest, StepReport};
