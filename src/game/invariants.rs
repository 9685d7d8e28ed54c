//! Game invariants - sanity checks that detect bugs.
//!
//! These should never trigger in a correctly implemented game. They are run
//! after every accepted move and turn change in debug builds.

use std::collections::HashSet;

use thiserror::Error;

use crate::game::map::is_water_cell;
use crate::game::player::{MAX_CREW, MAX_PLAYERS};
use crate::game::{Board, CharacterState, GameState, TileType};

/// Invariant violation error.
#[derive(Debug, Clone, Error)]
#[error("Invariant violation: {message}")]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

fn violation(message: String) -> InvariantViolation {
    InvariantViolation { message }
}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    if state.players.is_empty() || state.players.len() > MAX_PLAYERS {
        violations.push(violation(format!(
            "{} players, expected 1 to {MAX_PLAYERS}",
            state.players.len()
        )));
    }

    let mut seen = HashSet::new();
    for (index, player) in state.players.iter().enumerate() {
        if usize::from(player.id) != index {
            violations.push(violation(format!(
                "Player at index {index} has id {}",
                player.id
            )));
        }
        if player.roster.len() > MAX_CREW {
            violations.push(violation(format!(
                "Player {} has {} pirates > max {MAX_CREW}",
                player.id,
                player.roster.len()
            )));
        }
        if !is_water_cell(player.ship_coords) {
            violations.push(violation(format!(
                "Player {} ship at {} is not on water",
                player.id, player.ship_coords
            )));
        }

        for &id in &player.roster {
            if !seen.insert(id) {
                violations.push(violation(format!("Character {id} listed twice")));
            }
            let Some(character) = state.character(id) else {
                violations.push(violation(format!(
                    "Player {} lists unknown character {id}",
                    player.id
                )));
                continue;
            };
            if character.owner != player.id {
                violations.push(violation(format!(
                    "Character {id} owned by {} but listed by player {}",
                    character.owner, player.id
                )));
            }
            if !Board::in_bounds(character.coords) {
                violations.push(violation(format!(
                    "Character {id} is off the board at {}",
                    character.coords
                )));
                continue;
            }

            let tile_type = state.board.tile_type(character.coords);
            match tile_type.and_then(TileType::max_spin) {
                Some(phases) => {
                    if character.spin_counter.is_some_and(|c| c > phases) {
                        violations.push(violation(format!(
                            "Character {id} spin counter {:?} exceeds {phases} phases",
                            character.spin_counter
                        )));
                    }
                }
                None => {
                    if character.spin_counter.is_some() {
                        violations.push(violation(format!(
                            "Character {id} spinning off a spinning tile at {}",
                            character.coords
                        )));
                    }
                }
            }

            let expected_tile = match character.state {
                CharacterState::Alive => None,
                CharacterState::Drunk | CharacterState::Hangover => Some(TileType::DrinkingRum),
                CharacterState::Trapped => Some(TileType::Trap),
            };
            if let Some(expected) = expected_tile
                && tile_type != Some(expected)
            {
                violations.push(violation(format!(
                    "Character {id} is {:?} on {:?}",
                    character.state, tile_type
                )));
            }
        }
    }

    violations
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &GameState) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &GameState) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CharacterId, Coord};

    fn create_valid_game() -> GameState {
        GameState::new(Board::filled(TileType::Empty), 2)
    }

    #[test]
    fn test_valid_game_passes() {
        let game = create_valid_game();
        let violations = check_invariants(&game);
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn test_violation_display() {
        let v = violation("ship adrift".to_string());
        assert_eq!(v.to_string(), "Invariant violation: ship adrift");
        let boxed: Box<dyn std::error::Error> = Box::new(v);
        assert!(boxed.source().is_none());
    }

    #[test]
    fn test_oversized_crew_detected() {
        let mut game = create_valid_game();
        game.players[0].roster.push(CharacterId(3));

        let violations = check_invariants(&game);
        assert!(violations.iter().any(|v| v.message.contains("pirates > max")));
        assert!(violations.iter().any(|v| v.message.contains("owned by 1")));
    }

    #[test]
    fn test_duplicate_listing_detected() {
        let mut game = create_valid_game();
        let id = game.players[0].roster[0];
        game.players[0].roster[1] = id;

        let violations = check_invariants(&game);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("listed twice"));
    }

    #[test]
    fn test_ship_on_land_detected() {
        let mut game = create_valid_game();
        game.players[1].ship_coords = Coord::new(6, 6);

        let violations = check_invariants(&game);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("not on water"));
    }

    #[test]
    fn test_stray_spin_counter_detected() {
        let mut game = create_valid_game();
        let id = game.players[0].roster[0];
        game.character_mut(id).unwrap().spin_counter = Some(1);

        let violations = check_invariants(&game);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("spinning"));
    }

    #[test]
    fn test_trapped_off_trap_detected() {
        let mut game = create_valid_game();
        let id = game.players[0].roster[0];
        game.character_mut(id).unwrap().state = CharacterState::Trapped;

        let violations = check_invariants(&game);
        assert_eq!(violations.len(), 1);
    }

    #[test]
    #[should_panic(expected = "invariant violations")]
    #[cfg(debug_assertions)]
    fn test_assert_invariants_panics() {
        let mut game = create_valid_game();
        game.players.clear();
        assert_invariants(&game);
    }
}
