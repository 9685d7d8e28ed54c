//! Step legality: whether a character may currently occupy a destination.

use crate::game::movement::possible_destinations;
use crate::game::{Board, Character, Coord, GameState, TileType};

/// Whether `character` may step onto `destination`, judged by the
/// destination tile.
#[must_use]
pub fn can_step(state: &GameState, character: &Character, destination: Coord) -> bool {
    let Some(tile) = state.board.get(destination) else {
        return false;
    };
    match tile.tile_type {
        TileType::Water => {
            let own_ship = state
                .player(character.owner)
                .is_some_and(|p| p.ship_coords == destination);
            own_ship
                || state
                    .board
                    .tile_type(character.coords)
                    .is_some_and(launches_into_water)
        }
        TileType::Fort | TileType::Aborigine => {
            character.object.is_none() && !state.has_opponent_at(destination, character.owner)
        }
        TileType::Empty
        | TileType::DirStraight
        | TileType::Dir45
        | TileType::Dir45_225
        | TileType::Dir0_180
        | TileType::Dir0_135_270
        | TileType::DirDiagonal
        | TileType::DirUplr
        | TileType::Horses
        | TileType::Spinning2
        | TileType::Spinning3
        | TileType::Spinning4
        | TileType::Spinning5
        | TileType::IceLake
        | TileType::Trap
        | TileType::Cannon
        | TileType::DrinkingRum
        | TileType::Crocodile
        | TileType::Ogre
        | TileType::Balloon
        | TileType::Plane
        | TileType::Money1
        | TileType::Money2
        | TileType::Money3
        | TileType::Money4
        | TileType::Money5 => {
            // A loaded pirate can neither fight nor dig.
            character.object.is_none()
                || (tile.is_open && !state.has_opponent_at(destination, character.owner))
        }
    }
}

/// Source tiles from which a pirate may end up in the sea.
const fn launches_into_water(source: TileType) -> bool {
    source.is_directional()
        || matches!(
            source,
            TileType::Water
                | TileType::Cannon
                | TileType::Horses
                | TileType::IceLake
                | TileType::Plane
        )
}

/// Legal destinations for `character`: on the board, allowed by
/// [`can_step`], sorted and without duplicates.
#[must_use]
pub fn legal_destinations(state: &GameState, character: &Character) -> Vec<Coord> {
    let mut destinations: Vec<Coord> = possible_destinations(state, character)
        .into_iter()
        .filter(|&dest| Board::in_bounds(dest) && can_step(state, character, dest))
        .collect();
    destinations.sort_unstable();
    destinations.dedup();
    destinations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{ObjectKind, Rotation, Tile};

    fn setup(dest: Coord, tile_type: TileType) -> (GameState, Character) {
        let mut board = Board::filled(TileType::Empty);
        board.set(dest, Tile::new(tile_type, Rotation::Deg0));
        let mut state = GameState::new(board, 2);
        let id = state.players[0].roster[0];
        let c = state.character_mut(id).unwrap();
        c.coords = Coord::new(4, 4);
        c.prev_coords = Coord::new(4, 4);
        let c = *c;
        (state, c)
    }

    fn put_opponent(state: &mut GameState, at: Coord) {
        let id = state.players[1].roster[0];
        state.relocate(id, at);
    }

    #[test]
    fn test_default_closed_tile_with_loot() {
        let dest = Coord::new(5, 5);
        let (mut state, mut c) = setup(dest, TileType::Empty);
        assert!(can_step(&state, &c, dest));

        c.object = Some(ObjectKind::Money);
        assert!(!can_step(&state, &c, dest));

        state.board.get_mut(dest).unwrap().open();
        assert!(can_step(&state, &c, dest));

        put_opponent(&mut state, dest);
        assert!(!can_step(&state, &c, dest));
        c.object = None;
        assert!(can_step(&state, &c, dest));
    }

    #[test]
    fn test_fort_refuses_loot_and_opponents() {
        let dest = Coord::new(5, 5);
        let (mut state, mut c) = setup(dest, TileType::Fort);
        assert!(can_step(&state, &c, dest));

        c.object = Some(ObjectKind::Money);
        assert!(!can_step(&state, &c, dest));
        c.object = None;

        put_opponent(&mut state, dest);
        assert!(!can_step(&state, &c, dest));
    }

    #[test]
    fn test_water_entry_depends_on_source() {
        let (state, c) = setup(Coord::new(5, 5), TileType::Empty);
        assert!(!can_step(&state, &c, Coord::new(0, 4)));
        assert!(can_step(&state, &c, Coord::new(0, 6)), "own ship");
        assert!(!can_step(&state, &c, Coord::new(6, 12)), "opposing ship");

        let (state, c) = setup(Coord::new(4, 4), TileType::Cannon);
        assert!(can_step(&state, &c, Coord::new(4, 0)));
    }

    #[test]
    fn test_legal_destinations_bounded_and_sorted() {
        let (mut state, _) = setup(Coord::new(5, 5), TileType::Empty);
        let id = state.players[0].roster[0];
        state.relocate(id, Coord::new(1, 2));
        let c = *state.character(id).unwrap();

        let dests = legal_destinations(&state, &c);
        assert!(dests.windows(2).all(|w| w[0] < w[1]));
        assert!(dests.iter().all(|&d| Board::in_bounds(d)));
        assert!(!dests.iter().any(|&d| state.board.is_water(d)));
        assert_eq!(
            dests,
            vec![
                Coord::new(1, 3),
                Coord::new(2, 1),
                Coord::new(2, 2),
                Coord::new(2, 3)
            ]
        );
    }
}
