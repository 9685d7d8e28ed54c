//! Movement rules: candidate destinations by the tile a character stands on.
//!
//! Candidates are not bounds-checked or filtered for legality here; see
//! [`crate::game::legality`].

use crate::game::coord::{Relative, side_offset};
use crate::game::map::{BOARD_SIZE, all_coords};
use crate::game::{Character, Coord, GameState, Rotation, TileType};

/// Knight jumps offered by a horses tile.
pub const KNIGHT_OFFSETS: [Coord; 8] = [
    Coord::new(-1, -2),
    Coord::new(-2, -1),
    Coord::new(-1, 2),
    Coord::new(2, -1),
    Coord::new(1, -2),
    Coord::new(-2, 1),
    Coord::new(1, 2),
    Coord::new(2, 1),
];

/// Candidate destinations for `character` from the tile it stands on.
///
/// A character that is not alive has no destinations at all.
#[must_use]
pub fn possible_destinations(state: &GameState, character: &Character) -> Vec<Coord> {
    if !character.state.is_mobile() {
        return Vec::new();
    }
    let Some(tile) = state.board.get(character.coords) else {
        return Vec::new();
    };
    let here = character.coords;
    let facing = tile.direction;

    match tile.tile_type {
        TileType::Empty
        | TileType::Fort
        | TileType::Aborigine
        | TileType::Ogre
        | TileType::DrinkingRum
        | TileType::Trap
        | TileType::Money1
        | TileType::Money2
        | TileType::Money3
        | TileType::Money4
        | TileType::Money5 => neighbours(here),
        TileType::Water => water(state, character),
        TileType::DirStraight => vec![here + facing.straight()],
        TileType::Dir0_180 => vec![
            here + facing.straight(),
            here + facing.rotated(Rotation::Deg180).straight(),
        ],
        TileType::DirUplr => Rotation::ALL.iter().map(|r| here + r.straight()).collect(),
        TileType::Dir45 => vec![here + facing.diagonal()],
        TileType::Dir45_225 => vec![
            here + facing.diagonal(),
            here + facing.rotated(Rotation::Deg180).diagonal(),
        ],
        TileType::DirDiagonal => Rotation::ALL.iter().map(|r| here + r.diagonal()).collect(),
        TileType::Dir0_135_270 => vec![
            here + facing.straight(),
            here + facing.rotated(Rotation::Deg90).diagonal(),
            here + facing.rotated(Rotation::Deg270).straight(),
        ],
        TileType::Horses => KNIGHT_OFFSETS.iter().map(|&o| here + o).collect(),
        TileType::IceLake => vec![here + (here - character.prev_coords)],
        TileType::Crocodile => vec![character.prev_coords],
        TileType::Cannon => vec![cannon_target(here, facing)],
        TileType::Balloon => state
            .player(character.owner)
            .map(|p| vec![p.ship_coords])
            .unwrap_or_default(),
        TileType::Plane => {
            if tile.active {
                all_coords().collect()
            } else {
                neighbours(here)
            }
        }
        TileType::Spinning2 | TileType::Spinning3 | TileType::Spinning4 | TileType::Spinning5 => {
            let phases = tile.tile_type.max_spin().unwrap_or(0);
            match character.spin_counter {
                Some(counter) if counter >= phases => neighbours(here),
                _ => vec![here],
            }
        }
    }
}

/// The 8 surrounding cells.
fn neighbours(here: Coord) -> Vec<Coord> {
    here.neighbours().to_vec()
}

/// Where a cannon facing `facing` fires a pirate standing at `here`.
#[must_use]
pub const fn cannon_target(here: Coord, facing: Rotation) -> Coord {
    let last = BOARD_SIZE - 1;
    match facing {
        Rotation::Deg0 => Coord::new(here.x, 0),
        Rotation::Deg90 => Coord::new(last, here.y),
        Rotation::Deg180 => Coord::new(here.x, last),
        Rotation::Deg270 => Coord::new(0, here.y),
    }
}

/// Aboard its own ship a pirate may land ahead or sail along the shore;
/// in open water it may only swim to neighbouring water.
fn water(state: &GameState, character: &Character) -> Vec<Coord> {
    let Some(player) = state.player(character.owner) else {
        return Vec::new();
    };
    let here = character.coords;
    if here != player.ship_coords {
        return here
            .neighbours()
            .into_iter()
            .filter(|&c| state.board.is_water(c))
            .collect();
    }

    let forward = side_offset(player.side, Relative::Forward);
    let mut result = vec![here + forward];
    for lateral in [Relative::Left, Relative::Right] {
        let beside = here + side_offset(player.side, lateral);
        let ahead = beside + forward;
        let shore = state
            .board
            .tile_type(ahead)
            .is_some_and(|t| t != TileType::Water);
        if shore {
            result.push(beside);
        }
    }
    result
}
