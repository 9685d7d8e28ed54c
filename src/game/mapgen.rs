//! Random board generation from the fixed tile inventory.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::BoardGenError;
use crate::game::map::{all_coords, is_water_cell};
use crate::game::{Board, Rotation, Tile, TileType};

/// Every land tile of the game, as `(type, count)`.
///
/// The counts add up to the 117 land cells of the board.
pub const TILE_INVENTORY: [(TileType, u32); 28] = [
    (TileType::Empty, 40),
    (TileType::DirStraight, 3),
    (TileType::Dir45, 3),
    (TileType::Dir45_225, 3),
    (TileType::Dir0_180, 3),
    (TileType::Dir0_135_270, 3),
    (TileType::DirDiagonal, 3),
    (TileType::DirUplr, 3),
    (TileType::Horses, 2),
    (TileType::Spinning2, 5),
    (TileType::Spinning3, 4),
    (TileType::Spinning4, 2),
    (TileType::Spinning5, 1),
    (TileType::IceLake, 6),
    (TileType::Trap, 3),
    (TileType::Cannon, 2),
    (TileType::Fort, 2),
    (TileType::Aborigine, 1),
    (TileType::DrinkingRum, 4),
    (TileType::Crocodile, 4),
    (TileType::Ogre, 1),
    (TileType::Balloon, 2),
    (TileType::Plane, 1),
    (TileType::Money1, 5),
    (TileType::Money2, 5),
    (TileType::Money3, 3),
    (TileType::Money4, 2),
    (TileType::Money5, 1),
];

/// Number of tiles of `tile_type` in the inventory (0 for water).
#[must_use]
pub fn inventory_count(tile_type: TileType) -> u32 {
    TILE_INVENTORY
        .iter()
        .find(|(t, _)| *t == tile_type)
        .map_or(0, |(_, count)| *count)
}

/// Shrinking multiset of tiles still to be placed.
#[derive(Debug, Clone)]
struct Inventory {
    remaining: Vec<(TileType, u32)>,
    total: u32,
}

impl Inventory {
    fn full() -> Self {
        let remaining = TILE_INVENTORY.to_vec();
        let total = remaining.iter().map(|(_, count)| count).sum();
        Self { remaining, total }
    }

    /// Draw one tile with probability proportional to its remaining count.
    fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<TileType> {
        if self.total == 0 {
            return None;
        }
        let mut pick = rng.random_range(0..self.total);
        for (tile_type, count) in &mut self.remaining {
            if pick < *count {
                *count -= 1;
                self.total -= 1;
                return Some(*tile_type);
            }
            pick -= *count;
        }
        None
    }
}

/// Generate a board, drawing tile types and rotations from `rng`.
///
/// Sea cells are forced to open water; every land cell receives exactly one
/// tile from [`TILE_INVENTORY`].
///
/// # Errors
///
/// Returns an error if the inventory does not match the number of land cells.
pub fn generate_board<R: Rng + ?Sized>(rng: &mut R) -> Result<Board, BoardGenError> {
    let mut inventory = Inventory::full();
    let mut tiles = Vec::with_capacity(crate::game::map::CELL_COUNT);
    let mut unfilled = 0usize;

    for coord in all_coords() {
        let direction = Rotation::from_quarter_turns(rng.random_range(0..4));
        if is_water_cell(coord) {
            tiles.push(Tile::water());
            continue;
        }
        match inventory.draw(rng) {
            Some(tile_type) => tiles.push(Tile::new(tile_type, direction)),
            None => {
                unfilled += 1;
                tiles.push(Tile::new(TileType::Empty, direction));
            }
        }
    }

    if unfilled > 0 {
        return Err(BoardGenError::InventoryExhausted { cells: unfilled });
    }
    if inventory.total > 0 {
        return Err(BoardGenError::InventoryLeftover {
            remaining: inventory.total,
        });
    }

    let board = Board::from_tiles(tiles).ok_or(BoardGenError::InventoryExhausted { cells: 0 })?;
    tracing::debug!("generated board");
    Ok(board)
}

/// Generate a board deterministically from a seed.
///
/// # Errors
///
/// See [`generate_board`].
pub fn generate_board_seeded(seed: u64) -> Result<Board, BoardGenError> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_board(&mut rng)
}
