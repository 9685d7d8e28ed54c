//! Tile catalog, tiles and the board.

use std::collections::BTreeMap;

use serde::Serialize;
use strum::{EnumCount, EnumIter, IntoStaticStr};

use crate::game::{Coord, Rotation};

/// Width and height of the board in tiles.
pub const BOARD_SIZE: i32 = 13;

/// Number of cells on the board.
pub const CELL_COUNT: usize = (BOARD_SIZE * BOARD_SIZE) as usize;

/// Behavioral category of a board cell.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, EnumIter, EnumCount,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TileType {
    /// Plain land.
    Empty,
    /// Sea around the island; also where ships sail.
    Water,
    /// Arrow pointing straight ahead.
    DirStraight,
    /// Arrow pointing diagonally.
    #[serde(rename = "dir_45")]
    #[strum(serialize = "dir_45")]
    Dir45,
    /// Two-headed diagonal arrow.
    #[serde(rename = "dir_45_225")]
    #[strum(serialize = "dir_45_225")]
    Dir45_225,
    /// Two-headed straight arrow.
    #[serde(rename = "dir_0_180")]
    #[strum(serialize = "dir_0_180")]
    Dir0_180,
    /// Three arrows: ahead, back-right diagonal, left.
    #[serde(rename = "dir_0_135_270")]
    #[strum(serialize = "dir_0_135_270")]
    Dir0_135_270,
    /// Four diagonal arrows.
    DirDiagonal,
    /// Four straight arrows.
    DirUplr,
    /// Knight jump.
    Horses,
    /// Spinning field with two phases.
    #[serde(rename = "spinning_2")]
    #[strum(serialize = "spinning_2")]
    Spinning2,
    /// Spinning field with three phases.
    #[serde(rename = "spinning_3")]
    #[strum(serialize = "spinning_3")]
    Spinning3,
    /// Spinning field with four phases.
    #[serde(rename = "spinning_4")]
    #[strum(serialize = "spinning_4")]
    Spinning4,
    /// Spinning field with five phases.
    #[serde(rename = "spinning_5")]
    #[strum(serialize = "spinning_5")]
    Spinning5,
    /// Slide onward in the direction of arrival.
    IceLake,
    /// Catches a lone pirate until a friend passes.
    Trap,
    /// Fires the pirate to the far wall.
    Cannon,
    /// Safe house.
    Fort,
    /// Safe house that recruits a new pirate.
    Aborigine,
    /// Pirates stay drunk for a while.
    DrinkingRum,
    /// Sends the pirate back where it came from.
    Crocodile,
    /// Eats the pirate.
    Ogre,
    /// Carries the pirate home to the ship.
    Balloon,
    /// One-shot flight to any cell.
    Plane,
    /// Chest with one coin.
    #[serde(rename = "money_1")]
    #[strum(serialize = "money_1")]
    Money1,
    /// Chest with two coins.
    #[serde(rename = "money_2")]
    #[strum(serialize = "money_2")]
    Money2,
    /// Chest with three coins.
    #[serde(rename = "money_3")]
    #[strum(serialize = "money_3")]
    Money3,
    /// Chest with four coins.
    #[serde(rename = "money_4")]
    #[strum(serialize = "money_4")]
    Money4,
    /// Chest with five coins.
    #[serde(rename = "money_5")]
    #[strum(serialize = "money_5")]
    Money5,
}

impl TileType {
    /// Short name, e.g. `spinning_3`.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Number of rotation phases of a spinning tile.
    #[must_use]
    pub const fn max_spin(self) -> Option<u8> {
        match self {
            TileType::Spinning2 => Some(2),
            TileType::Spinning3 => Some(3),
            TileType::Spinning4 => Some(4),
            TileType::Spinning5 => Some(5),
            _ => None,
        }
    }

    /// Coins placed on the tile when it is opened.
    #[must_use]
    pub const fn coins(self) -> u32 {
        match self {
            TileType::Money1 => 1,
            TileType::Money2 => 2,
            TileType::Money3 => 3,
            TileType::Money4 => 4,
            TileType::Money5 => 5,
            _ => 0,
        }
    }

    /// Whether this is one of the seven arrow tiles.
    #[must_use]
    pub const fn is_directional(self) -> bool {
        matches!(
            self,
            TileType::DirStraight
                | TileType::Dir45
                | TileType::Dir45_225
                | TileType::Dir0_180
                | TileType::Dir0_135_270
                | TileType::DirDiagonal
                | TileType::DirUplr
        )
    }
}

/// Kind of object that can lie on a tile or be carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// A gold coin.
    Money,
}

/// Multiset of objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Loot {
    counts: BTreeMap<ObjectKind, u32>,
}

impl Loot {
    /// Add `count` objects of `kind`.
    pub fn add(&mut self, kind: ObjectKind, count: u32) {
        if count > 0 {
            *self.counts.entry(kind).or_insert(0) += count;
        }
    }

    /// Add a single optional object; `None` is ignored.
    pub fn put(&mut self, object: Option<ObjectKind>) {
        if let Some(kind) = object {
            self.add(kind, 1);
        }
    }

    /// Remove one object of `kind`, returning whether there was one.
    pub fn take(&mut self, kind: ObjectKind) -> bool {
        let Some(count) = self.counts.get_mut(&kind) else {
            return false;
        };
        *count -= 1;
        if *count == 0 {
            self.counts.remove(&kind);
        }
        true
    }

    /// Remove one object of any kind.
    pub fn take_any(&mut self) -> Option<ObjectKind> {
        let kind = *self.counts.keys().next()?;
        self.take(kind).then_some(kind)
    }

    /// Number of objects of `kind`.
    #[must_use]
    pub fn count(&self, kind: ObjectKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Total number of objects.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Whether there is nothing here.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// A single cell of the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Behavioral category.
    pub tile_type: TileType,
    /// Fixed rotation chosen at generation.
    pub direction: Rotation,
    /// Whether the tile has been revealed.
    pub is_open: bool,
    /// False once a one-shot tile (plane) has been used.
    pub active: bool,
    /// Objects lying on the tile.
    pub objects: Loot,
}

impl Tile {
    /// Create a closed, active tile. Water is always open.
    #[must_use]
    pub fn new(tile_type: TileType, direction: Rotation) -> Self {
        Self {
            tile_type,
            direction,
            is_open: tile_type == TileType::Water,
            active: true,
            objects: Loot::default(),
        }
    }

    /// Create an open water tile.
    #[must_use]
    pub fn water() -> Self {
        Self::new(TileType::Water, Rotation::Deg0)
    }

    /// Reveal the tile, placing its coins. Returns `true` if it was closed.
    pub fn open(&mut self) -> bool {
        if self.is_open {
            return false;
        }
        self.is_open = true;
        self.objects.add(ObjectKind::Money, self.tile_type.coins());
        true
    }
}

/// Whether a cell belongs to the sea: the outer ring plus the four inner corners.
#[must_use]
pub const fn is_water_cell(coord: Coord) -> bool {
    let last = BOARD_SIZE - 1;
    coord.x == 0
        || coord.y == 0
        || coord.x == last
        || coord.y == last
        || ((coord.x == 1 || coord.x == last - 1) && (coord.y == 1 || coord.y == last - 1))
}

/// The fixed 13×13 game board.
#[derive(Debug, Clone)]
pub struct Board {
    /// Tiles stored in row-major order.
    tiles: Vec<Tile>,
}

impl Board {
    /// Create a board from exactly `CELL_COUNT` tiles in row-major order.
    ///
    /// Returns `None` if the tile count is wrong.
    #[must_use]
    pub fn from_tiles(tiles: Vec<Tile>) -> Option<Self> {
        (tiles.len() == CELL_COUNT).then_some(Self { tiles })
    }

    /// Board where every sea cell is water and every land cell is `land`.
    ///
    /// Handy for building deterministic scenarios.
    #[must_use]
    pub fn filled(land: TileType) -> Self {
        let tiles = all_coords()
            .map(|coord| {
                if is_water_cell(coord) {
                    Tile::water()
                } else {
                    Tile::new(land, Rotation::Deg0)
                }
            })
            .collect();
        Self { tiles }
    }

    /// Check if a coordinate is on the board.
    #[must_use]
    pub const fn in_bounds(coord: Coord) -> bool {
        coord.x >= 0 && coord.y >= 0 && coord.x < BOARD_SIZE && coord.y < BOARD_SIZE
    }

    /// Convert a coordinate to an index into the tiles array.
    #[allow(clippy::cast_sign_loss)]
    fn coord_to_index(coord: Coord) -> Option<usize> {
        Self::in_bounds(coord).then(|| (coord.y * BOARD_SIZE + coord.x) as usize)
    }

    /// Get a reference to the tile at the given coordinate.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<&Tile> {
        Self::coord_to_index(coord).map(|idx| &self.tiles[idx])
    }

    /// Get a mutable reference to the tile at the given coordinate.
    #[must_use]
    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut Tile> {
        Self::coord_to_index(coord).map(|idx| &mut self.tiles[idx])
    }

    /// Set the tile at the given coordinate.
    ///
    /// Returns `false` if the coordinate is out of bounds.
    pub fn set(&mut self, coord: Coord, tile: Tile) -> bool {
        if let Some(idx) = Self::coord_to_index(coord) {
            self.tiles[idx] = tile;
            true
        } else {
            false
        }
    }

    /// Type of the tile at `coord`, if on the board.
    #[must_use]
    pub fn tile_type(&self, coord: Coord) -> Option<TileType> {
        self.get(coord).map(|tile| tile.tile_type)
    }

    /// Whether `coord` is an on-board water cell.
    #[must_use]
    pub fn is_water(&self, coord: Coord) -> bool {
        self.tile_type(coord) == Some(TileType::Water)
    }

    /// Iterate over all coordinates and tiles in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Tile)> {
        all_coords().zip(self.tiles.iter())
    }

    /// Number of tiles of each type.
    #[must_use]
    pub fn type_counts(&self) -> BTreeMap<TileType, usize> {
        let mut counts = BTreeMap::new();
        for tile in &self.tiles {
            *counts.entry(tile.tile_type).or_insert(0) += 1;
        }
        counts
    }
}

/// Every board coordinate in row-major order.
pub fn all_coords() -> impl Iterator<Item = Coord> {
    (0..BOARD_SIZE).flat_map(|y| (0..BOARD_SIZE).map(move |x| Coord::new(x, y)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_board_bounds() {
        assert!(Board::in_bounds(Coord::new(0, 0)));
        assert!(Board::in_bounds(Coord::new(12, 12)));
        assert!(!Board::in_bounds(Coord::new(13, 0)));
        assert!(!Board::in_bounds(Coord::new(0, -1)));
    }

    #[test]
    fn test_water_cells() {
        assert!(is_water_cell(Coord::new(0, 5)));
        assert!(is_water_cell(Coord::new(12, 12)));
        assert!(is_water_cell(Coord::new(1, 1)));
        assert!(is_water_cell(Coord::new(11, 1)));
        assert!(!is_water_cell(Coord::new(1, 2)));
        assert!(!is_water_cell(Coord::new(6, 6)));
        assert_eq!(all_coords().filter(|&c| is_water_cell(c)).count(), 52);
    }

    #[test]
    fn test_board_get_set() {
        let mut board = Board::filled(TileType::Empty);
        let coord = Coord::new(5, 5);
        assert_eq!(board.tile_type(coord), Some(TileType::Empty));

        assert!(board.set(coord, Tile::new(TileType::Ogre, Rotation::Deg90)));
        assert_eq!(board.tile_type(coord), Some(TileType::Ogre));
        assert!(!board.set(Coord::new(13, 13), Tile::water()));
    }

    #[test]
    fn test_open_places_coins_once() {
        let mut tile = Tile::new(TileType::Money3, Rotation::Deg0);
        assert!(!tile.is_open);
        assert!(tile.open());
        assert_eq!(tile.objects.count(ObjectKind::Money), 3);
        assert!(!tile.open());
        assert_eq!(tile.objects.count(ObjectKind::Money), 3);
    }

    #[test]
    fn test_water_starts_open() {
        assert!(Tile::water().is_open);
        assert!(!Tile::new(TileType::Empty, Rotation::Deg0).is_open);
    }

    #[test]
    fn test_loot_take() {
        let mut loot = Loot::default();
        assert!(!loot.take(ObjectKind::Money));
        loot.add(ObjectKind::Money, 2);
        assert_eq!(loot.take_any(), Some(ObjectKind::Money));
        assert_eq!(loot.total(), 1);
        assert!(loot.take(ObjectKind::Money));
        assert!(loot.is_empty());
    }

    #[test]
    fn test_tile_names() {
        assert_eq!(TileType::Spinning3.name(), "spinning_3");
        assert_eq!(TileType::Dir0_135_270.name(), "dir_0_135_270");
        assert_eq!(TileType::DrinkingRum.name(), "drinking_rum");
        assert_eq!(TileType::iter().count(), TileType::COUNT);
    }
}
