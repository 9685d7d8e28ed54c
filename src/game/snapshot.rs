//! Read-only views of the game for renderers and front ends.

use serde::Serialize;

use crate::game::map::{BOARD_SIZE, Loot};
use crate::game::{
    Board, CharacterId, CharacterState, Color, Coord, GameState, ObjectKind, PlayerId, Tile, TileType,
};

/// One cell as a renderer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileView {
    /// Tile type.
    pub tile_type: TileType,
    /// Rotation in degrees (0, 90, 180 or 270).
    pub direction: u16,
    /// Whether the tile has been revealed.
    pub is_open: bool,
    /// False once a one-shot tile has been used.
    pub active: bool,
    /// Objects lying on the tile.
    pub objects: Loot,
}

impl From<&Tile> for TileView {
    fn from(tile: &Tile) -> Self {
        Self {
            tile_type: tile.tile_type,
            direction: tile.direction.degrees(),
            is_open: tile.is_open,
            active: tile.active,
            objects: tile.objects.clone(),
        }
    }
}

/// The whole board, row by row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    /// Width and height in tiles.
    pub size: i32,
    /// `rows[y][x]`.
    pub rows: Vec<Vec<TileView>>,
}

impl BoardSnapshot {
    /// Capture the board of `state`.
    #[must_use]
    pub fn capture(state: &GameState) -> Self {
        Self::of_board(&state.board)
    }

    /// Capture a bare board.
    #[must_use]
    pub fn of_board(board: &Board) -> Self {
        let mut rows: Vec<Vec<TileView>> = Vec::new();
        for (coord, tile) in board.iter() {
            if coord.x == 0 {
                rows.push(Vec::new());
            }
            if let Some(row) = rows.last_mut() {
                row.push(TileView::from(tile));
            }
        }
        Self {
            size: BOARD_SIZE,
            rows,
        }
    }

    /// The view of the cell at `coord`.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<&TileView> {
        let x = usize::try_from(coord.x).ok()?;
        let y = usize::try_from(coord.y).ok()?;
        self.rows.get(y)?.get(x)
    }
}

/// A living pirate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CharacterView {
    /// Stable identifier.
    pub id: CharacterId,
    /// Current cell.
    pub coords: Coord,
    /// Condition.
    pub state: CharacterState,
    /// Spin phase, if on a spinning tile.
    pub spin_counter: Option<u8>,
    /// Carried object.
    pub object: Option<ObjectKind>,
}

/// A player, their ship and living crew.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerView {
    /// Player identifier.
    pub id: PlayerId,
    /// Ship colour.
    pub color: Color,
    /// Side of the board.
    pub side: u8,
    /// Ship position.
    pub ship_coords: Coord,
    /// Loot delivered to the ship.
    pub objects: Loot,
    /// Living pirates in roster order.
    pub characters: Vec<CharacterView>,
}

impl PlayerView {
    /// Capture every player of `state`.
    #[must_use]
    pub fn capture_all(state: &GameState) -> Vec<Self> {
        state
            .players
            .iter()
            .map(|player| Self {
                id: player.id,
                color: player.color,
                side: player.side,
                ship_coords: player.ship_coords,
                objects: player.objects.clone(),
                characters: state
                    .crew(player.id)
                    .map(|c| CharacterView {
                        id: c.id,
                        coords: c.coords,
                        state: c.state,
                        spin_counter: c.spin_counter,
                        object: c.object,
                    })
                    .collect(),
            })
            .collect()
    }
}

/// Everything a front end needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    /// Player whose turn it is.
    pub current_player: PlayerId,
    /// Active pirate, if the current player has any.
    pub current_character: Option<CharacterId>,
    /// Whether the active pirate already moved this turn.
    pub moved: bool,
    /// Board view.
    pub board: BoardSnapshot,
    /// Player views.
    pub players: Vec<PlayerView>,
    /// Where the active pirate may go.
    pub legal_destinations: Vec<Coord>,
}
