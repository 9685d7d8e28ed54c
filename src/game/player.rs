//! Players and their pirates.

use serde::Serialize;

use crate::game::map::Loot;
use crate::game::{Coord, ObjectKind};

/// Player identifier; also the side of the board the player sails from.
pub type PlayerId = u8;

/// Maximum number of players in a game.
pub const MAX_PLAYERS: usize = 4;

/// Maximum number of living pirates per player.
pub const MAX_CREW: usize = 3;

/// Stable index of a character in the world's character arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CharacterId(pub usize);

impl std::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ship colour, fixed by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    /// Side 0.
    Red,
    /// Side 1.
    White,
    /// Side 2.
    Black,
    /// Side 3.
    Yellow,
}

impl Color {
    /// Colour of the player on `side`.
    #[must_use]
    pub const fn for_side(side: u8) -> Self {
        match side % 4 {
            0 => Color::Red,
            1 => Color::White,
            2 => Color::Black,
            _ => Color::Yellow,
        }
    }

    /// Lowercase colour name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::White => "white",
            Color::Black => "black",
            Color::Yellow => "yellow",
        }
    }
}

/// Starting ship position for a side.
#[must_use]
pub const fn ship_start(side: u8) -> Coord {
    match side % 4 {
        0 => Coord::new(0, 6),
        1 => Coord::new(6, 12),
        2 => Coord::new(12, 6),
        _ => Coord::new(6, 0),
    }
}

/// Condition of a pirate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterState {
    /// Free to move.
    #[default]
    Alive,
    /// Just drank rum; skips a turn.
    Drunk,
    /// Recovering from rum; skips another turn.
    Hangover,
    /// Caught in a trap until a friend arrives.
    Trapped,
}

impl CharacterState {
    /// Whether a character in this state may move.
    #[must_use]
    pub const fn is_mobile(self) -> bool {
        matches!(self, CharacterState::Alive)
    }
}

/// A pirate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Character {
    /// Arena index.
    pub id: CharacterId,
    /// Owning player.
    pub owner: PlayerId,
    /// Current cell.
    pub coords: Coord,
    /// Cell the character arrived from.
    pub prev_coords: Coord,
    /// Current condition.
    pub state: CharacterState,
    /// Phase on a spinning tile; `None` when not spinning.
    pub spin_counter: Option<u8>,
    /// Carried object, if any.
    pub object: Option<ObjectKind>,
}

impl Character {
    /// Create a fresh pirate standing at `coords`.
    #[must_use]
    pub const fn new(id: CharacterId, owner: PlayerId, coords: Coord) -> Self {
        Self {
            id,
            owner,
            coords,
            prev_coords: coords,
            state: CharacterState::Alive,
            spin_counter: None,
            object: None,
        }
    }

    /// Move to `to`, remembering the current cell as the previous one.
    pub const fn relocate(&mut self, to: Coord) {
        self.prev_coords = self.coords;
        self.coords = to;
    }

    /// Whether the character's last relocation actually changed its cell.
    #[must_use]
    pub fn just_moved(&self) -> bool {
        self.prev_coords != self.coords
    }

    /// Send the character back to `ship`, resetting its condition. The cell
    /// it was kicked from becomes its previous cell.
    ///
    /// Returns the object it was carrying.
    pub fn send_home(&mut self, ship: Coord) -> Option<ObjectKind> {
        self.relocate(ship);
        self.spin_counter = None;
        self.state = CharacterState::Alive;
        self.object.take()
    }
}

/// A player and their ship.
#[derive(Debug, Clone)]
pub struct Player {
    /// Identifier, equal to the side.
    pub id: PlayerId,
    /// Ship colour.
    pub color: Color,
    /// Side of the board (0-3).
    pub side: u8,
    /// Current ship position.
    pub ship_coords: Coord,
    /// Loot delivered to the ship.
    pub objects: Loot,
    /// Living characters, in switching order.
    pub roster: Vec<CharacterId>,
}

impl Player {
    /// Create a player on `side` with an empty crew.
    #[must_use]
    pub fn new(side: u8) -> Self {
        Self {
            id: side,
            color: Color::for_side(side),
            side,
            ship_coords: ship_start(side),
            objects: Loot::default(),
            roster: Vec::with_capacity(MAX_CREW),
        }
    }

    /// Whether the player still has living pirates.
    #[must_use]
    pub fn has_crew(&self) -> bool {
        !self.roster.is_empty()
    }

    /// Whether another pirate may join the crew.
    #[must_use]
    pub fn can_recruit(&self) -> bool {
        self.roster.len() < MAX_CREW
    }

    /// Remove a character from the roster. Returns `true` if it was there.
    pub fn dismiss(&mut self, id: CharacterId) -> bool {
        let before = self.roster.len();
        self.roster.retain(|&member| member != id);
        self.roster.len() != before
    }

    /// Coins delivered to the ship.
    #[must_use]
    pub fn coins(&self) -> u32 {
        self.objects.count(ObjectKind::Money)
    }
}
