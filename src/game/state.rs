//! World state: the board, the players and every pirate ever created.

use crate::game::player::{MAX_PLAYERS, ship_start};
use crate::game::{Board, Character, CharacterId, Coord, ObjectKind, Player, PlayerId};

/// Pirates each player starts with.
pub const STARTING_CREW: usize = 3;

/// Complete world state.
///
/// Characters live in an arena indexed by [`CharacterId`]. A character is in
/// play while its owner's roster lists it; eliminated characters stay in the
/// arena but are never referenced again.
#[derive(Debug, Clone)]
pub struct GameState {
    /// The game board.
    pub board: Board,
    /// All players, indexed by [`PlayerId`].
    pub players: Vec<Player>,
    /// Character arena.
    characters: Vec<Character>,
}

impl GameState {
    /// Create a game on `board` with `player_count` players, each with a full
    /// crew aboard their ship.
    ///
    /// The count is clamped to `1..=MAX_PLAYERS`.
    #[must_use]
    pub fn new(board: Board, player_count: u8) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let count = player_count.clamp(1, MAX_PLAYERS as u8);
        let mut state = Self {
            board,
            players: (0..count).map(Player::new).collect(),
            characters: Vec::with_capacity(usize::from(count) * STARTING_CREW),
        };
        for side in 0..count {
            for _ in 0..STARTING_CREW {
                state.spawn(side, ship_start(side));
            }
        }
        state
    }

    /// Get a player by ID.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(usize::from(id))
    }

    /// Get a mutable player by ID.
    #[must_use]
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(usize::from(id))
    }

    /// Get a character by ID, whether or not it is still in play.
    #[must_use]
    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(id.0)
    }

    /// Get a mutable character by ID.
    #[must_use]
    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.get_mut(id.0)
    }

    /// Whether the character is still on its owner's roster.
    #[must_use]
    pub fn is_living(&self, id: CharacterId) -> bool {
        self.character(id)
            .and_then(|c| self.player(c.owner))
            .is_some_and(|p| p.roster.contains(&id))
    }

    /// The living pirates of a player, in roster order.
    pub fn crew(&self, player: PlayerId) -> impl Iterator<Item = &Character> {
        self.player(player)
            .into_iter()
            .flat_map(|p| p.roster.iter())
            .filter_map(|&id| self.character(id))
    }

    /// Every living pirate, player by player.
    pub fn living_characters(&self) -> impl Iterator<Item = &Character> {
        self.players
            .iter()
            .flat_map(|p| p.roster.iter())
            .filter_map(|&id| self.character(id))
    }

    /// Living pirates standing at `coord`, in player iteration order.
    #[must_use]
    pub fn occupants_at(&self, coord: Coord) -> Vec<CharacterId> {
        self.living_characters()
            .filter(|c| c.coords == coord)
            .map(|c| c.id)
            .collect()
    }

    /// Living pirates at `coord` that do not belong to `player`.
    #[must_use]
    pub fn opponents_at(&self, coord: Coord, player: PlayerId) -> Vec<CharacterId> {
        self.living_characters()
            .filter(|c| c.coords == coord && c.owner != player)
            .map(|c| c.id)
            .collect()
    }

    /// Whether any pirate not belonging to `player` stands at `coord`.
    #[must_use]
    pub fn has_opponent_at(&self, coord: Coord, player: PlayerId) -> bool {
        self.living_characters()
            .any(|c| c.coords == coord && c.owner != player)
    }

    /// Players whose ship is anchored at `coord`.
    #[must_use]
    pub fn ship_owners_at(&self, coord: Coord) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|p| p.ship_coords == coord)
            .map(|p| p.id)
            .collect()
    }

    /// Move a character to `to`, recording where it came from.
    pub fn relocate(&mut self, id: CharacterId, to: Coord) {
        if let Some(character) = self.character_mut(id) {
            character.relocate(to);
        }
    }

    /// Put an object on the tile at `coord`; `None` is ignored.
    pub fn drop_on_tile(&mut self, coord: Coord, object: Option<ObjectKind>) {
        if let Some(tile) = self.board.get_mut(coord) {
            tile.objects.put(object);
        }
    }

    /// Add an object to a player's haul; `None` is ignored.
    pub fn deposit(&mut self, player: PlayerId, object: Option<ObjectKind>) {
        if let Some(player) = self.player_mut(player) {
            player.objects.put(object);
        }
    }

    /// Send a pirate back to its own ship.
    ///
    /// Its carried object is dropped on the tile it was kicked from, and its
    /// spin phase and condition are reset.
    pub fn kick(&mut self, id: CharacterId) {
        let Some(character) = self.character(id) else {
            return;
        };
        let (from, owner) = (character.coords, character.owner);
        let Some(ship) = self.player(owner).map(|p| p.ship_coords) else {
            return;
        };
        let dropped = self
            .character_mut(id)
            .and_then(|c| c.send_home(ship));
        self.drop_on_tile(from, dropped);
        tracing::debug!(character = %id, player = owner, %from, "kicked back to ship");
    }

    /// Remove a pirate from play. Its carried object is left untouched.
    pub fn eliminate(&mut self, id: CharacterId) {
        let Some(character) = self.character(id) else {
            return;
        };
        let (owner, at) = (character.owner, character.coords);
        if let Some(player) = self.player_mut(owner)
            && player.dismiss(id)
        {
            tracing::info!(character = %id, player = owner, %at, "character eliminated");
        }
    }

    /// Recruit a new pirate for `player` at `coords` if the crew is not full.
    pub fn spawn(&mut self, player: PlayerId, coords: Coord) -> Option<CharacterId> {
        if !self.player(player)?.can_recruit() {
            return None;
        }
        let id = CharacterId(self.characters.len());
        self.characters.push(Character::new(id, player, coords));
        self.player_mut(player)?.roster.push(id);
        tracing::debug!(character = %id, player, %coords, "character joined crew");
        Some(id)
    }
}
