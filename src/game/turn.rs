//! Turn controller: the single mutating entry point of a game.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::GameConfig;
use crate::error::{ActionError, GameError, MoveError};
use crate::game::cycle::{ChainStep, CycleTable, cycle_table};
use crate::game::enter::on_enter;
use crate::game::exit::on_exit;
use crate::game::invariants::assert_invariants;
use crate::game::legality::legal_destinations;
use crate::game::mapgen::generate_board;
use crate::game::snapshot::{BoardSnapshot, GameSnapshot, PlayerView};
use crate::game::{Board, Character, CharacterId, Coord, GameState, Heading, ObjectKind, PlayerId};

/// A move as requested by a front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRequest {
    /// One cell in a screen direction.
    Step(Heading),
    /// Straight to a cell.
    To(Coord),
}

/// Result of an accepted step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepReport {
    /// A closed tile was opened.
    pub revealed_tile: bool,
    /// The step was final and play passed to the next player.
    pub turn_ended: bool,
    /// The moving character died during the step.
    pub eliminated: bool,
}

/// Boolean outcome of [`GameSession::try_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveOutcome {
    /// The move was legal and applied.
    pub accepted: bool,
    /// A closed tile was opened.
    pub revealed_tile: bool,
    /// Play passed to the next player.
    pub turn_ended: bool,
}

impl From<Result<StepReport, MoveError>> for MoveOutcome {
    fn from(result: Result<StepReport, MoveError>) -> Self {
        match result {
            Ok(report) => Self {
                accepted: true,
                revealed_tile: report.revealed_tile,
                turn_ended: report.turn_ended,
            },
            Err(_) => Self::default(),
        }
    }
}

/// A running game.
#[derive(Debug, Clone)]
pub struct GameSession {
    state: GameState,
    seed: Option<u64>,
    current_player: usize,
    current_character: usize,
    moved: bool,
    move_start_coords: Option<Coord>,
    cycles: Option<CycleTable>,
}

impl GameSession {
    /// Start a game with a freshly generated board.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the board cannot
    /// be generated.
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let seed = config.resolve_seed();
        let mut rng = StdRng::seed_from_u64(seed);
        let board = generate_board(&mut rng)?;
        tracing::info!(seed, players = config.players, "new game");
        let mut session = Self::from_state(GameState::new(board, config.players));
        session.seed = Some(seed);
        Ok(session)
    }

    /// Start a game on a prepared board.
    ///
    /// # Errors
    ///
    /// Returns an error if the player count is invalid.
    pub fn with_board(board: Board, players: u8) -> Result<Self, GameError> {
        GameConfig {
            players,
            seed: None,
        }
        .validate()?;
        Ok(Self::from_state(GameState::new(board, players)))
    }

    /// Resume play from an arbitrary world state, first player to move.
    #[must_use]
    pub const fn from_state(state: GameState) -> Self {
        Self {
            state,
            seed: None,
            current_player: 0,
            current_character: 0,
            moved: false,
            move_start_coords: None,
            cycles: None,
        }
    }

    /// The world state.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable world state, for setting up scenarios.
    pub const fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Seed the board was generated from, if it was generated.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.state
            .players
            .get(self.current_player)
            .map_or(0, |p| p.id)
    }

    /// The active pirate, if the current player has any.
    #[must_use]
    pub fn current_character(&self) -> Option<CharacterId> {
        let roster = &self.state.players.get(self.current_player)?.roster;
        if roster.is_empty() {
            return None;
        }
        roster.get(self.current_character % roster.len()).copied()
    }

    fn active(&self) -> Option<&Character> {
        self.state.character(self.current_character()?)
    }

    /// Whether the active pirate has moved this turn.
    #[must_use]
    pub const fn has_moved(&self) -> bool {
        self.moved
    }

    /// Cycle-entry table of the current turn, once computed.
    #[must_use]
    pub const fn cycle_table(&self) -> Option<&CycleTable> {
        self.cycles.as_ref()
    }

    /// Where the active pirate may go, sorted.
    #[must_use]
    pub fn legal_destinations(&self) -> Vec<Coord> {
        self.active()
            .map(|c| legal_destinations(&self.state, c))
            .unwrap_or_default()
    }

    /// Move the active pirate to `destination`.
    ///
    /// A rejected move leaves the game untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no active pirate or the destination is
    /// not currently legal.
    pub fn attempt_move(&mut self, destination: Coord) -> Result<StepReport, MoveError> {
        let Some(id) = self.current_character() else {
            return Err(MoveError::NoActiveCharacter);
        };
        if !Board::in_bounds(destination) {
            tracing::debug!(%destination, "move rejected: off the board");
            return Err(MoveError::OutOfBounds(destination));
        }
        if !self.legal_destinations().contains(&destination) {
            tracing::debug!(%destination, "move rejected: not legal");
            return Err(MoveError::NotLegal(destination));
        }

        if !self.moved {
            self.move_start_coords = self.state.character(id).map(|c| c.coords);
        }

        on_exit(&mut self.state, id, destination);
        self.state.relocate(id, destination);
        let revealed_tile = self
            .state
            .board
            .get_mut(destination)
            .is_some_and(|tile| tile.open());
        let mut is_final = on_enter(&mut self.state, id);
        let mut eliminated = !self.state.is_living(id);
        tracing::debug!(character = %id, %destination, revealed_tile, is_final, "step");

        if eliminated {
            is_final = true;
        } else if !is_final {
            if self.visit_cycle_entry(id) {
                eliminated = true;
                is_final = true;
            } else if self.legal_destinations().is_empty() {
                tracing::debug!(%destination, "forced chain dead-ends");
                is_final = true;
            }
        }

        self.moved = true;
        assert_invariants(&self.state);
        if is_final {
            self.advance_to_next_player();
        }

        Ok(StepReport {
            revealed_tile,
            turn_ended: is_final,
            eliminated,
        })
    }

    /// Record an arrival on a forced tile. Returns `true` if the pirate went
    /// round a loop and was eliminated.
    fn visit_cycle_entry(&mut self, id: CharacterId) -> bool {
        let Some(character) = self.state.character(id) else {
            return false;
        };
        let step = ChainStep::of(&self.state, character);

        let Some(table) = self.cycles.as_mut() else {
            // First forced landing this turn: it counts as the first visit.
            let mut table = cycle_table(&self.state, character);
            if let Some(entered) = table.get_mut(&step) {
                *entered = true;
            }
            self.cycles = Some(table);
            return false;
        };

        match table.get_mut(&step) {
            Some(entered) if *entered => {
                tracing::info!(character = %id, at = %step.coords, "caught in a forced loop");
                let dropped = self.state.character_mut(id).and_then(|c| c.object.take());
                if let Some(start) = self.move_start_coords {
                    self.state.drop_on_tile(start, dropped);
                }
                self.state.eliminate(id);
                true
            }
            Some(entered) => {
                *entered = true;
                false
            }
            None => false,
        }
    }

    /// Move the active pirate by direction or to a coordinate.
    pub fn try_move(&mut self, request: MoveRequest) -> MoveOutcome {
        let destination = match request {
            MoveRequest::To(coord) => coord,
            MoveRequest::Step(heading) => match self.active() {
                Some(c) => c.coords + heading.offset(),
                None => return MoveOutcome::default(),
            },
        };
        self.attempt_move(destination).into()
    }

    /// Pass play to the next player that still has pirates.
    ///
    /// Every pirate of the new current player then re-enters its tile, so
    /// tiles that act at turn start (rum, traps, ships) take effect.
    pub fn advance_to_next_player(&mut self) {
        let count = self.state.players.len();
        let next = (1..=count)
            .map(|step| (self.current_player + step) % count)
            .find(|&index| self.state.players[index].has_crew());

        self.current_character = 0;
        self.moved = false;
        self.move_start_coords = None;
        self.cycles = None;

        let Some(next) = next else {
            tracing::warn!("no player has living pirates");
            return;
        };
        self.current_player = next;
        let player = self.current_player();
        tracing::info!(player, "turn passes");

        let crew = self.state.players[next].roster.clone();
        for id in crew {
            if self.state.is_living(id) {
                on_enter(&mut self.state, id);
            }
        }
        assert_invariants(&self.state);
    }

    /// Facade for [`Self::advance_to_next_player`].
    pub fn advance_player(&mut self) {
        self.advance_to_next_player();
    }

    /// Switch to the current player's next pirate.
    ///
    /// # Errors
    ///
    /// Refused once the active pirate has moved this turn.
    pub fn advance_to_next_character(&mut self) -> Result<CharacterId, ActionError> {
        if self.moved {
            return Err(ActionError::AlreadyMoved);
        }
        let len = self
            .state
            .players
            .get(self.current_player)
            .map_or(0, |p| p.roster.len());
        if len == 0 {
            return Err(ActionError::NoActiveCharacter);
        }
        self.current_character = (self.current_character % len + 1) % len;
        self.current_character().ok_or(ActionError::NoActiveCharacter)
    }

    /// Facade for [`Self::advance_to_next_character`]; returns whether the
    /// switch happened.
    pub fn advance_character(&mut self) -> bool {
        self.advance_to_next_character().is_ok()
    }

    /// Pick up one object from the active pirate's tile.
    ///
    /// # Errors
    ///
    /// Refused after moving, while already carrying, or on an empty tile.
    pub fn take_object(&mut self) -> Result<ObjectKind, ActionError> {
        let (id, at) = self.free_action_target()?;
        if self.state.character(id).is_some_and(|c| c.object.is_some()) {
            return Err(ActionError::AlreadyCarrying);
        }
        let object = self
            .state
            .board
            .get_mut(at)
            .and_then(|tile| tile.objects.take_any())
            .ok_or(ActionError::NothingToTake)?;
        if let Some(character) = self.state.character_mut(id) {
            character.object = Some(object);
        }
        tracing::debug!(character = %id, %at, "picked up {object:?}");
        Ok(object)
    }

    /// Put the carried object down on the active pirate's tile.
    ///
    /// # Errors
    ///
    /// Refused after moving or when carrying nothing.
    pub fn drop_object(&mut self) -> Result<ObjectKind, ActionError> {
        let (id, at) = self.free_action_target()?;
        let object = self
            .state
            .character_mut(id)
            .and_then(|c| c.object.take())
            .ok_or(ActionError::NothingCarried)?;
        self.state.drop_on_tile(at, Some(object));
        tracing::debug!(character = %id, %at, "dropped {object:?}");
        Ok(object)
    }

    fn free_action_target(&self) -> Result<(CharacterId, Coord), ActionError> {
        if self.moved {
            return Err(ActionError::AlreadyMoved);
        }
        let character = self.active().ok_or(ActionError::NoActiveCharacter)?;
        Ok((character.id, character.coords))
    }

    /// Board view for rendering.
    #[must_use]
    pub fn board_snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::capture(&self.state)
    }

    /// Player views for rendering.
    #[must_use]
    pub fn players_snapshot(&self) -> Vec<PlayerView> {
        PlayerView::capture_all(&self.state)
    }

    /// Everything a front end needs for one frame.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            current_player: self.current_player(),
            current_character: self.current_character(),
            moved: self.moved,
            board: self.board_snapshot(),
            players: self.players_snapshot(),
            legal_destinations: self.legal_destinations(),
        }
    }
}
