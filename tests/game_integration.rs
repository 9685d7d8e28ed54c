//! Multi-turn integration tests for game mechanics.
//!
//! These tests drive whole games through the public session API and check
//! that the world stays consistent over many turns.
//!
//! Run with: cargo test --release game_integration

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::cast_possible_truncation)]

use jackal::game::enter::is_final;
use jackal::game::invariants::check_invariants;
use jackal::game::legality::legal_destinations;
use jackal::game::{
    Board, CharacterId, CharacterState, Coord, GameSession, Heading, MoveOutcome, MoveRequest,
    ObjectKind, Rotation, Tile, TileType,
};
use jackal::{GameConfig, MoveError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strum::IntoEnumIterator;

fn session_with(board: Board, players: u8) -> GameSession {
    GameSession::with_board(board, players).unwrap()
}

/// Put the active pirate on `at` as if it had been standing there all turn.
fn stand_on(session: &mut GameSession, at: Coord) -> CharacterId {
    let id = session.current_character().unwrap();
    let character = session.state_mut().character_mut(id).unwrap();
    character.coords = at;
    character.prev_coords = at;
    id
}

/// Play random legal moves; returns the number of steps taken.
fn random_playout(seed: u64, players: u8, max_steps: usize) -> usize {
    let config = GameConfig {
        players,
        seed: Some(seed),
    };
    let mut session = GameSession::new(&config).unwrap();
    let mut rng = StdRng::seed_from_u64(seed ^ 0x5eed);

    for step in 0..max_steps {
        if session.current_character().is_none() {
            return step;
        }
        let moves = session.legal_destinations();
        if moves.is_empty() {
            session.advance_player();
            continue;
        }
        if rng.random_range(0..4) == 0 && !session.has_moved() {
            session.advance_character();
            continue;
        }
        let destination = moves[rng.random_range(0..moves.len())];
        session
            .attempt_move(destination)
            .unwrap_or_else(|e| panic!("seed {seed}: legal move refused: {e}"));

        let violations = check_invariants(session.state());
        assert!(
            violations.is_empty(),
            "seed {seed}, step {step}: {violations:?}"
        );
    }
    max_steps
}

#[test]
fn test_first_step_onto_closed_tile() {
    let config = GameConfig {
        players: 2,
        seed: Some(42),
    };
    let mut session = GameSession::new(&config).unwrap();
    // Replace whatever the generator put in front of the red ship.
    let landing = Coord::new(1, 6);
    session
        .state_mut()
        .board
        .set(landing, Tile::new(TileType::Empty, Rotation::Deg0));

    let outcome = session.try_move(MoveRequest::Step(Heading::Right));
    assert_eq!(
        outcome,
        MoveOutcome {
            accepted: true,
            revealed_tile: true,
            turn_ended: true,
        }
    );
    assert!(session.state().board.get(landing).unwrap().is_open);
    assert_eq!(session.current_player(), 1);
    assert!(!session.has_moved());
}

#[test]
fn test_rejected_moves_leave_no_trace() {
    let mut session = session_with(Board::filled(TileType::Empty), 2);
    let before = session.snapshot();

    assert_eq!(
        session.attempt_move(Coord::new(13, 6)),
        Err(MoveError::OutOfBounds(Coord::new(13, 6)))
    );
    assert_eq!(
        session.attempt_move(Coord::new(3, 6)),
        Err(MoveError::NotLegal(Coord::new(3, 6)))
    );
    assert!(!session.try_move(MoveRequest::Step(Heading::Left)).accepted);
    assert_eq!(session.snapshot(), before);
}

#[test]
fn test_loot_reaches_the_ship() {
    let mut session = session_with(Board::filled(TileType::Empty), 2);
    let id = stand_on(&mut session, Coord::new(1, 6));
    session.state_mut().character_mut(id).unwrap().object = Some(ObjectKind::Money);

    let report = session.attempt_move(Coord::new(0, 6)).unwrap();
    assert!(report.turn_ended);
    assert!(!report.eliminated);

    let red = &session.state().players[0];
    assert_eq!(red.objects.count(ObjectKind::Money), 1);
    assert_eq!(red.coins(), 1);
    let pirate = session.state().character(id).unwrap();
    assert_eq!(pirate.coords, Coord::new(0, 6));
    assert_eq!(pirate.object, None);
}

#[test]
fn test_dig_carry_and_deliver() {
    let mut session = session_with(Board::filled(TileType::Money3), 1);
    let id = session.current_character().unwrap();

    // Land on the treasure, which opens it.
    session.attempt_move(Coord::new(1, 6)).unwrap();
    let tile = session.state().board.get(Coord::new(1, 6)).unwrap();
    assert_eq!(tile.objects.count(ObjectKind::Money), 3);

    // Next turn: pick up a coin and walk it home.
    assert_eq!(session.current_character(), Some(id));
    assert_eq!(session.take_object(), Ok(ObjectKind::Money));
    assert!(!session.legal_destinations().contains(&Coord::new(2, 6)));
    session.attempt_move(Coord::new(0, 6)).unwrap();

    assert_eq!(session.state().players[0].coins(), 1);
    let tile = session.state().board.get(Coord::new(1, 6)).unwrap();
    assert_eq!(tile.objects.count(ObjectKind::Money), 2);
}

#[test]
fn test_rum_costs_two_turns() {
    let rum = Coord::new(1, 6);
    let mut board = Board::filled(TileType::Empty);
    board.set(rum, Tile::new(TileType::DrinkingRum, Rotation::Deg0));
    let mut session = session_with(board, 2);
    let id = session.current_character().unwrap();

    session.attempt_move(rum).unwrap();
    let state_of = |s: &GameSession| s.state().character(id).unwrap().state;
    assert_eq!(state_of(&session), CharacterState::Drunk);

    session.advance_player();
    assert_eq!(session.current_player(), 0);
    assert_eq!(state_of(&session), CharacterState::Hangover);
    assert!(session.legal_destinations().is_empty());
    // The rest of the crew can still act.
    assert!(session.advance_character());
    assert!(!session.legal_destinations().is_empty());

    session.advance_player();
    session.advance_player();
    assert_eq!(state_of(&session), CharacterState::Alive);
    assert_eq!(session.current_character(), Some(id));
    assert!(session.legal_destinations().contains(&Coord::new(2, 6)));
}

#[test]
fn test_crocodile_sends_pirate_back() {
    let from = Coord::new(4, 5);
    let croc = Coord::new(5, 5);
    let mut board = Board::filled(TileType::Empty);
    board.set(croc, Tile::new(TileType::Crocodile, Rotation::Deg0));
    let mut session = session_with(board, 2);
    let id = stand_on(&mut session, from);

    let report = session.attempt_move(croc).unwrap();
    assert!(!report.turn_ended);
    assert_eq!(session.legal_destinations(), vec![from]);

    let report = session.attempt_move(from).unwrap();
    assert!(report.turn_ended);
    assert_eq!(session.state().character(id).unwrap().coords, from);
    assert_eq!(session.current_player(), 1);
}

#[test]
fn test_arrow_ring_terminates() {
    let mut board = Board::filled(TileType::Empty);
    board.set(Coord::new(6, 6), Tile::new(TileType::DirStraight, Rotation::Deg90));
    board.set(Coord::new(7, 6), Tile::new(TileType::DirStraight, Rotation::Deg270));
    let mut session = session_with(board, 2);
    let id = stand_on(&mut session, Coord::new(5, 6));

    let report = session.attempt_move(Coord::new(6, 6)).unwrap();
    assert!(!report.turn_ended);
    let mut steps = 0;
    loop {
        let moves = session.legal_destinations();
        assert_eq!(moves.len(), 1, "arrows leave a single way on");
        let report = session.attempt_move(moves[0]).unwrap();
        steps += 1;
        if report.turn_ended {
            assert!(report.eliminated);
            break;
        }
        assert!(steps < 10, "forced loop never ended");
    }
    assert!(!session.state().is_living(id));
    assert_eq!(session.state().players[0].roster.len(), 2);
}

#[test]
fn test_horses_onto_ice_is_a_choice_not_a_loop() {
    let near = Coord::new(5, 5);
    let ice = Coord::new(7, 6);
    let far = Coord::new(9, 7);
    let mut board = Board::filled(TileType::Empty);
    board.set(near, Tile::new(TileType::Horses, Rotation::Deg0));
    board.set(ice, Tile::new(TileType::IceLake, Rotation::Deg0));
    board.set(far, Tile::new(TileType::Horses, Rotation::Deg0));
    let mut session = session_with(board, 2);
    let id = stand_on(&mut session, Coord::new(4, 5));

    // Jump onto the ice, slide to the far horses, jump back, slide home.
    for (to, next) in [(near, ice), (ice, far), (far, ice), (ice, near), (near, ice)] {
        let report = session.attempt_move(to).unwrap();
        assert!(!report.turn_ended && !report.eliminated, "at {to}");
        assert!(session.legal_destinations().contains(&next), "at {to}");
    }
    assert_eq!(session.legal_destinations().len(), 8);

    let report = session.attempt_move(Coord::new(3, 6)).unwrap();
    assert!(report.turn_ended);
    assert!(!report.eliminated);
    assert!(session.state().is_living(id));
    assert_eq!(session.state().character(id).unwrap().coords, Coord::new(3, 6));
}

#[test]
fn test_ice_between_arrows_is_a_loop() {
    let mut board = Board::filled(TileType::Empty);
    board.set(Coord::new(3, 3), Tile::new(TileType::DirStraight, Rotation::Deg90));
    board.set(Coord::new(4, 3), Tile::new(TileType::IceLake, Rotation::Deg0));
    board.set(Coord::new(5, 3), Tile::new(TileType::DirStraight, Rotation::Deg270));
    let mut session = session_with(board, 2);
    let id = stand_on(&mut session, Coord::new(2, 3));

    let path = [(3, 3), (4, 3), (5, 3), (4, 3)];
    for (x, y) in path {
        let report = session.attempt_move(Coord::new(x, y)).unwrap();
        assert!(!report.turn_ended, "at ({x}, {y})");
    }
    let report = session.attempt_move(Coord::new(3, 3)).unwrap();
    assert!(report.eliminated);
    assert!(report.turn_ended);
    assert!(!session.state().is_living(id));
}

#[test]
fn test_every_tile_type_can_be_entered() {
    let from = Coord::new(4, 5);
    let at = Coord::new(5, 5);

    for tile_type in TileType::iter().filter(|&t| t != TileType::Water) {
        let mut board = Board::filled(TileType::Empty);
        board.set(at, Tile::new(tile_type, Rotation::Deg90));
        let mut session = session_with(board, 2);
        stand_on(&mut session, from);

        let report = session
            .attempt_move(at)
            .unwrap_or_else(|e| panic!("{tile_type:?}: {e}"));
        assert!(report.revealed_tile, "{tile_type:?} was not revealed");
        if is_final(tile_type) {
            assert!(report.turn_ended, "{tile_type:?} should end the turn");
        }
        let violations = check_invariants(session.state());
        assert!(violations.is_empty(), "{tile_type:?}: {violations:?}");
    }
}

#[test]
fn test_every_tile_type_has_bounded_moves() {
    let at = Coord::new(5, 5);

    for tile_type in TileType::iter() {
        for rotation in Rotation::ALL {
            let mut board = Board::filled(TileType::Empty);
            let mut tile = Tile::new(tile_type, rotation);
            tile.open();
            board.set(at, tile);
            let mut session = session_with(board, 2);
            let id = stand_on(&mut session, at);

            let before = session.snapshot();
            let character = session.state().character(id).unwrap();
            let moves = legal_destinations(session.state(), character);
            assert!(
                moves.iter().all(|&m| Board::in_bounds(m)),
                "{tile_type:?} {rotation:?}: {moves:?}"
            );
            assert!(moves.windows(2).all(|w| w[0] < w[1]));
            assert_eq!(session.snapshot(), before);
        }
    }
}

#[test]
fn test_aborigine_recruits_up_to_full_crew() {
    let hut = Coord::new(1, 6);
    let mut board = Board::filled(TileType::Empty);
    board.set(hut, Tile::new(TileType::Aborigine, Rotation::Deg0));
    let mut session = session_with(board, 1);
    let id = session.current_character().unwrap();

    session.attempt_move(hut).unwrap();
    assert_eq!(session.state().players[0].roster.len(), 3);

    session.state_mut().eliminate(id);
    let survivor = session.state().players[0].roster[0];
    let pirate = session.state_mut().character_mut(survivor).unwrap();
    pirate.coords = hut;
    pirate.prev_coords = hut;

    session.advance_player();
    assert_eq!(session.state().players[0].roster.len(), 3);
    assert_eq!(session.state().occupants_at(hut).len(), 2);
}

#[test]
fn test_100_step_game_no_panic() {
    random_playout(42, 2, 100);
}

#[test]
fn test_four_player_game_no_panic() {
    random_playout(12345, 4, 400);
}

#[test]
fn test_multiple_seeds_no_panic() {
    for seed in 0..40 {
        random_playout(seed, 1 + (seed % 4) as u8, 250);
    }
}

#[test]
fn test_same_seed_same_game() {
    let config = GameConfig {
        players: 3,
        seed: Some(777),
    };
    let a = GameSession::new(&config).unwrap();
    let b = GameSession::new(&config).unwrap();
    assert_eq!(a.snapshot(), b.snapshot());
}
