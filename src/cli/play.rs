//! Play command implementation: a line-oriented game on stdin.

use std::io::{self, BufRead, Write};

use super::CliError;
use super::output::{format_board, format_destinations, format_players};
use jackal::game::{Coord, GameSession, Heading, MoveRequest};
use jackal::GameConfig;

const HELP: &str = "\
commands:
  up | down | left | right   step the active pirate
  move X Y                   move the active pirate to (X, Y)
  next                       end the turn
  switch                     select the next pirate
  take | drop                pick up or put down loot
  moves                      list legal moves
  show                       print the board and players
  json                       print the game state as JSON
  quit                       leave the game";

/// A parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Command {
    /// Move the active pirate.
    Move(MoveRequest),
    /// Pass to the next player.
    Next,
    /// Select the next pirate.
    Switch,
    /// Pick up loot.
    Take,
    /// Put loot down.
    Drop,
    /// List legal moves.
    Moves,
    /// Print the game.
    Show,
    /// Print the game as JSON.
    Json,
    /// Print the command list.
    Help,
    /// Leave.
    Quit,
}

/// Parse one line of input.
pub(crate) fn parse_command(line: &str) -> Result<Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let command = match words.as_slice() {
        ["up" | "w"] => Command::Move(MoveRequest::Step(Heading::Up)),
        ["down" | "s"] => Command::Move(MoveRequest::Step(Heading::Down)),
        ["left" | "a"] => Command::Move(MoveRequest::Step(Heading::Left)),
        ["right" | "d"] => Command::Move(MoveRequest::Step(Heading::Right)),
        ["move" | "m", x, y] => {
            let x = x.parse().map_err(|_| format!("bad column: {x}"))?;
            let y = y.parse().map_err(|_| format!("bad row: {y}"))?;
            Command::Move(MoveRequest::To(Coord::new(x, y)))
        }
        ["next" | "n"] => Command::Next,
        ["switch" | "tab"] => Command::Switch,
        ["take"] => Command::Take,
        ["drop"] => Command::Drop,
        ["moves"] => Command::Moves,
        ["show"] | [] => Command::Show,
        ["json"] => Command::Json,
        ["help" | "?"] => Command::Help,
        ["quit" | "q" | "exit"] => Command::Quit,
        _ => return Err(format!("unknown command: {}", line.trim())),
    };
    Ok(command)
}

fn show(session: &GameSession) {
    let snapshot = session.snapshot();
    print!("{}", format_board(&snapshot.board, &snapshot.players, false));
    print!("{}", format_players(&snapshot));
    println!("{}", format_destinations(&snapshot.legal_destinations));
}

fn apply(session: &mut GameSession, command: Command) -> Result<(), CliError> {
    match command {
        Command::Move(request) => {
            let outcome = session.try_move(request);
            if !outcome.accepted {
                println!("illegal move");
                return Ok(());
            }
            if outcome.revealed_tile {
                println!("a new tile is revealed");
            }
            if outcome.turn_ended {
                println!("turn passes to player {}", session.current_player());
            }
            show(session);
        }
        Command::Next => {
            session.advance_player();
            println!("turn passes to player {}", session.current_player());
            show(session);
        }
        Command::Switch => {
            if session.advance_character() {
                println!("{}", format_destinations(&session.legal_destinations()));
            } else {
                println!("cannot switch pirates now");
            }
        }
        Command::Take => match session.take_object() {
            Ok(object) => println!("picked up {object:?}"),
            Err(e) => println!("{e}"),
        },
        Command::Drop => match session.drop_object() {
            Ok(object) => println!("dropped {object:?}"),
            Err(e) => println!("{e}"),
        },
        Command::Moves => println!("{}", format_destinations(&session.legal_destinations())),
        Command::Show => show(session),
        Command::Json => println!("{}", serde_json::to_string_pretty(&session.snapshot())?),
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
    Ok(())
}

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the game cannot be set up or stdin fails.
pub(crate) fn execute(players: u8, seed: Option<u64>) -> Result<(), CliError> {
    let config = GameConfig { players, seed };
    let mut session = GameSession::new(&config)?;

    println!(
        "Jackal: {} players, seed {}",
        players,
        session.seed().unwrap_or_default()
    );
    println!("type `help` for commands");
    show(&session);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print!("> ");
    stdout.flush()?;
    for line in stdin.lock().lines() {
        let line = line?;
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => apply(&mut session, command)?,
            Err(message) => println!("{message}"),
        }
        print!("> ");
        stdout.flush()?;
    }
    Ok(())
}
