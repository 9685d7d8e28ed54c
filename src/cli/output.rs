//! Output formatting utilities for CLI.

use std::fmt::Write;

use jackal::game::{BoardSnapshot, Color, Coord, GameSnapshot, PlayerView, TileType, TileView};
use serde::Serialize;

/// JSON-serializable generated board.
#[derive(Debug, Serialize)]
pub(super) struct JsonBoard<'a> {
    /// Random seed used.
    pub(super) seed: u64,
    /// The board, every tile in generation state.
    pub(super) board: &'a BoardSnapshot,
}

/// Arrow glyph for a rotation in degrees.
fn arrow(direction: u16) -> char {
    match direction {
        90 => '>',
        180 => 'v',
        270 => '<',
        _ => '^',
    }
}

/// Two-character code for a tile; closed tiles are masked unless `reveal`.
pub(super) fn tile_code(view: &TileView, reveal: bool) -> String {
    if !view.is_open && !reveal {
        return "##".to_string();
    }
    let a = arrow(view.direction);
    match view.tile_type {
        TileType::Empty => "..".to_string(),
        TileType::Water => "~~".to_string(),
        TileType::DirStraight => format!("s{a}"),
        TileType::Dir45 => format!("d{a}"),
        TileType::Dir45_225 => format!("D{a}"),
        TileType::Dir0_180 => format!("b{a}"),
        TileType::Dir0_135_270 => format!("t{a}"),
        TileType::DirDiagonal => "xx".to_string(),
        TileType::DirUplr => "++".to_string(),
        TileType::Horses => "Hh".to_string(),
        TileType::Spinning2 => "@2".to_string(),
        TileType::Spinning3 => "@3".to_string(),
        TileType::Spinning4 => "@4".to_string(),
        TileType::Spinning5 => "@5".to_string(),
        TileType::IceLake => "Ic".to_string(),
        TileType::Trap => "Tr".to_string(),
        TileType::Cannon => format!("C{a}"),
        TileType::Fort => "Fo".to_string(),
        TileType::Aborigine => "Ab".to_string(),
        TileType::DrinkingRum => "Rm".to_string(),
        TileType::Crocodile => "Cr".to_string(),
        TileType::Ogre => "Og".to_string(),
        TileType::Balloon => "Bl".to_string(),
        TileType::Plane if view.active => "Pl".to_string(),
        TileType::Plane => "pl".to_string(),
        TileType::Money1 => "$1".to_string(),
        TileType::Money2 => "$2".to_string(),
        TileType::Money3 => "$3".to_string(),
        TileType::Money4 => "$4".to_string(),
        TileType::Money5 => "$5".to_string(),
    }
}

fn color_initial(color: Color) -> char {
    color.name().chars().next().unwrap_or('?')
}

/// Marker for the occupants of a cell: crew initial, lowercase for an empty
/// ship, `*` when several players share the cell.
fn occupant_marker(players: &[PlayerView], at: Coord) -> char {
    let crews: Vec<Color> = players
        .iter()
        .filter(|p| p.characters.iter().any(|c| c.coords == at))
        .map(|p| p.color)
        .collect();
    match crews.as_slice() {
        [] => players
            .iter()
            .find(|p| p.ship_coords == at)
            .map_or(' ', |p| color_initial(p.color)),
        [only] => color_initial(*only).to_ascii_uppercase(),
        _ => '*',
    }
}

/// Render the board as a grid, with pirates and ships overlaid.
pub(super) fn format_board(board: &BoardSnapshot, players: &[PlayerView], reveal: bool) -> String {
    let mut output = String::from("    ");
    for x in 0..board.size {
        let _ = write!(output, "{x:>3}");
    }
    output.push('\n');

    for (y, row) in (0..).zip(&board.rows) {
        let _ = write!(output, "{y:>3} ");
        for (x, view) in (0..).zip(row) {
            output.push_str(&tile_code(view, reveal));
            output.push(occupant_marker(players, Coord::new(x, y)));
        }
        output.push('\n');
    }
    output
}

/// Describe players, their haul and crew.
pub(super) fn format_players(snapshot: &GameSnapshot) -> String {
    let mut output = String::new();
    for player in &snapshot.players {
        let marker = if player.id == snapshot.current_player {
            '>'
        } else {
            ' '
        };
        let _ = writeln!(
            output,
            "{marker} {} ship {} coins {}",
            player.color.name(),
            player.ship_coords,
            player.objects.total()
        );
        for character in &player.characters {
            let active = if Some(character.id) == snapshot.current_character {
                '*'
            } else {
                ' '
            };
            let _ = write!(
                output,
                "   {active} pirate {} at {} {:?}",
                character.id, character.coords, character.state
            );
            if let Some(object) = character.object {
                let _ = write!(output, " carrying {object:?}");
            }
            if let Some(phase) = character.spin_counter {
                let _ = write!(output, " spin {phase}");
            }
            output.push('\n');
        }
    }
    output
}

/// List legal destinations on one line.
pub(super) fn format_destinations(destinations: &[Coord]) -> String {
    if destinations.is_empty() {
        return "no legal moves".to_string();
    }
    let cells: Vec<String> = destinations.iter().map(ToString::to_string).collect();
    format!("moves: {}", cells.join(" "))
}
