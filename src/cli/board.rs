//! Board command implementation.

use super::output::{JsonBoard, format_board};
use super::{CliError, OutputFormat};
use jackal::GameConfig;
use jackal::game::BoardSnapshot;
use jackal::game::mapgen::generate_board_seeded;

/// Execute the board command.
///
/// # Errors
///
/// Returns an error if the board cannot be generated or encoded.
pub(crate) fn execute(seed: Option<u64>, format: OutputFormat) -> Result<(), CliError> {
    let seed = GameConfig {
        seed,
        ..GameConfig::default()
    }
    .resolve_seed();
    let board = generate_board_seeded(seed).map_err(jackal::GameError::from)?;
    let snapshot = BoardSnapshot::of_board(&board);

    match format {
        OutputFormat::Text => {
            println!("Board (seed: {seed})");
            print!("{}", format_board(&snapshot, &[], true));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonBoard {
                seed,
                board: &snapshot,
            })?;
            println!("{json}");
        }
    }
    Ok(())
}
