//! Tile-exit effects, applied to the source tile before a character moves.

use crate::game::{CharacterId, Coord, GameState, TileType};

/// Apply the effect of leaving the tile under `id` towards `destination`.
pub fn on_exit(state: &mut GameState, id: CharacterId, destination: Coord) {
    let Some(character) = state.character(id) else {
        return;
    };
    let (here, owner) = (character.coords, character.owner);
    let Some(tile_type) = state.board.tile_type(here) else {
        return;
    };

    match tile_type {
        TileType::Spinning2 | TileType::Spinning3 | TileType::Spinning4 | TileType::Spinning5 => {
            let phases = tile_type.max_spin().unwrap_or(0);
            if let Some(character) = state.character_mut(id) {
                character.spin_counter = match character.spin_counter {
                    None => Some(0),
                    Some(counter) if counter < phases => Some(counter + 1),
                    Some(_) => None,
                };
            }
        }
        TileType::Plane => {
            if let Some(tile) = state.board.get_mut(here) {
                tile.active = false;
            }
        }
        TileType::Water => {
            let on_own_ship = state.player(owner).is_some_and(|p| p.ship_coords == here);
            if on_own_ship && state.board.is_water(destination) {
                sail(state, id, here, destination);
            }
        }
        TileType::Empty
        | TileType::DirStraight
        | TileType::Dir45
        | TileType::Dir45_225
        | TileType::Dir0_180
        | TileType::Dir0_135_270
        | TileType::DirDiagonal
        | TileType::DirUplr
        | TileType::Horses
        | TileType::IceLake
        | TileType::Trap
        | TileType::Cannon
        | TileType::Fort
        | TileType::Aborigine
        | TileType::DrinkingRum
        | TileType::Crocodile
        | TileType::Ogre
        | TileType::Balloon
        | TileType::Money1
        | TileType::Money2
        | TileType::Money3
        | TileType::Money4
        | TileType::Money5 => {}
    }
}

/// Move the ship and everyone else aboard from `from` to `to`.
///
/// The sailing character itself is relocated by the caller.
fn sail(state: &mut GameState, id: CharacterId, from: Coord, to: Coord) {
    let Some(owner) = state.character(id).map(|c| c.owner) else {
        return;
    };
    if let Some(player) = state.player_mut(owner) {
        player.ship_coords = to;
    }
    let passengers: Vec<_> = state
        .crew(owner)
        .filter(|c| c.id != id && c.coords == from)
        .map(|c| c.id)
        .collect();
    for passenger in passengers {
        state.relocate(passenger, to);
    }
    tracing::debug!(player = owner, %from, %to, "ship sailed");
}
