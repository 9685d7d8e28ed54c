//! Tile-entry effects, applied when a character arrives on a tile (and once
//! per character at the start of its owner's turn).

use crate::game::{CharacterId, CharacterState, Coord, GameState, PlayerId, TileType};

/// Whether arriving on a tile of this type ends the character's movement.
///
/// Arrows, ice, horses, cannons, crocodiles and balloons push the pirate on.
#[must_use]
pub const fn is_final(tile_type: TileType) -> bool {
    !(tile_type.is_directional()
        || matches!(
            tile_type,
            TileType::IceLake
                | TileType::Horses
                | TileType::Cannon
                | TileType::Crocodile
                | TileType::Balloon
        ))
}

/// Apply the effect of the tile under `id`. Returns whether the step is final.
pub fn on_enter(state: &mut GameState, id: CharacterId) -> bool {
    let Some(character) = state.character(id) else {
        return true;
    };
    let (here, owner) = (character.coords, character.owner);
    let Some(tile_type) = state.board.tile_type(here) else {
        return true;
    };

    match tile_type {
        TileType::Spinning2 | TileType::Spinning3 | TileType::Spinning4 | TileType::Spinning5 => {
            spinning(state, id, here, owner);
        }
        TileType::DrinkingRum => {
            kick_opponents(state, here, owner);
            drinking_rum(state, id);
        }
        TileType::Ogre => ogre(state, id, here),
        TileType::Aborigine => {
            if state.spawn(owner, here).is_some() {
                tracing::info!(player = owner, %here, "aborigine recruited a pirate");
            }
        }
        TileType::Trap => trap(state, id, here, owner),
        TileType::Water => water(state, id, here, owner),
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
        | TileType::Cannon
        | TileType::Fort
        | TileType::Crocodile
        | TileType::Balloon
        | TileType::Plane
        | TileType::Money1
        | TileType::Money2
        | TileType::Money3
        | TileType::Money4
        | TileType::Money5 => kick_opponents(state, here, owner),
    }

    is_final(tile_type)
}

/// Kick every opposing pirate at `here` back to its ship.
fn kick_opponents(state: &mut GameState, here: Coord, owner: PlayerId) {
    for victim in state.opponents_at(here, owner) {
        state.kick(victim);
    }
}

fn spinning(state: &mut GameState, id: CharacterId, here: Coord, owner: PlayerId) {
    let Some(character) = state.character_mut(id) else {
        return;
    };
    let phase = match character.spin_counter {
        Some(counter) if counter >= 1 => counter,
        _ => 1,
    };
    character.spin_counter = Some(phase);

    // Pirates only meet on the same phase of the spin.
    let victims: Vec<_> = state
        .opponents_at(here, owner)
        .into_iter()
        .filter(|&other| {
            state
                .character(other)
                .is_some_and(|c| c.spin_counter == Some(phase))
        })
        .collect();
    for victim in victims {
        state.kick(victim);
    }
}

fn drinking_rum(state: &mut GameState, id: CharacterId) {
    let Some(character) = state.character_mut(id) else {
        return;
    };
    let current = character.state;
    match current {
        CharacterState::Alive if character.just_moved() => {
            character.state = CharacterState::Drunk;
        }
        CharacterState::Drunk => character.state = CharacterState::Hangover,
        CharacterState::Hangover => {
            character.state = CharacterState::Alive;
            character.prev_coords = character.coords;
        }
        CharacterState::Alive | CharacterState::Trapped => {}
    }
}

fn ogre(state: &mut GameState, id: CharacterId, here: Coord) {
    let dropped = state.character_mut(id).and_then(|c| c.object.take());
    state.drop_on_tile(here, dropped);
    state.eliminate(id);
}

fn trap(state: &mut GameState, id: CharacterId, here: Coord, owner: PlayerId) {
    let others: Vec<_> = state
        .occupants_at(here)
        .into_iter()
        .filter(|&other| other != id)
        .collect();
    let someone_trapped = others.iter().any(|&other| {
        state
            .character(other)
            .is_some_and(|c| c.state == CharacterState::Trapped)
    });

    for other in others {
        let Some(character) = state.character_mut(other) else {
            continue;
        };
        character.state = CharacterState::Alive;
        character.prev_coords = here;
        if character.owner != owner {
            state.kick(other);
        }
    }

    let Some(character) = state.character_mut(id) else {
        return;
    };
    if !someone_trapped && character.just_moved() {
        character.state = CharacterState::Trapped;
    } else {
        character.state = CharacterState::Alive;
        character.prev_coords = here;
    }
}

fn water(state: &mut GameState, id: CharacterId, here: Coord, owner: PlayerId) {
    let ship_owners = state.ship_owners_at(here);
    let mut carried = state.character_mut(id).and_then(|c| c.object.take());

    let mut drowned = false;
    for &ship_owner in &ship_owners {
        if ship_owner == owner && carried.is_some() {
            tracing::info!(player = owner, "loot delivered to ship");
        }
        state.deposit(ship_owner, carried.take());
        if ship_owner != owner && !drowned {
            tracing::info!(character = %id, player = owner, ship = ship_owner, "boarded an opposing ship");
            state.eliminate(id);
            drowned = true;
        }
    }

    if !drowned {
        let ship = ship_owners.first().copied();
        for victim in state.opponents_at(here, owner) {
            if let Some(ship) = ship {
                let loot = state.character_mut(victim).and_then(|c| c.object.take());
                state.deposit(ship, loot);
            }
            state.eliminate(victim);
        }
    }
}
