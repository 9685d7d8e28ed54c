//! Detection of forced movement loops.
//!
//! Starting from the tile a character just landed on, every chain of forced
//! continuations is explored on a hypothetical copy of the character. The
//! live game state is never touched.
//!
//! Ice lakes and crocodiles send a pirate on according to where it came from,
//! so on those tiles a position in the chain is the cell together with the
//! cell it was entered from. Everywhere else the cell alone decides what
//! comes next.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::game::enter::is_final;
use crate::game::legality::legal_destinations;
use crate::game::{Character, Coord, GameState, TileType};

/// A position in a forced chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChainStep {
    /// Cell the character stands on.
    pub coords: Coord,
    /// Cell it arrived from, kept only where the tile's continuation depends
    /// on it.
    pub from: Option<Coord>,
}

impl ChainStep {
    /// The chain position of a character on `coords` that arrived from `prev`.
    #[must_use]
    pub fn new(state: &GameState, coords: Coord, prev: Coord) -> Self {
        let from = state
            .board
            .tile_type(coords)
            .filter(|&t| depends_on_arrival(t))
            .map(|_| prev);
        Self { coords, from }
    }

    /// The chain position of `character` as it stands.
    #[must_use]
    pub fn of(state: &GameState, character: &Character) -> Self {
        Self::new(state, character.coords, character.prev_coords)
    }
}

const fn depends_on_arrival(tile_type: TileType) -> bool {
    matches!(tile_type, TileType::IceLake | TileType::Crocodile)
}

/// Cycle-entry positions, each with an "entered once" flag.
pub type CycleTable = BTreeMap<ChainStep, bool>;

/// What is known about the subtree below one node.
#[derive(Debug, Clone, Default)]
struct Reach {
    /// Some branch reaches a tile where movement stops.
    escapes: bool,
    /// Ancestors on the exploration path that branches fold back into.
    loops_to: BTreeSet<ChainStep>,
}

#[derive(Debug)]
struct Explorer<'a> {
    state: &'a GameState,
    template: Character,
    path: Vec<ChainStep>,
    memo: HashMap<ChainStep, Reach>,
    entries: BTreeSet<ChainStep>,
}

impl Explorer<'_> {
    fn children(&self, coords: Coord, prev: Coord) -> Vec<Coord> {
        let mut ghost = self.template;
        ghost.coords = coords;
        ghost.prev_coords = prev;
        legal_destinations(self.state, &ghost)
    }

    fn stops_at(&self, coords: Coord) -> bool {
        self.state.board.tile_type(coords).is_none_or(is_final)
    }

    fn explore(&mut self, coords: Coord, prev: Coord) -> Reach {
        let step = ChainStep::new(self.state, coords, prev);
        if let Some(known) = self.memo.get(&step) {
            return self.rebase(known.clone());
        }

        let children = self.children(coords, prev);
        let mut reach = Reach {
            // A dead end stops the character as surely as a final tile.
            escapes: children.is_empty(),
            loops_to: BTreeSet::new(),
        };

        self.path.push(step);
        for child in children {
            let next = ChainStep::new(self.state, child, coords);
            if self.path.contains(&next) {
                reach.loops_to.insert(next);
            } else if self.stops_at(child) {
                reach.escapes = true;
            } else {
                let below = self.explore(child, coords);
                reach.escapes |= below.escapes;
                reach.loops_to.extend(below.loops_to);
            }
        }
        self.path.pop();

        if !reach.escapes && reach.loops_to.len() == 1 && reach.loops_to.contains(&step) {
            self.entries.insert(step);
        }
        reach.loops_to.remove(&step);

        self.memo.insert(step, reach.clone());
        reach
    }

    /// Reinterpret a memoised result against the current path.
    ///
    /// Loop targets that have since left the path are replaced by what was
    /// learned about those positions.
    fn rebase(&self, known: Reach) -> Reach {
        let mut reach = Reach {
            escapes: known.escapes,
            loops_to: BTreeSet::new(),
        };
        for target in known.loops_to {
            if self.path.contains(&target) {
                reach.loops_to.insert(target);
            } else if let Some(resolved) = self.memo.get(&target) {
                reach.escapes |= resolved.escapes;
                reach
                    .loops_to
                    .extend(resolved.loops_to.iter().filter(|s| self.path.contains(s)));
            }
        }
        reach
    }
}

/// Explore forced continuations of `character` from where it stands and
/// return the cycle-entry positions, all flagged as not yet entered.
///
/// A position is a cycle entry when no branch below it can stop and every
/// branch folds back into that position alone.
#[must_use]
pub fn cycle_table(state: &GameState, character: &Character) -> CycleTable {
    let mut explorer = Explorer {
        state,
        template: *character,
        path: Vec::new(),
        memo: HashMap::new(),
        entries: BTreeSet::new(),
    };
    explorer.explore(character.coords, character.prev_coords);
    tracing::debug!(entries = explorer.entries.len(), "cycle table computed");
    explorer.entries.into_iter().map(|s| (s, false)).collect()
}
