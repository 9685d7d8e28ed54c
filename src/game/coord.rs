//! Board coordinates and direction geometry.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::Serialize;

/// A coordinate (or offset) on the board.
///
/// `x` is the column and `y` the row, with the origin in the top-left corner.
/// Values are signed so the same type doubles as an offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct Coord {
    /// X coordinate (column).
    pub x: i32,
    /// Y coordinate (row).
    pub y: i32,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The same offset with its components swapped.
    #[must_use]
    pub const fn swapped(self) -> Self {
        Self::new(self.y, self.x)
    }

    /// The 8 cells surrounding this one (Moore neighbourhood), row by row.
    ///
    /// No bounds filtering is applied.
    #[must_use]
    pub fn neighbours(self) -> [Coord; 8] {
        let mut result = [self; 8];
        let mut count = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                result[count] = self + Coord::new(dx, dy);
                count += 1;
            }
        }
        result
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coord {
    type Output = Coord;

    fn sub(self, rhs: Coord) -> Coord {
        Coord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Coord {
    type Output = Coord;

    fn neg(self) -> Coord {
        Coord::new(-self.x, -self.y)
    }
}

impl Mul<i32> for Coord {
    type Output = Coord;

    fn mul(self, rhs: i32) -> Coord {
        Coord::new(self.x * rhs, self.y * rhs)
    }
}

/// Componentwise floor division, used by renderers to map pixels back to cells.
impl Div<i32> for Coord {
    type Output = Coord;

    fn div(self, rhs: i32) -> Coord {
        Coord::new(self.x.div_euclid(rhs), self.y.div_euclid(rhs))
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Fixed rotation of a tile, in quarter turns clockwise from "up".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Rotation {
    /// 0 degrees, facing up.
    #[default]
    Deg0,
    /// 90 degrees, facing right.
    Deg90,
    /// 180 degrees, facing down.
    Deg180,
    /// 270 degrees, facing left.
    Deg270,
}

impl Rotation {
    /// All four rotations in clockwise order.
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    /// Rotation from a number of clockwise quarter turns (taken modulo 4).
    #[must_use]
    pub const fn from_quarter_turns(turns: u8) -> Self {
        match turns % 4 {
            0 => Rotation::Deg0,
            1 => Rotation::Deg90,
            2 => Rotation::Deg180,
            _ => Rotation::Deg270,
        }
    }

    /// Number of clockwise quarter turns.
    #[must_use]
    pub const fn quarter_turns(self) -> u8 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 1,
            Rotation::Deg180 => 2,
            Rotation::Deg270 => 3,
        }
    }

    /// The angle in degrees.
    #[must_use]
    pub const fn degrees(self) -> u16 {
        self.quarter_turns() as u16 * 90
    }

    /// This rotation turned further clockwise by `other`.
    #[must_use]
    pub const fn rotated(self, other: Rotation) -> Self {
        Self::from_quarter_turns(self.quarter_turns() + other.quarter_turns())
    }

    /// Unit offset straight ahead for this rotation.
    #[must_use]
    pub const fn straight(self) -> Coord {
        match self {
            Rotation::Deg0 => Coord::new(0, -1),
            Rotation::Deg90 => Coord::new(1, 0),
            Rotation::Deg180 => Coord::new(0, 1),
            Rotation::Deg270 => Coord::new(-1, 0),
        }
    }

    /// Unit diagonal offset for this rotation (up-right rotated clockwise).
    #[must_use]
    pub const fn diagonal(self) -> Coord {
        match self {
            Rotation::Deg0 => Coord::new(1, -1),
            Rotation::Deg90 => Coord::new(1, 1),
            Rotation::Deg180 => Coord::new(-1, 1),
            Rotation::Deg270 => Coord::new(-1, -1),
        }
    }
}

/// Movement relative to the side a player sails from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relative {
    /// Towards the island.
    Forward,
    /// Away from the island.
    Backwards,
    /// Along the shore, to the left.
    Left,
    /// Along the shore, to the right.
    Right,
}

/// Offset of `relative` for a player sitting on `side` (0-3).
#[must_use]
pub const fn side_offset(side: u8, relative: Relative) -> Coord {
    let forward = match side % 4 {
        0 => Coord::new(1, 0),
        1 => Coord::new(0, -1),
        2 => Coord::new(-1, 0),
        _ => Coord::new(0, 1),
    };
    match relative {
        Relative::Forward => forward,
        Relative::Backwards => Coord::new(-forward.x, -forward.y),
        Relative::Left => Coord::new(forward.y, forward.x),
        Relative::Right => Coord::new(-forward.y, -forward.x),
    }
}

/// Screen-relative heading used by direction move requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    /// One row up.
    Up,
    /// One row down.
    Down,
    /// One column left.
    Left,
    /// One column right.
    Right,
}

impl Heading {
    /// Unit offset for this heading.
    #[must_use]
    pub const fn offset(self) -> Coord {
        match self {
            Heading::Up => Rotation::Deg0.straight(),
            Heading::Right => Rotation::Deg90.straight(),
            Heading::Down => Rotation::Deg180.straight(),
            Heading::Left => Rotation::Deg270.straight(),
        }
    }
}
