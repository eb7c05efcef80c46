//! Search state types: orientations and the augmented states built on them.

use super::*;

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

/// The four cardinal directions in clockwise order.
///
/// Discriminants are chosen so that quarter turns become modular arithmetic
/// on the index.
#[derive(
    Serialize, Deserialize, FromPrimitive, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug,
)]
pub enum Orientation {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Orientation {
    /// All orientations in cyclic order.
    pub const ALL: [Orientation; 4] = [
        Orientation::North,
        Orientation::East,
        Orientation::South,
        Orientation::West,
    ];

    /// Row/column displacement of a single step in this direction.
    pub fn displacement(self) -> (isize, isize) {
        match self {
            Orientation::North => (-1, 0),
            Orientation::East => (0, 1),
            Orientation::South => (1, 0),
            Orientation::West => (0, -1),
        }
    }

    /// Quarter turn clockwise.
    pub fn clockwise(self) -> Orientation {
        Orientation::from_usize((self as usize + 1) % 4).unwrap()
    }

    /// Quarter turn counterclockwise.
    pub fn counterclockwise(self) -> Orientation {
        Orientation::from_usize((self as usize + 3) % 4).unwrap()
    }

    /// The opposite direction.
    pub fn opposite(self) -> Orientation {
        Orientation::from_usize((self as usize + 2) % 4).unwrap()
    }
}

/// Search state for turn-cost movement: a position plus a facing.
#[derive(Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct OrientedState {
    pub position: Position,
    pub facing: Orientation,
}

impl OrientedState {
    pub fn new(position: Position, facing: Orientation) -> OrientedState {
        OrientedState { position, facing }
    }
}

/// Search state for relaxed-rule movement: a position plus the remaining
/// budget of wall-ignoring steps.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct BudgetedState {
    pub position: Position,
    pub remaining: StepCount,
}
