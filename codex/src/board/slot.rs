use serde::{Deserialize, Serialize};

use crate::CornerPosition;

/// A position on a player's board.
///
/// `h` grows to the east, `v` grows to the north. The starter card sits at
/// `(0, 0)` and cards only ever touch diagonally, so every occupied slot
/// has `h + v` even.
///
/// Slots are ordered by `h` first, then `v`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BoardSlot {
    pub h: i32,
    pub v: i32,
}

/// The four diagonal directions. Orthogonal neighbors never interact.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl BoardSlot {
    pub const ORIGIN: BoardSlot = BoardSlot { h: 0, v: 0 };

    pub const fn new(h: i32, v: i32) -> Self {
        Self { h, v }
    }

    /// The diagonal neighbor in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dh, dv) = direction.offset();
        Self {
            h: self.h + dh,
            v: self.v + dv,
        }
    }

    /// Follows `path` one diagonal step at a time.
    pub fn walk(self, path: &[Direction]) -> Self {
        path.iter().fold(self, |slot, &direction| slot.step(direction))
    }

    /// All four diagonal neighbors, paired with the direction they lie in.
    pub fn neighbors(self) -> [(Direction, BoardSlot); 4] {
        Direction::ALL.map(|direction| (direction, self.step(direction)))
    }
}

impl std::fmt::Display for BoardSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.h, self.v)
    }
}

impl From<(i32, i32)> for BoardSlot {
    fn from((h, v): (i32, i32)) -> Self {
        Self { h, v }
    }
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::NorthEast => (1, 1),
            Direction::NorthWest => (-1, 1),
            Direction::SouthEast => (1, -1),
            Direction::SouthWest => (-1, -1),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::NorthEast => Direction::SouthWest,
            Direction::NorthWest => Direction::SouthEast,
            Direction::SouthEast => Direction::NorthWest,
            Direction::SouthWest => Direction::NorthEast,
        }
    }

    /// The corner of a card that touches the neighbor lying in this direction.
    ///
    /// The neighbor touches back with `self.opposite().corner()`.
    pub fn corner(self) -> CornerPosition {
        match self {
            Direction::NorthEast => CornerPosition::TopRight,
            Direction::NorthWest => CornerPosition::TopLeft,
            Direction::SouthEast => CornerPosition::BottomRight,
            Direction::SouthWest => CornerPosition::BottomLeft,
        }
    }

    /// Inverse of [`Self::corner()`].
    pub fn from_corner(corner: CornerPosition) -> Self {
        match corner {
            CornerPosition::TopRight => Direction::NorthEast,
            CornerPosition::TopLeft => Direction::NorthWest,
            CornerPosition::BottomRight => Direction::SouthEast,
            CornerPosition::BottomLeft => Direction::SouthWest,
        }
    }
}
