use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{BoardSlot, CardFace, CardId, Direction, PlayingBoard, Points, Resource, SymbolCounts};

/// An objective card: a pattern plus the points for every occurrence of it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveCard {
    pub id: CardId,
    pub points: Points,
    pub pattern: Pattern,
}

/// What an objective looks for on a finished board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Pattern {
    /// Every complete set of these visible symbols counts once.
    Symbols { requires: SymbolCounts },
    /// Every non-overlapping arrangement of cards counts once.
    Shape { cells: Shape },
}

/// One card of a [`Shape`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeCell {
    /// The diagonal steps from the anchor to this cell. Empty for the anchor itself.
    #[serde(default)]
    pub path: Vec<Direction>,
    pub kingdom: Resource,
}

/// A fixed arrangement of card kingdoms, relative to an anchor slot.
///
/// Cells are reached from the anchor by diagonal steps, so e.g. the card
/// right below the anchor is `[SouthEast, SouthWest]`. One cell is always
/// the anchor itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ShapeCell>", into = "Vec<ShapeCell>")]
pub struct Shape {
    cells: Vec<ShapeCell>,
}

/// The error type for [`Shape::new()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvalidShape {
    NoCells,
    DuplicateCell { offset: BoardSlot },
    /// No cell sits on the anchor itself, so occurrences whose anchor slot
    /// is empty could never be found.
    NoAnchorCell,
}

impl std::error::Error for InvalidShape {}

impl std::fmt::Display for InvalidShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidShape::NoCells => write!(f, "A shape needs at least one cell"),
            InvalidShape::DuplicateCell { offset } => {
                write!(f, "Two cells of the shape are at the same offset {}", offset)
            }
            InvalidShape::NoAnchorCell => {
                write!(f, "One cell of the shape must be at the anchor, i.e. have an empty path")
            }
        }
    }
}

impl Shape {
    pub fn new(cells: Vec<ShapeCell>) -> Result<Self, InvalidShape> {
        if cells.is_empty() {
            return Err(InvalidShape::NoCells);
        }
        let mut offsets = BTreeSet::new();
        for cell in &cells {
            let offset = BoardSlot::ORIGIN.walk(&cell.path);
            if !offsets.insert(offset) {
                return Err(InvalidShape::DuplicateCell { offset });
            }
        }
        if !offsets.contains(&BoardSlot::ORIGIN) {
            return Err(InvalidShape::NoAnchorCell);
        }
        Ok(Self { cells })
    }

    pub fn cells(&self) -> &[ShapeCell] {
        &self.cells
    }

    /// Finds the occurrences of this shape that count towards the objective.
    ///
    /// Every placed slot is tried as the anchor, in ascending slot order.
    /// An occurrence only counts if none of its slots is part of an occurrence
    /// that counted before it. The slots of every counted occurrence are
    /// returned in cell order.
    pub fn find_matches(&self, board: &PlayingBoard) -> Vec<Vec<BoardSlot>> {
        let mut used = BTreeSet::new();
        let mut matches = Vec::new();
        for anchor in board.covered_slots() {
            let slots: Vec<BoardSlot> = self
                .cells
                .iter()
                .map(|cell| anchor.walk(&cell.path))
                .collect();
            let fits = self.cells.iter().zip(&slots).all(|(cell, &slot)| {
                board.card_at(slot).and_then(CardFace::kingdom) == Some(cell.kingdom)
            });
            if fits && slots.iter().all(|slot| !used.contains(slot)) {
                used.extend(slots.iter().copied());
                matches.push(slots);
            }
        }
        matches
    }
}

impl TryFrom<Vec<ShapeCell>> for Shape {
    type Error = InvalidShape;

    fn try_from(cells: Vec<ShapeCell>) -> Result<Self, Self::Error> {
        Shape::new(cells)
    }
}

impl From<Shape> for Vec<ShapeCell> {
    fn from(shape: Shape) -> Self {
        shape.cells
    }
}

impl Pattern {
    /// How many times the pattern occurs on the board.
    pub fn occurrences(&self, board: &PlayingBoard) -> u32 {
        match self {
            Pattern::Symbols { requires } => symbol_sets(board.visible_symbols(), *requires),
            Pattern::Shape { cells } => cells.find_matches(board).len() as u32,
        }
    }
}

// The number of complete `required` sets within `visible`.
fn symbol_sets(visible: SymbolCounts, required: SymbolCounts) -> u32 {
    required
        .iter()
        .map(|(symbol, n)| visible.get(symbol) / n)
        .min()
        .unwrap_or(0)
}

impl ObjectiveCard {
    pub fn evaluate(&self, board: &PlayingBoard) -> Points {
        evaluate(board, self)
    }
}

/// The points `objective` yields on `board`. Does not modify the board.
pub fn evaluate(board: &PlayingBoard, objective: &ObjectiveCard) -> Points {
    objective.points * objective.pattern.occurrences(board)
}

/// A player's final score: the points from placing cards plus the yield of
/// every objective that applies to them.
pub fn final_score(
    board: &PlayingBoard,
    placement_points: Points,
    objectives: &[ObjectiveCard],
) -> Points {
    placement_points
        + objectives
            .iter()
            .map(|objective| objective.evaluate(board))
            .sum::<Points>()
}
