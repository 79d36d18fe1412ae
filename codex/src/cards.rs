use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Item, Resource, Symbol, SymbolCounts, UnknownSymbol};

/// Identifies a physical card. Both faces of a card share the id.
pub type CardId = u32;

/// Points scored by a placement or an objective.
pub type Points = u32;

/// One of the four corners of a card face.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum CornerPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl CornerPosition {
    /// In the order used by [`CardFace::corners()`].
    pub const ALL: [CornerPosition; 4] = [
        CornerPosition::TopLeft,
        CornerPosition::TopRight,
        CornerPosition::BottomLeft,
        CornerPosition::BottomRight,
    ];
}

/// What is printed on one corner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Corner {
    /// No corner at all. Nothing may ever be placed against it.
    Hidden,
    /// A corner without a symbol. Can be covered.
    Empty,
    Symbol(Symbol),
}

impl Corner {
    pub fn symbol(self) -> Option<Symbol> {
        match self {
            Corner::Symbol(symbol) => Some(symbol),
            Corner::Hidden | Corner::Empty => None,
        }
    }

    /// The symbol on this corner as a tally (empty unless symbol-bearing).
    pub fn counts(self) -> SymbolCounts {
        match self {
            Corner::Symbol(symbol) => SymbolCounts::single(symbol),
            Corner::Hidden | Corner::Empty => SymbolCounts::new(),
        }
    }
}

impl From<Symbol> for Corner {
    fn from(symbol: Symbol) -> Self {
        Corner::Symbol(symbol)
    }
}

impl From<Resource> for Corner {
    fn from(resource: Resource) -> Self {
        Corner::Symbol(Symbol::Resource(resource))
    }
}

impl From<Item> for Corner {
    fn from(item: Item) -> Self {
        Corner::Symbol(Symbol::Item(item))
    }
}

impl std::fmt::Display for Corner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Corner::Hidden => f.write_str("hidden"),
            Corner::Empty => f.write_str("empty"),
            Corner::Symbol(symbol) => write!(f, "{}", symbol),
        }
    }
}

impl FromStr for Corner {
    type Err = UnknownSymbol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hidden" => Ok(Corner::Hidden),
            "empty" => Ok(Corner::Empty),
            _ => s.parse().map(Corner::Symbol),
        }
    }
}

impl TryFrom<String> for Corner {
    type Error = UnknownSymbol;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Corner> for String {
    fn from(corner: Corner) -> String {
        corner.to_string()
    }
}

/// Which side of a card faces up.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Front,
    Back,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Front, Side::Back];
}

/// The variant of a face, with the data only that variant carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FaceKind {
    Starter,
    Resource {
        kingdom: Resource,
    },
    Gold {
        kingdom: Resource,
        /// Minimum visible symbols on the board before this face may be placed.
        cost: SymbolCounts,
    },
}

/// How a face scores at the moment it is placed.
///
/// This set is closed: deserializing any other shape fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum ScoringRule {
    FixedPoints(Points),
    /// Points for every corner of the new face that lands on an occupied slot.
    PointsPerCoveredCorner(Points),
    /// Points for every visible `symbol` on the board after the placement.
    PointsPerVisibleSymbol { symbol: Symbol, points: Points },
}

/// One placeable side of a card.
///
/// Immutable once constructed. Two faces are the same if id and side match
/// (and, for well-formed catalogs, the rest follows).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardFace {
    id: CardId,
    side: Side,
    kind: FaceKind,
    corners: [Corner; 4],
    central: SymbolCounts,
    scoring: ScoringRule,
}

impl CardFace {
    pub fn new(
        id: CardId,
        side: Side,
        kind: FaceKind,
        corners: [Corner; 4],
        central: SymbolCounts,
        scoring: ScoringRule,
    ) -> Self {
        Self {
            id,
            side,
            kind,
            corners,
            central,
            scoring,
        }
    }

    /// The back of every resource and gold card: no corners with symbols,
    /// one resource of its kingdom in the center, and no points.
    pub fn standard_back(id: CardId, kingdom: Resource) -> Self {
        Self::new(
            id,
            Side::Back,
            FaceKind::Resource { kingdom },
            [Corner::Empty; 4],
            SymbolCounts::single(kingdom),
            ScoringRule::FixedPoints(0),
        )
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn kind(&self) -> FaceKind {
        self.kind
    }

    pub fn scoring(&self) -> ScoringRule {
        self.scoring
    }

    pub fn is_starter(&self) -> bool {
        matches!(self.kind, FaceKind::Starter)
    }

    /// The kingdom of the card, or `None` for starter cards.
    pub fn kingdom(&self) -> Option<Resource> {
        match self.kind {
            FaceKind::Starter => None,
            FaceKind::Resource { kingdom } | FaceKind::Gold { kingdom, .. } => Some(kingdom),
        }
    }

    pub fn corner(&self, position: CornerPosition) -> Corner {
        self.corners[position as usize]
    }

    /// All corners, in the order of [`CornerPosition::ALL`].
    pub fn corners(&self) -> [Corner; 4] {
        self.corners
    }

    pub fn central_yield(&self) -> SymbolCounts {
        self.central
    }

    /// Everything this face shows when none of its corners are covered.
    pub fn printed_symbols(&self) -> SymbolCounts {
        self.corners
            .iter()
            .fold(self.central, |acc, corner| acc.add(corner.counts()))
    }

    /// The gold placement cost, if any.
    pub fn cost(&self) -> Option<SymbolCounts> {
        match self.kind {
            FaceKind::Gold { cost, .. } => Some(cost),
            FaceKind::Starter | FaceKind::Resource { .. } => None,
        }
    }

    pub fn can_afford_placement(&self, visible: SymbolCounts) -> bool {
        match self.kind {
            FaceKind::Starter | FaceKind::Resource { .. } => true,
            FaceKind::Gold { cost, .. } => visible.includes(cost),
        }
    }

    /// Evaluates the scoring rule.
    ///
    /// `visible` must be the board's visible symbols *after* the placement
    /// has been applied.
    pub fn score_on_placement(&self, covered_corners: u8, visible: SymbolCounts) -> Points {
        debug_assert!(covered_corners <= 4);
        match self.scoring {
            ScoringRule::FixedPoints(points) => points,
            ScoringRule::PointsPerCoveredCorner(points) => points * Points::from(covered_corners),
            ScoringRule::PointsPerVisibleSymbol { symbol, points } => points * visible.get(symbol),
        }
    }
}

impl std::fmt::Display for CardFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let side = match self.side {
            Side::Front => "front",
            Side::Back => "back",
        };
        write!(f, "#{} ({})", self.id, side)
    }
}

/// A physical card, with both of its faces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    front: CardFace,
    back: CardFace,
}

impl Card {
    /// A starter card, whose two faces are described independently as
    /// corners plus central yield. Starter faces never score.
    pub fn starter(
        id: CardId,
        front: ([Corner; 4], SymbolCounts),
        back: ([Corner; 4], SymbolCounts),
    ) -> Self {
        let face = |side: Side, (corners, central): ([Corner; 4], SymbolCounts)| {
            CardFace::new(
                id,
                side,
                FaceKind::Starter,
                corners,
                central,
                ScoringRule::FixedPoints(0),
            )
        };
        Self {
            front: face(Side::Front, front),
            back: face(Side::Back, back),
        }
    }

    pub fn resource(id: CardId, kingdom: Resource, corners: [Corner; 4], points: Points) -> Self {
        Self {
            front: CardFace::new(
                id,
                Side::Front,
                FaceKind::Resource { kingdom },
                corners,
                SymbolCounts::new(),
                ScoringRule::FixedPoints(points),
            ),
            back: CardFace::standard_back(id, kingdom),
        }
    }

    pub fn gold(
        id: CardId,
        kingdom: Resource,
        corners: [Corner; 4],
        cost: SymbolCounts,
        scoring: ScoringRule,
    ) -> Self {
        Self {
            front: CardFace::new(
                id,
                Side::Front,
                FaceKind::Gold { kingdom, cost },
                corners,
                SymbolCounts::new(),
                scoring,
            ),
            back: CardFace::standard_back(id, kingdom),
        }
    }

    pub fn id(&self) -> CardId {
        self.front.id
    }

    pub fn face(&self, side: Side) -> &CardFace {
        match side {
            Side::Front => &self.front,
            Side::Back => &self.back,
        }
    }

    pub fn is_starter(&self) -> bool {
        self.front.is_starter()
    }
}
