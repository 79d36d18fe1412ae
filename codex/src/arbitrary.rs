use quickcheck::{Arbitrary, Gen};

use crate::{
    CardFace, Corner, FaceKind, Item, Resource, ScoringRule, Side, Symbol, SymbolCounts,
};

/// A starter face followed by faces to place one after the other.
#[derive(Clone, Debug)]
pub struct PlacementScript {
    pub starter: CardFace,
    pub moves: Vec<ScriptedMove>,
}

#[derive(Clone, Debug)]
pub struct ScriptedMove {
    /// Index into the available slots at the time of the move, modulo their number.
    pub slot_choice: usize,
    pub face: CardFace,
}

impl Arbitrary for PlacementScript {
    fn arbitrary(g: &mut Gen) -> Self {
        let starter = CardFace::new(
            0,
            *g.choose(&[Side::Front, Side::Back]).unwrap(),
            FaceKind::Starter,
            arbitrary_corners(g),
            small_counts(g, 3),
            ScoringRule::FixedPoints(0),
        );
        let num_moves = usize::arbitrary(g) % 30;
        let moves = (0..num_moves)
            .map(|idx| ScriptedMove {
                slot_choice: usize::arbitrary(g),
                face: arbitrary_playable_face(g, idx as u32 + 1),
            })
            .collect();
        PlacementScript { starter, moves }
    }
}

fn arbitrary_corners(g: &mut Gen) -> [Corner; 4] {
    [(); 4].map(|_| Corner::arbitrary(g))
}

// A tally with at most `max` symbols in total.
fn small_counts(g: &mut Gen, max: u32) -> SymbolCounts {
    let n = u32::arbitrary(g) % (max + 1);
    (0..n).map(|_| (Symbol::arbitrary(g), 1)).collect()
}

fn arbitrary_playable_face(g: &mut Gen, id: u32) -> CardFace {
    let kingdom = Resource::arbitrary(g);
    match u8::arbitrary(g) % 3 {
        0 => CardFace::standard_back(id, kingdom),
        1 => CardFace::new(
            id,
            Side::Front,
            FaceKind::Resource { kingdom },
            arbitrary_corners(g),
            SymbolCounts::new(),
            ScoringRule::FixedPoints(u32::arbitrary(g) % 2),
        ),
        _ => CardFace::new(
            id,
            Side::Front,
            FaceKind::Gold {
                kingdom,
                cost: small_counts(g, 4),
            },
            arbitrary_corners(g),
            SymbolCounts::new(),
            ScoringRule::arbitrary(g),
        ),
    }
}

impl Arbitrary for Resource {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&Resource::ALL).unwrap()
    }
}

impl Arbitrary for Item {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&Item::ALL).unwrap()
    }
}

impl Arbitrary for Symbol {
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            Symbol::Resource(Resource::arbitrary(g))
        } else {
            Symbol::Item(Item::arbitrary(g))
        }
    }
}

impl Arbitrary for Corner {
    fn arbitrary(g: &mut Gen) -> Self {
        // Roughly a quarter hidden, a quarter empty, the rest with a symbol
        match u8::arbitrary(g) % 4 {
            0 => Corner::Hidden,
            1 => Corner::Empty,
            _ => Corner::Symbol(Symbol::arbitrary(g)),
        }
    }
}

impl Arbitrary for ScoringRule {
    fn arbitrary(g: &mut Gen) -> Self {
        let points = 1 + u32::arbitrary(g) % 5;
        match u8::arbitrary(g) % 3 {
            0 => ScoringRule::FixedPoints(points),
            1 => ScoringRule::PointsPerCoveredCorner(points),
            _ => ScoringRule::PointsPerVisibleSymbol {
                symbol: Symbol::arbitrary(g),
                points,
            },
        }
    }
}
