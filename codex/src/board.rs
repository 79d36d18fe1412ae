mod error;
mod slot;

use std::collections::{BTreeMap, BTreeSet};

pub use error::*;
use serde::{Deserialize, Serialize};
pub use slot::*;
use tracing::{debug, trace};

use crate::{CardFace, Corner, ItemsCounter, Points, ResourcesCounter, SymbolCounts};

/// Where a board is in its lifecycle.
///
/// There is no closed phase here: the turn controller ends the game by
/// no longer placing cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardPhase {
    /// No starter card yet.
    Empty,
    /// The starter card is down and further placements are allowed.
    Active,
}

/// One player's board of placed card faces.
///
/// Cards are only ever added. The visible symbols and the set of available
/// slots are kept up to date with every placement instead of being
/// recomputed.
///
/// Serializes as the list of placed cards. The derived state is rebuilt
/// when deserializing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<PlacedCard>", try_from = "Vec<PlacedCard>")]
pub struct PlayingBoard {
    /// There is exactly one entry in this map for every slot with a card on it.
    ///
    /// The `available` and `visible` fields are derived from this map and are
    /// only changed together with it, in [`Self::apply()`].
    placed: BTreeMap<BoardSlot, CardFace>,
    /// Empty slots that touch at least one card and no hidden corner.
    available: BTreeSet<BoardSlot>,
    /// All central yields plus every corner symbol that is not covered.
    visible: SymbolCounts,
}

/// The changes that placing one face makes to the derived board state.
#[derive(Clone, Debug)]
struct Diff {
    slot: BoardSlot,
    visible: SymbolCounts,
    /// Empty neighbors that are available after the placement.
    opened: Vec<BoardSlot>,
    /// Empty neighbors that are not available after the placement.
    closed: Vec<BoardSlot>,
}

/// The outcome of placing a face, computed without changing the board.
#[derive(Clone, Debug)]
pub struct PlacementCalculation {
    diff: Diff,
    /// The points the face would score.
    pub points: Points,
    /// How many of the face's corners would land on occupied slots.
    pub covered_corners: u8,
}

impl PlacementCalculation {
    /// The board's visible symbols after the placement.
    pub fn visible_after(&self) -> SymbolCounts {
        self.diff.visible
    }
}

/// A face together with its slot, e.g. for sending a board over the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedCard {
    pub slot: BoardSlot,
    pub face: CardFace,
}

impl PlayingBoard {
    /// Creates a board without any cards.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> BoardPhase {
        if self.placed.is_empty() {
            BoardPhase::Empty
        } else {
            BoardPhase::Active
        }
    }

    /// Puts the starter card at the origin. Must be the first placement.
    pub fn place_starter_card(&mut self, face: CardFace) -> Result<(), IllegalState> {
        if !self.placed.is_empty() {
            return Err(IllegalState::StarterAlreadyPlaced);
        }
        if !face.is_starter() {
            return Err(IllegalState::NotAStarterFace { id: face.id() });
        }
        let (diff, covered_corners) = self.diff(BoardSlot::ORIGIN, &face);
        debug_assert_eq!(covered_corners, 0);
        debug!(card = face.id(), side = ?face.side(), visible = %diff.visible, "Placed starter card");
        self.apply(face, diff);
        Ok(())
    }

    /// Calculate placing a face and return the effects this would have.
    ///
    /// This is the core function of this type. It checks whether the
    /// placement is legal, and computes the points it would score and the
    /// changes it would make to the visible symbols and available slots.
    ///
    /// This function does not validate that the face is in the player's hand.
    pub fn calculate(
        &self,
        slot: BoardSlot,
        face: &CardFace,
    ) -> Result<PlacementCalculation, IllegalPlacement> {
        if self.placed.is_empty() {
            return Err(IllegalPlacement::BoardNotStarted);
        }
        if face.is_starter() {
            return Err(IllegalPlacement::StarterFace { id: face.id() });
        }
        if self.placed.contains_key(&slot) {
            return Err(IllegalPlacement::SlotOccupied { slot });
        }
        if !self.available.contains(&slot) {
            return Err(IllegalPlacement::SlotNotAvailable {
                slot,
                hidden_corner_of: self.hidden_corner_facing(slot),
            });
        }
        if let Some(shortfall) = face
            .cost()
            .and_then(|cost| self.visible.first_shortfall(cost))
        {
            return Err(IllegalPlacement::CostNotMet {
                symbol: shortfall.symbol,
                required: shortfall.required,
                visible: shortfall.available,
            });
        }
        debug_assert!(face.can_afford_placement(self.visible));
        debug_assert!(self.is_open(slot, None));

        let (diff, covered_corners) = self.diff(slot, face);
        let points = face.score_on_placement(covered_corners, diff.visible);
        Ok(PlacementCalculation {
            diff,
            points,
            covered_corners,
        })
    }

    pub fn can_place(&self, slot: BoardSlot, face: &CardFace) -> bool {
        self.calculate(slot, face).is_ok()
    }

    /// Places a face and returns the points it scored.
    ///
    /// If an error is returned, the board is unmodified.
    pub fn place_card(&mut self, slot: BoardSlot, face: CardFace) -> Result<Points, IllegalPlacement> {
        let calculation = match self.calculate(slot, &face) {
            Ok(calculation) => calculation,
            Err(err) => {
                trace!(%slot, card = face.id(), side = ?face.side(), %err, "Rejected placement");
                return Err(err);
            }
        };
        debug!(
            %slot,
            card = face.id(),
            side = ?face.side(),
            covered_corners = calculation.covered_corners,
            points = calculation.points,
            "Placed card"
        );
        let points = calculation.points;
        self.apply(face, calculation.diff);
        Ok(points)
    }

    pub fn visible_resources(&self) -> ResourcesCounter {
        self.visible.resources
    }

    pub fn visible_items(&self) -> ItemsCounter {
        self.visible.items
    }

    pub fn visible_symbols(&self) -> SymbolCounts {
        self.visible
    }

    /// The empty slots where a card may currently go, in slot order.
    pub fn available_slots(&self) -> impl Iterator<Item = BoardSlot> + '_ {
        self.available.iter().copied()
    }

    pub fn is_available(&self, slot: BoardSlot) -> bool {
        self.available.contains(&slot)
    }

    /// The slots holding a card, in slot order.
    pub fn covered_slots(&self) -> impl Iterator<Item = BoardSlot> + '_ {
        self.placed.keys().copied()
    }

    /// All placed faces, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (BoardSlot, &CardFace)> {
        self.placed.iter().map(|(&slot, face)| (slot, face))
    }

    pub fn card_at(&self, slot: BoardSlot) -> Option<&CardFace> {
        self.placed.get(&slot)
    }

    pub fn neighbor_card(&self, slot: BoardSlot, direction: Direction) -> Option<&CardFace> {
        self.placed.get(&slot.step(direction))
    }

    /// The number of placed cards, including the starter card.
    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    pub fn to_placed_vec(&self) -> Vec<PlacedCard> {
        self.placed
            .iter()
            .map(|(&slot, face)| PlacedCard {
                slot,
                face: face.clone(),
            })
            .collect()
    }

    // Computes the changes of putting `face` on the empty `slot`, plus the
    // number of covered corners. Does not check legality.
    fn diff(&self, slot: BoardSlot, face: &CardFace) -> (Diff, u8) {
        // Start with everything printed on the new face, then take away the
        // pairs of corners that end up on top of each other.
        let mut visible = self.visible.add(face.printed_symbols());
        let mut covered_corners = 0;
        let mut opened = Vec::new();
        let mut closed = Vec::new();

        for (direction, neighbor_slot) in slot.neighbors() {
            match self.placed.get(&neighbor_slot) {
                Some(neighbor) => {
                    let touching = neighbor
                        .corner(direction.opposite().corner())
                        .counts()
                        .add(face.corner(direction.corner()).counts());
                    visible = uncount(visible, touching);
                    covered_corners += 1;
                }
                None => {
                    if self.is_open(neighbor_slot, Some((slot, face))) {
                        opened.push(neighbor_slot);
                    } else {
                        closed.push(neighbor_slot);
                    }
                }
            }
        }

        let diff = Diff {
            slot,
            visible,
            opened,
            closed,
        };
        (diff, covered_corners)
    }

    fn apply(&mut self, face: CardFace, diff: Diff) {
        let Diff {
            slot,
            visible,
            opened,
            closed,
        } = diff;
        self.available.remove(&slot);
        for s in closed {
            self.available.remove(&s);
        }
        self.available.extend(opened);
        self.visible = visible;
        let previous = self.placed.insert(slot, face);
        debug_assert!(previous.is_none());
    }

    // Can a card go on the empty `slot`? It must touch at least one card,
    // and none of the cards it touches may show a hidden corner towards it.
    //
    // `pending` is a placement to take into account as if it were done.
    fn is_open(&self, slot: BoardSlot, pending: Option<(BoardSlot, &CardFace)>) -> bool {
        let mut touches_card = false;
        for (direction, neighbor_slot) in slot.neighbors() {
            let neighbor = match pending {
                Some((pending_slot, face)) if pending_slot == neighbor_slot => Some(face),
                _ => self.placed.get(&neighbor_slot),
            };
            if let Some(neighbor) = neighbor {
                if neighbor.corner(direction.opposite().corner()) == Corner::Hidden {
                    return false;
                }
                touches_card = true;
            }
        }
        touches_card
    }

    fn hidden_corner_facing(&self, slot: BoardSlot) -> Option<BoardSlot> {
        slot.neighbors()
            .into_iter()
            .find(|&(direction, neighbor_slot)| {
                self.placed
                    .get(&neighbor_slot)
                    .is_some_and(|n| n.corner(direction.opposite().corner()) == Corner::Hidden)
            })
            .map(|(_, neighbor_slot)| neighbor_slot)
    }
}

impl From<PlayingBoard> for Vec<PlacedCard> {
    fn from(board: PlayingBoard) -> Self {
        board
            .placed
            .into_iter()
            .map(|(slot, face)| PlacedCard { slot, face })
            .collect()
    }
}

impl TryFrom<Vec<PlacedCard>> for PlayingBoard {
    type Error = InvalidLayout;

    /// Rebuilds a board from its placed cards, e.g. a saved game.
    ///
    /// The order of placement is lost, so gold costs are not checked again.
    fn try_from(cards: Vec<PlacedCard>) -> Result<Self, Self::Error> {
        let mut placed = BTreeMap::new();
        for PlacedCard { slot, face } in cards {
            if (slot.h + slot.v).rem_euclid(2) != 0 {
                return Err(InvalidLayout::OffGrid { slot });
            }
            if face.is_starter() != (slot == BoardSlot::ORIGIN) {
                return Err(InvalidLayout::MisplacedStarter { slot });
            }
            if placed.insert(slot, face).is_some() {
                return Err(InvalidLayout::DuplicateSlot { slot });
            }
        }
        if !placed.is_empty() && !placed.contains_key(&BoardSlot::ORIGIN) {
            return Err(InvalidLayout::MissingStarter);
        }

        let mut board = PlayingBoard {
            placed,
            ..PlayingBoard::default()
        };
        let mut visible = SymbolCounts::new();
        let mut available = BTreeSet::new();
        for (&slot, face) in &board.placed {
            visible = visible.add(face.central_yield());
            for (direction, neighbor_slot) in slot.neighbors() {
                if board.placed.contains_key(&neighbor_slot) {
                    continue;
                }
                visible = visible.add(face.corner(direction.corner()).counts());
                if board.is_open(neighbor_slot, None) {
                    available.insert(neighbor_slot);
                }
            }
        }
        board.visible = visible;
        board.available = available;
        Ok(board)
    }
}

// Removes covered symbols from the visible tally. Every covered symbol was
// counted when its card was placed, so this can't go below zero unless the
// bookkeeping is broken.
fn uncount(visible: SymbolCounts, covered: SymbolCounts) -> SymbolCounts {
    assert!(
        visible.includes(covered),
        "Visible symbols {} out of sync with the placed cards, cannot remove {}",
        visible,
        covered
    );
    visible.subtract(covered)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::PlacementScript;
    use crate::{symbols, Card, FaceKind, Item, Resource, ScoringRule, Side, Symbol};

    const E: Corner = Corner::Empty;
    const H: Corner = Corner::Hidden;

    fn s(h: i32, v: i32) -> BoardSlot {
        BoardSlot::new(h, v)
    }

    // Corners are given as [top left, top right, bottom left, bottom right]
    fn starter(corners: [Corner; 4], central: SymbolCounts) -> CardFace {
        CardFace::new(
            1,
            Side::Front,
            FaceKind::Starter,
            corners,
            central,
            ScoringRule::FixedPoints(0),
        )
    }

    fn resource(id: u32, corners: [Corner; 4], points: Points) -> CardFace {
        Card::resource(id, Resource::Plant, corners, points)
            .face(Side::Front)
            .clone()
    }

    fn gold(id: u32, corners: [Corner; 4], cost: SymbolCounts, scoring: ScoringRule) -> CardFace {
        Card::gold(id, Resource::Animal, corners, cost, scoring)
            .face(Side::Front)
            .clone()
    }

    fn available(board: &PlayingBoard) -> BTreeSet<BoardSlot> {
        board.available_slots().collect()
    }

    // The visible symbols, counted from scratch: a corner is covered exactly
    // when the diagonal neighbor it points to holds a card.
    fn recount(board: &PlayingBoard) -> SymbolCounts {
        let mut counts = SymbolCounts::new();
        for (slot, face) in board.iter() {
            counts = counts.add(face.central_yield());
            for (direction, neighbor_slot) in slot.neighbors() {
                if board.card_at(neighbor_slot).is_none() {
                    counts = counts.add(face.corner(direction.corner()).counts());
                }
            }
        }
        counts
    }

    fn recompute_available(board: &PlayingBoard) -> BTreeSet<BoardSlot> {
        let mut slots = BTreeSet::new();
        for (slot, _) in board.iter() {
            for (_, candidate) in slot.neighbors() {
                if board.card_at(candidate).is_some() {
                    continue;
                }
                let blocked = candidate.neighbors().into_iter().any(|(direction, n)| {
                    board
                        .card_at(n)
                        .is_some_and(|f| f.corner(direction.opposite().corner()) == H)
                });
                if !blocked {
                    slots.insert(candidate);
                }
            }
        }
        slots
    }

    quickcheck! {
        fn derived_state_stays_in_sync(script: PlacementScript) -> bool {
            let mut board = PlayingBoard::new();
            board.place_starter_card(script.starter.clone()).unwrap();
            for mv in script.moves {
                let slots: Vec<BoardSlot> = board.available_slots().collect();
                if slots.is_empty() {
                    break;
                }
                let slot = slots[mv.slot_choice % slots.len()];
                let before = board.clone();
                match board.place_card(slot, mv.face) {
                    Ok(_) => {
                        if board.is_available(slot) || board.card_at(slot).is_none() {
                            return false;
                        }
                    }
                    Err(_) => {
                        if board != before {
                            return false;
                        }
                    }
                }
                if board.visible_symbols() != recount(&board)
                    || available(&board) != recompute_available(&board)
                {
                    return false;
                }
            }
            true
        }

        fn only_available_slots_accept_cards(script: PlacementScript) -> bool {
            let mut board = PlayingBoard::new();
            board.place_starter_card(script.starter.clone()).unwrap();
            for mv in script.moves {
                for h in -4..=4 {
                    for v in -4..=4 {
                        let slot = s(h, v);
                        if !board.is_available(slot) && board.can_place(slot, &mv.face) {
                            return false;
                        }
                    }
                }
                let slot = board.available_slots().nth(mv.slot_choice % 4);
                if let Some(slot) = slot {
                    let legal = board.can_place(slot, &mv.face);
                    if board.place_card(slot, mv.face).is_ok() != legal {
                        return false;
                    }
                }
            }
            true
        }
    }

    #[test]
    fn starter_card_opens_four_slots() {
        let mut board = PlayingBoard::new();
        assert_eq!(board.phase(), BoardPhase::Empty);
        board
            .place_starter_card(starter([E; 4], symbols!(plant: 1)))
            .unwrap();
        assert_eq!(board.phase(), BoardPhase::Active);
        assert_eq!(board.visible_resources(), symbols!(plant: 1).resources);
        assert_eq!(board.visible_items().total(), 0);
        assert_eq!(
            available(&board),
            BTreeSet::from([s(1, 1), s(-1, 1), s(1, -1), s(-1, -1)])
        );
        assert_eq!(board.covered_slots().collect::<Vec<_>>(), vec![BoardSlot::ORIGIN]);
    }

    #[test]
    fn starter_card_only_once() {
        let mut board = PlayingBoard::new();
        let face = starter([E; 4], SymbolCounts::new());
        assert_eq!(
            board.place_card(s(1, 1), resource(2, [E; 4], 0)),
            Err(IllegalPlacement::BoardNotStarted)
        );
        assert_eq!(
            board.place_starter_card(resource(2, [E; 4], 0)),
            Err(IllegalState::NotAStarterFace { id: 2 })
        );
        board.place_starter_card(face.clone()).unwrap();
        assert_eq!(
            board.place_starter_card(face.clone()),
            Err(IllegalState::StarterAlreadyPlaced)
        );
        assert_eq!(
            board.place_card(s(1, 1), face),
            Err(IllegalPlacement::StarterFace { id: 1 })
        );
    }

    #[test]
    fn covering_removes_both_touching_corners() {
        let mut board = PlayingBoard::new();
        // The starter's top right corner shows an animal
        board
            .place_starter_card(starter([E, Resource::Animal.into(), E, E], symbols!(plant: 1)))
            .unwrap();
        assert_eq!(board.visible_symbols(), symbols!(plant: 1, animal: 1));

        // North-east of the starter: the new card's bottom left corner is on the starter
        let face = resource(
            2,
            [E, Resource::Insect.into(), Resource::Plant.into(), E],
            1,
        );
        assert_eq!(board.place_card(s(1, 1), face), Ok(1));
        assert_eq!(board.visible_symbols(), symbols!(plant: 1, insect: 1));
        assert!(!board.is_available(s(1, 1)));
        assert_eq!(board.covered_slots().count(), 2);
        assert_eq!(
            available(&board),
            BTreeSet::from([s(-1, 1), s(1, -1), s(-1, -1), s(2, 2), s(0, 2), s(2, 0)])
        );
        assert_eq!(
            board.neighbor_card(BoardSlot::ORIGIN, Direction::NorthEast).map(|f| f.id()),
            Some(2)
        );
        assert!(board.neighbor_card(BoardSlot::ORIGIN, Direction::SouthEast).is_none());
    }

    #[test]
    fn placing_the_same_slot_twice_fails() {
        let mut board = PlayingBoard::new();
        board.place_starter_card(starter([E; 4], SymbolCounts::new())).unwrap();
        board.place_card(s(-1, -1), resource(2, [E; 4], 0)).unwrap();
        assert_eq!(
            board.place_card(s(-1, -1), resource(3, [E; 4], 0)),
            Err(IllegalPlacement::SlotOccupied { slot: s(-1, -1) })
        );
        assert_eq!(
            board.place_card(s(5, 5), resource(3, [E; 4], 0)),
            Err(IllegalPlacement::SlotNotAvailable {
                slot: s(5, 5),
                hidden_corner_of: None
            })
        );
    }

    #[test]
    fn covering_two_neighbors_at_once() {
        let mut board = PlayingBoard::new();
        board.place_starter_card(starter([E; 4], SymbolCounts::new())).unwrap();
        let quill: Corner = Item::Quill.into();
        let fungi: Corner = Resource::Fungi.into();
        // North-east and south-east of the starter
        board.place_card(s(1, 1), resource(2, [E, E, E, quill], 0)).unwrap();
        board.place_card(s(1, -1), resource(3, [E, fungi, E, E], 0)).unwrap();
        assert_eq!(board.visible_symbols(), symbols!(quill: 1, fungi: 1));

        // (2, 0) touches the bottom right of (1, 1) and the top right of (1, -1)
        let face = gold(
            4,
            [Item::Inkwell.into(), E, Item::Manuscript.into(), Item::Quill.into()],
            symbols!(fungi: 1),
            ScoringRule::PointsPerCoveredCorner(2),
        );
        let calculation = board.calculate(s(2, 0), &face).unwrap();
        assert_eq!(calculation.covered_corners, 2);
        assert_eq!(calculation.points, 4);
        // The previewed result is what placing actually yields
        assert_eq!(calculation.visible_after(), symbols!(quill: 1));
        assert_eq!(board.place_card(s(2, 0), face), Ok(4));
        assert_eq!(board.visible_symbols(), symbols!(quill: 1));
        assert_eq!(board.visible_symbols(), recount(&board));
    }

    #[test]
    fn unaffordable_gold_leaves_board_untouched() {
        let mut board = PlayingBoard::new();
        board
            .place_starter_card(starter([Resource::Fungi.into(), E, E, E], symbols!(fungi: 1)))
            .unwrap();
        let face = gold(
            10,
            [E; 4],
            symbols!(fungi: 3),
            ScoringRule::FixedPoints(3),
        );
        let before = board.clone();
        assert!(!board.can_place(s(1, 1), &face));
        assert_eq!(
            board.place_card(s(1, 1), face.clone()),
            Err(IllegalPlacement::CostNotMet {
                symbol: Symbol::Resource(Resource::Fungi),
                required: 3,
                visible: 2,
            })
        );
        assert_eq!(board, before);

        // Once there are enough fungi, the same face goes down
        board
            .place_card(s(1, -1), resource(11, [E, E, Resource::Fungi.into(), E], 0))
            .unwrap();
        assert_eq!(board.visible_symbols(), symbols!(fungi: 3));
        assert_eq!(board.place_card(s(1, 1), face), Ok(3));
    }

    #[test]
    fn visible_symbol_scoring_counts_after_covering() {
        let mut board = PlayingBoard::new();
        let quill: Corner = Item::Quill.into();
        board.place_starter_card(starter([E, quill, E, E], SymbolCounts::new())).unwrap();
        // Covers the starter's quill and brings two of its own
        let face = gold(
            20,
            [E, quill, E, quill],
            SymbolCounts::new(),
            ScoringRule::PointsPerVisibleSymbol {
                symbol: Symbol::Item(Item::Quill),
                points: 1,
            },
        );
        assert_eq!(board.place_card(s(1, 1), face), Ok(2));
        assert_eq!(board.visible_items().get(Item::Quill), 2);
    }

    #[test]
    fn hidden_corner_blocks_slot() {
        let mut board = PlayingBoard::new();
        board.place_starter_card(starter([E, H, E, E], SymbolCounts::new())).unwrap();
        assert!(!board.is_available(s(1, 1)));
        assert_eq!(
            board.place_card(s(1, 1), resource(2, [E; 4], 0)),
            Err(IllegalPlacement::SlotNotAvailable {
                slot: s(1, 1),
                hidden_corner_of: Some(BoardSlot::ORIGIN),
            })
        );
        // A second card next to (1, 1) does not make it available
        board.place_card(s(2, 0), resource(2, [E; 4], 0)).unwrap_err();
        board.place_card(s(1, -1), resource(2, [E; 4], 0)).unwrap();
        board.place_card(s(2, 0), resource(3, [E; 4], 0)).unwrap();
        assert!(!board.is_available(s(1, 1)));
        assert_eq!(available(&board), recompute_available(&board));
    }

    #[test]
    fn hidden_corner_closes_available_slot() {
        let mut board = PlayingBoard::new();
        board.place_starter_card(starter([E; 4], SymbolCounts::new())).unwrap();
        board.place_card(s(1, -1), resource(2, [E; 4], 0)).unwrap();
        assert!(board.is_available(s(2, 0)));

        // The bottom right corner of (1, 1) faces (2, 0)
        board.place_card(s(1, 1), resource(3, [E, E, E, H], 0)).unwrap();
        assert!(!board.is_available(s(2, 0)));
        assert_eq!(
            board.calculate(s(2, 0), &resource(4, [E; 4], 0)).unwrap_err(),
            IllegalPlacement::SlotNotAvailable {
                slot: s(2, 0),
                hidden_corner_of: Some(s(1, 1)),
            }
        );
        // The new card's own hidden corner does not matter where it touches a card
        board.place_card(s(-1, -1), resource(5, [E, H, E, E], 0)).unwrap();
        assert!(!board.is_available(s(0, 0)));
    }

    #[test]
    fn board_json_rebuilds_derived_state() {
        let mut board = PlayingBoard::new();
        let fungi: Corner = Resource::Fungi.into();
        board.place_starter_card(starter([E, fungi, H, E], symbols!(plant: 1))).unwrap();
        board.place_card(s(1, 1), resource(2, [fungi, E, E, H], 0)).unwrap();
        board.place_card(s(-1, 1), resource(3, [E, Item::Quill.into(), E, E], 0)).unwrap();

        let json = serde_json::to_string(&board).unwrap();
        let parsed: PlayingBoard = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, board);
        assert_eq!(parsed.visible_symbols(), recount(&board));
        assert_eq!(available(&parsed), recompute_available(&board));
        assert_eq!(
            serde_json::to_string(&PlayingBoard::new()).unwrap(),
            "[]"
        );
        assert_eq!(serde_json::to_string(&BoardPhase::Active).unwrap(), r#""active""#);

        let counter: ResourcesCounter =
            serde_json::from_str(&serde_json::to_string(&board.visible_resources()).unwrap()).unwrap();
        assert_eq!(counter, board.visible_resources());
    }

    #[test]
    fn inconsistent_layouts_are_rejected() {
        let start = || PlacedCard {
            slot: BoardSlot::ORIGIN,
            face: starter([E; 4], SymbolCounts::new()),
        };
        let card = |h, v| PlacedCard {
            slot: s(h, v),
            face: resource(2, [E; 4], 0),
        };
        assert_eq!(
            PlayingBoard::try_from(vec![card(1, 1)]),
            Err(InvalidLayout::MissingStarter)
        );
        assert_eq!(
            PlayingBoard::try_from(vec![start(), card(1, 0)]),
            Err(InvalidLayout::OffGrid { slot: s(1, 0) })
        );
        assert_eq!(
            PlayingBoard::try_from(vec![start(), card(1, 1), card(1, 1)]),
            Err(InvalidLayout::DuplicateSlot { slot: s(1, 1) })
        );
        assert_eq!(
            PlayingBoard::try_from(vec![card(0, 0)]),
            Err(InvalidLayout::MisplacedStarter { slot: BoardSlot::ORIGIN })
        );
        let mut moved = start();
        moved.slot = s(2, 2);
        assert_eq!(
            PlayingBoard::try_from(vec![start(), moved]),
            Err(InvalidLayout::MisplacedStarter { slot: s(2, 2) })
        );
        assert!(serde_json::from_str::<PlayingBoard>("[]").unwrap().is_empty());
    }

    #[test]
    fn placed_cards_serialize() {
        let mut board = PlayingBoard::new();
        board.place_starter_card(starter([E; 4], symbols!(insect: 1))).unwrap();
        board.place_card(s(-1, 1), resource(2, [E; 4], 1)).unwrap();
        let placed = board.to_placed_vec();
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].slot, s(-1, 1));
        let json = serde_json::to_string(&placed).unwrap();
        let parsed: Vec<PlacedCard> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, placed);
    }
}
