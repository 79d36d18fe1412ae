use crate::{BoardSlot, CardId, Symbol};

/// The error type for [`PlayingBoard::place_card()`](crate::PlayingBoard::place_card), i.e. for placing a single card.
///
/// An expected condition: the caller can check first with
/// [`PlayingBoard::can_place()`](crate::PlayingBoard::can_place), or re-prompt the player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IllegalPlacement {
    /// No starter card has been placed yet.
    BoardNotStarted,
    /// Starter faces only ever go to the origin, via `place_starter_card`.
    StarterFace { id: CardId },
    SlotOccupied { slot: BoardSlot },
    /// The slot is not available. `hidden_corner_of` names the neighbor whose
    /// hidden corner faces the slot, if that is the reason; otherwise the slot
    /// touches no card at all.
    SlotNotAvailable {
        slot: BoardSlot,
        hidden_corner_of: Option<BoardSlot>,
    },
    /// A gold face's cost is not covered by the visible symbols.
    CostNotMet {
        symbol: Symbol,
        required: u32,
        visible: u32,
    },
}

impl std::error::Error for IllegalPlacement {}

impl std::fmt::Display for IllegalPlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalPlacement::BoardNotStarted =>
                write!(f, "A card was placed before the starter card"),
            IllegalPlacement::StarterFace { id } =>
                write!(f, "Starter card #{} can only be placed as the first card", id),
            IllegalPlacement::SlotOccupied { slot } =>
                write!(f, "There is already a card at {}", slot),
            IllegalPlacement::SlotNotAvailable { slot, hidden_corner_of: Some(neighbor) } =>
                write!(f, "A card at {} would cover the hidden corner of the card at {}", slot, neighbor),
            IllegalPlacement::SlotNotAvailable { slot, hidden_corner_of: None } =>
                write!(f, "A card at {} would not touch any card on the board", slot),
            IllegalPlacement::CostNotMet { symbol, required, visible } =>
                write!(f, "The card requires {} visible {} symbols, but only {} are visible", required, symbol, visible),
        }
    }
}

/// The error type for operations invoked in the wrong board lifecycle state.
///
/// Always a bug in the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IllegalState {
    StarterAlreadyPlaced,
    NotAStarterFace { id: CardId },
}

impl std::error::Error for IllegalState {}

impl std::fmt::Display for IllegalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalState::StarterAlreadyPlaced =>
                write!(f, "The starter card has already been placed"),
            IllegalState::NotAStarterFace { id } =>
                write!(f, "Card #{} is not a starter card", id),
        }
    }
}

/// The error type for rebuilding a [`PlayingBoard`](crate::PlayingBoard) from a list of placed cards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvalidLayout {
    /// The list is not empty, but nothing sits at the origin.
    MissingStarter,
    /// Either a starter face away from the origin or another face at the origin.
    MisplacedStarter { slot: BoardSlot },
    DuplicateSlot { slot: BoardSlot },
    /// Cards only ever touch diagonally, so `h + v` is always even.
    OffGrid { slot: BoardSlot },
}

impl std::error::Error for InvalidLayout {}

impl std::fmt::Display for InvalidLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidLayout::MissingStarter =>
                write!(f, "There is no starter card at the origin"),
            InvalidLayout::MisplacedStarter { slot } =>
                write!(f, "Only the starter card may be at the origin, and only there, but {} breaks this", slot),
            InvalidLayout::DuplicateSlot { slot } =>
                write!(f, "There is more than one card at {}", slot),
            InvalidLayout::OffGrid { slot } =>
                write!(f, "No card can be at {}", slot),
        }
    }
}
