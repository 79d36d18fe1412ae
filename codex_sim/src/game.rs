use anyhow::Context;
use codex::{
    final_score, BoardSlot, Card, CardCatalog, CardId, ObjectiveCard, PlacedCard, PlayingBoard,
    Points, Side, SymbolCounts,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, trace};

use crate::Config;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEnd {
    ScoreReached,
    /// Deck and hand ran out.
    CardsExhausted,
    /// None of the cards in hand fit anywhere.
    NoLegalPlacement,
}

#[derive(Clone, Debug, Serialize)]
pub struct GameReport {
    pub starter: CardId,
    pub objectives: Vec<CardId>,
    pub end: GameEnd,
    pub placement_points: Points,
    pub objective_points: Points,
    pub total: Points,
    pub cards_placed: usize,
    pub visible: SymbolCounts,
    pub board: Vec<PlacedCard>,
}

/// One way to play a card from the hand.
#[derive(Clone, Copy, Debug)]
struct PlayOption {
    hand_idx: usize,
    side: Side,
    slot: BoardSlot,
}

/// Plays a single-player game with random legal placements.
///
/// Returns an error only if the catalog cannot support a game, or if the
/// board rejects a placement it reported as legal.
pub fn play_solitaire(
    rng: &mut StdRng,
    catalog: &CardCatalog,
    objectives: &[ObjectiveCard],
    config: &Config,
) -> anyhow::Result<GameReport> {
    let starters: Vec<&Card> = catalog.starters().collect();
    let starter = starters
        .choose(rng)
        .context("The catalog contains no starter card")?;
    let starter_side = if rng.gen::<bool>() {
        Side::Front
    } else {
        Side::Back
    };

    let mut board = PlayingBoard::new();
    board.place_starter_card(starter.face(starter_side).clone())?;

    let mut deck: Vec<&Card> = catalog.playable_cards().collect();
    deck.shuffle(rng);
    let mut hand: Vec<&Card> = Vec::with_capacity(config.hand_size);

    let mut placement_points = 0;
    let end = loop {
        while hand.len() < config.hand_size {
            match deck.pop() {
                Some(card) => hand.push(card),
                None => break,
            }
        }
        if hand.is_empty() {
            break GameEnd::CardsExhausted;
        }

        let options = legal_options(&board, &hand);
        let Some(&PlayOption {
            hand_idx,
            side,
            slot,
        }) = options.choose(rng)
        else {
            break GameEnd::NoLegalPlacement;
        };
        trace!(num_options = options.len(), "Choosing placement");

        let card = hand.swap_remove(hand_idx);
        let points = board.place_card(slot, card.face(side).clone())?;
        placement_points += points;

        if placement_points >= config.end_threshold {
            break GameEnd::ScoreReached;
        }
    };

    let total = final_score(&board, placement_points, objectives);
    debug!(?end, placement_points, total, "Game over");

    Ok(GameReport {
        starter: starter.id(),
        objectives: objectives.iter().map(|objective| objective.id).collect(),
        end,
        placement_points,
        objective_points: total - placement_points,
        total,
        cards_placed: board.len() - 1,
        visible: board.visible_symbols(),
        board: board.to_placed_vec(),
    })
}

fn legal_options(board: &PlayingBoard, hand: &[&Card]) -> Vec<PlayOption> {
    let mut options = Vec::new();
    for (hand_idx, card) in hand.iter().enumerate() {
        for side in Side::BOTH {
            let face = card.face(side);
            options.extend(
                board
                    .available_slots()
                    .filter(|&slot| board.can_place(slot, face))
                    .map(|slot| PlayOption {
                        hand_idx,
                        side,
                        slot,
                    }),
            );
        }
    }
    options
}
