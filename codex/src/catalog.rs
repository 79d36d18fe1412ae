use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::{Card, CardFace, CardId, Corner, ObjectiveCard, Points, Resource, ScoringRule, Side, SymbolCounts};

/// All cards and objectives of a game, loaded once at startup.
///
/// The JSON document has a `cards` list and an `objectives` list:
/// ```
/// # use codex::{CardCatalog, Side};
/// let catalog = CardCatalog::from_json(r#"{
///     "cards": [
///         {
///             "type": "starter",
///             "id": 81,
///             "front": {"corners": ["empty", "plant", "insect", "empty"], "central": {"insect": 1}},
///             "back": {"corners": ["fungi", "plant", "insect", "animal"]}
///         },
///         {"type": "resource", "id": 1, "kingdom": "fungi", "corners": ["fungi", "empty", "fungi", "hidden"]},
///         {
///             "type": "gold",
///             "id": 41,
///             "kingdom": "fungi",
///             "corners": ["hidden", "empty", "empty", "quill"],
///             "cost": {"fungi": 2, "animal": 1},
///             "scoring": {"points_per_visible_symbol": {"symbol": "quill", "points": 1}}
///         }
///     ],
///     "objectives": [
///         {"id": 95, "points": 2, "pattern": {"type": "symbols", "requires": {"fungi": 3}}}
///     ]
/// }"#).unwrap();
/// assert_eq!(catalog.face(41, Side::Back).unwrap().central_yield().total(), 1);
/// assert_eq!(catalog.objectives().count(), 1);
/// ```
///
/// Corners are listed top left, top right, bottom left, bottom right.
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: BTreeMap<CardId, Card>,
    objectives: BTreeMap<CardId, ObjectiveCard>,
}

/// Upper bound for any count or point value printed on a card. Keeps the
/// board's running tallies and objective products far from overflowing.
const MAX_PRINTED_VALUE: u32 = 100;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    cards: Vec<CardEntry>,
    #[serde(default)]
    objectives: Vec<ObjectiveCard>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", deny_unknown_fields)]
enum CardEntry {
    Starter {
        id: CardId,
        front: StarterFaceEntry,
        back: StarterFaceEntry,
    },
    Resource {
        id: CardId,
        kingdom: Resource,
        corners: [Corner; 4],
        #[serde(default)]
        points: Points,
    },
    Gold {
        id: CardId,
        kingdom: Resource,
        corners: [Corner; 4],
        #[serde(default)]
        cost: SymbolCounts,
        scoring: ScoringRule,
    },
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct StarterFaceEntry {
    corners: [Corner; 4],
    #[serde(default)]
    central: SymbolCounts,
}

impl From<CardEntry> for Card {
    fn from(entry: CardEntry) -> Self {
        match entry {
            CardEntry::Starter { id, front, back } => Card::starter(
                id,
                (front.corners, front.central),
                (back.corners, back.central),
            ),
            CardEntry::Resource {
                id,
                kingdom,
                corners,
                points,
            } => Card::resource(id, kingdom, corners, points),
            CardEntry::Gold {
                id,
                kingdom,
                corners,
                cost,
                scoring,
            } => Card::gold(id, kingdom, corners, cost, scoring),
        }
    }
}

fn check_printed_values(card: &Card) -> anyhow::Result<()> {
    for side in Side::BOTH {
        let face = card.face(side);
        let counts = face
            .central_yield()
            .iter()
            .chain(face.cost().into_iter().flat_map(SymbolCounts::iter));
        for (symbol, count) in counts {
            if count > MAX_PRINTED_VALUE {
                anyhow::bail!(
                    "Card {} shows {} {} symbols, more than {}",
                    face,
                    count,
                    symbol,
                    MAX_PRINTED_VALUE
                );
            }
        }
        let points = match face.scoring() {
            ScoringRule::FixedPoints(points) => points,
            ScoringRule::PointsPerCoveredCorner(points) => points,
            ScoringRule::PointsPerVisibleSymbol { points, .. } => points,
        };
        if points > MAX_PRINTED_VALUE {
            anyhow::bail!("Card {} scores {} points, more than {}", face, points, MAX_PRINTED_VALUE);
        }
    }
    Ok(())
}

impl CardCatalog {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;

        let mut cards = BTreeMap::new();
        for entry in file.cards {
            let card = Card::from(entry);
            check_printed_values(&card)?;
            match cards.entry(card.id()) {
                Entry::Occupied(_) => anyhow::bail!("Card id {} appears more than once", card.id()),
                Entry::Vacant(slot) => {
                    slot.insert(card);
                }
            }
        }

        let mut objectives = BTreeMap::new();
        for objective in file.objectives {
            if objective.points > MAX_PRINTED_VALUE {
                anyhow::bail!(
                    "Objective {} is worth {} points, more than {}",
                    objective.id,
                    objective.points,
                    MAX_PRINTED_VALUE
                );
            }
            match objectives.entry(objective.id) {
                Entry::Occupied(_) => {
                    anyhow::bail!("Objective id {} appears more than once", objective.id)
                }
                Entry::Vacant(slot) => {
                    slot.insert(objective);
                }
            }
        }

        Ok(Self { cards, objectives })
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read card catalog '{}'", path.display()))?;
        Self::from_json(&json)
            .with_context(|| format!("Invalid card catalog '{}'", path.display()))
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    pub fn face(&self, id: CardId, side: Side) -> Option<&CardFace> {
        self.cards.get(&id).map(|card| card.face(side))
    }

    pub fn objective(&self, id: CardId) -> Option<&ObjectiveCard> {
        self.objectives.get(&id)
    }

    pub fn starters(&self) -> impl Iterator<Item = &Card> {
        self.cards.values().filter(|card| card.is_starter())
    }

    /// Resource and gold cards, i.e. everything that goes into the draw piles.
    pub fn playable_cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.values().filter(|card| !card.is_starter())
    }

    pub fn objectives(&self) -> impl Iterator<Item = &ObjectiveCard> {
        self.objectives.values()
    }

    /// The number of cards, not counting objectives.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
