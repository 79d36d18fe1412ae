use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::counter::symbol_counter;

/// One of the four kingdoms. Every resource and gold card belongs to one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Resource {
    Plant,
    Animal,
    Fungi,
    Insect,
}

/// An item symbol. Items never appear as a kingdom.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Item {
    Quill,
    Inkwell,
    Manuscript,
}

/// Any symbol that can be printed on a corner or in the center of a card.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Symbol {
    Resource(Resource),
    Item(Item),
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::Plant,
        Resource::Animal,
        Resource::Fungi,
        Resource::Insect,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Resource::Plant => "plant",
            Resource::Animal => "animal",
            Resource::Fungi => "fungi",
            Resource::Insect => "insect",
        }
    }
}

impl Item {
    pub const ALL: [Item; 3] = [Item::Quill, Item::Inkwell, Item::Manuscript];

    pub fn name(self) -> &'static str {
        match self {
            Item::Quill => "quill",
            Item::Inkwell => "inkwell",
            Item::Manuscript => "manuscript",
        }
    }
}

impl Symbol {
    pub fn name(self) -> &'static str {
        match self {
            Symbol::Resource(r) => r.name(),
            Symbol::Item(i) => i.name(),
        }
    }
}

impl From<Resource> for Symbol {
    fn from(resource: Resource) -> Self {
        Symbol::Resource(resource)
    }
}

impl From<Item> for Symbol {
    fn from(item: Item) -> Self {
        Symbol::Item(item)
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The error type for the [`FromStr`] instance of [`Symbol`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownSymbol(pub String);

impl std::error::Error for UnknownSymbol {}

impl std::fmt::Display for UnknownSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown symbol '{}'", self.0)
    }
}

impl FromStr for Symbol {
    type Err = UnknownSymbol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbol = match s {
            "plant" => Symbol::Resource(Resource::Plant),
            "animal" => Symbol::Resource(Resource::Animal),
            "fungi" => Symbol::Resource(Resource::Fungi),
            "insect" => Symbol::Resource(Resource::Insect),
            "quill" => Symbol::Item(Item::Quill),
            "inkwell" => Symbol::Item(Item::Inkwell),
            "manuscript" => Symbol::Item(Item::Manuscript),
            _ => return Err(UnknownSymbol(String::from(s))),
        };
        Ok(symbol)
    }
}

impl TryFrom<String> for Symbol {
    type Error = UnknownSymbol;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> String {
        String::from(symbol.name())
    }
}

symbol_counter!(ResourcesCounter, Resource, 4);
symbol_counter!(ItemsCounter, Item, 3);

/// A resource tally and an item tally, side by side.
///
/// Used for central yields, gold placement costs, symbol objectives and
/// the visible symbols on a board.
///
/// # Note on immutability
///
/// Like the two counters it is made of, this is a `Copy` value type and
/// its arithmetic methods return a new value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Symbol, u32>", into = "BTreeMap<Symbol, u32>")]
pub struct SymbolCounts {
    pub resources: ResourcesCounter,
    pub items: ItemsCounter,
}

/// The first symbol found lacking by [`SymbolCounts::first_shortfall()`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shortfall {
    pub symbol: Symbol,
    pub required: u32,
    pub available: u32,
}

impl SymbolCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// A tally holding exactly one `symbol`.
    pub fn single(symbol: impl Into<Symbol>) -> Self {
        Self::new().with(symbol, 1)
    }

    pub fn get(self, symbol: impl Into<Symbol>) -> u32 {
        match symbol.into() {
            Symbol::Resource(r) => self.resources.get(r),
            Symbol::Item(i) => self.items.get(i),
        }
    }

    #[must_use]
    pub fn with(self, symbol: impl Into<Symbol>, count: u32) -> Self {
        match symbol.into() {
            Symbol::Resource(r) => Self {
                resources: self.resources.with(r, count),
                ..self
            },
            Symbol::Item(i) => Self {
                items: self.items.with(i, count),
                ..self
            },
        }
    }

    #[must_use]
    pub fn add(self, other: Self) -> Self {
        Self {
            resources: self.resources + other.resources,
            items: self.items + other.items,
        }
    }

    #[must_use]
    pub fn subtract(self, other: Self) -> Self {
        Self {
            resources: self.resources - other.resources,
            items: self.items - other.items,
        }
    }

    pub fn total(self) -> u32 {
        self.resources.total() + self.items.total()
    }

    pub fn includes(self, other: Self) -> bool {
        self.resources.includes(other.resources) && self.items.includes(other.items)
    }

    pub fn is_empty(self) -> bool {
        self.resources.is_empty() && self.items.is_empty()
    }

    /// All non-zero entries, resources first.
    pub fn iter(self) -> impl Iterator<Item = (Symbol, u32)> {
        self.resources
            .iter()
            .map(|(r, n)| (Symbol::Resource(r), n))
            .chain(self.items.iter().map(|(i, n)| (Symbol::Item(i), n)))
    }

    /// Finds the first symbol of `required` that this tally cannot cover.
    pub fn first_shortfall(self, required: Self) -> Option<Shortfall> {
        required.iter().find_map(|(symbol, required)| {
            let available = self.get(symbol);
            (available < required).then_some(Shortfall {
                symbol,
                required,
                available,
            })
        })
    }
}

impl FromIterator<(Symbol, u32)> for SymbolCounts {
    fn from_iter<I: IntoIterator<Item = (Symbol, u32)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (symbol, n) in iter {
            counts = counts.with(symbol, counts.get(symbol) + n);
        }
        counts
    }
}

impl From<BTreeMap<Symbol, u32>> for SymbolCounts {
    fn from(map: BTreeMap<Symbol, u32>) -> Self {
        map.into_iter().collect()
    }
}

impl From<SymbolCounts> for BTreeMap<Symbol, u32> {
    fn from(counts: SymbolCounts) -> Self {
        counts.iter().collect()
    }
}

impl std::fmt::Display for SymbolCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (idx, (symbol, n)) in self.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", symbol, n)?;
        }
        write!(f, "}}")
    }
}

/// Shorthand for building a [`SymbolCounts`] from `name: count` pairs.
///
/// Panics on unknown symbol names.
/// ```
/// # use codex::{symbols, Item, Resource};
/// let counts = symbols!(insect: 2, quill: 1);
/// assert_eq!(counts.get(Resource::Insect), 2);
/// assert_eq!(counts.get(Item::Quill), 1);
/// assert_eq!(counts.total(), 3);
/// ```
#[macro_export]
macro_rules! symbols {
    ($($name:ident : $count:expr),* $(,)?) => {
        <$crate::SymbolCounts as std::iter::FromIterator<($crate::Symbol, u32)>>::from_iter([
            $((
                <$crate::Symbol as std::str::FromStr>::from_str(stringify!($name))
                    .expect("Invalid symbol name given to symbols! macro"),
                $count,
            )),*
        ])
    };
}
