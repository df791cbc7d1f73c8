//! Card index for metadata lookup.
//!
//! The `CardIndex` stores every card loaded from the client's data files.
//! It provides fast lookup by `CardId` and iterates in insertion order.
//!
//! Construction goes through `CardIndexBuilder`; the finished index has no
//! mutating methods, so once built it can be shared (`Arc<CardIndex>`)
//! across any number of readers.

use rustc_hash::FxHashMap;

use super::definition::{Card, CardId, Rarity};

/// Mutable staging area for an index under construction.
///
/// A later insert with an existing ID replaces the earlier card in place:
/// patch files layered over a base set win, but the card keeps the
/// position it was first inserted at.
#[derive(Clone, Debug, Default)]
pub struct CardIndexBuilder {
    cards: Vec<Card>,
    positions: FxHashMap<CardId, usize>,
}

impl CardIndexBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a card, returning the card it replaced, if any.
    pub fn insert(&mut self, card: Card) -> Option<Card> {
        match self.positions.get(&card.id) {
            Some(&pos) => Some(std::mem::replace(&mut self.cards[pos], card)),
            None => {
                self.positions.insert(card.id, self.cards.len());
                self.cards.push(card);
                None
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Publish the finished index.
    #[must_use]
    pub fn build(self) -> CardIndex {
        CardIndex {
            cards: self.cards,
            positions: self.positions,
        }
    }
}

impl Extend<Card> for CardIndexBuilder {
    fn extend<T: IntoIterator<Item = Card>>(&mut self, iter: T) {
        for card in iter {
            self.insert(card);
        }
    }
}

/// Read-only index of card metadata.
///
/// ## Example
///
/// ```
/// use arena_assistant::cards::{Card, CardId, CardIndexBuilder, Rarity};
///
/// let mut builder = CardIndexBuilder::new();
/// builder.insert(Card::new(CardId::new(1), "Lightning Bolt", "STA", "42", Rarity::Uncommon));
/// let index = builder.build();
///
/// let found = index.lookup(CardId::new(1)).unwrap();
/// assert_eq!(found.name, "Lightning Bolt");
/// assert!(index.lookup(CardId::new(999_999)).is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardIndex {
    cards: Vec<Card>,
    positions: FxHashMap<CardId, usize>,
}

impl CardIndex {
    /// Get a card by ID. A miss is an ordinary outcome, not an error.
    #[must_use]
    pub fn lookup(&self, id: CardId) -> Option<&Card> {
        self.positions.get(&id).map(|&pos| &self.cards[pos])
    }

    /// Check if a card ID is indexed.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.positions.contains_key(&id)
    }

    /// Get the number of indexed cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all cards in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Find cards matching a predicate, in insertion order.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &Card>
    where
        F: Fn(&Card) -> bool,
    {
        self.cards.iter().filter(move |c| predicate(c))
    }

    /// Primary printings of `set` at `rarity`, in insertion order.
    pub fn primary_in_set<'a>(
        &'a self,
        set: &'a str,
        rarity: Rarity,
    ) -> impl Iterator<Item = &'a Card> + 'a {
        self.find(move |c| c.is_primary_card && c.rarity == rarity && c.set == set)
    }

    /// Visit every primary printing of `set` at `rarity`, in insertion order.
    pub fn for_each_primary_in_set<F>(&self, set: &str, rarity: Rarity, mut visit: F)
    where
        F: FnMut(&Card),
    {
        for card in self.primary_in_set(set, rarity) {
            visit(card);
        }
    }
}

impl FromIterator<Card> for CardIndex {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        let mut builder = CardIndexBuilder::new();
        builder.extend(iter);
        builder.build()
    }
}
