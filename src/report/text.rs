//! Plain-text rendering of cards, collections and inventories.
//!
//! Card lines use the import format accepted by deck tools:
//! `"<count> <name> (<set>) <collector-number>"`.

use crate::cards::{Card, CardId, CardIndex};
use crate::logfile::{CollectionSnapshot, InventorySnapshot};

/// A card id resolved against the index.
///
/// `Unknown` is the lookup-miss sentinel; it renders as a placeholder
/// instead of failing the whole report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardRef<'a> {
    Known(&'a Card),
    Unknown(CardId),
}

impl<'a> CardRef<'a> {
    #[must_use]
    pub fn resolve(index: &'a CardIndex, id: CardId) -> Self {
        index.lookup(id).map_or(CardRef::Unknown(id), CardRef::Known)
    }

    #[must_use]
    pub fn id(&self) -> CardId {
        match self {
            CardRef::Known(card) => card.id,
            CardRef::Unknown(id) => *id,
        }
    }
}

impl std::fmt::Display for CardRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardRef::Known(card) => {
                write!(f, "{} ({}) {}", card.name, card.set, card.collector_number)
            }
            CardRef::Unknown(id) => write!(f, "Unknown Card #{id} (???) ?"),
        }
    }
}

/// One `"<count> <name> (<set>) <collector-number>"` line.
#[must_use]
pub fn card_line(count: u32, id: CardId, index: &CardIndex) -> String {
    format!("{count} {}", CardRef::resolve(index, id))
}

/// Card lines for a collection, in ascending card id order.
#[must_use]
pub fn collection_lines(snapshot: &CollectionSnapshot, index: &CardIndex) -> Vec<String> {
    snapshot
        .iter()
        .map(|(id, count)| card_line(count, id, index))
        .collect()
}

/// `key: value` lines for every inventory field, sorted by key.
#[must_use]
pub fn inventory_lines(snapshot: &InventorySnapshot) -> Vec<String> {
    snapshot
        .iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .collect()
}
