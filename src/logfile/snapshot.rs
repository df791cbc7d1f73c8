//! Typed snapshots decoded from log payloads.
//!
//! - `CollectionSnapshot`: card id → owned copies at one save.
//! - `InventorySnapshot`: resource counters at one save, kept as an opaque
//!   key/value map with typed accessors for the counters we use.
//! - `BoosterOpenEvent`: one pack opened. Never superseded by later events.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{CardId, Rarity};

/// Cards drawn from one pack, in draw order. Duplicates are allowed.
pub type PackCards = SmallVec<[CardId; 16]>;

/// Full collection state at one point in the log.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionSnapshot {
    cards: BTreeMap<CardId, u32>,
}

impl CollectionSnapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies owned of `id`; zero when absent.
    #[must_use]
    pub fn count(&self, id: CardId) -> u32 {
        self.cards.get(&id).copied().unwrap_or(0)
    }

    /// Distinct cards in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Sum of all copies.
    #[must_use]
    pub fn total_copies(&self) -> u64 {
        self.cards.values().map(|&c| u64::from(c)).sum()
    }

    /// Entries in ascending card id order.
    pub fn iter(&self) -> impl Iterator<Item = (CardId, u32)> + '_ {
        self.cards.iter().map(|(&id, &count)| (id, count))
    }
}

impl FromIterator<(CardId, u32)> for CollectionSnapshot {
    fn from_iter<T: IntoIterator<Item = (CardId, u32)>>(iter: T) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

/// Per-rarity wildcard counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WildcardCounts {
    pub common: u32,
    pub uncommon: u32,
    pub rare: u32,
    pub mythic: u32,
}

impl WildcardCounts {
    /// Count for a wildcard rarity; zero for tokens and basics.
    #[must_use]
    pub fn get(&self, rarity: Rarity) -> u32 {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Uncommon => self.uncommon,
            Rarity::Rare => self.rare,
            Rarity::Mythic => self.mythic,
            Rarity::Token | Rarity::Basic => 0,
        }
    }

    /// Set the count for a wildcard rarity. Tokens and basics are ignored.
    pub fn set(&mut self, rarity: Rarity, count: u32) {
        match rarity {
            Rarity::Common => self.common = count,
            Rarity::Uncommon => self.uncommon = count,
            Rarity::Rare => self.rare = count,
            Rarity::Mythic => self.mythic = count,
            Rarity::Token | Rarity::Basic => {}
        }
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        Rarity::WILDCARD
            .iter()
            .map(|&r| u64::from(self.get(r)))
            .sum()
    }
}

impl std::ops::AddAssign for WildcardCounts {
    fn add_assign(&mut self, other: Self) {
        self.common = self.common.saturating_add(other.common);
        self.uncommon = self.uncommon.saturating_add(other.uncommon);
        self.rare = self.rare.saturating_add(other.rare);
        self.mythic = self.mythic.saturating_add(other.mythic);
    }
}

/// Resource counters at one point in the log.
///
/// The client adds fields over time, so everything is kept; only the
/// counters below have typed accessors.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventorySnapshot {
    fields: BTreeMap<String, serde_json::Value>,
}

impl InventorySnapshot {
    /// Raw field value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.fields.get(key)
    }

    /// Non-negative integer counter.
    #[must_use]
    pub fn counter(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(serde_json::Value::as_u64)
    }

    #[must_use]
    pub fn gold(&self) -> Option<u64> {
        self.counter("gold")
    }

    #[must_use]
    pub fn gems(&self) -> Option<u64> {
        self.counter("gems")
    }

    #[must_use]
    pub fn vault_progress(&self) -> Option<f64> {
        self.get("vaultProgress").and_then(serde_json::Value::as_f64)
    }

    /// Wildcards on hand. Missing or malformed counters read as zero.
    #[must_use]
    pub fn wildcards(&self) -> WildcardCounts {
        let read = |key: &str| {
            self.counter(key)
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(0)
        };
        WildcardCounts {
            common: read("wcCommon"),
            uncommon: read("wcUncommon"),
            rare: read("wcRare"),
            mythic: read("wcMythic"),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, serde_json::Value)> for InventorySnapshot {
    fn from_iter<T: IntoIterator<Item = (String, serde_json::Value)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// One booster pack opened.
///
/// Serialises as `{"wcc":…,"wcu":…,"wcr":…,"wcm":…,"cards":[ids…]}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoosterOpenEvent {
    #[serde(rename = "wcc")]
    pub common_wildcards: u32,
    #[serde(rename = "wcu")]
    pub uncommon_wildcards: u32,
    #[serde(rename = "wcr")]
    pub rare_wildcards: u32,
    #[serde(rename = "wcm")]
    pub mythic_wildcards: u32,
    #[serde(rename = "cards")]
    pub card_ids: PackCards,
}

impl BoosterOpenEvent {
    #[must_use]
    pub fn new(card_ids: impl IntoIterator<Item = CardId>) -> Self {
        Self {
            card_ids: card_ids.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Set the wildcard counts (builder pattern).
    #[must_use]
    pub fn with_wildcards(mut self, wildcards: WildcardCounts) -> Self {
        self.common_wildcards = wildcards.common;
        self.uncommon_wildcards = wildcards.uncommon;
        self.rare_wildcards = wildcards.rare;
        self.mythic_wildcards = wildcards.mythic;
        self
    }

    #[must_use]
    pub fn wildcards(&self) -> WildcardCounts {
        WildcardCounts {
            common: self.common_wildcards,
            uncommon: self.uncommon_wildcards,
            rare: self.rare_wildcards,
            mythic: self.mythic_wildcards,
        }
    }
}
