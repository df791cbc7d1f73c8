//! Rarity-bucketed candidate pools for wildcard picks.

use rustc_hash::FxHashMap;

use super::definition::{CardId, Rarity};
use super::index::CardIndex;

/// Primary printings of one set, grouped by wildcard rarity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RarityPools {
    set: String,
    pools: FxHashMap<Rarity, Vec<CardId>>,
}

impl RarityPools {
    /// Bucket the primary printings of `set`, preserving index order.
    #[must_use]
    pub fn build(index: &CardIndex, set: &str) -> Self {
        let mut pools = FxHashMap::default();
        for rarity in Rarity::WILDCARD {
            let mut ids = Vec::new();
            index.for_each_primary_in_set(set, rarity, |card| ids.push(card.id));
            pools.insert(rarity, ids);
        }
        Self {
            set: set.to_string(),
            pools,
        }
    }

    /// The set these pools were built for.
    #[must_use]
    pub fn set(&self) -> &str {
        &self.set
    }

    /// Candidates at `rarity`; empty when the set has none.
    #[must_use]
    pub fn pool(&self, rarity: Rarity) -> &[CardId] {
        self.pools.get(&rarity).map_or(&[], Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;

    #[test]
    fn test_build_groups_primary_cards() {
        let index: CardIndex = vec![
            Card::new(CardId::new(1), "C1", "M21", "1", Rarity::Common).primary(),
            Card::new(CardId::new(2), "C2", "M21", "2", Rarity::Common),
            Card::new(CardId::new(3), "R1", "M21", "3", Rarity::Rare).primary(),
            Card::new(CardId::new(4), "R2", "ZNR", "4", Rarity::Rare).primary(),
            Card::new(CardId::new(5), "L", "M21", "5", Rarity::Basic).primary(),
        ]
        .into_iter()
        .collect();

        let pools = RarityPools::build(&index, "M21");
        assert_eq!(pools.set(), "M21");
        assert_eq!(pools.pool(Rarity::Common), &[CardId::new(1)]);
        assert_eq!(pools.pool(Rarity::Rare), &[CardId::new(3)]);
        assert!(pools.pool(Rarity::Mythic).is_empty());
        assert!(pools.pool(Rarity::Basic).is_empty());
    }
}
