//! Reproducible wildcard picks.
//!
//! Each wildcard earned is spent on a card of its rarity drawn uniformly,
//! with replacement, from the active set's primary printings. Duplicate
//! picks are allowed, matching how a player may redeem several wildcards
//! on the same card.
//!
//! Every rarity draws from its own stream (`PickRng::for_context` keyed by
//! the rarity name), so the same seed always yields the same picks and the
//! number of commons drawn never changes which rares come out.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cards::{CardId, CardIndex, Rarity, RarityPools};
use crate::core::PickRng;
use crate::logfile::WildcardCounts;
use crate::report::card_line;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WildcardPick {
    pub rarity: Rarity,
    pub card: CardId,
}

/// Outcome of one picking round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WildcardPicks {
    /// Seed the round was drawn from.
    pub seed: u64,
    /// Picks in rarity order (common first), then draw order.
    pub picks: Vec<WildcardPick>,
    /// Wildcards left unspent because the pool for their rarity was empty.
    pub unfilled: WildcardCounts,
}

impl WildcardPicks {
    /// Picked cards of one rarity, in draw order.
    pub fn of_rarity(&self, rarity: Rarity) -> impl Iterator<Item = CardId> + '_ {
        self.picks
            .iter()
            .filter(move |p| p.rarity == rarity)
            .map(|p| p.card)
    }

    /// One `"1 <name> (<set>) <number>"` line per pick.
    #[must_use]
    pub fn text(&self, index: &CardIndex) -> String {
        self.picks
            .iter()
            .map(|p| format!("{}\n", card_line(1, p.card, index)))
            .collect()
    }
}

/// Spend `wildcards` on cards from `pools`, deterministically from `seed`.
#[must_use]
pub fn pick_wildcards(wildcards: WildcardCounts, pools: &RarityPools, seed: u64) -> WildcardPicks {
    let rng = PickRng::new(seed);
    let mut result = WildcardPicks {
        seed,
        ..WildcardPicks::default()
    };

    for rarity in Rarity::WILDCARD {
        let wanted = wildcards.get(rarity);
        if wanted == 0 {
            continue;
        }
        let pool = pools.pool(rarity);
        if pool.is_empty() {
            warn!(%rarity, set = pools.set(), wanted, "no primary cards to pick from");
            result.unfilled.set(rarity, wanted);
            continue;
        }

        let mut stream = rng.for_context(rarity.name());
        for _ in 0..wanted {
            if let Some(&card) = stream.choose(pool) {
                debug!(%rarity, %card, seed, "picked wildcard");
                result.picks.push(WildcardPick { rarity, card });
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;

    fn pools() -> RarityPools {
        let mut cards = Vec::new();
        for i in 0..20 {
            cards.push(Card::new(CardId::new(100 + i), "C", "M21", "1", Rarity::Common).primary());
        }
        for i in 0..10 {
            cards.push(Card::new(CardId::new(400 + i), "R", "M21", "1", Rarity::Rare).primary());
        }
        let index: CardIndex = cards.into_iter().collect();
        RarityPools::build(&index, "M21")
    }

    fn wildcards(common: u32, rare: u32, mythic: u32) -> WildcardCounts {
        WildcardCounts {
            common,
            uncommon: 0,
            rare,
            mythic,
        }
    }

    #[test]
    fn test_same_seed_same_picks() {
        let pools = pools();
        let a = pick_wildcards(wildcards(5, 2, 0), &pools, 99);
        let b = pick_wildcards(wildcards(5, 2, 0), &pools, 99);
        assert_eq!(a, b);
        assert_eq!(a.picks.len(), 7);
        assert_eq!(a.seed, 99);
    }

    #[test]
    fn test_picks_come_from_the_right_pool() {
        let pools = pools();
        let result = pick_wildcards(wildcards(8, 3, 0), &pools, 1);

        assert!(result
            .of_rarity(Rarity::Common)
            .all(|id| pools.pool(Rarity::Common).contains(&id)));
        assert_eq!(result.of_rarity(Rarity::Rare).count(), 3);
        assert!(result
            .of_rarity(Rarity::Rare)
            .all(|id| pools.pool(Rarity::Rare).contains(&id)));
    }

    #[test]
    fn test_rare_picks_independent_of_common_count() {
        let pools = pools();
        let few = pick_wildcards(wildcards(1, 3, 0), &pools, 7);
        let many = pick_wildcards(wildcards(12, 3, 0), &pools, 7);

        let rares_few: Vec<_> = few.of_rarity(Rarity::Rare).collect();
        let rares_many: Vec<_> = many.of_rarity(Rarity::Rare).collect();
        assert_eq!(rares_few, rares_many);
    }

    #[test]
    fn test_empty_pool_is_unfilled() {
        let result = pick_wildcards(wildcards(0, 1, 2), &pools(), 3);
        assert_eq!(result.of_rarity(Rarity::Mythic).count(), 0);
        assert_eq!(result.unfilled.mythic, 2);
        assert_eq!(result.unfilled.rare, 0);
        assert_eq!(result.picks.len(), 1);
    }

    #[test]
    fn test_no_wildcards_no_picks() {
        let result = pick_wildcards(WildcardCounts::default(), &pools(), 3);
        assert!(result.picks.is_empty());
        assert_eq!(result.unfilled, WildcardCounts::default());
    }
}
