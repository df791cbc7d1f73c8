//! Per-request booster state.
//!
//! A `BoosterSession` owns everything one booster-tracking request works
//! with: the shared read-only card index, the active set, the boosters
//! extracted from the uploaded log, an optional explicit seed and the
//! cached rarity pools. Nothing is process-global, so concurrent sessions
//! cannot see each other's data.

use std::io::Read;
use std::sync::Arc;

use tracing::info;

use super::wildcards::{pick_wildcards, WildcardPicks};
use crate::cards::{CardIndex, RarityPools};
use crate::core::{seed_from_ids, ScanError};
use crate::logfile::{find_boosters, BoosterOpenEvent};
use crate::report::BoosterReport;

#[derive(Clone, Debug)]
pub struct BoosterSession {
    index: Arc<CardIndex>,
    set: String,
    seed: Option<u64>,
    boosters: Vec<BoosterOpenEvent>,
    pools: Option<RarityPools>,
}

impl BoosterSession {
    #[must_use]
    pub fn new(index: Arc<CardIndex>, set: impl Into<String>) -> Self {
        Self {
            index,
            set: set.into(),
            seed: None,
            boosters: Vec::new(),
            pools: None,
        }
    }

    /// Use an explicit pick seed instead of deriving one (builder pattern).
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn index(&self) -> &CardIndex {
        &self.index
    }

    /// Replace the session's boosters with those found in `reader`.
    ///
    /// Returns the number of boosters found. A log without any booster is
    /// `ScanError::NoOccurrence` and leaves the session unchanged.
    pub fn load_log<R: Read>(&mut self, reader: R) -> Result<usize, ScanError> {
        let boosters = find_boosters(reader)?;
        info!(boosters = boosters.len(), "booster history loaded");
        self.boosters = boosters;
        Ok(self.boosters.len())
    }

    pub fn set_boosters(&mut self, boosters: Vec<BoosterOpenEvent>) {
        self.boosters = boosters;
    }

    #[must_use]
    pub fn boosters(&self) -> &[BoosterOpenEvent] {
        &self.boosters
    }

    #[must_use]
    pub fn active_set(&self) -> &str {
        &self.set
    }

    /// Change the set wildcards are picked from. Drops cached pools when
    /// the set actually changes.
    pub fn set_active_set(&mut self, set: impl Into<String>) {
        let set = set.into();
        if set != self.set {
            self.set = set;
            self.pools = None;
        }
    }

    /// Rarity pools for the active set, built on first use.
    pub fn pools(&mut self) -> &RarityPools {
        let (index, set) = (&self.index, &self.set);
        self.pools.get_or_insert_with(|| RarityPools::build(index, set))
    }

    /// Explicit seed, or one derived from every card id in the history.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            seed_from_ids(
                self.boosters
                    .iter()
                    .flat_map(|b| b.card_ids.iter().map(|id| id.raw())),
            )
        })
    }

    #[must_use]
    pub fn report(&self) -> BoosterReport {
        BoosterReport::build(&self.boosters, &self.index)
    }

    /// Report with every earned wildcard spent, plus the picks themselves.
    pub fn report_with_picks(&mut self) -> (BoosterReport, WildcardPicks) {
        let mut report = self.report();
        let seed = self.seed();
        let picks = pick_wildcards(report.totals, self.pools(), seed);
        for pick in &picks.picks {
            report.add_card(pick.card);
        }
        (report, picks)
    }
}
