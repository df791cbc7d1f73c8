//! Booster history reports.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::text::card_line;
use crate::cards::{CardId, CardIndex, Rarity};
use crate::logfile::{BoosterOpenEvent, WildcardCounts};

/// JSON form of one opened booster, with cards rendered as text lines.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoosterContents {
    pub wcc: u32,
    pub wcu: u32,
    pub wcr: u32,
    pub wcm: u32,
    pub cards: Vec<String>,
}

impl BoosterContents {
    #[must_use]
    pub fn render(event: &BoosterOpenEvent, index: &CardIndex) -> Self {
        Self {
            wcc: event.common_wildcards,
            wcu: event.uncommon_wildcards,
            wcr: event.rare_wildcards,
            wcm: event.mythic_wildcards,
            cards: event
                .card_ids
                .iter()
                .map(|&id| card_line(1, id, index))
                .collect(),
        }
    }

    /// Card lines followed by the wildcard counts.
    #[must_use]
    pub fn text(&self) -> String {
        let mut text: String = self.cards.iter().map(|c| format!("{c}\n")).collect();
        text.push_str("\n\n\n");
        text.push_str(&wildcard_block(&WildcardCounts {
            common: self.wcc,
            uncommon: self.wcu,
            rare: self.wcr,
            mythic: self.wcm,
        }));
        text
    }
}

fn wildcard_block(counts: &WildcardCounts) -> String {
    Rarity::WILDCARD
        .iter()
        .map(|&r| format!("{} Wildcards: {}\n", capitalised(r), counts.get(r)))
        .collect()
}

fn capitalised(rarity: Rarity) -> &'static str {
    match rarity {
        Rarity::Token => "Token",
        Rarity::Basic => "Basic",
        Rarity::Common => "Common",
        Rarity::Uncommon => "Uncommon",
        Rarity::Rare => "Rare",
        Rarity::Mythic => "Mythic",
    }
}

/// Aggregate view of a booster history.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoosterReport {
    /// One entry per booster, in log order.
    pub boosters: Vec<BoosterContents>,
    /// Wildcards across all boosters.
    pub totals: WildcardCounts,
    /// Copies of each card opened (plus picked wildcards, once added).
    pub card_counts: BTreeMap<CardId, u32>,
}

impl BoosterReport {
    #[must_use]
    pub fn build(events: &[BoosterOpenEvent], index: &CardIndex) -> Self {
        let mut report = Self::default();
        for event in events {
            report.boosters.push(BoosterContents::render(event, index));
            report.totals += event.wildcards();
            for &id in &event.card_ids {
                report.add_card(id);
            }
        }
        report
    }

    /// Count one more copy of `id`.
    pub fn add_card(&mut self, id: CardId) {
        let count = self.card_counts.entry(id).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Per-booster text blocks.
    #[must_use]
    pub fn booster_texts(&self) -> Vec<String> {
        self.boosters.iter().map(BoosterContents::text).collect()
    }

    /// `"<count> <name> (<set>) <number>"` for every card, by card id.
    #[must_use]
    pub fn summary_text(&self, index: &CardIndex) -> String {
        self.card_counts
            .iter()
            .map(|(&id, &count)| format!("{}\n", card_line(count, id, index)))
            .collect()
    }

    /// Wildcard totals block.
    #[must_use]
    pub fn wildcard_text(&self) -> String {
        format!("\nTOTAL:\n{}", wildcard_block(&self.totals))
    }

    /// JSON array of `{wcc, wcu, wcr, wcm, cards}`.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.boosters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;

    fn index() -> CardIndex {
        vec![
            Card::new(CardId::new(1), "Opt", "M21", "59", Rarity::Common),
            Card::new(CardId::new(2), "Shock", "M21", "159", Rarity::Common),
        ]
        .into_iter()
        .collect()
    }

    fn events() -> Vec<BoosterOpenEvent> {
        vec![
            BoosterOpenEvent::new([CardId::new(1), CardId::new(2), CardId::new(1)]).with_wildcards(
                WildcardCounts {
                    common: 1,
                    ..WildcardCounts::default()
                },
            ),
            BoosterOpenEvent::new([CardId::new(3)]).with_wildcards(WildcardCounts {
                rare: 1,
                mythic: 1,
                ..WildcardCounts::default()
            }),
        ]
    }

    #[test]
    fn test_build_aggregates() {
        let report = BoosterReport::build(&events(), &index());

        assert_eq!(report.boosters.len(), 2);
        assert_eq!(report.card_counts[&CardId::new(1)], 2);
        assert_eq!(report.card_counts[&CardId::new(3)], 1);
        assert_eq!(
            report.totals,
            WildcardCounts {
                common: 1,
                uncommon: 0,
                rare: 1,
                mythic: 1,
            }
        );
    }

    #[test]
    fn test_contents_render_missing_cards() {
        let report = BoosterReport::build(&events(), &index());
        assert_eq!(report.boosters[1].cards, vec!["1 Unknown Card #3 (???) ?"]);
    }

    #[test]
    fn test_booster_text() {
        let report = BoosterReport::build(&events()[..1], &index());
        assert_eq!(
            report.booster_texts()[0],
            "1 Opt (M21) 59\n1 Shock (M21) 159\n1 Opt (M21) 59\n\n\n\n\
             Common Wildcards: 1\nUncommon Wildcards: 0\nRare Wildcards: 0\nMythic Wildcards: 0\n"
        );
    }

    #[test]
    fn test_summary_and_totals_text() {
        let report = BoosterReport::build(&events(), &index());
        assert_eq!(
            report.summary_text(&index()),
            "2 Opt (M21) 59\n1 Shock (M21) 159\n1 Unknown Card #3 (???) ?\n"
        );
        assert_eq!(
            report.wildcard_text(),
            "\nTOTAL:\nCommon Wildcards: 1\nUncommon Wildcards: 0\nRare Wildcards: 1\nMythic Wildcards: 1\n"
        );
    }

    #[test]
    fn test_json_fields() {
        let report = BoosterReport::build(&events()[1..], &index());
        assert_eq!(
            report.to_json().unwrap(),
            r#"[{"wcc":0,"wcu":0,"wcr":1,"wcm":1,"cards":["1 Unknown Card #3 (???) ?"]}]"#
        );
    }
}
