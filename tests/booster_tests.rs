//! Booster session and wildcard pick integration tests.

use std::sync::Arc;

use arena_assistant::logfile::find_boosters;
use arena_assistant::report::BoosterContents;
use arena_assistant::{
    pick_wildcards, BoosterOpenEvent, BoosterSession, Card, CardId, CardIndex, Rarity,
    RarityPools, WildcardCounts,
};

fn index() -> Arc<CardIndex> {
    let mut cards = Vec::new();
    for (set, base) in [("M21", 1000u64), ("ZNR", 2000)] {
        for i in 0..12 {
            let id = CardId::new(base + i);
            let name = format!("Common {i}");
            cards.push(Card::new(id, name, set, i.to_string(), Rarity::Common).primary());
        }
        for i in 0..6 {
            let id = CardId::new(base + 100 + i);
            let number = (100 + i).to_string();
            cards.push(Card::new(id, format!("Rare {i}"), set, number, Rarity::Rare).primary());
        }
        cards.push(
            Card::new(CardId::new(base + 200), "Mythic", set, "200", Rarity::Mythic).primary(),
        );
    }
    Arc::new(cards.into_iter().collect())
}

const LOG: &str = "\
[UnityCrossThreadLogger]6/10/2020 9:00:00 PM
<== PlayerInventory.CrackBoostersV3(11)
{\"id\": 11, \"payload\": {\"cardsOpened\": [{\"grpId\": 1000}, {\"grpId\": 1001}, {\"grpId\": 1100}], \"wcCommonDelta\": 2, \"wcRareDelta\": 1}}
[UnityCrossThreadLogger]6/10/2020 9:01:00 PM
<== PlayerInventory.CrackBoostersV3(12)
{\"id\": 12, \"payload\": {
  \"cardsOpened\": [{\"grpId\": 1002}, {\"grpId\": 424242}],
  \"wcMythicDelta\": 1
}}
";

// =============================================================================
// Booster History
// =============================================================================

#[test]
fn test_booster_list_json_round_trip() {
    let boosters = find_boosters(LOG.as_bytes()).unwrap();
    let json = serde_json::to_string(&boosters).unwrap();
    let back: Vec<BoosterOpenEvent> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, boosters);
}

#[test]
fn test_report_from_log() {
    let index = index();
    let mut session = BoosterSession::new(Arc::clone(&index), "M21");
    assert_eq!(session.load_log(LOG.as_bytes()).unwrap(), 2);

    let report = session.report();
    assert_eq!(
        report.totals,
        WildcardCounts {
            common: 2,
            uncommon: 0,
            rare: 1,
            mythic: 1,
        }
    );
    assert_eq!(report.card_counts.values().sum::<u32>(), 5);

    let json: Vec<BoosterContents> = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json[1].wcm, 1);
    assert_eq!(json[1].cards[1], "1 Unknown Card #424242 (???) ?");
    assert_eq!(json[0].cards[2], "1 Rare 0 (M21) 100");
}

// =============================================================================
// Wildcard Picks
// =============================================================================

#[test]
fn test_same_history_same_picks() {
    let index = index();

    let mut first = BoosterSession::new(Arc::clone(&index), "M21");
    first.load_log(LOG.as_bytes()).unwrap();
    let (report_a, picks_a) = first.report_with_picks();

    let mut second = BoosterSession::new(Arc::clone(&index), "M21");
    second.load_log(LOG.as_bytes()).unwrap();
    let (report_b, picks_b) = second.report_with_picks();

    assert_eq!(picks_a, picks_b);
    assert_eq!(report_a, report_b);
    assert_eq!(picks_a.picks.len(), 4);
    assert_eq!(
        report_a.card_counts.values().sum::<u32>(),
        5 + picks_a.picks.len() as u32
    );
}

#[test]
fn test_explicit_seed_is_used() {
    let index = index();
    let mut session = BoosterSession::new(Arc::clone(&index), "M21").with_seed(1234);
    session.load_log(LOG.as_bytes()).unwrap();
    let (_, picks) = session.report_with_picks();

    let pools = RarityPools::build(&index, "M21");
    let expected = pick_wildcards(session.report().totals, &pools, 1234);
    assert_eq!(picks, expected);
}

#[test]
fn test_picks_follow_active_set() {
    let index = index();
    let mut session = BoosterSession::new(Arc::clone(&index), "M21").with_seed(5);
    session.load_log(LOG.as_bytes()).unwrap();

    let (_, m21) = session.report_with_picks();
    assert!(m21.picks.iter().all(|p| (1000..2000).contains(&p.card.raw())));

    session.set_active_set("ZNR");
    let (_, znr) = session.report_with_picks();
    assert!(znr.picks.iter().all(|p| (2000..3000).contains(&p.card.raw())));
    assert_eq!(znr.of_rarity(Rarity::Mythic).collect::<Vec<_>>(), vec![CardId::new(2200)]);
}

#[test]
fn test_sessions_do_not_share_state() {
    let index = index();
    let mut a = BoosterSession::new(Arc::clone(&index), "M21");
    let b = BoosterSession::new(Arc::clone(&index), "ZNR");

    a.load_log(LOG.as_bytes()).unwrap();
    assert_eq!(a.boosters().len(), 2);
    assert!(b.boosters().is_empty());
    assert_eq!(b.active_set(), "ZNR");
}

#[test]
fn test_unknown_set_leaves_wildcards_unfilled() {
    let mut session = BoosterSession::new(index(), "XYZ").with_seed(1);
    session.load_log(LOG.as_bytes()).unwrap();
    let (report, picks) = session.report_with_picks();

    assert!(picks.picks.is_empty());
    assert_eq!(picks.unfilled, report.totals);
}
