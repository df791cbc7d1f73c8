//! Scan, decode and select.
//!
//! `LogExtract` runs the scanner once, routes each occurrence to its
//! decoder and keeps the decoded values in per-kind lists in log order.
//! Malformed occurrences are logged and counted, never fatal.
//!
//! Selection policy: collections and inventories are restatements of
//! evolving state, so the last one in the log wins. Booster openings are
//! distinct historical events and are returned in full.

use std::io::Read;

use tracing::{info, warn};

use super::decode::{decode, LogEvent};
use super::marker::EventKind;
use super::scanner::{LogScanner, Occurrence};
use super::snapshot::{BoosterOpenEvent, CollectionSnapshot, InventorySnapshot};
use crate::core::ScanError;

/// The snapshot representing current truth: the last one in log order.
#[must_use]
pub fn select_latest<T>(snapshots: &[T]) -> Option<&T> {
    snapshots.last()
}

/// Everything decoded from one log.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LogExtract {
    pub collections: Vec<CollectionSnapshot>,
    pub inventories: Vec<InventorySnapshot>,
    pub boosters: Vec<BoosterOpenEvent>,
    /// Occurrences whose payload failed to decode.
    pub skipped: usize,
}

impl LogExtract {
    /// Scan and decode a whole log. Fails only if the stream is unreadable.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ScanError> {
        let occurrences = LogScanner::new().scan(reader)?;
        Ok(Self::from_occurrences(occurrences))
    }

    /// Decode already scanned occurrences.
    #[must_use]
    pub fn from_occurrences(occurrences: impl IntoIterator<Item = Occurrence>) -> Self {
        let mut extract = Self::default();
        for occurrence in occurrences {
            match decode(occurrence.kind, &occurrence.payload) {
                Ok(event) => extract.push(event),
                Err(err) => {
                    warn!(
                        kind = %occurrence.kind,
                        line = occurrence.line,
                        error = %err,
                        "skipping malformed payload"
                    );
                    extract.skipped += 1;
                }
            }
        }
        info!(
            collections = extract.collections.len(),
            inventories = extract.inventories.len(),
            boosters = extract.boosters.len(),
            skipped = extract.skipped,
            "log decoded"
        );
        extract
    }

    fn push(&mut self, event: LogEvent) {
        match event {
            LogEvent::Collection(c) => self.collections.push(c),
            LogEvent::Inventory(i) => self.inventories.push(i),
            LogEvent::BoosterOpen(b) => self.boosters.push(b),
        }
    }

    /// Number of decoded values of `kind`.
    #[must_use]
    pub fn count(&self, kind: EventKind) -> usize {
        match kind {
            EventKind::Collection => self.collections.len(),
            EventKind::Inventory => self.inventories.len(),
            EventKind::BoosterOpen => self.boosters.len(),
        }
    }

    /// Current collection.
    pub fn latest_collection(&self) -> Result<&CollectionSnapshot, ScanError> {
        select_latest(&self.collections).ok_or(ScanError::NoOccurrence(EventKind::Collection))
    }

    /// Current inventory.
    pub fn latest_inventory(&self) -> Result<&InventorySnapshot, ScanError> {
        select_latest(&self.inventories).ok_or(ScanError::NoOccurrence(EventKind::Inventory))
    }

    /// Every booster opened, in log order. Empty if none were found.
    #[must_use]
    pub fn boosters(&self) -> &[BoosterOpenEvent] {
        &self.boosters
    }
}

fn require<T>(found: Vec<T>, kind: EventKind) -> Result<Vec<T>, ScanError> {
    if found.is_empty() {
        return Err(ScanError::NoOccurrence(kind));
    }
    Ok(found)
}

/// Every collection snapshot in the log, oldest first.
pub fn find_collections<R: Read>(reader: R) -> Result<Vec<CollectionSnapshot>, ScanError> {
    let extract = LogExtract::from_reader(reader)?;
    require(extract.collections, EventKind::Collection)
}

/// Every inventory snapshot in the log, oldest first.
pub fn find_inventories<R: Read>(reader: R) -> Result<Vec<InventorySnapshot>, ScanError> {
    let extract = LogExtract::from_reader(reader)?;
    require(extract.inventories, EventKind::Inventory)
}

/// Every booster opened, in log order.
pub fn find_boosters<R: Read>(reader: R) -> Result<Vec<BoosterOpenEvent>, ScanError> {
    let extract = LogExtract::from_reader(reader)?;
    require(extract.boosters, EventKind::BoosterOpen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;

    const LOG: &str = r#"[UnityCrossThreadLogger]6/10/2020 9:00:00 PM
<== PlayerInventory.GetPlayerCardsV3(1)
{"payload": {"100": 1}}
<== PlayerInventory.GetPlayerInventory(2)
{"payload": {"gold": 100}}
[UnityCrossThreadLogger]6/10/2020 9:01:00 PM
<== PlayerInventory.CrackBoostersV3(3) {"payload": {"cardsOpened": [{"grpId": 100}], "wcRareDelta": 1}}
<== PlayerInventory.GetPlayerCardsV3(4)
{"payload": {"100": 2, "200": 1}}
<== PlayerInventory.GetPlayerInventory(5)
{"payload": {"gold": 50}}
"#;

    #[test]
    fn test_select_latest() {
        assert_eq!(select_latest(&[1, 2, 3]), Some(&3));
        assert_eq!(select_latest::<i32>(&[]), None);
    }

    #[test]
    fn test_extract_all_kinds() {
        let extract = LogExtract::from_reader(LOG.as_bytes()).unwrap();

        assert_eq!(extract.count(EventKind::Collection), 2);
        assert_eq!(extract.count(EventKind::Inventory), 2);
        assert_eq!(extract.count(EventKind::BoosterOpen), 1);
        assert_eq!(extract.skipped, 0);

        let collection = extract.latest_collection().unwrap();
        assert_eq!(collection.count(CardId::new(100)), 2);
        assert_eq!(collection.count(CardId::new(200)), 1);

        assert_eq!(extract.latest_inventory().unwrap().gold(), Some(50));
        assert_eq!(extract.boosters()[0].rare_wildcards, 1);
    }

    #[test]
    fn test_malformed_payload_counted() {
        let log = "<== PlayerInventory.GetPlayerCardsV3(1) {\"payload\": {\"x\": 1}}\n<== PlayerInventory.GetPlayerCardsV3(2) {\"payload\": {\"1\": 1}}\n";
        let extract = LogExtract::from_reader(log.as_bytes()).unwrap();
        assert_eq!(extract.collections.len(), 1);
        assert_eq!(extract.skipped, 1);
    }

    #[test]
    fn test_missing_kinds() {
        let extract = LogExtract::from_reader("nothing".as_bytes()).unwrap();
        assert!(extract.latest_collection().unwrap_err().is_no_occurrence());
        assert!(extract.latest_inventory().unwrap_err().is_no_occurrence());
        assert!(extract.boosters().is_empty());

        assert!(matches!(
            find_boosters("nothing".as_bytes()),
            Err(ScanError::NoOccurrence(EventKind::BoosterOpen))
        ));
    }

    #[test]
    fn test_find_functions() {
        assert_eq!(find_collections(LOG.as_bytes()).unwrap().len(), 2);
        assert_eq!(find_inventories(LOG.as_bytes()).unwrap().len(), 2);
        assert_eq!(find_boosters(LOG.as_bytes()).unwrap().len(), 1);
    }
}
