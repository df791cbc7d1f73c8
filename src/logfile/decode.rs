//! Per-kind payload decoders.
//!
//! Every payload is a JSON object envelope `{"id": …, "payload": <body>}`.
//! Decoders are pure: they never panic, ignore unknown fields, and report a
//! `DecodeError` for a wrong shape so the caller can skip that occurrence.

use serde::Deserialize;

use super::marker::EventKind;
use super::snapshot::{
    BoosterOpenEvent, CollectionSnapshot, InventorySnapshot, WildcardCounts,
};
use crate::cards::CardId;
use crate::core::DecodeError;

/// A decoded occurrence, tagged by kind.
#[derive(Clone, Debug, PartialEq)]
pub enum LogEvent {
    Collection(CollectionSnapshot),
    Inventory(InventorySnapshot),
    BoosterOpen(BoosterOpenEvent),
}

impl LogEvent {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            LogEvent::Collection(_) => EventKind::Collection,
            LogEvent::Inventory(_) => EventKind::Inventory,
            LogEvent::BoosterOpen(_) => EventKind::BoosterOpen,
        }
    }
}

/// Decode a payload with the decoder for `kind`.
pub fn decode(kind: EventKind, payload: &[u8]) -> Result<LogEvent, DecodeError> {
    match kind {
        EventKind::Collection => decode_collection(payload).map(LogEvent::Collection),
        EventKind::Inventory => decode_inventory(payload).map(LogEvent::Inventory),
        EventKind::BoosterOpen => decode_booster(payload).map(LogEvent::BoosterOpen),
    }
}

/// First JSON value in the payload. Until-next-marker regions may carry
/// engine output after the response, which is ignored.
fn leading_value(kind: EventKind, payload: &[u8]) -> Result<serde_json::Value, DecodeError> {
    let value = serde_json::Deserializer::from_slice(payload)
        .into_iter::<serde_json::Value>()
        .next()
        .ok_or_else(|| DecodeError::shape(kind, "empty payload"))??;
    Ok(value)
}

/// Unwrap the envelope and return its object body.
fn body(
    kind: EventKind,
    payload: &[u8],
) -> Result<serde_json::Map<String, serde_json::Value>, DecodeError> {
    let serde_json::Value::Object(mut envelope) = leading_value(kind, payload)?
    else {
        return Err(DecodeError::shape(kind, "envelope is not a JSON object"));
    };
    match envelope.remove("payload") {
        Some(serde_json::Value::Object(body)) => Ok(body),
        None | Some(serde_json::Value::Null) => Err(DecodeError::shape(kind, "missing payload")),
        Some(_) => Err(DecodeError::shape(kind, "payload is not a JSON object")),
    }
}

pub fn decode_collection(payload: &[u8]) -> Result<CollectionSnapshot, DecodeError> {
    let kind = EventKind::Collection;
    body(kind, payload)?
        .into_iter()
        .map(|(key, value)| -> Result<(CardId, u32), DecodeError> {
            let id = key
                .parse::<u64>()
                .map_err(|_| DecodeError::shape(kind, format!("card id {key:?} is not numeric")))?;
            let count = value
                .as_u64()
                .and_then(|c| u32::try_from(c).ok())
                .ok_or_else(|| {
                    DecodeError::shape(kind, format!("count for card {id} is not a valid count"))
                })?;
            Ok((CardId::new(id), count))
        })
        .collect()
}

pub fn decode_inventory(payload: &[u8]) -> Result<InventorySnapshot, DecodeError> {
    Ok(body(EventKind::Inventory, payload)?.into_iter().collect())
}

#[derive(Debug, Deserialize)]
struct RawBooster {
    #[serde(rename = "cardsOpened")]
    cards_opened: Vec<RawOpenedCard>,
    #[serde(rename = "wcCommonDelta", default)]
    wc_common: u32,
    #[serde(rename = "wcUncommonDelta", default)]
    wc_uncommon: u32,
    #[serde(rename = "wcRareDelta", default)]
    wc_rare: u32,
    #[serde(rename = "wcMythicDelta", default)]
    wc_mythic: u32,
}

#[derive(Debug, Deserialize)]
struct RawOpenedCard {
    #[serde(rename = "grpId")]
    grp_id: u64,
}

pub fn decode_booster(payload: &[u8]) -> Result<BoosterOpenEvent, DecodeError> {
    let kind = EventKind::BoosterOpen;
    let body = serde_json::Value::Object(body(kind, payload)?);
    let raw = RawBooster::deserialize(body).map_err(|e| DecodeError::shape(kind, e.to_string()))?;

    Ok(
        BoosterOpenEvent::new(raw.cards_opened.into_iter().map(|c| CardId::new(c.grp_id)))
            .with_wildcards(WildcardCounts {
                common: raw.wc_common,
                uncommon: raw.wc_uncommon,
                rare: raw.wc_rare,
                mythic: raw.wc_mythic,
            }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection() {
        let snapshot = decode_collection(
            br#"{"jsonrpc": "2.0", "id": 12, "payload": {"67890": 4, "12345": 1}}"#,
        )
        .unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.count(CardId::new(67890)), 4);
    }

    #[test]
    fn test_trailing_engine_output_ignored() {
        let payload = b"{\"id\": 5, \"payload\": {\"gold\": 350, \"wcRare\": 2}}\n\
            (Filename: C:\\buildslave\\Debug.bindings.h Line: 35)\n\n";
        let inventory = decode_inventory(payload).unwrap();
        assert_eq!(inventory.gold(), Some(350));
        assert_eq!(inventory.wildcards().rare, 2);
    }

    #[test]
    fn test_empty_payload_is_shape_error() {
        let err = decode_inventory(b"  \n").unwrap_err();
        assert!(matches!(err, DecodeError::Shape { .. }));
    }

    #[test]
    fn test_collection_rejects_bad_entries() {
        let payloads: [&[u8]; 5] = [
            br#"{"payload": {"abc": 1}}"#,
            br#"{"payload": {"1": -2}}"#,
            br#"{"payload": {"1": 1.5}}"#,
            br#"{"payload": {"1": "4"}}"#,
            br#"{"payload": {"1": 99999999999}}"#,
        ];
        for payload in payloads {
            let err = decode_collection(payload).unwrap_err();
            assert!(matches!(err, DecodeError::Shape { kind: EventKind::Collection, .. }));
        }
    }

    #[test]
    fn test_envelope_errors() {
        assert!(matches!(decode_collection(b"{\"payload\": {"), Err(DecodeError::Json(_))));
        assert!(matches!(decode_collection(b"[1, 2]"), Err(DecodeError::Shape { .. })));
        assert!(matches!(
            decode_collection(br#"{"id": 3, "error": {"code": 500}}"#),
            Err(DecodeError::Shape { .. })
        ));
        assert!(matches!(
            decode_collection(br#"{"payload": null}"#),
            Err(DecodeError::Shape { .. })
        ));
        assert!(matches!(
            decode_inventory(br#"{"payload": [1]}"#),
            Err(DecodeError::Shape { .. })
        ));
    }

    #[test]
    fn test_inventory_keeps_unknown_fields() {
        let inventory = decode_inventory(
            br#"{"payload": {"gold": 250, "wcRare": 2, "newThing": {"nested": true}}}"#,
        )
        .unwrap();
        assert_eq!(inventory.gold(), Some(250));
        assert_eq!(inventory.wildcards().rare, 2);
        assert!(inventory.get("newThing").is_some());
    }

    #[test]
    fn test_booster() {
        let event = decode_booster(
            br#"{"payload": {
                "cardsOpened": [
                    {"grpId": 71001, "goldAwarded": 0, "set": "M21"},
                    {"grpId": 71002},
                    {"grpId": 71001}
                ],
                "wcUncommonDelta": 1,
                "totalVaultProgress": 3
            }}"#,
        )
        .unwrap();

        let ids: Vec<_> = event.card_ids.iter().map(|c| c.raw()).collect();
        assert_eq!(ids, vec![71001, 71002, 71001]);
        assert_eq!(event.uncommon_wildcards, 1);
        assert_eq!(event.common_wildcards, 0);
    }

    #[test]
    fn test_booster_rejects_missing_cards() {
        let err = decode_booster(br#"{"payload": {"wcRareDelta": 1}}"#).unwrap_err();
        assert!(matches!(err, DecodeError::Shape { kind: EventKind::BoosterOpen, .. }));

        let err = decode_booster(br#"{"payload": {"cardsOpened": [{"set": "M21"}]}}"#).unwrap_err();
        assert!(matches!(err, DecodeError::Shape { .. }));
    }

    #[test]
    fn test_decode_dispatches_by_kind() {
        let payload = br#"{"payload": {"cardsOpened": []}}"#;
        let event = decode(EventKind::BoosterOpen, payload).unwrap();
        assert_eq!(event.kind(), EventKind::BoosterOpen);

        let event = decode(EventKind::Inventory, payload).unwrap();
        assert_eq!(event.kind(), EventKind::Inventory);
    }
}
