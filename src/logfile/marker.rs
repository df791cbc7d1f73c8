//! Event markers in the client log.
//!
//! The client announces each response it logs with a line such as
//!
//! ```text
//! [UnityCrossThreadLogger]<== PlayerInventory.GetPlayerCardsV3(12)
//! ```
//!
//! followed by the JSON response. The method name decides the `EventKind`
//! and how the scanner finds the end of the payload.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Kind of event the scanner recognises.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Full card collection dump.
    Collection,
    /// Resource counters (gold, gems, wildcards).
    Inventory,
    /// One booster pack opened.
    BoosterOpen,
}

/// How the scanner decides where a payload ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayloadPolicy {
    /// A JSON object starting on the marker line or the next non-blank
    /// line, ending at its matching closing brace.
    BalancedJson,
    /// Everything up to the next boundary line or end of stream.
    UntilNextMarker,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [
        EventKind::Collection,
        EventKind::Inventory,
        EventKind::BoosterOpen,
    ];

    /// Client method name announcing this event.
    #[must_use]
    pub const fn method(self) -> &'static str {
        match self {
            EventKind::Collection => "GetPlayerCardsV3",
            EventKind::Inventory => "GetPlayerInventory",
            EventKind::BoosterOpen => "CrackBoostersV3",
        }
    }

    #[must_use]
    pub const fn policy(self) -> PayloadPolicy {
        match self {
            EventKind::Collection | EventKind::BoosterOpen => PayloadPolicy::BalancedJson,
            EventKind::Inventory => PayloadPolicy::UntilNextMarker,
        }
    }

    #[must_use]
    pub fn from_method(method: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.method() == method)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EventKind::Collection => "collection",
            EventKind::Inventory => "inventory",
            EventKind::BoosterOpen => "booster open",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A recognised marker on one line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkerMatch {
    pub kind: EventKind,
    /// Byte offset in the line just past the marker text.
    pub end: usize,
}

fn marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // <== PlayerInventory.GetPlayerCardsV3(12)
        Regex::new(
            r"<==\s*PlayerInventory\.(GetPlayerCardsV3|GetPlayerInventory|CrackBoostersV3)\b(?:\(\d*\))?",
        )
        .expect("marker pattern is valid")
    })
}

fn header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // [UnityCrossThreadLogger]6/10/2020 9:00:00 PM
        Regex::new(r"^\s*\[(?:UnityCrossThreadLogger|Client GRE)\]")
            .expect("header pattern is valid")
    })
}

/// Recognise a marker on `line`.
#[must_use]
pub fn recognize(line: &str) -> Option<MarkerMatch> {
    let caps = marker_re().captures(line)?;
    let kind = EventKind::from_method(caps.get(1)?.as_str())?;
    Some(MarkerMatch {
        kind,
        end: caps.get(0)?.end(),
    })
}

/// True for lines that end an until-next-marker payload: markers and
/// client log headers.
#[must_use]
pub fn is_boundary(line: &str) -> bool {
    header_re().is_match(line) || marker_re().is_match(line)
}
