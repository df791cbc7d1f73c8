//! # arena-assistant
//!
//! Extracts a player's card collection, inventory and booster history from
//! the game client's log file and resolves card ids against the client's
//! card data files.
//!
//! ## Design Principles
//!
//! 1. **One Forward Pass**: The log is read once, line by line. Payloads are
//!    captured by balanced braces or up to the next marker, depending on the
//!    event kind.
//!
//! 2. **Last One Wins**: The most recent snapshot of each kind describes the
//!    current state. Earlier ones are kept only for history.
//!
//! 3. **Tolerant Input**: Garbage lines, truncated payloads and unknown card
//!    ids never abort an extraction. They are skipped or rendered as
//!    placeholders.
//!
//! ## Modules
//!
//! - `core`: Errors, configuration, deterministic RNG
//! - `cards`: Card metadata, the read-only index and its loader
//! - `logfile`: Marker recognition, scanning, decoding, selection
//! - `report`: Text and JSON rendering
//! - `boosters`: Booster sessions and wildcard picks

pub mod boosters;
pub mod cards;
pub mod core;
pub mod logfile;
pub mod report;

// Re-export commonly used types
pub use crate::core::{
    seed_from_ids, AssistantConfig, ConfigError, DecodeError, IndexBuildError, PickRng, ScanError,
};

pub use crate::cards::{Card, CardId, CardIndex, CardIndexBuilder, Rarity, RarityPools};

pub use crate::logfile::{
    BoosterOpenEvent, CollectionSnapshot, EventKind, InventorySnapshot, LogEvent, LogExtract,
    LogScanner, Occurrence, WildcardCounts,
};

pub use crate::report::{BoosterReport, CardRef};

pub use crate::boosters::{pick_wildcards, BoosterSession, WildcardPicks};
