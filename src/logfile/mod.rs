//! Client log extraction: scanning, decoding, snapshot selection.
//!
//! ## Pipeline
//!
//! 1. `LogScanner` makes one forward pass and yields `Occurrence`s
//!    (event kind + raw payload) in stream order.
//! 2. `decode` routes each payload to the decoder for its `EventKind`,
//!    producing a `LogEvent`.
//! 3. `LogExtract` accumulates decoded values per kind and applies the
//!    selection policy (`select_latest`).

pub mod decode;
pub mod extract;
pub mod marker;
pub mod scanner;
pub mod snapshot;

pub use decode::{decode, decode_booster, decode_collection, decode_inventory, LogEvent};
pub use extract::{find_boosters, find_collections, find_inventories, select_latest, LogExtract};
pub use marker::{EventKind, PayloadPolicy};
pub use scanner::{LogScanner, Occurrence};
pub use snapshot::{
    BoosterOpenEvent, CollectionSnapshot, InventorySnapshot, PackCards, WildcardCounts,
};
