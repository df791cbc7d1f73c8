//! Card metadata: definitions, the read-only index, and its loader.
//!
//! ## Key Types
//!
//! - `CardId`: Client card identifier (`grpid`)
//! - `Rarity`: Client rarity code
//! - `Card`: Immutable metadata for one printing
//! - `CardIndexBuilder`: Staging area while loading data files
//! - `CardIndex`: Read-only lookup, safe to share across threads
//! - `RarityPools`: Primary printings of one set bucketed by rarity

pub mod definition;
pub mod index;
pub mod loader;
pub mod pools;

pub use definition::{Card, CardId, Rarity};
pub use index::{CardIndex, CardIndexBuilder};
pub use pools::RarityPools;
