//! Rendering extracted data for people and for JSON consumers.

pub mod boosters;
pub mod text;

pub use boosters::{BoosterContents, BoosterReport};
pub use text::{card_line, collection_lines, inventory_lines, CardRef};
