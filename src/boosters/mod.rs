//! Booster history and wildcard picks.
//!
//! - `BoosterSession`: one request's boosters, active set and seed
//! - `pick_wildcards`: deterministic spend of earned wildcards

pub mod session;
pub mod wildcards;

pub use session::BoosterSession;
pub use wildcards::{pick_wildcards, WildcardPick, WildcardPicks};
