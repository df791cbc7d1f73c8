//! Core types shared by every subsystem: errors, deterministic RNG,
//! configuration.

pub mod config;
pub mod error;
pub mod rng;

pub use config::AssistantConfig;
pub use error::{ConfigError, DecodeError, IndexBuildError, ScanError};
pub use rng::{seed_from_ids, PickRng};
