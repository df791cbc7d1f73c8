//! Error taxonomy.
//!
//! Each failure domain gets its own enum so callers can tell a fatal
//! condition (unreadable stream, unusable data directory) from a local one
//! (a single malformed payload) without string matching.
//!
//! - `ScanError`: the log stream could not be read, or it held no
//!   occurrence of the requested event kind.
//! - `DecodeError`: one occurrence's payload is malformed. Never fatal to
//!   a scan; the extractor logs and skips it.
//! - `IndexBuildError`: the card data directory is missing, unreadable or
//!   empty. No partial index is ever returned.
//! - `ConfigError`: the configuration file could not be loaded.

use std::path::PathBuf;

use thiserror::Error;

use crate::logfile::EventKind;

/// Failure of a whole scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The stream could not be read.
    #[error("failed to read log stream: {0}")]
    Transport(#[from] std::io::Error),

    /// The stream was read to the end without a single usable occurrence.
    #[error("no {0} found in the log")]
    NoOccurrence(EventKind),
}

impl ScanError {
    /// True for the recoverable "nothing found" outcome.
    #[must_use]
    pub fn is_no_occurrence(&self) -> bool {
        matches!(self, ScanError::NoOccurrence(_))
    }
}

/// Failure to decode a single payload.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected {kind} payload shape: {reason}")]
    Shape { kind: EventKind, reason: String },
}

impl DecodeError {
    pub(crate) fn shape(kind: EventKind, reason: impl Into<String>) -> Self {
        DecodeError::Shape {
            kind,
            reason: reason.into(),
        }
    }
}

/// Failure to build the card index.
#[derive(Debug, Error)]
pub enum IndexBuildError {
    #[error("card data directory {0} does not exist")]
    MissingDirectory(PathBuf),

    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed data file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no card records found under {0}")]
    NoCards(PathBuf),
}

/// Failure to load configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_occurrence_message() {
        let err = ScanError::NoOccurrence(EventKind::Collection);
        assert!(err.is_no_occurrence());
        assert_eq!(err.to_string(), "no collection found in the log");
    }

    #[test]
    fn test_transport_is_not_no_occurrence() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err = ScanError::from(io);
        assert!(!err.is_no_occurrence());
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_shape_message_names_kind() {
        let err = DecodeError::shape(EventKind::BoosterOpen, "missing cardsOpened");
        assert_eq!(
            err.to_string(),
            "unexpected booster open payload shape: missing cardsOpened"
        );
    }
}
