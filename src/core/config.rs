//! Runtime configuration.
//!
//! `AssistantConfig` carries everything the front-end needs to locate the
//! client log and card data and to drive the wildcard picker. Every field
//! has a default, so a config file only needs to name what differs:
//!
//! ```toml
//! data_dir = 'D:\Games\MTGA\MTGA_Data\Downloads\Data'
//! set = "ZNR"
//! seed = 7
//! ```
//!
//! Paths may reference environment variables as `${VAR}` or `$VAR`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::ConfigError;

/// Default client log location on Windows.
pub const DEFAULT_LOG_PATH: &str =
    r"${USERPROFILE}\AppData\LocalLow\Wizards Of The Coast\MTGA\output_log.txt";

/// Default card data location on Windows.
pub const DEFAULT_DATA_DIR: &str =
    r"C:\Program Files (x86)\Wizards of the Coast\MTGA\MTGA_Data\Downloads\Data";

/// Largest log the front-end will scan. The scanner buffers proportionally
/// to log size, so callers cap input before handing it over.
pub const DEFAULT_MAX_LOG_BYTES: u64 = 100 << 20;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Client log file.
    pub log_path: String,
    /// Root of the client's card data files.
    pub data_dir: String,
    /// Set code used for wildcard picks.
    pub set: String,
    /// Localisation language used for card names.
    pub language: String,
    /// Explicit wildcard-pick seed. Derived from the boosters when absent.
    pub seed: Option<u64>,
    /// Size ceiling for the log file.
    pub max_log_bytes: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            log_path: DEFAULT_LOG_PATH.to_string(),
            data_dir: DEFAULT_DATA_DIR.to_string(),
            set: "M21".to_string(),
            language: "EN".to_string(),
            seed: None,
            max_log_bytes: DEFAULT_MAX_LOG_BYTES,
        }
    }
}

impl AssistantConfig {
    /// Load from a TOML file, or defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse from TOML text.
    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Log path with environment variables expanded.
    #[must_use]
    pub fn log_path(&self) -> PathBuf {
        PathBuf::from(expand_env(&self.log_path))
    }

    /// Data directory with environment variables expanded.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(expand_env(&self.data_dir))
    }
}

/// Expand `${VAR}` and `$VAR` references. Unset variables expand to "".
#[must_use]
pub fn expand_env(input: &str) -> String {
    expand_with(input, |name| std::env::var(name).ok())
}

fn expand_with<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(input.len());
    let mut chars = input.char_indices();

    while let Some((i, c)) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        let rest = &input[i + 1..];
        if let Some(braced) = rest.strip_prefix('{') {
            if let Some(end) = braced.find('}') {
                let name = &braced[..end];
                out.push_str(&lookup(name).unwrap_or_default());
                // skip "{NAME}"
                for _ in 0..name.chars().count() + 2 {
                    chars.next();
                }
                continue;
            }
            out.push(c);
            continue;
        }
        let len = rest
            .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
            .unwrap_or(rest.len());
        if len == 0 {
            out.push(c);
            continue;
        }
        out.push_str(&lookup(&rest[..len]).unwrap_or_default());
        for _ in 0..len {
            chars.next();
        }
    }
    out
}
