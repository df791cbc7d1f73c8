//! Building a `CardIndex` from the client's data directory.
//!
//! The directory is walked recursively. Files named `data_cards*` hold card
//! definitions, files named `data_loc*` hold localised strings; both are
//! JSON with an `.mtga` or `.json` extension. Files are applied in
//! lexicographic order of their path relative to the root, so a patch file
//! sorting after the base file overrides its cards.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer};
use tracing::{debug, info, warn};

use super::definition::{Card, CardId, Rarity};
use super::index::{CardIndex, CardIndexBuilder};
use crate::core::IndexBuildError;

const CARDS_PREFIX: &str = "data_cards";
const LOC_PREFIX: &str = "data_loc";
const EXTENSIONS: [&str; 2] = ["mtga", "json"];

/// One card record as the client writes it. Extra fields are ignored.
#[derive(Debug, Deserialize)]
struct RawCard {
    grpid: u64,
    set: String,
    rarity: u64,
    #[serde(rename = "CollectorNumber", default, deserialize_with = "string_or_number")]
    collector_number: String,
    #[serde(rename = "isPrimaryCard", default)]
    is_primary_card: bool,
    #[serde(rename = "titleId", default)]
    title_id: Option<u64>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLocalisation {
    langkey: String,
    #[serde(default)]
    keys: Vec<RawLocKey>,
}

#[derive(Debug, Deserialize)]
struct RawLocKey {
    id: u64,
    text: String,
}

/// Collector numbers appear both as strings and as bare numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(D::Error::custom(format!(
            "expected string or number, found {other}"
        ))),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DataFile {
    Cards,
    Localisation,
}

fn classify(path: &Path) -> Option<DataFile> {
    let ext = path.extension()?.to_str()?;
    if !EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)) {
        return None;
    }
    let name = path.file_name()?.to_str()?;
    if name.starts_with(CARDS_PREFIX) {
        Some(DataFile::Cards)
    } else if name.starts_with(LOC_PREFIX) {
        Some(DataFile::Localisation)
    } else {
        None
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> IndexBuildError + '_ {
    move |source| IndexBuildError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), IndexBuildError> {
    for entry in std::fs::read_dir(dir).map_err(io_error(dir))? {
        let entry = entry.map_err(io_error(dir))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(io_error(&path))?;
        if file_type.is_dir() {
            collect_files(&path, out)?;
        } else if classify(&path).is_some() {
            out.push(path);
        }
    }
    Ok(())
}

fn read_json<T>(path: &Path) -> Result<T, IndexBuildError>
where
    T: for<'de> Deserialize<'de>,
{
    let bytes = std::fs::read(path).map_err(io_error(path))?;
    serde_json::from_slice(&bytes).map_err(|source| IndexBuildError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

impl CardIndex {
    /// Build an index from the data directory, with names in `language`.
    ///
    /// Fails if the directory is missing or unreadable, if a data file is
    /// not the expected JSON array, or if no card record could be decoded.
    /// Individual malformed card records are skipped.
    pub fn load(root: impl AsRef<Path>, language: &str) -> Result<Self, IndexBuildError> {
        let root = root.as_ref();
        let meta = std::fs::metadata(root).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                IndexBuildError::MissingDirectory(root.to_path_buf())
            } else {
                IndexBuildError::Io {
                    path: root.to_path_buf(),
                    source,
                }
            }
        })?;
        if !meta.is_dir() {
            return Err(IndexBuildError::NotADirectory(root.to_path_buf()));
        }

        let mut files = Vec::new();
        collect_files(root, &mut files)?;
        files.sort_by(|a, b| {
            let a = a.strip_prefix(root).unwrap_or(a);
            let b = b.strip_prefix(root).unwrap_or(b);
            a.cmp(b)
        });

        let mut titles: FxHashMap<u64, String> = FxHashMap::default();
        for path in files.iter().filter(|p| classify(p) == Some(DataFile::Localisation)) {
            let tables: Vec<RawLocalisation> = read_json(path)?;
            for table in tables
                .into_iter()
                .filter(|t| t.langkey.eq_ignore_ascii_case(language))
            {
                titles.extend(table.keys.into_iter().map(|k| (k.id, k.text)));
            }
            debug!(path = %path.display(), "loaded localisation");
        }

        let mut builder = CardIndexBuilder::new();
        let mut card_files = 0usize;
        for path in files.iter().filter(|p| classify(p) == Some(DataFile::Cards)) {
            let records: Vec<serde_json::Value> = read_json(path)?;
            card_files += 1;
            for (i, record) in records.into_iter().enumerate() {
                match RawCard::deserialize(record) {
                    Ok(raw) => {
                        if let Some(old) = builder.insert(resolve(raw, &titles)) {
                            debug!(id = %old.id, path = %path.display(), "card overridden");
                        }
                    }
                    Err(err) => {
                        warn!(
                            path = %path.display(),
                            record = i,
                            error = %err,
                            "skipping card record"
                        );
                    }
                }
            }
        }

        if builder.is_empty() {
            return Err(IndexBuildError::NoCards(root.to_path_buf()));
        }
        info!(cards = builder.len(), files = card_files, "card index built");
        Ok(builder.build())
    }
}

fn resolve(raw: RawCard, titles: &FxHashMap<u64, String>) -> Card {
    let name = raw
        .name
        .or_else(|| raw.title_id.and_then(|t| titles.get(&t).cloned()))
        .unwrap_or_else(|| format!("#{}", raw.title_id.unwrap_or(raw.grpid)));

    Card {
        id: CardId::new(raw.grpid),
        name,
        set: raw.set,
        collector_number: raw.collector_number,
        rarity: Rarity::from_code(raw.rarity),
        is_primary_card: raw.is_primary_card,
    }
}
