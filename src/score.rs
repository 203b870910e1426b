use crate::consts::HIGH_SCORE_KEY;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A persistent string-to-string store
pub(crate) trait KeyValueStore: fmt::Debug {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
}

/// A store that only lives as long as the process
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct MemoryStore(BTreeMap<String, String>);

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.0.insert(key.to_owned(), value);
        Ok(())
    }
}

/// A store kept on disk as a JSON object of strings.  Every `set()` rewrites
/// the whole file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Return the default path for the store file
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("rainbow-snake").join("storage.json"))
    }

    /// Open the store at `path`.  A missing file yields an empty store, as
    /// does one that cannot be read or parsed; the latter case is logged.
    pub(crate) fn open(path: PathBuf) -> FileStore {
        let entries = match fs_err::read(&path) {
            Ok(src) => serde_json::from_slice(&src).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Store file is not a JSON object of strings; starting empty");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read store file; starting empty");
                BTreeMap::new()
            }
        };
        FileStore { path, entries }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(StoreError::mkdir)?;
        }
        let mut src = serde_json::to_string_pretty(&self.entries).map_err(StoreError::serialize)?;
        src.push('\n');
        fs_err::write(&self.path, &src).map_err(StoreError::write)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value);
        self.save()
    }
}

/// The all-time high score, kept in a [`KeyValueStore`]
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ScoreStore<S = FileStore> {
    store: S,
}

impl<S: KeyValueStore> ScoreStore<S> {
    pub(crate) fn new(store: S) -> ScoreStore<S> {
        ScoreStore { store }
    }

    /// Return the stored high score.  A missing or non-numeric value counts
    /// as 0.
    pub(crate) fn load(&self) -> u32 {
        self.store
            .get(HIGH_SCORE_KEY)
            .map_or(0, |s| parse_score(&s))
    }

    /// Record `score` if it beats the stored high score.  Returns whether
    /// anything was written.
    pub(crate) fn save(&mut self, score: u32) -> Result<bool, StoreError> {
        if score > self.load() {
            self.store.set(HIGH_SCORE_KEY, score.to_string())?;
            tracing::info!(score, "New high score saved");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }
}

#[derive(Debug, Error)]
#[error("Failed to save high score")]
pub(crate) struct StoreError(#[source] StoreErrorSource);

impl StoreError {
    fn mkdir(e: std::io::Error) -> Self {
        StoreError(StoreErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        StoreError(StoreErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        StoreError(StoreErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum StoreErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize store contents")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write store file")]
    Write(#[source] std::io::Error),
}

/// Parse the leading integer of a stored score, skipping leading whitespace
/// and an optional `+`, so that `"8.5"` is 8 and `"80abc"` is 80.  A value
/// with no leading digits, a negative value, or one too large for a `u32`
/// counts as 0.
fn parse_score(s: &str) -> u32 {
    let s = s.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse::<u32>().unwrap_or(0)
}
