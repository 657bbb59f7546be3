//! High score persistence
//!
//! The best score is kept in a key-value store: a JSON file on native,
//! LocalStorage in the browser. Read failures fall back to zero so a broken
//! store never blocks a session.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Storage key (LocalStorage key on web, file stem on native)
pub const STORAGE_KEY: &str = "pocketballHighScore";

/// Errors from a high score store
#[derive(Debug)]
pub enum StoreError {
    /// Backing storage is not available (no window, private mode, ...)
    Unavailable(&'static str),
    /// Reading or writing failed
    Io(std::io::Error),
    /// Stored value could not be decoded
    Corrupt(String),
    /// Browser storage rejected the write
    Rejected(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable(what) => write!(f, "{} unavailable", what),
            StoreError::Io(e) => write!(f, "high score I/O error: {}", e),
            StoreError::Corrupt(raw) => write!(f, "unreadable high score value {:?}", raw),
            StoreError::Rejected(msg) => write!(f, "high score write rejected: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

/// What gets persisted for the best run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub score: u32,
    /// Round reached when the score was set
    #[serde(default)]
    pub round: u32,
}

impl HighScoreRecord {
    /// Decode a stored value: a JSON record, or a bare integer
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        let raw = raw.trim();
        if let Ok(record) = serde_json::from_str::<HighScoreRecord>(raw) {
            return Ok(record);
        }
        raw.parse::<u32>()
            .map(|score| Self { score, round: 0 })
            .map_err(|_| StoreError::Corrupt(raw.to_string()))
    }

    pub fn to_json(&self) -> String {
        // A plain struct of integers always serializes
        serde_json::to_string(self).unwrap_or_else(|_| self.score.to_string())
    }
}

/// A single-slot key-value store
pub trait HighScoreStore {
    /// Raw stored value, or None if nothing was saved yet
    fn get(&self) -> Result<Option<String>, StoreError>;
    /// Replace the stored value
    fn set(&mut self, value: &str) -> Result<(), StoreError>;
}

/// Best score on record, 0 when nothing is stored or the store fails
pub fn load_high_score(store: &dyn HighScoreStore) -> u32 {
    match store.get() {
        Ok(Some(raw)) => match HighScoreRecord::parse(&raw) {
            Ok(record) => {
                log::info!("Loaded high score {}", record.score);
                record.score
            }
            Err(e) => {
                log::warn!("{}; starting from 0", e);
                0
            }
        },
        Ok(None) => {
            log::info!("No high score found, starting fresh");
            0
        }
        Err(e) => {
            log::warn!("{}; starting from 0", e);
            0
        }
    }
}

/// Persist a new best score
pub fn save_high_score(store: &mut dyn HighScoreStore, record: HighScoreRecord) -> Result<(), StoreError> {
    store.set(&record.to_json())?;
    log::info!("High score saved ({})", record.score);
    Ok(())
}

/// Volatile store, for tests and hosts without storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn get(&self) -> Result<Option<String>, StoreError> {
        Ok(self.value.clone())
    }

    fn set(&mut self, value: &str) -> Result<(), StoreError> {
        self.value = Some(value.to_string());
        Ok(())
    }
}

/// JSON file store (native)
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<dir>/pocketballHighScore.json`
    pub fn in_dir(dir: impl AsRef<std::path::Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{}.json", STORAGE_KEY)))
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl HighScoreStore for FileStore {
    fn get(&self) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, value: &str) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        // Write to a temp file then rename so a crash never leaves half a record
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Browser LocalStorage store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable("LocalStorage"))
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn get(&self) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(STORAGE_KEY)
            .map_err(|e| StoreError::Rejected(format!("{:?}", e)))
    }

    fn set(&mut self, value: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(STORAGE_KEY, value)
            .map_err(|e| StoreError::Rejected(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl HighScoreStore for BrokenStore {
        fn get(&self) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("test store"))
        }

        fn set(&mut self, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("test store"))
        }
    }

    #[test]
    fn test_empty_store_is_zero() {
        assert_eq!(load_high_score(&MemoryStore::new()), 0);
    }

    #[test]
    fn test_failing_store_is_zero() {
        assert_eq!(load_high_score(&BrokenStore), 0);
        assert!(save_high_score(&mut BrokenStore, HighScoreRecord::default()).is_err());
    }

    #[test]
    fn test_garbage_is_zero() {
        assert_eq!(load_high_score(&MemoryStore::with_value("lots")), 0);
    }

    #[test]
    fn test_bare_integer_value() {
        // Plain integers as written by older builds
        assert_eq!(load_high_score(&MemoryStore::with_value("12")), 12);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        save_high_score(&mut store, HighScoreRecord { score: 8, round: 9 }).unwrap();
        assert_eq!(load_high_score(&store), 8);
        let raw = store.get().unwrap().unwrap();
        assert_eq!(HighScoreRecord::parse(&raw).unwrap().round, 9);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store() {
        let dir = std::env::temp_dir().join(format!("pocketball-test-{}", std::process::id()));
        let mut store = FileStore::in_dir(&dir);
        assert_eq!(store.path(), dir.join("pocketballHighScore.json").as_path());
        assert_eq!(load_high_score(&store), 0);

        save_high_score(&mut store, HighScoreRecord { score: 4, round: 5 }).unwrap();
        assert_eq!(load_high_score(&store), 4);
        assert!(store.path().exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
