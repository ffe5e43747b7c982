//! Persistent high-score store
//!
//! The game reads one versioned key at startup and writes it back when a
//! play-through ends on a new high score. Backends: in-memory, LocalStorage
//! (wasm32) and a JSON file (native).

use std::collections::BTreeMap;

use thiserror::Error;

/// Versioned key holding the best score
pub const SCORE_KEY: &str = "arena5-score-1.1";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("storage rejected the request: {0}")]
    Backend(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed store data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key/value store addressed by string keys
pub trait HighScoreStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Volatile store, used by tests and as a fallback
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HighScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StoreError::Backend(format!("{e:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StoreError::Backend(format!("{e:?}")))
    }
}

/// JSON object on disk, rewritten whole on every `set`
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

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl HighScoreStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        std::fs::write(&self.path, serde_json::to_string_pretty(&values)?)?;
        Ok(())
    }
}

/// Best score on record, 0 when absent or unreadable
pub fn load_high_score(store: &dyn HighScoreStore) -> u64 {
    match store.get(SCORE_KEY) {
        Ok(Some(value)) => match value.trim().parse() {
            Ok(score) => {
                log::info!("Loaded high score {score}");
                score
            }
            Err(e) => {
                log::warn!("Ignoring unreadable high score {value:?}: {e}");
                0
            }
        },
        Ok(None) => {
            log::info!("No high score found, starting fresh");
            0
        }
        Err(e) => {
            log::warn!("Failed to read high score: {e}");
            0
        }
    }
}

/// Record a new best score
pub fn save_high_score(store: &mut dyn HighScoreStore, score: u64) -> Result<(), StoreError> {
    store.set(SCORE_KEY, &score.to_string())?;
    log::info!("High score {score} saved");
    Ok(())
}
