use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path};
use tokio::fs;
use tracing::error;

pub const VISITED_KEY: &str = "visited";
pub const SELECTION_KEY: &str = "selected-index";
pub const STAMPS_PAGE_KEY: &str = "stamps-page";

/// String-keyed persistence, modelled on browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    #[serde(skip)]
    dirty: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether anything was written since the last call, and resets the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
        self.dirty = true;
    }
}

pub async fn load_data(path: &Path) -> MemoryStore {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file: {err}");
                MemoryStore::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => MemoryStore::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            MemoryStore::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &MemoryStore) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_marks_store_dirty_until_taken() {
        let mut store = MemoryStore::new();
        assert!(!store.is_dirty());

        store.set(STAMPS_PAGE_KEY, "2".to_string());
        assert!(store.take_dirty());
        assert!(!store.take_dirty());
        assert_eq!(store.get(STAMPS_PAGE_KEY).as_deref(), Some("2"));
    }

    #[test]
    fn dirty_flag_is_not_serialized() {
        let mut store = MemoryStore::new();
        store.set(SELECTION_KEY, "4".to_string());

        let json = serde_json::to_string(&store).unwrap();
        let mut restored: MemoryStore = serde_json::from_str(&json).unwrap();
        assert!(!restored.take_dirty());
        assert_eq!(restored.get(SELECTION_KEY).as_deref(), Some("4"));
    }

    #[tokio::test]
    async fn missing_file_loads_empty_store() {
        let mut path = std::env::temp_dir();
        path.push(format!("pool_passport_missing_{}.json", std::process::id()));
        let store = load_data(&path).await;
        assert!(store.get(VISITED_KEY).is_none());
    }

    #[tokio::test]
    async fn persisted_store_round_trips_through_disk() {
        let mut path = std::env::temp_dir();
        path.push(format!("pool_passport_store_{}.json", std::process::id()));

        let mut store = MemoryStore::new();
        store.set(VISITED_KEY, "{}".to_string());
        persist_data(&path, &store).await.unwrap();

        let loaded = load_data(&path).await;
        assert_eq!(loaded.get(VISITED_KEY).as_deref(), Some("{}"));
        let _ = std::fs::remove_file(&path);
    }
}
