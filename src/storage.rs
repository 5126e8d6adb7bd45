//! Durable Client Storage
//!
//! Key/value storage that survives a page reload. The browser implementation
//! wraps `window.localStorage`; the in-memory one backs tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;

/// Synchronous string storage
pub trait DurableStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Shared handle passed to the stores
pub type SharedStorage = Arc<dyn DurableStorage>;

/// `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StorageError::Unavailable)
    }
}

impl DurableStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().ok()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }
}

/// In-memory storage; clones share the same entries, like two page loads
/// sharing one `localStorage`
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DurableStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries().remove(key);
        Ok(())
    }
}

/// Read and parse a JSON entry. Missing entries are `None`; corrupt ones are
/// logged and also `None`.
pub fn read_json<T: DeserializeOwned>(storage: &dyn DurableStorage, key: &str) -> Option<T> {
    let raw = storage.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring corrupt storage entry {key:?}: {e}");
            None
        }
    }
}

pub fn write_json<T: Serialize + ?Sized>(storage: &dyn DurableStorage, key: &str, value: &T) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    storage.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_shares_entries_between_clones() {
        let a = MemoryStorage::new();
        let b = a.clone();
        a.set("jwt", "abc").unwrap();
        assert_eq!(b.get("jwt").as_deref(), Some("abc"));
        b.remove("jwt").unwrap();
        assert_eq!(a.get("jwt"), None);
    }

    #[test]
    fn test_read_json_tolerates_corruption() {
        let storage = MemoryStorage::new();
        storage.set("cart", "{not json").unwrap();
        assert_eq!(read_json::<Vec<u32>>(&storage, "cart"), None);
        assert_eq!(read_json::<Vec<u32>>(&storage, "missing"), None);
    }

    #[test]
    fn test_write_then_read_json() {
        let storage = MemoryStorage::new();
        write_json(&storage, "nums", &[1u32, 2, 3]).unwrap();
        assert_eq!(read_json::<Vec<u32>>(&storage, "nums"), Some(vec![1, 2, 3]));
    }
}
