//! Durable key-value storage used by the counter and the local signup backend
//!
//! In the browser this is `localStorage` (see `ui::browser::BrowserStore`);
//! [`MemoryStore`] backs server rendering and tests.

use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;

/// Storage key holding the waitlist count as a decimal string
pub const COUNT_KEY: &str = "waitlist_count";

/// Storage key holding the JSON list of locally recorded signups
pub const SUBMITTED_EMAILS_KEY: &str = "waitlist_submitted_emails";

/// Storage failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,
    #[error("failed to write '{key}'")]
    Write { key: String },
    #[error("corrupt value under '{key}': {reason}")]
    Corrupt { key: String, reason: String },
}

/// String key-value store with `localStorage` semantics
pub trait KeyValueStore: Send + Sync {
    /// Read a value; a missing key is `Ok(None)`
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.lock().map_err(|_| StorageError::Unavailable)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::Unavailable)?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get_item(COUNT_KEY), Ok(None));
    }

    #[test]
    fn test_set_replaces_value() {
        let store = MemoryStore::new();
        store.set_item(COUNT_KEY, "1").unwrap();
        store.set_item(COUNT_KEY, "2").unwrap();
        assert_eq!(store.get_item(COUNT_KEY), Ok(Some("2".to_string())));
    }
}
