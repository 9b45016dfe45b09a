//! The key-value store trait and typed access helpers
//!
//! The store is a dumb collaborator with get/set semantics. The typed
//! helpers implement the one recovery rule the system has: a value that
//! fails to deserialize is treated as absent, never as a fatal error.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Errors from the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Backing storage failed
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// Value could not be serialized
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A key-value store with JSON values.
///
/// Writes are last-write-wins, whole-value replacement. Implementations
/// must not fail a `get` because a stored value is unparsable as the
/// caller's type; type decoding happens in [`load_or_default`] and
/// [`load_optional`].
pub trait KeyValueStore: Send + Sync {
    /// Fetch the raw value for a key, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Replace the value for a key.
    fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Drop a key entirely.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store backed by a map. The default for tests and demos.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: parking_lot::RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.write().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().remove(key);
        Ok(())
    }
}

/// Load a typed value, falling back to the default when the key is absent,
/// the store errors, or the stored JSON does not decode as `T`.
///
/// Corrupt values are removed so the next load is clean.
pub fn load_or_default<T>(store: &dyn KeyValueStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    load_optional(store, key).unwrap_or_default()
}

/// Load a typed value, `None` when absent or undecodable.
pub fn load_optional<T>(store: &dyn KeyValueStore, key: &str) -> Option<T>
where
    T: DeserializeOwned,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(error) => {
            tracing::warn!(key, %error, "store read failed; treating key as absent");
            return None;
        }
    };
    if raw.is_null() {
        return None;
    }
    match serde_json::from_value(raw) {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::warn!(key, %error, "stored value is corrupt; resetting key");
            if let Err(error) = store.remove(key) {
                tracing::warn!(key, %error, "failed to clear corrupt key");
            }
            None
        }
    }
}

/// Persist a typed value under a key.
pub fn save<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize,
{
    store.set(key, serde_json::to_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Record {
        names: Vec<String>,
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        let record = Record {
            names: vec!["a".to_string(), "b".to_string()],
        };
        save(&store, "record", &record).unwrap();
        assert_eq!(load_or_default::<Record>(&store, "record"), record);
    }

    #[test]
    fn absent_key_loads_default() {
        let store = MemoryStore::new();
        assert_eq!(load_or_default::<Record>(&store, "missing"), Record::default());
        assert_eq!(load_optional::<Record>(&store, "missing"), None);
    }

    #[test]
    fn corrupt_value_is_treated_as_absent_and_cleared() {
        let store = MemoryStore::new();
        store
            .set("record", Value::String("not a record".to_string()))
            .unwrap();

        assert_eq!(load_or_default::<Record>(&store, "record"), Record::default());
        // The corrupt value was removed on first read.
        assert_eq!(store.get("record").unwrap(), None);
    }

    #[test]
    fn null_value_is_absent() {
        let store = MemoryStore::new();
        store.set("record", Value::Null).unwrap();
        assert_eq!(load_optional::<Record>(&store, "record"), None);
    }

    #[test]
    fn set_replaces_whole_value() {
        let store = MemoryStore::new();
        save(&store, "record", &Record { names: vec!["a".to_string()] }).unwrap();
        save(&store, "record", &Record { names: vec!["b".to_string()] }).unwrap();
        assert_eq!(
            load_or_default::<Record>(&store, "record").names,
            vec!["b".to_string()]
        );
    }
}
