//! Whole-value key/value storage.

pub mod file;
pub mod memory;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{StorageError, StorageResult};

pub use file::FileKeyValueStore;
pub use memory::InMemoryKeyValueStore;

/// String key → JSON text. Writes replace the whole value.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
    fn keys(&self) -> StorageResult<Vec<String>>;
}

impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        (**self).keys()
    }
}

/// Typed access on top of [`KeyValueStore`].
pub trait KeyValueStoreExt: KeyValueStore {
    fn load<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        let Some(raw) = self.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageError::serialization(key, e))
    }

    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StorageResult<()> {
        let raw = serde_json::to_string(value).map_err(|e| StorageError::serialization(key, e))?;
        self.set(key, &raw)?;
        tracing::debug!(key, bytes = raw.len(), "value written");
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStoreExt for S {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_values_round_trip_and_garbage_is_reported() {
        let kv = InMemoryKeyValueStore::new();
        kv.save("infoco_login_image", &Some("data:image/png;base64,AAAA")).unwrap();
        let back: Option<Option<String>> = kv.load("infoco_login_image").unwrap();
        assert_eq!(back, Some(Some("data:image/png;base64,AAAA".to_string())));

        kv.set("infoco_tasks", "{not json").unwrap();
        let err = kv.load::<Vec<u32>>("infoco_tasks").unwrap_err();
        assert!(matches!(err, StorageError::Serialization { ref key, .. } if key == "infoco_tasks"));
    }

    #[test]
    fn shared_handles_see_the_same_data() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let other = kv.clone();
        kv.set("k", "1").unwrap();
        assert_eq!(other.get("k").unwrap().as_deref(), Some("1"));
    }
}
