use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::StorageResult;
use crate::kv::KeyValueStore;

/// In-memory store for tests/dev. Nothing survives the process.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    inner: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let Ok(map) = self.inner.read() else {
            return Ok(None);
        };
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        if let Ok(mut map) = self.inner.write() {
            map.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        if let Ok(mut map) = self.inner.write() {
            map.remove(key);
        }
        Ok(())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return Ok(vec![]),
        };
        let mut keys: Vec<_> = map.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_and_remove_is_idempotent() {
        let kv = InMemoryKeyValueStore::new();
        kv.set("a", "1").unwrap();
        kv.set("a", "2").unwrap();
        assert_eq!(kv.get("a").unwrap().as_deref(), Some("2"));

        kv.remove("a").unwrap();
        kv.remove("a").unwrap();
        assert_eq!(kv.get("a").unwrap(), None);
        assert!(kv.keys().unwrap().is_empty());
    }
}
