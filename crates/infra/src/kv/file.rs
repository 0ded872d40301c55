//! One JSON file per key under a data directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::error::{StorageError, StorageResult};
use crate::kv::KeyValueStore;

const EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Use `dir`, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating data directory {}", dir.display()))
            .map_err(StorageError::Io)?;
        tracing::info!(dir = %dir.display(), "file store opened");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> StorageResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '@'))
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::Io(anyhow::anyhow!("invalid storage key '{key}'")));
        }
        Ok(self.dir.join(format!("{key}.{EXTENSION}")))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(
                anyhow::Error::new(e).context(format!("reading {}", path.display())),
            )),
        }
    }

    /// Written to a sibling temp file and renamed into place.
    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path(key)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)
            .with_context(|| format!("writing {}", tmp.display()))
            .and_then(|()| {
                fs::rename(&tmp, &path).with_context(|| format!("replacing {}", path.display()))
            })
            .map_err(|e| {
                tracing::error!(key, error = %format!("{e:#}"), "storage write failed");
                StorageError::Io(e)
            })
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(
                anyhow::Error::new(e).context(format!("removing {}", path.display())),
            )),
        }
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        let entries = fs::read_dir(&self.dir)
            .with_context(|| format!("listing {}", self.dir.display()))
            .map_err(StorageError::Io)?;
        let mut keys = Vec::new();
        for entry in entries {
            let path = entry.context("reading directory entry").map_err(StorageError::Io)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let kv = FileKeyValueStore::open(dir.path()).unwrap();
        kv.set("infoco_tasks", "[]").unwrap();
        kv.set("infoco_user_pfp_ana@infoco.com", "\"data:image/png;base64,AAAA\"").unwrap();

        let reopened = FileKeyValueStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get("infoco_tasks").unwrap().as_deref(), Some("[]"));
        assert_eq!(
            reopened.keys().unwrap(),
            vec!["infoco_tasks".to_string(), "infoco_user_pfp_ana@infoco.com".to_string()]
        );
    }

    #[test]
    fn missing_keys_read_as_none_and_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let kv = FileKeyValueStore::open(dir.path()).unwrap();
        assert_eq!(kv.get("infoco_assets").unwrap(), None);
        kv.remove("infoco_assets").unwrap();
    }

    #[test]
    fn path_like_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let kv = FileKeyValueStore::open(dir.path()).unwrap();
        assert!(kv.set("../escape", "1").is_err());
        assert!(kv.get("a/b").is_err());
        assert!(kv.set("", "1").is_err());
    }
}
