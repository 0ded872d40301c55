//! `infoco-infra`: storage wiring.
//!
//! Every collection is mirrored into a [`KeyValueStore`] under a fixed key,
//! one JSON document per key, and rewritten whole after each change.

pub mod error;
pub mod keys;
pub mod kv;
pub mod seed;
pub mod vault;
pub mod workspace;

pub use error::{StorageError, StorageResult};
pub use kv::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore, KeyValueStoreExt};
pub use vault::KvSessionVault;
pub use workspace::{Collections, Holds, Workspace, WorkspaceError, WorkspaceResult};
