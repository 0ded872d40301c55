//! Session persistence on top of the key/value store.

use infoco_auth::{AuthError, Principal, SessionVault};

use crate::keys;
use crate::kv::{KeyValueStore, KeyValueStoreExt};

/// Keeps the active principal under [`keys::SESSION`] and avatars under
/// per-email keys that are left alone on logout.
#[derive(Debug, Clone)]
pub struct KvSessionVault<S> {
    kv: S,
}

impl<S: KeyValueStore> KvSessionVault<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }
}

impl<S: KeyValueStore> SessionVault for KvSessionVault<S> {
    fn save_session(&self, principal: &Principal) -> Result<(), AuthError> {
        self.kv
            .save(keys::SESSION, principal)
            .map_err(|e| AuthError::vault(e.to_string()))
    }

    fn load_session(&self) -> Result<Option<Principal>, AuthError> {
        match self.kv.load(keys::SESSION) {
            Ok(p) => Ok(p),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable session");
                Ok(None)
            }
        }
    }

    fn clear_session(&self) -> Result<(), AuthError> {
        self.kv
            .remove(keys::SESSION)
            .map_err(|e| AuthError::vault(e.to_string()))
    }

    fn save_avatar(&self, email: &str, avatar: &str) -> Result<(), AuthError> {
        self.kv
            .save(&keys::avatar(email), avatar)
            .map_err(|e| AuthError::vault(e.to_string()))
    }

    fn load_avatar(&self, email: &str) -> Result<Option<String>, AuthError> {
        self.kv
            .load(&keys::avatar(email))
            .map_err(|e| AuthError::vault(e.to_string()))
    }
}
