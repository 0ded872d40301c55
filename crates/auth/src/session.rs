//! Session/identity provider.
//!
//! Authentication compares passwords by plain string equality, the way the
//! existing account store has always been checked. There is no hashing.

use thiserror::Error;

use crate::{CredentialSource, Principal, Role};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Deliberately does not say whether the email or the password was wrong.
    #[error("Login falhou. Verifique se o e-mail e a senha estão corretos.")]
    InvalidCredentials,

    #[error("no active session")]
    NoActiveSession,

    #[error("session storage failed: {0}")]
    Vault(String),
}

impl AuthError {
    pub fn vault(msg: impl Into<String>) -> Self {
        Self::Vault(msg.into())
    }
}

/// Durable storage for the active session and per-email avatars.
///
/// Avatars are keyed by email and outlive sessions.
pub trait SessionVault: Send + Sync {
    fn save_session(&self, principal: &Principal) -> Result<(), AuthError>;
    fn load_session(&self) -> Result<Option<Principal>, AuthError>;
    fn clear_session(&self) -> Result<(), AuthError>;
    fn save_avatar(&self, email: &str, avatar: &str) -> Result<(), AuthError>;
    fn load_avatar(&self, email: &str) -> Result<Option<String>, AuthError>;
}

/// Holds the single active principal.
#[derive(Debug)]
pub struct SessionProvider<V> {
    vault: V,
    current: Option<Principal>,
}

impl<V: SessionVault> SessionProvider<V> {
    pub fn new(vault: V) -> Self {
        Self {
            vault,
            current: None,
        }
    }

    /// Sign in against `credentials` and persist the resulting principal.
    pub fn authenticate<S>(
        &mut self,
        credentials: &S,
        email: &str,
        password: &str,
    ) -> Result<Principal, AuthError>
    where
        S: CredentialSource + ?Sized,
    {
        let record = credentials
            .find_by_email(email)
            .filter(|r| r.password == password);

        let Some(record) = record else {
            tracing::warn!(email, "authentication failed");
            return Err(AuthError::InvalidCredentials);
        };

        let mut principal = record.principal();
        principal.avatar = self.vault.load_avatar(&principal.email)?;
        self.vault.save_session(&principal)?;

        tracing::info!(email = %principal.email, role = %principal.role, "authenticated");
        self.current = Some(principal.clone());
        Ok(principal)
    }

    /// Rehydrate a previously persisted principal without re-checking
    /// credentials.
    pub fn restore_session(&mut self) -> Result<Option<Principal>, AuthError> {
        let Some(mut principal) = self.vault.load_session()? else {
            return Ok(None);
        };
        if principal.avatar.is_none() {
            principal.avatar = self.vault.load_avatar(&principal.email)?;
        }
        tracing::info!(email = %principal.email, role = %principal.role, "session restored");
        self.current = Some(principal.clone());
        Ok(Some(principal))
    }

    /// Clear the active principal. The credential store is untouched.
    pub fn end_session(&mut self) -> Result<(), AuthError> {
        if let Some(p) = self.current.take() {
            tracing::info!(email = %p.email, "session ended");
        }
        self.vault.clear_session()
    }

    pub fn update_avatar(&mut self, avatar: impl Into<String>) -> Result<Principal, AuthError> {
        let principal = self.current.as_mut().ok_or(AuthError::NoActiveSession)?;
        let avatar = avatar.into();

        self.vault.save_avatar(&principal.email, &avatar)?;
        principal.avatar = Some(avatar);
        self.vault.save_session(principal)?;
        Ok(principal.clone())
    }

    pub fn current(&self) -> Option<&Principal> {
        self.current.as_ref()
    }

    pub fn require(&self) -> Result<&Principal, AuthError> {
        self.current.as_ref().ok_or(AuthError::NoActiveSession)
    }

    pub fn role(&self) -> Option<Role> {
        self.current.as_ref().map(|p| p.role)
    }

    pub fn vault(&self) -> &V {
        &self.vault
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use infoco_core::RecordId;
    use proptest::prelude::*;

    use super::*;
    use crate::CredentialRecord;

    #[derive(Default)]
    struct MemoryVault {
        session: Mutex<Option<Principal>>,
        avatars: Mutex<HashMap<String, String>>,
    }

    impl SessionVault for MemoryVault {
        fn save_session(&self, principal: &Principal) -> Result<(), AuthError> {
            *self.session.lock().unwrap() = Some(principal.clone());
            Ok(())
        }

        fn load_session(&self) -> Result<Option<Principal>, AuthError> {
            Ok(self.session.lock().unwrap().clone())
        }

        fn clear_session(&self) -> Result<(), AuthError> {
            *self.session.lock().unwrap() = None;
            Ok(())
        }

        fn save_avatar(&self, email: &str, avatar: &str) -> Result<(), AuthError> {
            self.avatars
                .lock()
                .unwrap()
                .insert(email.to_string(), avatar.to_string());
            Ok(())
        }

        fn load_avatar(&self, email: &str) -> Result<Option<String>, AuthError> {
            Ok(self.avatars.lock().unwrap().get(email).cloned())
        }
    }

    fn accounts() -> Vec<CredentialRecord> {
        vec![CredentialRecord {
            id: RecordId::new(1),
            email: "a@x.com".to_string(),
            display_name: "A".to_string(),
            role: Role::Coordinator,
            department: "Técnico".to_string(),
            password: "p1".to_string(),
        }]
    }

    #[test]
    fn email_case_is_ignored_but_password_is_exact() {
        let mut sessions = SessionProvider::new(MemoryVault::default());

        let p = sessions.authenticate(&accounts(), "A@X.com", "p1").unwrap();
        assert_eq!(p.email, "a@x.com");
        assert_eq!(sessions.role(), Some(Role::Coordinator));

        let err = sessions.authenticate(&accounts(), "a@x.com", "p2").unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
        let err = sessions.authenticate(&accounts(), "b@x.com", "p1").unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
    }

    #[test]
    fn password_comparison_is_plain_equality() {
        let mut sessions = SessionProvider::new(MemoryVault::default());
        for wrong in ["P1", " p1", "p1 ", ""] {
            assert_eq!(
                sessions.authenticate(&accounts(), "a@x.com", wrong).unwrap_err(),
                AuthError::InvalidCredentials,
                "{wrong:?}"
            );
        }

        let mut legacy = accounts();
        legacy[0].password.clear();
        assert!(sessions.authenticate(&legacy, "a@x.com", "").is_ok());
        assert!(sessions.authenticate(&legacy, "a@x.com", "p1").is_err());
    }

    #[test]
    fn restore_rehydrates_without_credentials() {
        let mut first = SessionProvider::new(MemoryVault::default());
        first.authenticate(&accounts(), "a@x.com", "p1").unwrap();

        let mut second = SessionProvider::new(first.vault);
        let restored = second.restore_session().unwrap().unwrap();
        assert_eq!(restored.email, "a@x.com");
        assert_eq!(second.current(), Some(&restored));
    }

    #[test]
    fn avatar_survives_logout_and_login() {
        let mut sessions = SessionProvider::new(MemoryVault::default());
        sessions.authenticate(&accounts(), "a@x.com", "p1").unwrap();
        sessions.update_avatar("data:image/png;base64,AAAA").unwrap();

        sessions.end_session().unwrap();
        assert!(sessions.current().is_none());
        assert!(sessions.restore_session().unwrap().is_none());

        let p = sessions.authenticate(&accounts(), "a@x.com", "p1").unwrap();
        assert_eq!(p.avatar.as_deref(), Some("data:image/png;base64,AAAA"));
    }

    #[test]
    fn avatar_update_requires_a_session() {
        let mut sessions = SessionProvider::new(MemoryVault::default());
        assert_eq!(
            sessions.update_avatar("x").unwrap_err(),
            AuthError::NoActiveSession
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 128, ..ProptestConfig::default() })]

        #[test]
        fn changing_email_case_never_changes_the_outcome(
            local in "[a-z]{1,8}",
            flips in prop::collection::vec(any::<bool>(), 8),
            password in "[a-z0-9]{1,8}",
            attempt in "[a-z0-9]{1,8}",
        ) {
            let email = format!("{local}@infoco.com");
            let mut accounts = accounts();
            accounts[0].email = email.clone();
            accounts[0].password = password.clone();

            let recased: String = email
                .chars()
                .zip(flips.iter().cycle())
                .map(|(c, up)| if *up { c.to_ascii_uppercase() } else { c })
                .collect();

            let mut sessions = SessionProvider::new(MemoryVault::default());
            let plain = sessions.authenticate(&accounts, &email, &attempt).is_ok();
            let cased = sessions.authenticate(&accounts, &recased, &attempt).is_ok();

            prop_assert_eq!(plain, cased);
            prop_assert_eq!(plain, attempt == password);
        }
    }
}
