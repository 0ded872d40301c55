//! Credential store records (the "users" collection).

use serde::Serialize;

use infoco_core::{Collection, DomainError, DomainResult, RecordId, RecordRules};

use crate::{Principal, Role};

infoco_core::record! {
    /// Account that can sign in.
    ///
    /// Email is unique across the collection, compared case-insensitively.
    pub struct CredentialRecord / CredentialDraft in Collection::SystemUsers {
        req email: String,
        req #[serde(alias = "name")] display_name: String,
        req role: Role,
        req department: String,
        opt password: String,
    }
    defaults { role: Some(Role::Support) }
}

impl RecordRules for CredentialRecord {
    fn normalize(&mut self) {
        self.email = self.email.trim().to_string();
    }

    fn validate(&self) -> DomainResult<()> {
        if !self.email.contains('@') {
            return Err(DomainError::invalid_field("email"));
        }
        if self.password.trim().is_empty() {
            return Err(DomainError::invalid_field("password"));
        }
        Ok(())
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.email.to_lowercase())
    }

    /// A blank password on edit keeps the stored one.
    fn merge_update(previous: &Self, mut next: Self) -> Self {
        if next.password.trim().is_empty() {
            next.password = previous.password.clone();
        }
        next
    }
}

impl CredentialRecord {
    /// Password-stripped projection created at login.
    pub fn principal(&self) -> Principal {
        Principal {
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            role: self.role,
            department: self.department.clone(),
            avatar: None,
        }
    }

    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            id: self.id,
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            role: self.role,
            role_label: self.role.label(),
            department: self.department.clone(),
        }
    }

    pub fn matches_email(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }
}

/// Account as listed to administrators. Never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub id: RecordId,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub role_label: &'static str,
    pub department: String,
}

/// Where credentials are looked up during authentication.
pub trait CredentialSource {
    /// Case-insensitive email lookup.
    fn find_by_email(&self, email: &str) -> Option<&CredentialRecord>;
}

impl CredentialSource for [CredentialRecord] {
    fn find_by_email(&self, email: &str) -> Option<&CredentialRecord> {
        self.iter().find(|c| c.matches_email(email))
    }
}

impl CredentialSource for Vec<CredentialRecord> {
    fn find_by_email(&self, email: &str) -> Option<&CredentialRecord> {
        self.as_slice().find_by_email(email)
    }
}

#[cfg(test)]
mod tests {
    use infoco_core::{Draft, Record};

    use super::*;

    fn account() -> CredentialRecord {
        CredentialRecord {
            id: RecordId::new(101),
            email: "admin@infoco.com".to_string(),
            display_name: "Administrador Sistema".to_string(),
            role: Role::Admin,
            department: "Administrativo".to_string(),
            password: "admin123".to_string(),
        }
    }

    #[test]
    fn blank_password_on_edit_keeps_the_stored_one() {
        let stored = account();
        let mut draft = stored.to_draft();
        draft.password = String::new();
        draft.display_name = Some("Admin".to_string());

        let edited = draft.into_record(stored.id).unwrap();
        let merged = CredentialRecord::merge_update(&stored, edited);

        assert_eq!(merged.password, "admin123");
        assert_eq!(merged.display_name, "Admin");
    }

    #[test]
    fn new_account_requires_password_and_valid_email() {
        let mut a = account();
        a.password = "  ".to_string();
        assert_eq!(a.validate(), Err(DomainError::invalid_field("password")));

        let mut b = account();
        b.email = "not-an-email".to_string();
        assert_eq!(b.validate(), Err(DomainError::invalid_field("email")));
    }

    #[test]
    fn lookup_ignores_email_case() {
        let accounts = vec![account()];
        assert!(accounts.find_by_email("ADMIN@Infoco.com").is_some());
        assert!(accounts.find_by_email("other@infoco.com").is_none());
    }

    #[test]
    fn summary_and_principal_drop_the_password() {
        let a = account();
        let json = serde_json::to_value(a.summary()).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["roleLabel"], "Administrador");

        let p = a.principal();
        assert_eq!(p.role, Role::Admin);
        assert_eq!(p.avatar, None);
    }

    #[test]
    fn new_drafts_default_to_support_role() {
        assert_eq!(CredentialRecord::new_draft().role, Some(Role::Support));
    }
}
