//! Credentials for the third-party systems the office exchanges data with.

use serde::Serialize;

use infoco_core::{Collection, DomainError, DomainResult, RecordId, RecordRules, Required};

labelled_enum! {
    pub enum ExternalSystemType {
        Accounting => "Contábil",
        Procurement => "Licitações",
        Warehouse => "Almoxarifado",
        Property => "Patrimônio",
        Other => "Outro",
    }
}

infoco_core::record! {
    /// The access token is write-only: listings use [`IntegrationSummary`]
    /// and an edit with a blank token keeps the stored one.
    pub struct ExternalSystem / ExternalSystemDraft in Collection::ExternalSystems {
        req name: String,
        req #[serde(rename = "type")] kind: ExternalSystemType,
        req api_url: String,
        req token_type: String,
        opt access_token: String,
    }
    defaults {
        kind: Some(ExternalSystemType::Accounting),
        token_type: Some("Bearer".to_string())
    }
}

impl RecordRules for ExternalSystem {
    fn normalize(&mut self) {
        self.api_url = self.api_url.trim().to_string();
    }

    fn validate(&self) -> DomainResult<()> {
        let mut invalid = Vec::new();
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            invalid.push("api_url");
        }
        if self.access_token.is_blank() {
            invalid.push("access_token");
        }
        if invalid.is_empty() {
            Ok(())
        } else {
            Err(DomainError::validation(invalid))
        }
    }

    fn merge_update(previous: &Self, mut next: Self) -> Self {
        if next.access_token.is_blank() {
            next.access_token.clone_from(&previous.access_token);
        }
        next
    }
}

/// Listing row without the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationSummary {
    pub id: RecordId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ExternalSystemType,
    pub api_url: String,
    pub token_type: String,
    pub has_token: bool,
}

impl From<&ExternalSystem> for IntegrationSummary {
    fn from(system: &ExternalSystem) -> Self {
        Self {
            id: system.id,
            name: system.name.clone(),
            kind: system.kind,
            api_url: system.api_url.clone(),
            token_type: system.token_type.clone(),
            has_token: !system.access_token.is_blank(),
        }
    }
}

impl ExternalSystem {
    /// Value for an `Authorization` header.
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}
