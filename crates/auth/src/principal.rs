use serde::{Deserialize, Serialize};

use crate::Role;

/// The signed-in identity: a password-free projection of a credential record.
///
/// Exactly one principal is active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub department: String,
    /// Avatar image reference (data URL or link).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}
