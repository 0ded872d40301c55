//! Persisted key layout.
//!
//! Business collections use [`Collection::storage_key`](infoco_core::Collection::storage_key);
//! the keys below hold everything else.

/// Active principal.
pub const SESSION: &str = "infoco_user";
pub const PERMISSIONS: &str = "infoco_permissions";
/// Municipality → folder → files.
pub const DOCUMENTS: &str = "infoco_documents";
/// Municipality → payment notes.
pub const PAYMENT_NOTES: &str = "infoco_payment_notes";
pub const LOGIN_IMAGE: &str = "infoco_login_image";

const AVATAR_PREFIX: &str = "infoco_user_pfp_";

/// Per-email avatar key; survives logout.
pub fn avatar(email: &str) -> String {
    format!("{AVATAR_PREFIX}{}", email.trim().to_lowercase())
}
