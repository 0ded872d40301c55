//! Size limits for uploaded content carried as data URLs.

use infoco_core::{DomainError, DomainResult};

const MIB: u64 = 1024 * 1024;

/// Login image, municipality coat of arms, avatars.
pub const MAX_IMAGE_BYTES: u64 = 2 * MIB;
/// Files in the municipality document library.
pub const MAX_DOCUMENT_BYTES: u64 = 5 * MIB;
/// Payment note attachments.
pub const MAX_PAYMENT_NOTE_BYTES: u64 = 10 * MIB;

/// Decoded size of a base64 data URL (`data:<mime>;base64,<payload>`), or of
/// the raw string when it is not one.
pub fn data_url_bytes(data_url: &str) -> u64 {
    match data_url.split_once(";base64,") {
        Some((_, payload)) => {
            let payload = payload.trim_end();
            let padding = payload.chars().rev().take_while(|c| *c == '=').count() as u64;
            (payload.len() as u64 * 3 / 4).saturating_sub(padding)
        }
        None => data_url.len() as u64,
    }
}

/// Reject content larger than `limit` bytes.
pub fn ensure_within(field: &'static str, declared: Option<u64>, data_url: &str, limit: u64) -> DomainResult<()> {
    let actual = declared.unwrap_or(0).max(data_url_bytes(data_url));
    if actual > limit {
        tracing::debug!(field, actual, limit, "upload too large");
        return Err(DomainError::invalid_field(field));
    }
    Ok(())
}

/// Images must be `data:image/...` URLs or links, within [`MAX_IMAGE_BYTES`].
pub fn ensure_image(field: &'static str, data_url: &str) -> DomainResult<()> {
    if data_url.starts_with("data:") && !data_url.starts_with("data:image/") {
        return Err(DomainError::invalid_field(field));
    }
    ensure_within(field, None, data_url, MAX_IMAGE_BYTES)
}
