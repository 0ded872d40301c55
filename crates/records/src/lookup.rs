//! Display-time resolution of foreign ids.
//!
//! Dangling references are expected (there is no cascade on delete) and
//! resolve to a fixed sentinel instead of failing.

use infoco_core::{Record, RecordId};

/// Shown for a foreign id that matches nothing (employees, authors, assignees).
pub const UNKNOWN: &str = "Desconhecido";

/// Shown for an optional reference that is absent or dangling (suppliers).
pub const NOT_AVAILABLE: &str = "N/D";

/// Record with a human-readable name.
pub trait Named: Record {
    fn display_name(&self) -> &str;
}

pub fn resolve_name<'a, T: Named>(
    records: &'a [T],
    id: Option<RecordId>,
    sentinel: &'static str,
) -> &'a str {
    resolve_with(records, id, T::display_name, sentinel)
}

pub fn resolve_with<'a, T, F>(
    records: &'a [T],
    id: Option<RecordId>,
    name: F,
    sentinel: &'static str,
) -> &'a str
where
    T: Record,
    F: Fn(&'a T) -> &'a str,
{
    id.and_then(|id| records.iter().find(|r| r.id() == id))
        .map(name)
        .unwrap_or(sentinel)
}
