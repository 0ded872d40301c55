//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Numeric identifier of a record, unique within its collection.
///
/// Serialized as a bare JSON number so persisted collections keep the shape
/// the dashboard has always written.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for RecordId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for RecordId {
    type Err = core::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Monotonic id source scoped to one store.
///
/// Seeded past the highest id already present so that records restored from
/// durable storage never collide with freshly generated ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Start after the largest id in `existing`.
    pub fn seeded<I>(existing: I) -> Self
    where
        I: IntoIterator<Item = RecordId>,
    {
        let max = existing.into_iter().map(RecordId::get).max().unwrap_or(0);
        Self {
            next: max.saturating_add(1),
        }
    }

    /// Id the next call to `next_id` will return.
    pub fn peek(&self) -> RecordId {
        RecordId(self.next)
    }

    /// Hand out the next id. Ids are always > 0.
    pub fn next_id(&mut self) -> RecordId {
        let id = RecordId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }

    /// Make sure a later `next_id` cannot return `id` or anything below it.
    pub fn observe(&mut self, id: RecordId) {
        if id.0 >= self.next {
            self.next = id.0.saturating_add(1);
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifier of an authenticated session (one per login).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Uses UUIDv7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for SessionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
