//! `infoco-core`: domain foundation shared by every dashboard crate.
//!
//! Pure primitives only: record identity, the collection registry, the
//! record/draft contract and the domain error model. No storage or transport.

pub mod collection;
pub mod error;
pub mod id;
pub mod record;

pub use collection::Collection;
pub use error::{DomainError, DomainResult};
pub use id::{IdGenerator, RecordId, SessionId};
pub use record::{Draft, Record, RecordRules, Required};
