//! Record table controller: the add/edit/delete cycle each tab repeats.

use serde::Serialize;

use infoco_core::{DomainError, DomainResult, Draft, Record, RecordId, RecordRules};

use crate::EntityStore;

/// Outcome of [`RecordTable::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "id", rename_all = "camelCase")]
pub enum Submitted {
    Created(RecordId),
    Updated(RecordId),
}

impl Submitted {
    pub fn id(self) -> RecordId {
        match self {
            Submitted::Created(id) | Submitted::Updated(id) => id,
        }
    }
}

/// Controller bound to one collection.
pub struct RecordTable<'a, T: Record> {
    store: &'a mut EntityStore<T>,
}

impl<'a, T: Record> RecordTable<'a, T> {
    pub fn new(store: &'a mut EntityStore<T>) -> Self {
        Self { store }
    }

    /// Live collection in storage order.
    pub fn list(&self) -> &[T] {
        self.store.list()
    }

    /// Draft for "add": no id, possibly pre-filled.
    pub fn begin_create(&self) -> T::Draft {
        T::new_draft()
    }

    /// Draft for "edit", seeded from the stored record.
    pub fn begin_edit(&self, id: RecordId) -> DomainResult<T::Draft> {
        self.store
            .get(id)
            .map(Record::to_draft)
            .ok_or(DomainError::not_found(T::COLLECTION, id))
    }

    /// Create (draft without id) or overwrite in place (draft with id).
    ///
    /// Fails without touching the store when required fields are missing or
    /// invalid, when the id is unknown, or when a unique key is taken.
    pub fn submit(&mut self, draft: T::Draft) -> DomainResult<Submitted> {
        match draft.id() {
            None => self
                .store
                .insert_with(|id| draft.into_record(id))
                .map(Submitted::Created),
            Some(id) => {
                let previous = self
                    .store
                    .get(id)
                    .ok_or(DomainError::not_found(T::COLLECTION, id))?;
                let next = draft.into_record(id)?;
                let merged = T::merge_update(previous, next);
                self.store.replace(merged)?;
                Ok(Submitted::Updated(id))
            }
        }
    }

    /// Idempotent delete.
    pub fn remove(&mut self, id: RecordId) -> Option<T> {
        self.store.remove(id)
    }
}

impl<T: Record> EntityStore<T> {
    pub fn table(&mut self) -> RecordTable<'_, T> {
        RecordTable::new(self)
    }
}
