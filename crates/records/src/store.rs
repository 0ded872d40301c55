//! Insertion-ordered keyed collection.

use infoco_core::{DomainError, DomainResult, IdGenerator, Record, RecordId, RecordRules};

/// Every record of one collection, in storage order.
///
/// Ids come from a counter scoped to this store, seeded past the largest id
/// already present. Writes are validated before anything is changed, so a
/// failed write leaves the store as it was.
#[derive(Debug, Clone)]
pub struct EntityStore<T: Record> {
    records: Vec<T>,
    ids: IdGenerator,
}

impl<T: Record> EntityStore<T> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            ids: IdGenerator::new(),
        }
    }

    /// Adopt records loaded from storage, keeping their order and ids.
    pub fn from_records(records: Vec<T>) -> Self {
        let ids = IdGenerator::seeded(records.iter().map(Record::id));
        Self { records, ids }
    }

    pub fn list(&self) -> &[T] {
        &self.records
    }

    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Insert a record built for the next id.
    ///
    /// The id is only consumed when the record is accepted.
    pub fn insert_with<F>(&mut self, build: F) -> DomainResult<RecordId>
    where
        F: FnOnce(RecordId) -> DomainResult<T>,
    {
        let id = self.ids.peek();
        let mut record = build(id)?;
        if record.id() != id {
            return Err(DomainError::invariant("inserted record must carry the generated id"));
        }
        record.on_insert();
        record.normalize();
        record.validate()?;
        self.ensure_unique(&record, None)?;

        self.ids.next_id();
        if T::NEWEST_FIRST {
            self.records.insert(0, record);
        } else {
            self.records.push(record);
        }
        tracing::debug!(collection = %T::COLLECTION, %id, "record inserted");
        Ok(id)
    }

    /// Overwrite the record with the same id, in place.
    pub fn replace(&mut self, mut record: T) -> DomainResult<()> {
        let id = record.id();
        let pos = self.position(id)?;
        record.normalize();
        record.validate()?;
        self.ensure_unique(&record, Some(id))?;

        self.records[pos] = record;
        tracing::debug!(collection = %T::COLLECTION, %id, "record updated");
        Ok(())
    }

    /// Apply `change` to a copy of the record and write it back if it is
    /// still valid.
    pub fn modify<F>(&mut self, id: RecordId, change: F) -> DomainResult<&T>
    where
        F: FnOnce(&mut T),
    {
        let pos = self.position(id)?;
        let mut next = self.records[pos].clone();
        change(&mut next);
        if next.id() != id {
            return Err(DomainError::invariant("record id is immutable"));
        }
        next.normalize();
        next.validate()?;
        self.ensure_unique(&next, Some(id))?;

        self.records[pos] = next;
        tracing::debug!(collection = %T::COLLECTION, %id, "record modified");
        Ok(&self.records[pos])
    }

    /// Apply `change` to every record; nothing is validated.
    pub fn for_each_mut<F>(&mut self, change: F)
    where
        F: FnMut(&mut T),
    {
        self.records.iter_mut().for_each(change);
    }

    /// Delete by id. Absent ids are a no-op.
    pub fn remove(&mut self, id: RecordId) -> Option<T> {
        let pos = self.records.iter().position(|r| r.id() == id)?;
        tracing::debug!(collection = %T::COLLECTION, %id, "record removed");
        Some(self.records.remove(pos))
    }

    pub fn into_records(self) -> Vec<T> {
        self.records
    }

    fn position(&self, id: RecordId) -> DomainResult<usize> {
        self.records
            .iter()
            .position(|r| r.id() == id)
            .ok_or(DomainError::not_found(T::COLLECTION, id))
    }

    fn ensure_unique(&self, candidate: &T, except: Option<RecordId>) -> DomainResult<()> {
        let Some(key) = candidate.unique_key() else {
            return Ok(());
        };
        let taken = self
            .records
            .iter()
            .filter(|r| Some(r.id()) != except)
            .any(|r| r.unique_key().as_deref() == Some(key.as_str()));
        if taken {
            return Err(DomainError::conflict(format!(
                "{} '{key}' already exists",
                T::COLLECTION
            )));
        }
        Ok(())
    }
}

impl<T: Record> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use infoco_core::Draft;
    use proptest::prelude::*;

    use super::*;
    use crate::fixtures::{draft, Widget};

    fn store_with(codes: &[&str]) -> EntityStore<Widget> {
        let mut store = EntityStore::new();
        for code in codes {
            store
                .insert_with(|id| draft("w", code).into_record(id))
                .unwrap();
        }
        store
    }

    #[test]
    fn ids_continue_after_loaded_records() {
        let loaded = store_with(&["a", "b"]).into_records();
        let mut store = EntityStore::from_records(loaded);
        let id = store
            .insert_with(|id| draft("w", "c").into_record(id))
            .unwrap();
        assert_eq!(id, RecordId::new(3));
    }

    #[test]
    fn unique_keys_conflict_case_insensitively() {
        let mut store = store_with(&["abc"]);
        let err = store
            .insert_with(|id| draft("w", "ABC").into_record(id))
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn rejected_insert_does_not_consume_an_id() {
        let mut store = store_with(&["a"]);
        let mut bad = draft("w", "b");
        bad.weight = 5_000;
        assert!(store.insert_with(|id| bad.into_record(id)).is_err());

        let id = store
            .insert_with(|id| draft("w", "b").into_record(id))
            .unwrap();
        assert_eq!(id, RecordId::new(2));
    }

    #[test]
    fn modify_validates_before_writing() {
        let mut store = store_with(&["a"]);
        let id = store.list()[0].id;

        let err = store.modify(id, |w| w.weight = 9_999).unwrap_err();
        assert_eq!(err, DomainError::invalid_field("weight"));
        assert_eq!(store.list()[0].weight, 0);

        store.modify(id, |w| w.weight = 10).unwrap();
        assert_eq!(store.list()[0].weight, 10);
    }

    #[test]
    fn replace_of_a_missing_record_is_not_found() {
        let mut store = store_with(&[]);
        let ghost = draft("w", "x").into_record(RecordId::new(999)).unwrap();
        assert_eq!(
            store.replace(ghost),
            Err(DomainError::not_found(Widget::COLLECTION, RecordId::new(999)))
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 256, ..ProptestConfig::default() })]

        #[test]
        fn generated_ids_are_unique_and_positive(
            ops in prop::collection::vec((any::<bool>(), 0usize..8), 1..40),
        ) {
            let mut store: EntityStore<Widget> = EntityStore::new();
            for (n, (insert, pick)) in ops.into_iter().enumerate() {
                if insert || store.is_empty() {
                    let code = format!("c{n}");
                    store.insert_with(|id| draft("w", &code).into_record(id)).unwrap();
                } else {
                    let id = store.list()[pick % store.len()].id;
                    store.remove(id);
                }
                let mut ids: Vec<_> = store.list().iter().map(|w| w.id).collect();
                prop_assert!(ids.iter().all(|id| id.get() > 0));
                ids.sort();
                ids.dedup();
                prop_assert_eq!(ids.len(), store.len());
            }
        }

        #[test]
        fn remove_is_idempotent(count in 0usize..6, target in 0u64..10) {
            let codes: Vec<String> = (0..count).map(|i| format!("c{i}")).collect();
            let refs: Vec<&str> = codes.iter().map(String::as_str).collect();
            let mut store = store_with(&refs);

            let id = RecordId::new(target);
            store.remove(id);
            let once: Vec<_> = store.list().to_vec();
            prop_assert!(store.remove(id).is_none());
            prop_assert_eq!(store.list(), once.as_slice());
            prop_assert!(!store.contains(id));
        }
    }
}
