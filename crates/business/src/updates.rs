use chrono::{DateTime, Utc};

use infoco_core::{Collection, DomainError, DomainResult, RecordId, RecordRules};

const MAX_CONTENT_CHARS: usize = 5_000;

infoco_core::record! {
    /// Post on the internal updates feed. `author_id` is a user account id.
    pub struct UpdatePost / UpdatePostDraft in Collection::UpdatePosts {
        req author_id: RecordId,
        req content: String,
        opt created_at: DateTime<Utc>,
    }
}

impl RecordRules for UpdatePost {
    const NEWEST_FIRST: bool = true;

    fn normalize(&mut self) {
        self.content = self.content.trim().to_string();
    }

    fn on_insert(&mut self) {
        self.created_at = Utc::now();
    }

    fn validate(&self) -> DomainResult<()> {
        if self.content.chars().count() > MAX_CONTENT_CHARS {
            return Err(DomainError::invalid_field("content"));
        }
        Ok(())
    }

    fn merge_update(previous: &Self, mut next: Self) -> Self {
        next.author_id = previous.author_id;
        next.created_at = previous.created_at;
        next
    }
}

#[cfg(test)]
mod tests {
    use infoco_records::EntityStore;

    use super::*;

    fn post(author: u64, content: &str) -> UpdatePostDraft {
        UpdatePostDraft {
            author_id: Some(RecordId::new(author)),
            content: Some(content.into()),
            ..Default::default()
        }
    }

    #[test]
    fn edits_keep_author_and_timestamp() {
        let mut store = EntityStore::<UpdatePost>::new();
        let id = store.table().submit(post(101, "Reunião às 14h")).unwrap().id();
        let created = store.get(id).unwrap().created_at;

        let mut edit = store.table().begin_edit(id).unwrap();
        edit.content = Some("Reunião às 15h".into());
        edit.author_id = Some(RecordId::new(999));
        edit.created_at = DateTime::<Utc>::default();
        store.table().submit(edit).unwrap();

        let stored = store.get(id).unwrap();
        assert_eq!(stored.content, "Reunião às 15h");
        assert_eq!(stored.author_id, RecordId::new(101));
        assert_eq!(stored.created_at, created);
    }

    #[test]
    fn newest_post_is_listed_first() {
        let mut store = EntityStore::<UpdatePost>::new();
        store.table().submit(post(101, "primeiro")).unwrap();
        let second = store.table().submit(post(102, "segundo")).unwrap().id();
        assert_eq!(store.list()[0].id, second);
    }
}
