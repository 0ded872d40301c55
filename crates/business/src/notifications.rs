use chrono::{DateTime, NaiveDate, Utc};

use infoco_core::{Collection, DomainResult, RecordId, RecordRules};
use infoco_records::EntityStore;

labelled_enum! {
    pub enum NotificationKind {
        System => "system",
        Reminder => "reminder",
    }
}

infoco_core::record! {
    /// Bell-menu entry. `link` names the view it opens.
    pub struct Notification / NotificationDraft in Collection::Notifications {
        req #[serde(rename = "type")] kind: NotificationKind,
        req title: String,
        req description: String,
        opt date: DateTime<Utc>,
        opt event_date: Option<NaiveDate>,
        opt read: bool,
        opt link: Option<String>,
    }
    defaults { kind: Some(NotificationKind::System) }
}

impl RecordRules for Notification {
    const NEWEST_FIRST: bool = true;

    fn on_insert(&mut self) {
        self.date = Utc::now();
        self.read = false;
    }

    fn merge_update(previous: &Self, mut next: Self) -> Self {
        next.date = previous.date;
        next
    }
}

impl Notification {
    /// Copies sorted by creation time, newest first.
    pub fn newest_first(notifications: &[Notification]) -> Vec<&Notification> {
        let mut sorted: Vec<_> = notifications.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }

    pub fn unread_count(notifications: &[Notification]) -> usize {
        notifications.iter().filter(|n| !n.read).count()
    }

    pub fn mark_read(store: &mut EntityStore<Notification>, id: RecordId) -> DomainResult<()> {
        store.modify(id, |n| n.read = true).map(|_| ())
    }

    pub fn mark_all_read(store: &mut EntityStore<Notification>) {
        store.for_each_mut(|n| n.read = true);
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use infoco_core::Record;

    use super::*;

    fn draft(title: &str) -> NotificationDraft {
        let mut d = Notification::new_draft();
        d.title = Some(title.into());
        d.description = Some("Contrato vence em breve".into());
        d.read = true;
        d
    }

    #[test]
    fn new_notifications_are_unread_and_go_first() {
        let mut store = EntityStore::<Notification>::new();
        let a = store.table().submit(draft("a")).unwrap().id();
        let b = store.table().submit(draft("b")).unwrap().id();

        assert_eq!(store.list()[0].id, b);
        assert_eq!(store.list()[1].id, a);
        assert_eq!(Notification::unread_count(store.list()), 2);
        assert!(store.list()[0].date > DateTime::<Utc>::default());
    }

    #[test]
    fn read_flags_can_be_set_one_by_one_or_all_at_once() {
        let mut store = EntityStore::<Notification>::new();
        let a = store.table().submit(draft("a")).unwrap().id();
        store.table().submit(draft("b")).unwrap();

        Notification::mark_read(&mut store, a).unwrap();
        assert_eq!(Notification::unread_count(store.list()), 1);
        assert!(Notification::mark_read(&mut store, RecordId::new(99)).is_err());

        Notification::mark_all_read(&mut store);
        assert_eq!(Notification::unread_count(store.list()), 0);
    }

    #[test]
    fn sorting_uses_creation_time() {
        let now = Utc::now();
        let make = |id, offset| Notification {
            id: RecordId::new(id),
            kind: NotificationKind::Reminder,
            title: String::new(),
            description: String::new(),
            date: now - Duration::hours(offset),
            event_date: None,
            read: false,
            link: None,
        };
        let list = vec![make(1, 5), make(2, 1), make(3, 3)];
        let ids: Vec<_> = Notification::newest_first(&list).iter().map(|n| n.id.get()).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }
}
