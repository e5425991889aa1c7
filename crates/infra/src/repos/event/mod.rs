mod inmemory;

use alliance_calendar_domain::{BaseEvent, ID};
pub use inmemory::InMemoryEventRepo;

#[async_trait::async_trait]
pub trait IEventRepo: Send + Sync {
    /// Inserts the event or replaces the stored event with the same id
    async fn upsert(&self, e: &BaseEvent) -> anyhow::Result<()>;
    async fn find(&self, event_id: &ID) -> Option<BaseEvent>;
    /// Events of the given owner scope, in insertion order
    async fn list_visible(&self, owner_scope: &ID) -> anyhow::Result<Vec<BaseEvent>>;
    async fn delete(&self, event_id: &ID) -> Option<BaseEvent>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use alliance_calendar_domain::{Entity, Frequency};
    use chrono::NaiveDate;

    fn generate_default_event(owner_scope: &ID) -> BaseEvent {
        BaseEvent::new(owner_scope, "Fortress defense", &NaiveDate::from_ymd(2024, 1, 1))
    }

    #[tokio::test]
    async fn create_and_delete() {
        let repo = InMemoryEventRepo::new();
        let event = generate_default_event(&ID::new());

        // Insert
        assert!(repo.upsert(&event).await.is_ok());

        // Find
        let get_event_res = repo.find(&event.id).await.unwrap();
        assert_eq!(get_event_res, event);

        // Delete
        let delete_res = repo.delete(&event.id).await.expect("To delete event by id");
        assert_eq!(delete_res, event);

        // Find
        assert!(repo.find(&event.id).await.is_none());
        assert!(repo.delete(&event.id).await.is_none());
    }

    #[tokio::test]
    async fn upsert_replaces_existing_event() {
        let repo = InMemoryEventRepo::new();
        let mut event = generate_default_event(&ID::new());
        repo.upsert(&event).await.unwrap();

        event.title = "Fortress defense (moved)".into();
        event.frequency = Frequency::Weekly;
        repo.upsert(&event).await.unwrap();

        let events = repo.list_visible(&event.owner_scope).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Fortress defense (moved)");
        assert_eq!(events[0].frequency, Frequency::Weekly);
    }

    #[tokio::test]
    async fn lists_only_events_of_owner_scope() {
        let repo = InMemoryEventRepo::new();
        let alliance = ID::new();
        let other_alliance = ID::new();
        let event_1 = generate_default_event(&alliance);
        let event_2 = generate_default_event(&other_alliance);
        let event_3 = generate_default_event(&alliance);
        for event in &[&event_1, &event_2, &event_3] {
            repo.upsert(event).await.unwrap();
        }

        let visible = repo.list_visible(&alliance).await.unwrap();
        let ids: Vec<_> = visible.iter().map(|e| e.id().clone()).collect();
        assert_eq!(ids, vec![event_1.id.clone(), event_3.id.clone()]);
    }
}
