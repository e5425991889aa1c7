use super::IEventRepo;
use crate::repos::shared::inmemory_repo::*;
use alliance_calendar_domain::{BaseEvent, ID};

pub struct InMemoryEventRepo {
    events: std::sync::Mutex<Vec<BaseEvent>>,
}

impl InMemoryEventRepo {
    pub fn new() -> Self {
        Self {
            events: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IEventRepo for InMemoryEventRepo {
    async fn upsert(&self, e: &BaseEvent) -> anyhow::Result<()> {
        upsert(e, &self.events);
        Ok(())
    }

    async fn find(&self, event_id: &ID) -> Option<BaseEvent> {
        find(event_id, &self.events)
    }

    async fn list_visible(&self, owner_scope: &ID) -> anyhow::Result<Vec<BaseEvent>> {
        let res = find_by(&self.events, |event| event.owner_scope == *owner_scope);
        Ok(res)
    }

    async fn delete(&self, event_id: &ID) -> Option<BaseEvent> {
        delete(event_id, &self.events)
    }
}
