use super::{IEventExceptionRepo, OverrideInput};
use crate::repos::shared::inmemory_repo::*;
use alliance_calendar_domain::{format_date, EventException, ExceptionAction, ID};
use chrono::NaiveDate;

pub struct InMemoryEventExceptionRepo {
    exceptions: std::sync::Mutex<Vec<EventException>>,
}

impl InMemoryEventExceptionRepo {
    pub fn new() -> Self {
        Self {
            exceptions: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Writes `exception` over the row for the same occurrence. With
    /// `keep_id` the replaced row keeps its id.
    fn upsert_by_key(&self, mut exception: EventException, keep_id: bool) -> EventException {
        let key = exception.key().ok();
        let event_id = exception.event_id.clone();
        let occurrence_date = exception.occurrence_date.clone();
        // Unparseable dates can only match their exact wire value
        let same_occurrence = move |existing: &EventException| match (&key, existing.key()) {
            (Some(key), Ok(existing_key)) => *key == existing_key,
            _ => existing.event_id == event_id && existing.occurrence_date == occurrence_date,
        };
        if keep_id {
            if let Some(existing) = find_by(&self.exceptions, |e| same_occurrence(e)).first() {
                exception.id = existing.id.clone();
            }
        }
        upsert_by(&exception, &self.exceptions, same_occurrence);
        exception
    }
}

#[async_trait::async_trait]
impl IEventExceptionRepo for InMemoryEventExceptionRepo {
    async fn save(&self, e: &EventException) -> anyhow::Result<()> {
        self.upsert_by_key(e.clone(), false);
        Ok(())
    }

    async fn find_by_events(&self, event_ids: &[ID]) -> anyhow::Result<Vec<EventException>> {
        let res = find_by(&self.exceptions, |e| event_ids.contains(&e.event_id));
        Ok(res)
    }

    async fn upsert_skip(
        &self,
        event_id: &ID,
        occurrence_date: &NaiveDate,
    ) -> anyhow::Result<EventException> {
        let exception = EventException::skip(event_id, occurrence_date);
        Ok(self.upsert_by_key(exception, true))
    }

    async fn upsert_override(&self, input: OverrideInput) -> anyhow::Result<EventException> {
        let exception = EventException {
            id: Default::default(),
            event_id: input.event_id,
            occurrence_date: format_date(&input.occurrence_date),
            action: ExceptionAction::Override,
            new_date: Some(format_date(&input.new_date)),
            new_start_time: input.new_start_time,
            new_end_time: input.new_end_time,
            new_title: input.new_title,
            new_description: input.new_description,
        };
        Ok(self.upsert_by_key(exception, true))
    }

    async fn delete_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<EventException>> {
        let res = find_and_delete_by(&self.exceptions, |e| e.event_id == *event_id);
        Ok(res)
    }
}
