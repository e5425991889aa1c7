mod inmemory;

use alliance_calendar_domain::{EventException, ID};
use chrono::NaiveDate;
pub use inmemory::InMemoryEventExceptionRepo;

/// Everything needed to move and edit one occurrence
#[derive(Debug, Clone)]
pub struct OverrideInput {
    pub event_id: ID,
    pub occurrence_date: NaiveDate,
    pub new_date: NaiveDate,
    pub new_start_time: Option<String>,
    pub new_end_time: Option<String>,
    pub new_title: Option<String>,
    pub new_description: Option<String>,
}

/// Store for `EventException`s. There is at most one exception per
/// `(event_id, occurrence_date)`, the upserts replace the existing row for
/// that pair and keep its id.
#[async_trait::async_trait]
pub trait IEventExceptionRepo: Send + Sync {
    /// Stores the exception as is, replacing any row with the same key
    async fn save(&self, e: &EventException) -> anyhow::Result<()>;
    async fn find_by_events(&self, event_ids: &[ID]) -> anyhow::Result<Vec<EventException>>;
    async fn upsert_skip(
        &self,
        event_id: &ID,
        occurrence_date: &NaiveDate,
    ) -> anyhow::Result<EventException>;
    async fn upsert_override(&self, input: OverrideInput) -> anyhow::Result<EventException>;
    async fn delete_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<EventException>>;
}
