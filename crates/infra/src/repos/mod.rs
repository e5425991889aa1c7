mod event;
mod event_exception;
mod shared;
mod snapshot;

pub use event::{IEventRepo, InMemoryEventRepo};
pub use event_exception::{IEventExceptionRepo, InMemoryEventExceptionRepo, OverrideInput};
pub use snapshot::Snapshot;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub events: Arc<dyn IEventRepo>,
    pub event_exceptions: Arc<dyn IEventExceptionRepo>,
}

impl Repos {
    pub fn create_inmemory() -> Self {
        Self {
            events: Arc::new(InMemoryEventRepo::new()),
            event_exceptions: Arc::new(InMemoryEventExceptionRepo::new()),
        }
    }

    /// Writes every record of the snapshot into the repos
    pub async fn seed(&self, snapshot: &Snapshot) -> anyhow::Result<()> {
        for event in &snapshot.events {
            self.events.upsert(event).await?;
        }
        for exception in &snapshot.exceptions {
            self.event_exceptions.save(exception).await?;
        }
        info!(
            "Seeded repos with {} events and {} exceptions",
            snapshot.events.len(),
            snapshot.exceptions.len()
        );
        Ok(())
    }
}
