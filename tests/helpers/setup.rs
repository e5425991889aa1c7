use alliance_calendar_infra::{AllianceContext, FixedSys, Snapshot};
use chrono::NaiveDate;
use std::sync::Arc;

/// In-memory context seeded with the given json export, with the clock
/// stuck on `today`
pub async fn spawn_context(snapshot: &str, today: NaiveDate) -> AllianceContext {
    let ctx = AllianceContext {
        sys: Arc::new(FixedSys { today }),
        ..AllianceContext::create_inmemory()
    };
    let snapshot = Snapshot::from_json(snapshot).expect("Expected a valid snapshot");
    ctx.repos
        .seed(&snapshot)
        .await
        .expect("Expected to seed the repos");
    ctx
}
