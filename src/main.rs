mod telemetry;

use alliance_calendar_api::{get_occurrences, GetOccurrencesUseCase};
use alliance_calendar_infra::setup_context;
use telemetry::{get_subscriber, init_subscriber};
use tracing::warn;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so that stdout only carries the rendered calendar
    let subscriber = get_subscriber("alliance_calendar".into(), "info".into());
    init_subscriber(subscriber)?;

    let context = setup_context().await?;

    let owner_scope = match &context.config.owner_scope {
        Some(owner_scope) => owner_scope.clone(),
        None => {
            warn!("CALENDAR_OWNER_SCOPE is not set, there is no calendar to render.");
            println!("{{}}");
            return Ok(());
        }
    };

    let usecase = GetOccurrencesUseCase {
        owner_scope,
        range_start: context.config.range_start.clone(),
        range_end: context.config.range_end.clone(),
    };
    let occurrences = get_occurrences(usecase, &context).await?;
    println!("{}", serde_json::to_string_pretty(&occurrences)?);

    Ok(())
}
