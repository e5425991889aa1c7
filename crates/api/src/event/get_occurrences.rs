use crate::error::CalendarError;
use crate::shared::usecase::{execute, UseCase};
use alliance_calendar_domain::{
    compute_occurrences, parse_local_date, DateSpan, Entity, OccurrencesByDay, ID,
};
use alliance_calendar_infra::AllianceContext;
use serde::Serialize;
use tracing::debug;

fn handle_error(e: UseCaseErrors) -> CalendarError {
    match e {
        UseCaseErrors::InvalidDate(date) => CalendarError::BadClientData(format!(
            "The provided range date: {}, is not a valid YYYY-MM-DD date",
            date
        )),
        UseCaseErrors::IncompleteRange => CalendarError::BadClientData(
            "Both a start and an end date must be provided, or none of them".into(),
        ),
        UseCaseErrors::InvalidSpan(limit) => CalendarError::BadClientData(format!(
            "The provided start and end dates were invalid. The span can be at most {} days.",
            limit
        )),
        UseCaseErrors::StorageError => CalendarError::InternalError,
    }
}

pub async fn get_occurrences(
    usecase: GetOccurrencesUseCase,
    ctx: &AllianceContext,
) -> Result<GetOccurrencesResponse, CalendarError> {
    execute(usecase, ctx).await.map_err(handle_error)
}

/// Renders the calendar of an owner scope. Without a range the month grid
/// around today is used.
#[derive(Debug)]
pub struct GetOccurrencesUseCase {
    pub owner_scope: ID,
    pub range_start: Option<String>,
    pub range_end: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetOccurrencesResponse {
    pub span: DateSpan,
    pub days: OccurrencesByDay,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseErrors {
    InvalidDate(String),
    IncompleteRange,
    InvalidSpan(i64),
    StorageError,
}

impl GetOccurrencesUseCase {
    fn span(&self, ctx: &AllianceContext) -> Result<DateSpan, UseCaseErrors> {
        let parse = |date: &String| {
            parse_local_date(date).map_err(|_| UseCaseErrors::InvalidDate(date.clone()))
        };
        match (&self.range_start, &self.range_end) {
            (Some(start), Some(end)) => Ok(DateSpan::new(parse(start)?, parse(end)?)),
            (None, None) => Ok(DateSpan::visible_month_grid(
                ctx.sys.today(),
                ctx.config.week_start,
            )),
            _ => Err(UseCaseErrors::IncompleteRange),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetOccurrencesUseCase {
    type Response = GetOccurrencesResponse;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "GetOccurrences";

    async fn execute(&mut self, ctx: &AllianceContext) -> Result<Self::Response, Self::Errors> {
        let span = self.span(ctx)?;
        if span.greater_than(ctx.config.occurrences_span_limit_days) {
            return Err(UseCaseErrors::InvalidSpan(
                ctx.config.occurrences_span_limit_days,
            ));
        }

        let events = ctx
            .repos
            .events
            .list_visible(&self.owner_scope)
            .await
            .map_err(|_| UseCaseErrors::StorageError)?;
        let event_ids = events.iter().map(|e| e.id().clone()).collect::<Vec<_>>();
        let exceptions = ctx
            .repos
            .event_exceptions
            .find_by_events(&event_ids)
            .await
            .map_err(|_| UseCaseErrors::StorageError)?;
        debug!(
            "Computing occurrences of {} events with {} exceptions",
            events.len(),
            exceptions.len()
        );

        let days = compute_occurrences(&events, &exceptions, &span);
        Ok(GetOccurrencesResponse { span, days })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alliance_calendar_domain::{BaseEvent, Frequency};
    use alliance_calendar_infra::{FixedSys, OverrideInput};
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd(y, m, d)
    }

    fn context_on(today: NaiveDate) -> AllianceContext {
        AllianceContext {
            sys: Arc::new(FixedSys { today }),
            ..AllianceContext::create_inmemory()
        }
    }

    fn usecase(owner_scope: &ID, start: &str, end: &str) -> GetOccurrencesUseCase {
        GetOccurrencesUseCase {
            owner_scope: owner_scope.clone(),
            range_start: Some(start.into()),
            range_end: Some(end.into()),
        }
    }

    #[tokio::test]
    async fn defaults_to_month_grid_of_today() {
        let ctx = context_on(date(2024, 2, 14));
        let owner_scope = ID::new();
        let mut event = BaseEvent::new(&owner_scope, "Standup", &date(2024, 1, 1));
        event.frequency = Frequency::Daily;
        ctx.repos.events.upsert(&event).await.unwrap();

        let usecase = GetOccurrencesUseCase {
            owner_scope,
            range_start: None,
            range_end: None,
        };
        let res = execute(usecase, &ctx).await.unwrap();
        assert_eq!(res.span, DateSpan::new(date(2024, 1, 28), date(2024, 3, 9)));
        assert_eq!(res.days.len(), 42);
    }

    #[tokio::test]
    async fn applies_stored_exceptions_of_owner_scope_only() {
        let ctx = context_on(date(2024, 1, 1));
        let owner_scope = ID::new();
        let mut weekly = BaseEvent::new(&owner_scope, "Raid", &date(2024, 1, 1));
        weekly.frequency = Frequency::Weekly;
        let foreign = BaseEvent::new(&ID::new(), "Other alliance", &date(2024, 1, 3));
        ctx.repos.events.upsert(&weekly).await.unwrap();
        ctx.repos.events.upsert(&foreign).await.unwrap();
        ctx.repos
            .event_exceptions
            .upsert_skip(&weekly.id, &date(2024, 1, 8))
            .await
            .unwrap();
        ctx.repos
            .event_exceptions
            .upsert_override(OverrideInput {
                event_id: weekly.id.clone(),
                occurrence_date: date(2024, 1, 15),
                new_date: date(2024, 1, 17),
                new_start_time: None,
                new_end_time: None,
                new_title: Some("Raid (moved)".into()),
                new_description: None,
            })
            .await
            .unwrap();

        let res = execute(usecase(&owner_scope, "2024-01-01", "2024-01-21"), &ctx)
            .await
            .unwrap();
        let days: Vec<_> = res.days.keys().cloned().collect();
        assert_eq!(days, vec![date(2024, 1, 1), date(2024, 1, 17)]);
        let moved = &res.days[&date(2024, 1, 17)][0];
        assert_eq!(moved.title, "Raid (moved)");
        assert_eq!(moved.occurrence_date, date(2024, 1, 15));
    }

    #[tokio::test]
    async fn empty_range_gives_no_occurrences() {
        let ctx = context_on(date(2024, 1, 1));
        let owner_scope = ID::new();
        let mut event = BaseEvent::new(&owner_scope, "Standup", &date(2024, 1, 1));
        event.frequency = Frequency::Daily;
        ctx.repos.events.upsert(&event).await.unwrap();

        let res = execute(usecase(&owner_scope, "2024-01-10", "2024-01-05"), &ctx)
            .await
            .unwrap();
        assert!(res.days.is_empty());
    }

    #[tokio::test]
    async fn rejects_invalid_ranges() {
        let ctx = context_on(date(2024, 1, 1));
        let owner_scope = ID::new();

        assert_eq!(
            execute(usecase(&owner_scope, "2024-01-01", "2024-06-01"), &ctx).await,
            Err(UseCaseErrors::InvalidSpan(62))
        );
        assert_eq!(
            execute(usecase(&owner_scope, "2024-01-01", "tomorrow"), &ctx).await,
            Err(UseCaseErrors::InvalidDate("tomorrow".into()))
        );

        let half_open = GetOccurrencesUseCase {
            owner_scope: owner_scope.clone(),
            range_start: Some("2024-01-01".into()),
            range_end: None,
        };
        let res = get_occurrences(half_open, &ctx).await;
        assert!(matches!(res, Err(CalendarError::BadClientData(_))));
    }
}
