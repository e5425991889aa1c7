use super::occurrence_of_event;
use crate::error::CalendarError;
use crate::shared::usecase::{execute, UseCase};
use alliance_calendar_domain::{parse_local_date, EventException, ID};
use alliance_calendar_infra::AllianceContext;

fn handle_error(e: UseCaseErrors) -> CalendarError {
    match e {
        UseCaseErrors::InvalidDate(date) => CalendarError::BadClientData(format!(
            "The provided occurrence date: {}, is not a valid YYYY-MM-DD date",
            date
        )),
        UseCaseErrors::NotFound(event_id) => CalendarError::NotFound(format!(
            "The calendar event with id: {}, was not found.",
            event_id
        )),
        UseCaseErrors::NotAnOccurrence(date) => CalendarError::BadClientData(format!(
            "The event does not occur on: {}",
            date
        )),
        UseCaseErrors::StorageError => CalendarError::InternalError,
    }
}

pub async fn skip_occurrence(
    usecase: SkipOccurrenceUseCase,
    ctx: &AllianceContext,
) -> Result<EventException, CalendarError> {
    execute(usecase, ctx).await.map_err(handle_error)
}

/// Hides a single occurrence of a recurring event
#[derive(Debug)]
pub struct SkipOccurrenceUseCase {
    pub owner_scope: ID,
    pub event_id: ID,
    pub occurrence_date: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseErrors {
    InvalidDate(String),
    NotFound(ID),
    NotAnOccurrence(String),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SkipOccurrenceUseCase {
    type Response = EventException;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "SkipOccurrence";

    async fn execute(&mut self, ctx: &AllianceContext) -> Result<Self::Response, Self::Errors> {
        let occurrence_date = parse_local_date(&self.occurrence_date)
            .map_err(|_| UseCaseErrors::InvalidDate(self.occurrence_date.clone()))?;

        let event = match ctx.repos.events.find(&self.event_id).await {
            Some(event) if event.owner_scope == self.owner_scope => event,
            _ => return Err(UseCaseErrors::NotFound(self.event_id.clone())),
        };
        if !occurrence_of_event(&event, occurrence_date) {
            return Err(UseCaseErrors::NotAnOccurrence(self.occurrence_date.clone()));
        }

        ctx.repos
            .event_exceptions
            .upsert_skip(&event.id, &occurrence_date)
            .await
            .map_err(|_| UseCaseErrors::StorageError)
    }
}
