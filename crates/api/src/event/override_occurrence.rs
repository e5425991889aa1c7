use super::occurrence_of_event;
use crate::error::CalendarError;
use crate::shared::usecase::{execute, UseCase};
use alliance_calendar_domain::{parse_local_date, parse_local_time, EventException, ID};
use alliance_calendar_infra::{AllianceContext, OverrideInput};

fn handle_error(e: UseCaseErrors) -> CalendarError {
    match e {
        UseCaseErrors::InvalidDate(date) => CalendarError::BadClientData(format!(
            "The provided date: {}, is not a valid YYYY-MM-DD date",
            date
        )),
        UseCaseErrors::InvalidTime(time) => CalendarError::BadClientData(format!(
            "The provided time: {}, is not a valid HH:mm time",
            time
        )),
        UseCaseErrors::EmptyTitle => {
            CalendarError::BadClientData("The occurrence title can not be empty".into())
        }
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

pub async fn override_occurrence(
    usecase: OverrideOccurrenceUseCase,
    ctx: &AllianceContext,
) -> Result<EventException, CalendarError> {
    execute(usecase, ctx).await.map_err(handle_error)
}

/// Moves and / or edits a single occurrence of an event. The occurrence is
/// always addressed by the date the rule produces, also after it has been
/// moved before.
#[derive(Debug)]
pub struct OverrideOccurrenceUseCase {
    pub owner_scope: ID,
    pub event_id: ID,
    pub occurrence_date: String,
    /// Defaults to `occurrence_date`, which edits the occurrence in place
    pub new_date: Option<String>,
    pub new_start_time: Option<String>,
    pub new_end_time: Option<String>,
    pub new_title: Option<String>,
    pub new_description: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseErrors {
    InvalidDate(String),
    InvalidTime(String),
    EmptyTitle,
    NotFound(ID),
    NotAnOccurrence(String),
    StorageError,
}

impl OverrideOccurrenceUseCase {
    fn validate_time(time: &Option<String>) -> Result<(), UseCaseErrors> {
        match time {
            Some(time) => parse_local_time(time)
                .map(|_| ())
                .map_err(|_| UseCaseErrors::InvalidTime(time.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for OverrideOccurrenceUseCase {
    type Response = EventException;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "OverrideOccurrence";

    async fn execute(&mut self, ctx: &AllianceContext) -> Result<Self::Response, Self::Errors> {
        let occurrence_date = parse_local_date(&self.occurrence_date)
            .map_err(|_| UseCaseErrors::InvalidDate(self.occurrence_date.clone()))?;
        let new_date = match &self.new_date {
            Some(date) => {
                parse_local_date(date).map_err(|_| UseCaseErrors::InvalidDate(date.clone()))?
            }
            None => occurrence_date,
        };
        Self::validate_time(&self.new_start_time)?;
        Self::validate_time(&self.new_end_time)?;
        let new_title = match &self.new_title {
            Some(title) if title.trim().is_empty() => return Err(UseCaseErrors::EmptyTitle),
            Some(title) => Some(title.trim().to_string()),
            None => None,
        };

        let event = match ctx.repos.events.find(&self.event_id).await {
            Some(event) if event.owner_scope == self.owner_scope => event,
            _ => return Err(UseCaseErrors::NotFound(self.event_id.clone())),
        };
        if !occurrence_of_event(&event, occurrence_date) {
            return Err(UseCaseErrors::NotAnOccurrence(self.occurrence_date.clone()));
        }

        let input = OverrideInput {
            event_id: event.id.clone(),
            occurrence_date,
            new_date,
            new_start_time: self.new_start_time.clone(),
            new_end_time: self.new_end_time.clone(),
            new_title,
            new_description: self.new_description.clone(),
        };
        ctx.repos
            .event_exceptions
            .upsert_override(input)
            .await
            .map_err(|_| UseCaseErrors::StorageError)
    }
}
