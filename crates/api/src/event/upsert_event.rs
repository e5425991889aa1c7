use crate::error::CalendarError;
use crate::shared::usecase::{execute, UseCase};
use alliance_calendar_domain::{
    format_date, parse_local_date, parse_local_time, BaseEvent, Frequency, ID,
};
use alliance_calendar_infra::AllianceContext;

fn handle_error(e: UseCaseErrors) -> CalendarError {
    match e {
        UseCaseErrors::EmptyTitle => {
            CalendarError::BadClientData("The event title can not be empty".into())
        }
        UseCaseErrors::InvalidStartDate(date) => CalendarError::BadClientData(format!(
            "The provided start date: {}, is not a valid YYYY-MM-DD date",
            date
        )),
        UseCaseErrors::InvalidTime(time) => CalendarError::BadClientData(format!(
            "The provided time: {}, is not a valid HH:mm time",
            time
        )),
        UseCaseErrors::InvalidDaysOfWeek(days) => CalendarError::BadClientData(format!(
            "The provided days of week: {:?}, must all be between 0 (Sunday) and 6 (Saturday)",
            days
        )),
        UseCaseErrors::NotFound(event_id) => CalendarError::NotFound(format!(
            "The calendar event with id: {}, was not found.",
            event_id
        )),
        UseCaseErrors::StorageError => CalendarError::InternalError,
    }
}

pub async fn upsert_event(
    usecase: UpsertEventUseCase,
    ctx: &AllianceContext,
) -> Result<BaseEvent, CalendarError> {
    execute(usecase, ctx).await.map_err(handle_error)
}

/// Creates a new event, or replaces the event with `event_id` when given
#[derive(Debug, Clone)]
pub struct UpsertEventUseCase {
    pub owner_scope: ID,
    pub event_id: Option<ID>,
    pub title: String,
    pub description: Option<String>,
    pub start_date: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub frequency: Frequency,
    pub days_of_week: Option<Vec<i64>>,
    pub visibility: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseErrors {
    EmptyTitle,
    InvalidStartDate(String),
    InvalidTime(String),
    InvalidDaysOfWeek(Vec<i64>),
    NotFound(ID),
    StorageError,
}

impl UpsertEventUseCase {
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
impl UseCase for UpsertEventUseCase {
    type Response = BaseEvent;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "UpsertEvent";

    async fn execute(&mut self, ctx: &AllianceContext) -> Result<Self::Response, Self::Errors> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(UseCaseErrors::EmptyTitle);
        }
        let start_date = parse_local_date(&self.start_date)
            .map_err(|_| UseCaseErrors::InvalidStartDate(self.start_date.clone()))?;
        Self::validate_time(&self.start_time)?;
        Self::validate_time(&self.end_time)?;
        if let Some(days) = &self.days_of_week {
            if days.iter().any(|day| !(0..=6).contains(day)) {
                return Err(UseCaseErrors::InvalidDaysOfWeek(days.clone()));
            }
        }

        let id = match &self.event_id {
            Some(event_id) => match ctx.repos.events.find(event_id).await {
                Some(existing) if existing.owner_scope != self.owner_scope => {
                    return Err(UseCaseErrors::NotFound(event_id.clone()))
                }
                _ => event_id.clone(),
            },
            None => ID::new(),
        };

        let event = BaseEvent {
            id,
            title: title.to_string(),
            description: self.description.clone(),
            start_date: format_date(&start_date),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            frequency: self.frequency,
            days_of_week: self.days_of_week.clone(),
            visibility: self.visibility.clone(),
            owner_scope: self.owner_scope.clone(),
        };

        ctx.repos
            .events
            .upsert(&event)
            .await
            .map_err(|_| UseCaseErrors::StorageError)?;

        Ok(event)
    }
}
