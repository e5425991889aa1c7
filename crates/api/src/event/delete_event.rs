use crate::error::CalendarError;
use crate::shared::usecase::{execute, UseCase};
use alliance_calendar_domain::{BaseEvent, ID};
use alliance_calendar_infra::AllianceContext;
use tracing::warn;

fn handle_error(e: UseCaseErrors) -> CalendarError {
    match e {
        UseCaseErrors::NotFound(event_id) => CalendarError::NotFound(format!(
            "The calendar event with id: {}, was not found.",
            event_id
        )),
    }
}

pub async fn delete_event(
    usecase: DeleteEventUseCase,
    ctx: &AllianceContext,
) -> Result<BaseEvent, CalendarError> {
    execute(usecase, ctx).await.map_err(handle_error)
}

#[derive(Debug)]
pub struct DeleteEventUseCase {
    pub owner_scope: ID,
    pub event_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseErrors {
    NotFound(ID),
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteEventUseCase {
    type Response = BaseEvent;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "DeleteEvent";

    async fn execute(&mut self, ctx: &AllianceContext) -> Result<Self::Response, Self::Errors> {
        let e = ctx.repos.events.find(&self.event_id).await;
        match e {
            Some(event) if event.owner_scope == self.owner_scope => {
                ctx.repos.events.delete(&event.id).await;

                // Exceptions of a deleted series would only dangle
                if let Err(e) = ctx.repos.event_exceptions.delete_by_event(&event.id).await {
                    warn!("Unable to delete exceptions of event {}: {:?}", event.id, e);
                }

                Ok(event)
            }
            _ => Err(UseCaseErrors::NotFound(self.event_id.clone())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alliance_calendar_domain::BaseEvent;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn deletes_event_and_its_exceptions() {
        let ctx = AllianceContext::create_inmemory();
        let owner_scope = ID::new();
        let event = BaseEvent::new(&owner_scope, "Rally", &NaiveDate::from_ymd(2024, 1, 1));
        ctx.repos.events.upsert(&event).await.unwrap();
        ctx.repos
            .event_exceptions
            .upsert_skip(&event.id, &NaiveDate::from_ymd(2024, 1, 1))
            .await
            .unwrap();

        let usecase = DeleteEventUseCase {
            owner_scope: owner_scope.clone(),
            event_id: event.id.clone(),
        };
        let deleted = execute(usecase, &ctx).await.unwrap();
        assert_eq!(deleted, event);

        assert!(ctx.repos.events.find(&event.id).await.is_none());
        assert!(ctx
            .repos
            .event_exceptions
            .find_by_events(&[event.id.clone()])
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn rejects_unknown_or_foreign_events() {
        let ctx = AllianceContext::create_inmemory();
        let event = BaseEvent::new(&ID::new(), "Rally", &NaiveDate::from_ymd(2024, 1, 1));
        ctx.repos.events.upsert(&event).await.unwrap();

        let usecase = DeleteEventUseCase {
            owner_scope: ID::new(),
            event_id: event.id.clone(),
        };
        let res = delete_event(usecase, &ctx).await;
        assert!(matches!(res, Err(CalendarError::NotFound(_))));
        assert!(ctx.repos.events.find(&event.id).await.is_some());

        let missing = ID::new();
        let usecase = DeleteEventUseCase {
            owner_scope: event.owner_scope.clone(),
            event_id: missing.clone(),
        };
        assert_eq!(execute(usecase, &ctx).await, Err(UseCaseErrors::NotFound(missing)));
    }
}
