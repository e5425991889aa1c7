mod delete_event;
mod get_occurrences;
mod override_occurrence;
mod skip_occurrence;
mod upsert_event;

use alliance_calendar_domain::{BaseEvent, DateSpan};
use chrono::NaiveDate;
pub use delete_event::{delete_event, DeleteEventUseCase};
pub use get_occurrences::{get_occurrences, GetOccurrencesResponse, GetOccurrencesUseCase};
pub use override_occurrence::{override_occurrence, OverrideOccurrenceUseCase};
pub use skip_occurrence::{skip_occurrence, SkipOccurrenceUseCase};
pub use upsert_event::{upsert_event, UpsertEventUseCase};

/// Whether the recurrence rule of `event` produces `date`. Exceptions are
/// only accepted for such dates.
fn occurrence_of_event(event: &BaseEvent, date: NaiveDate) -> bool {
    event.expand(&DateSpan::new(date, date)).contains(&date)
}
