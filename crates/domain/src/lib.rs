mod date;
mod date_span;
mod event;
mod event_exception;
mod occurrence;
mod shared;

pub use date::{
    days_between, format_date, parse_local_date, parse_local_time, weekday_index,
    InvalidDateError, InvalidTimeError,
};
pub use date_span::DateSpan;
pub use event::BaseEvent;
pub use event_exception::{EventException, ExceptionAction, OccurrenceKey};
pub use occurrence::{compute_occurrences, Occurrence, OccurrencesByDay};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use shared::recurrence::Frequency;
