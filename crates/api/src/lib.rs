mod error;
mod event;
mod shared;

pub use error::CalendarError;
pub use event::*;
pub use shared::usecase::{execute, UseCase};
