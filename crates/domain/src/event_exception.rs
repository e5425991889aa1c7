use crate::{
    date::{parse_local_date, InvalidDateError},
    shared::entity::{Entity, ID},
};
use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExceptionAction {
    Skip,
    Override,
}

/// A deviation from one occurrence of a `BaseEvent`.
///
/// It is always looked up by the date the unmodified rule produced
/// (`occurrence_date`), never by where the occurrence is shown, so editing an
/// already moved occurrence again finds the same row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventException {
    pub id: ID,
    pub event_id: ID,
    pub occurrence_date: String,
    pub action: ExceptionAction,
    #[serde(default)]
    pub new_date: Option<String>,
    #[serde(default)]
    pub new_start_time: Option<String>,
    #[serde(default)]
    pub new_end_time: Option<String>,
    #[serde(default)]
    pub new_title: Option<String>,
    #[serde(default)]
    pub new_description: Option<String>,
}

/// Composite lookup key of an exception
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OccurrenceKey {
    pub event_id: ID,
    pub occurrence_date: NaiveDate,
}

impl Entity for EventException {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl EventException {
    pub fn skip(event_id: &ID, occurrence_date: &NaiveDate) -> Self {
        Self {
            id: Default::default(),
            event_id: event_id.clone(),
            occurrence_date: occurrence_date.format("%Y-%m-%d").to_string(),
            action: ExceptionAction::Skip,
            new_date: None,
            new_start_time: None,
            new_end_time: None,
            new_title: None,
            new_description: None,
        }
    }

    /// Moves the occurrence to `new_date`, every other field inherits from the
    /// event until set
    pub fn move_to(event_id: &ID, occurrence_date: &NaiveDate, new_date: &NaiveDate) -> Self {
        Self {
            action: ExceptionAction::Override,
            new_date: Some(new_date.format("%Y-%m-%d").to_string()),
            ..Self::skip(event_id, occurrence_date)
        }
    }

    pub fn is_override(&self) -> bool {
        self.action == ExceptionAction::Override
    }

    pub fn key(&self) -> Result<OccurrenceKey, InvalidDateError> {
        Ok(OccurrenceKey {
            event_id: self.event_id.clone(),
            occurrence_date: parse_local_date(&self.occurrence_date)?,
        })
    }

    /// `None` when no new date is set at all
    pub fn parsed_new_date(&self) -> Option<Result<NaiveDate, InvalidDateError>> {
        self.new_date.as_deref().map(parse_local_date)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn keys_are_compared_by_value() {
        let event_id = ID::new();
        let day = NaiveDate::from_ymd(2024, 1, 8);
        let skip = EventException::skip(&event_id, &day);
        let mut moved = EventException::move_to(&event_id, &day, &NaiveDate::from_ymd(2024, 1, 10));
        moved.occurrence_date = "2024-01-08T00:00:00".into();

        assert_ne!(skip.id, moved.id);
        assert_eq!(skip.key().unwrap(), moved.key().unwrap());
    }

    #[test]
    fn malformed_dates_are_reported() {
        let mut exception = EventException::skip(&ID::new(), &NaiveDate::from_ymd(2024, 1, 8));
        assert!(exception.parsed_new_date().is_none());
        exception.occurrence_date = "next week".into();
        assert!(exception.key().is_err());
        exception.new_date = Some("2024-02-30".into());
        assert!(matches!(exception.parsed_new_date(), Some(Err(_))));
    }

    #[test]
    fn deserializes_override_from_wire_format() {
        let exception: EventException = serde_json::from_str(
            r#"{
                "id": "exc-1",
                "eventId": "evt-1",
                "occurrenceDate": "2024-01-08",
                "action": "override",
                "newDate": "2024-01-10",
                "newTitle": "Rescheduled"
            }"#,
        )
        .unwrap();
        assert!(exception.is_override());
        assert_eq!(exception.new_title.as_deref(), Some("Rescheduled"));
        assert_eq!(exception.new_start_time, None);
        assert_eq!(
            exception.parsed_new_date(),
            Some(Ok(NaiveDate::from_ymd(2024, 1, 10)))
        );
    }
}
