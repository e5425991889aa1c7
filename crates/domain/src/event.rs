use crate::{
    date::{days_between, parse_local_date, weekday_index, InvalidDateError},
    date_span::DateSpan,
    shared::entity::{Entity, ID},
    shared::recurrence::Frequency,
};
use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A user authored event definition, either a single event or the rule of a
/// recurring series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseEvent {
    pub id: ID,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Local `YYYY-MM-DD` date the series begins on, kept in its wire form so
    /// that one malformed row only takes down its own series
    pub start_date: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub frequency: Frequency,
    /// 0 = Sunday. Only read for weekly and biweekly series
    #[serde(default)]
    pub days_of_week: Option<Vec<i64>>,
    #[serde(default)]
    pub visibility: String,
    pub owner_scope: ID,
}

impl Entity for BaseEvent {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl BaseEvent {
    pub fn new(owner_scope: &ID, title: &str, start_date: &NaiveDate) -> Self {
        Self {
            id: Default::default(),
            title: title.into(),
            description: None,
            start_date: start_date.format("%Y-%m-%d").to_string(),
            start_time: None,
            end_time: None,
            frequency: Frequency::None,
            days_of_week: None,
            visibility: Default::default(),
            owner_scope: owner_scope.clone(),
        }
    }

    pub fn parsed_start_date(&self) -> Result<NaiveDate, InvalidDateError> {
        parse_local_date(&self.start_date)
    }

    /// Weekdays a weekly or biweekly series lands on. Entries outside 0-6 are
    /// ignored and the weekday of `start` is used when nothing valid is left.
    pub fn weekdays(&self, start: &NaiveDate) -> Vec<u32> {
        let mut weekdays: Vec<u32> = self
            .days_of_week
            .iter()
            .flatten()
            .filter(|day| (0..=6).contains(*day))
            .map(|day| *day as u32)
            .collect();
        weekdays.sort_unstable();
        weekdays.dedup();
        if weekdays.is_empty() {
            weekdays.push(weekday_index(start));
        }
        weekdays
    }

    /// Every original occurrence date the recurrence rule produces inside
    /// `span`, ascending and without duplicates. Exceptions are not consulted.
    pub fn expand(&self, span: &DateSpan) -> Vec<NaiveDate> {
        if span.is_empty() {
            return Vec::new();
        }
        let start = match self.parsed_start_date() {
            Ok(start) => start,
            Err(e) => {
                warn!(event_id = %self.id, "Not expanding event: {}", e);
                return Vec::new();
            }
        };
        if start > span.end() {
            return Vec::new();
        }

        let candidates = span.starting_from(start);
        match self.frequency {
            Frequency::None => {
                if span.contains(start) {
                    vec![start]
                } else {
                    Vec::new()
                }
            }
            Frequency::Daily => candidates.days().collect(),
            Frequency::Weekly => {
                let weekdays = self.weekdays(&start);
                candidates
                    .days()
                    .filter(|day| weekdays.contains(&weekday_index(day)))
                    .collect()
            }
            Frequency::Biweekly => {
                let weekdays = self.weekdays(&start);
                candidates
                    .days()
                    .filter(|day| weekdays.contains(&weekday_index(day)))
                    // Week parity is counted from the series start, not the calendar
                    .filter(|day| (days_between(&start, day) / 7) % 2 == 0)
                    .collect()
            }
            Frequency::Monthly => span
                .months()
                // Months without that day of month are skipped, never clamped
                .filter_map(|(year, month)| NaiveDate::from_ymd_opt(year, month, start.day()))
                .filter(|day| *day >= start && span.contains(*day))
                .collect(),
        }
    }
}
