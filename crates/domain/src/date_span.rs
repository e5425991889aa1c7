use crate::date::{days_between, next_month, weekday_index};
use chrono::{prelude::*, Duration};
use serde::{Deserialize, Serialize};
use std::cmp::max;

/// Number of days in the 6 week grid a month view renders
const VISIBLE_GRID_DAYS: i64 = 42;

/// Closed range `[start, end]` of local calendar days.
///
/// A span whose `start` lies after its `end` is empty and contains no days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateSpan {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateSpan {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The 42 days a month grid shows for the month `today` falls in, starting
    /// on `week_start` (0 = Sunday) on or before the first of the month.
    pub fn visible_month_grid(today: NaiveDate, week_start: u32) -> Self {
        let first = today.with_day(1).unwrap_or(today);
        let offset = (weekday_index(&first) + 7 - week_start % 7) % 7;
        let start = first - Duration::days(offset as i64);
        Self {
            start,
            end: start + Duration::days(VISIBLE_GRID_DAYS - 1),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn len_days(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            days_between(&self.start, &self.end) + 1
        }
    }

    pub fn greater_than(&self, days: i64) -> bool {
        self.len_days() > days
    }

    /// The part of this span on or after `date`
    pub fn starting_from(&self, date: NaiveDate) -> Self {
        Self {
            start: max(self.start, date),
            end: self.end,
        }
    }

    /// Every day of the span in ascending order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        std::iter::successors(Some(self.start), |day| day.succ_opt())
            .take_while(move |day| *day <= end)
    }

    /// Every `(year, month)` pair the span touches in ascending order
    pub fn months(&self) -> impl Iterator<Item = (i32, u32)> {
        let last = (self.end.year(), self.end.month());
        let first = (self.start.year(), self.start.month());
        let first = if self.is_empty() { None } else { Some(first) };
        std::iter::successors(first, |(year, month)| Some(next_month(*year, *month)))
            .take_while(move |month| *month <= last)
    }
}
