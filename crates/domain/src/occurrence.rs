use crate::{
    date_span::DateSpan,
    event::BaseEvent,
    event_exception::{ExceptionAction, EventException, OccurrenceKey},
    shared::entity::ID,
};
use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::warn;

/// One concrete calendar appearance of a `BaseEvent`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub source_id: ID,
    /// Date the unmodified rule produced, the exception lookup key
    pub occurrence_date: NaiveDate,
    pub display_date: NaiveDate,
    pub title: String,
    pub description: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// Occurrences grouped by the day they are shown on. Days without any
/// occurrence are absent.
pub type OccurrencesByDay = BTreeMap<NaiveDate, Vec<Occurrence>>;

impl Occurrence {
    fn from_event(event: &BaseEvent, occurrence_date: NaiveDate) -> Self {
        Self {
            source_id: event.id.clone(),
            occurrence_date,
            display_date: occurrence_date,
            title: event.title.clone(),
            description: event.description.clone(),
            start_time: event.start_time.clone(),
            end_time: event.end_time.clone(),
        }
    }

    fn moved_to(mut self, display_date: NaiveDate, exception: &EventException) -> Self {
        self.display_date = display_date;
        if let Some(title) = &exception.new_title {
            self.title = title.clone();
        }
        if let Some(description) = &exception.new_description {
            self.description = Some(description.clone());
        }
        if let Some(start_time) = &exception.new_start_time {
            self.start_time = Some(start_time.clone());
        }
        if let Some(end_time) = &exception.new_end_time {
            self.end_time = Some(end_time.clone());
        }
        self
    }

    pub fn is_moved(&self) -> bool {
        self.display_date != self.occurrence_date
    }

    fn sort_time(&self) -> &str {
        self.start_time.as_deref().unwrap_or("")
    }
}

#[derive(Clone, Copy, Debug)]
enum Resolution<'a> {
    Skip,
    Override {
        new_date: NaiveDate,
        exception: &'a EventException,
    },
}

#[derive(Clone, Copy, Debug)]
struct IndexedException<'a> {
    /// Position in the input, keeps the repair pass in a stable order
    position: usize,
    resolution: Resolution<'a>,
}

fn index_exceptions(exceptions: &[EventException]) -> HashMap<OccurrenceKey, IndexedException<'_>> {
    let mut index = HashMap::with_capacity(exceptions.len());
    for (position, exception) in exceptions.iter().enumerate() {
        let key = match exception.key() {
            Ok(key) => key,
            Err(e) => {
                warn!(exception_id = %exception.id, "Ignoring event exception: {}", e);
                continue;
            }
        };
        let resolution = match exception.action {
            ExceptionAction::Skip => Resolution::Skip,
            ExceptionAction::Override => match exception.parsed_new_date() {
                Some(Ok(new_date)) => Resolution::Override {
                    new_date,
                    exception,
                },
                Some(Err(e)) => {
                    warn!(exception_id = %exception.id, "Ignoring event exception: {}", e);
                    continue;
                }
                None => {
                    warn!(exception_id = %exception.id, "Ignoring override exception without a new date");
                    continue;
                }
            },
        };
        // The store keeps one exception per key, if it did not the last one wins
        index.insert(
            key,
            IndexedException {
                position,
                resolution,
            },
        );
    }
    index
}

#[derive(Default)]
struct Emitted {
    seen: HashSet<(ID, NaiveDate)>,
    occurrences: Vec<Occurrence>,
}

impl Emitted {
    fn push(&mut self, occurrence: Occurrence) {
        if self
            .seen
            .insert((occurrence.source_id.clone(), occurrence.display_date))
        {
            self.occurrences.push(occurrence);
        }
    }

    fn into_days(self) -> OccurrencesByDay {
        let mut days = OccurrencesByDay::new();
        for occurrence in self.occurrences {
            days.entry(occurrence.display_date)
                .or_insert_with(Vec::new)
                .push(occurrence);
        }
        for occurrences in days.values_mut() {
            // Stable, so equal or missing start times keep discovery order
            occurrences.sort_by(|o1, o2| o1.sort_time().cmp(o2.sort_time()));
        }
        days
    }
}

/// Computes the occurrences of `base_events` that are shown inside `span`,
/// with skip and override exceptions applied.
///
/// Records with malformed dates and exceptions pointing at unknown events are
/// left out individually, they never fail the whole computation.
pub fn compute_occurrences(
    base_events: &[BaseEvent],
    exceptions: &[EventException],
    span: &DateSpan,
) -> OccurrencesByDay {
    if span.is_empty() {
        return OccurrencesByDay::new();
    }

    let index = index_exceptions(exceptions);
    let mut emitted = Emitted::default();

    for event in base_events {
        for occurrence_date in event.expand(span) {
            let key = OccurrenceKey {
                event_id: event.id.clone(),
                occurrence_date,
            };
            let occurrence = match index.get(&key).map(|indexed| indexed.resolution) {
                None => Occurrence::from_event(event, occurrence_date),
                Some(Resolution::Skip) => continue,
                Some(Resolution::Override {
                    new_date,
                    exception,
                }) => {
                    if !span.contains(new_date) {
                        continue;
                    }
                    Occurrence::from_event(event, occurrence_date).moved_to(new_date, exception)
                }
            };
            emitted.push(occurrence);
        }
    }

    // An override can move an occurrence onto a day the rule never produces,
    // or in from outside the span, so the forward scan above misses it.
    let expandable: HashMap<&ID, &BaseEvent> = base_events
        .iter()
        .filter(|event| event.parsed_start_date().is_ok())
        .map(|event| (&event.id, event))
        .collect();
    let mut moved: Vec<(&OccurrenceKey, &IndexedException)> = index
        .iter()
        .filter(|(_, indexed)| matches!(indexed.resolution, Resolution::Override { .. }))
        .collect();
    moved.sort_by_key(|(_, indexed)| indexed.position);

    for (key, indexed) in moved {
        let (new_date, exception) = match indexed.resolution {
            Resolution::Override {
                new_date,
                exception,
            } => (new_date, exception),
            Resolution::Skip => continue,
        };
        if !span.contains(new_date) {
            continue;
        }
        let event = match expandable.get(&key.event_id) {
            Some(event) => event,
            None => continue,
        };
        emitted.push(Occurrence::from_event(event, key.occurrence_date).moved_to(new_date, exception));
    }

    emitted.into_days()
}
