use alliance_calendar_domain::ID;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of days occurrences can be queried for at once.
    /// A month grid needs 42 days, asking for years of occurrences takes
    /// a lot of time to compute and is not useful for any view anyways.
    pub occurrences_span_limit_days: i64,
    /// First day of the week in month grids, 0 = Sunday
    pub week_start: u32,
    /// JSON export used to seed the in-memory store
    pub snapshot_path: Option<PathBuf>,
    /// Alliance whose calendar is rendered by the binary
    pub owner_scope: Option<ID>,
    pub range_start: Option<String>,
    pub range_end: Option<String>,
}

const DEFAULT_OCCURRENCES_SPAN_LIMIT_DAYS: i64 = 62;

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl Config {
    pub fn new() -> Self {
        let occurrences_span_limit_days = match optional_var("CALENDAR_OCCURRENCES_SPAN_LIMIT_DAYS")
        {
            Some(limit) => match limit.parse::<i64>() {
                Ok(limit) if limit > 0 => limit,
                _ => {
                    warn!(
                        "The given CALENDAR_OCCURRENCES_SPAN_LIMIT_DAYS: {} is not valid, falling back to the default limit: {}.",
                        limit, DEFAULT_OCCURRENCES_SPAN_LIMIT_DAYS
                    );
                    DEFAULT_OCCURRENCES_SPAN_LIMIT_DAYS
                }
            },
            None => DEFAULT_OCCURRENCES_SPAN_LIMIT_DAYS,
        };
        let week_start = match optional_var("CALENDAR_WEEK_START") {
            Some(week_start) => match week_start.parse::<u32>() {
                Ok(week_start) if week_start <= 6 => week_start,
                _ => {
                    warn!(
                        "The given CALENDAR_WEEK_START: {} is not valid, falling back to Sunday.",
                        week_start
                    );
                    0
                }
            },
            None => 0,
        };
        let snapshot_path = optional_var("CALENDAR_SNAPSHOT_PATH").map(PathBuf::from);
        if snapshot_path.is_none() {
            info!("Did not find CALENDAR_SNAPSHOT_PATH environment variable. Starting with an empty store.");
        }
        let owner_scope = optional_var("CALENDAR_OWNER_SCOPE").and_then(|scope| scope.parse().ok());

        Self {
            occurrences_span_limit_days,
            week_start,
            snapshot_path,
            owner_scope,
            range_start: optional_var("CALENDAR_RANGE_START"),
            range_end: optional_var("CALENDAR_RANGE_END"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            occurrences_span_limit_days: DEFAULT_OCCURRENCES_SPAN_LIMIT_DAYS,
            week_start: 0,
            snapshot_path: None,
            owner_scope: None,
            range_start: None,
            range_end: None,
        }
    }
}
