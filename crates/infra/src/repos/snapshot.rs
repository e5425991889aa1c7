use alliance_calendar_domain::{BaseEvent, EventException};
use anyhow::Context;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::{info, warn};

/// JSON export of the backend tables the calendar reads from
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub events: Vec<BaseEvent>,
    pub exceptions: Vec<EventException>,
}

/// The export before its rows are checked one by one
#[derive(Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    events: Vec<Value>,
    #[serde(default)]
    exceptions: Vec<Value>,
}

/// Rows that do not fit the record type are left out with a warning
fn parse_rows<T: DeserializeOwned>(rows: Vec<Value>, kind: &str) -> Vec<T> {
    rows.into_iter()
        .filter_map(|row| {
            let row_id = row.get("id").cloned().unwrap_or(Value::Null);
            match serde_json::from_value(row) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(row_id = %row_id, "Ignoring malformed {} in snapshot: {}", kind, e);
                    None
                }
            }
        })
        .collect()
}

impl Snapshot {
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let raw: RawSnapshot =
            serde_json::from_str(raw).context("Snapshot is not a valid calendar export")?;
        Ok(Self {
            events: parse_rows(raw.events, "event"),
            exceptions: parse_rows(raw.exceptions, "event exception"),
        })
    }

    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Unable to read snapshot at {}", path.display()))?;
        let snapshot = Self::from_json(&raw)?;
        info!(
            "Loaded snapshot from {} with {} events and {} exceptions",
            path.display(),
            snapshot.events.len(),
            snapshot.exceptions.len()
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_snapshots() {
        let snapshot = Snapshot::from_json(r#"{ "events": [] }"#).unwrap();
        assert!(snapshot.events.is_empty());
        assert!(snapshot.exceptions.is_empty());
        assert!(Snapshot::from_json("[]").is_err());
    }

    #[test]
    fn malformed_rows_do_not_drop_the_rest() {
        let snapshot = Snapshot::from_json(
            r#"{
              "events": [
                { "id": "good", "ownerScope": "a", "title": "Raid", "startDate": "2024-01-01",
                  "frequency": "weekly", "daysOfWeek": [1] },
                { "id": "null-start", "ownerScope": "a", "title": "X", "startDate": null },
                { "id": "string-days", "ownerScope": "a", "title": "X", "startDate": "2024-01-01",
                  "daysOfWeek": ["1"] },
                { "id": "numeric-frequency", "ownerScope": "a", "title": "Y", "startDate": "2024-01-02",
                  "frequency": 2 },
                "not even an object"
              ],
              "exceptions": [
                { "id": "x1", "eventId": "good", "occurrenceDate": "2024-01-08", "action": "skip" },
                { "id": "x2", "eventId": "good", "occurrenceDate": "2024-01-15", "action": "postpone" }
              ]
            }"#,
        )
        .unwrap();

        let ids: Vec<_> = snapshot.events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["good", "numeric-frequency"]);
        assert_eq!(snapshot.exceptions.len(), 1);
        assert_eq!(snapshot.exceptions[0].occurrence_date, "2024-01-08");
    }

    #[tokio::test]
    async fn fails_on_missing_file() {
        let res = Snapshot::load(Path::new("/definitely/not/here.json")).await;
        assert!(res.is_err());
    }
}
