//! Result record domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ResourceRef;

/// The broker's record of one organization's share of a task
///
/// A record is pending until `finished_at` is set. The payload in `result`
/// uses a broker-defined encoding and is left untouched here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRecord {
    pub id: u64,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default, deserialize_with = "super::serde_util::timestamp")]
    pub assigned_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "super::serde_util::timestamp")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "super::serde_util::timestamp")]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub organization: Option<ResourceRef>,
    #[serde(default)]
    pub task: Option<ResourceRef>,
    #[serde(default)]
    pub log: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResultRecord {
    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    /// Raw payload, `None` when the broker has not stored one
    pub fn payload(&self) -> Option<&Value> {
        self.result.as_ref().filter(|value| !value.is_null())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_record() {
        let record: ResultRecord = serde_json::from_str(
            r#"{"id": 40, "result": null, "finished_at": null, "assigned_at": "2024-05-02T09:00:00.000001"}"#,
        )
        .unwrap();

        assert!(!record.is_finished());
        assert!(record.payload().is_none());
        assert!(record.assigned_at.is_some());
    }

    #[test]
    fn test_finished_record() {
        let record: ResultRecord = serde_json::from_str(
            r#"{
                "id": 40,
                "result": "eyJhIjogMX0=",
                "finished_at": "2024-05-02T09:01:12.5",
                "organization": {"id": 2},
                "task": {"id": 12, "link": "/api/task/12"},
                "input": "ignored by the client"
            }"#,
        )
        .unwrap();

        assert!(record.is_finished());
        assert_eq!(record.payload(), Some(&Value::from("eyJhIjogMX0=")));
        assert_eq!(record.task.unwrap().id, 12);
        assert!(record.extra.contains_key("input"));
    }

    #[test]
    fn test_invalid_finished_at_rejected() {
        let parsed: Result<ResultRecord, _> =
            serde_json::from_str(r#"{"id": 1, "finished_at": "soon"}"#);
        assert!(parsed.is_err());
    }
}
