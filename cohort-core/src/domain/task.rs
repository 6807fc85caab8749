//! Task domain types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Related, ResourceRef};

/// Reference to a single result record of a task
pub type ResultRef = ResourceRef;

/// Task handle returned by the broker after submission
///
/// Immutable once received. The embedded result references point at one
/// result record per targeted organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub collaboration: Option<ResourceRef>,
    #[serde(default, deserialize_with = "super::serde_util::related")]
    pub results: Related<ResultRef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    /// First result reference, the one a poller waits on
    pub fn first_result(&self) -> Option<&ResultRef> {
        self.results.items().first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_with_results() {
        let task: Task = serde_json::from_str(
            r#"{
                "id": 12,
                "name": "RetrieveVariables",
                "image": "ghcr.io/maastrichtu-biss/v6-colnames-py",
                "collaboration": {"id": 1, "link": "/api/collaboration/1"},
                "results": [{"id": 40, "link": "/api/result/40"}, {"id": 41}],
                "complete": false
            }"#,
        )
        .unwrap();

        assert_eq!(task.first_result().map(|r| r.id), Some(40));
        assert_eq!(task.results.items().len(), 2);
        assert_eq!(task.collaboration.unwrap().id, 1);
        assert_eq!(task.extra.get("complete"), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_task_without_results() {
        let task: Task =
            serde_json::from_str(r#"{"id": 3, "results": "/api/result?task_id=3"}"#).unwrap();
        assert!(task.first_result().is_none());
        assert_eq!(task.results.link(), Some("/api/result?task_id=3"));
    }
}
