//! Task submission DTOs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Input handed to the algorithm container
///
/// Serialized as `{"method": ..., "kwargs": {...}, "args": [...], "master": bool}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskInput {
    pub method: String,
    #[serde(default)]
    pub kwargs: Map<String, Value>,
    #[serde(default)]
    pub args: Vec<Value>,
    #[serde(default)]
    pub master: bool,
}

impl TaskInput {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            kwargs: Map::new(),
            args: Vec::new(),
            master: false,
        }
    }

    /// Marks the method as the central part of the algorithm
    pub fn master(mut self, master: bool) -> Self {
        self.master = master;
        self
    }

    pub fn kwarg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.kwargs.insert(key.into(), value.into());
        self
    }

    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }
}

/// Database a node should hand to the algorithm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseRef {
    pub label: String,
}

impl DatabaseRef {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Default for DatabaseRef {
    fn default() -> Self {
        Self::new("default")
    }
}

/// Request to create a task
///
/// This is the caller-facing shape; the client encodes `input` once per
/// organization before posting it.
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub name: String,
    pub image: String,
    pub collaboration_id: u64,
    pub organization_ids: Vec<u64>,
    pub input: TaskInput,
    pub description: Option<String>,
    pub databases: Vec<DatabaseRef>,
}

/// Per-organization encoded input, as posted to the broker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationInput {
    pub id: u64,
    pub input: String,
}

/// Wire body of `POST /task`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRequest {
    pub name: String,
    pub image: String,
    pub collaboration_id: u64,
    pub description: String,
    pub organizations: Vec<OrganizationInput>,
    pub databases: Vec<DatabaseRef>,
}
