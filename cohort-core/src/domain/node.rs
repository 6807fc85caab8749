//! Node domain types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ResourceRef;

/// A data station registered with the broker on behalf of an organization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub collaboration: Option<ResourceRef>,
    #[serde(default)]
    pub organization: Option<ResourceRef>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub last_seen: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Node {
    pub fn is_online(&self) -> bool {
        self.status.as_deref() == Some("online")
    }
}
