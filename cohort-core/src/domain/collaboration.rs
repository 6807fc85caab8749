//! Collaboration domain types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Related, ResourceRef};

/// A named group of organizations allowed to run joint tasks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collaboration {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted: Option<bool>,
    #[serde(default, deserialize_with = "super::serde_util::related")]
    pub organizations: Related<ResourceRef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Collaboration {
    /// Ids of the embedded organizations; empty when the broker only sent a link
    pub fn organization_ids(&self) -> Vec<u64> {
        self.organizations.items().iter().map(|org| org.id).collect()
    }

    pub fn is_encrypted(&self) -> bool {
        self.encrypted.unwrap_or(false)
    }
}

/// An institution holding data, member of one or more collaborations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
