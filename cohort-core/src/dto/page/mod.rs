//! List envelope DTOs

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a list endpoint
///
/// Depending on the broker version a list is either a bare JSON array or a
/// `{"data": [...], "links": {...}}` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Page<T> {
    Envelope {
        data: Vec<T>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        links: Option<Value>,
    },
    Bare(Vec<T>),
}

impl<T> Page<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Page::Envelope { data, .. } => data,
            Page::Bare(items) => items,
        }
    }
}
