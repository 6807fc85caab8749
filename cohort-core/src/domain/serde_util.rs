//! Shared field shapes and deserialization helpers

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Reference to another broker resource (`{"id": 3, "link": "/api/organization/3"}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Related resources: embedded as a list, or a link to the list endpoint
///
/// Older broker versions embed related resources, newer ones answer with a
/// link (`"/api/result?task_id=4"`). Both shapes serialize back as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Related<T> {
    List(Vec<T>),
    Link(String),
}

impl<T> Related<T> {
    /// Embedded items; empty when only a link was sent
    pub fn items(&self) -> &[T] {
        match self {
            Related::List(items) => items,
            Related::Link(_) => &[],
        }
    }

    pub fn link(&self) -> Option<&str> {
        match self {
            Related::List(_) => None,
            Related::Link(link) => Some(link),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

impl<T> Default for Related<T> {
    fn default() -> Self {
        Related::List(Vec::new())
    }
}

/// `null` relations read as an empty list
pub(crate) fn related<'de, D, T>(deserializer: D) -> Result<Related<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Related<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Broker timestamps are ISO-8601, with or without an offset.
pub(crate) fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp `{}`", raw))),
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
