//! Result payload decoding
//!
//! Finished result records carry the algorithm output in a broker-defined
//! encoding. Depending on broker and algorithm versions this is one of:
//! - base64 of JSON bytes (the pass-through codec)
//! - a plain JSON value
//! - a JSON string holding JSON, sometimes with escaped quotes left in

use cohort_core::domain::result::ResultRecord;
use serde_json::Value;

use crate::BrokerClient;
use crate::crypto::Cryptor;
use crate::error::{ClientError, Result};

/// Limit on nested string-encoded JSON layers
const MAX_NESTING: usize = 4;

/// Decode a raw result payload into a JSON value
pub fn decode_payload(raw: &Value, cryptor: &dyn Cryptor) -> Result<Value> {
    let text = match raw {
        Value::String(text) => text,
        other => return Ok(unwrap_nested(other.clone())),
    };

    if let Ok(bytes) = cryptor.decrypt(text) {
        if let Ok(value) = serde_json::from_slice::<Value>(&bytes) {
            return Ok(unwrap_nested(value));
        }
    }

    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return Ok(unwrap_nested(value));
    }

    let cleaned = text.replace('\\', "");
    let cleaned = cleaned.trim().trim_matches('"');
    serde_json::from_str::<Value>(cleaned)
        .map(unwrap_nested)
        .map_err(|e| ClientError::ParseError(format!("Undecodable result payload: {}", e)))
}

/// Peel off JSON that was serialized into a string one or more times
fn unwrap_nested(mut value: Value) -> Value {
    for _ in 0..MAX_NESTING {
        let inner = match &value {
            Value::String(text) => match serde_json::from_str::<Value>(text) {
                Ok(inner) if inner.is_object() || inner.is_array() || inner.is_string() => inner,
                _ => break,
            },
            _ => break,
        };
        value = inner;
    }
    value
}

impl BrokerClient {
    /// Decode the payload of a result record with the active codec
    ///
    /// # Returns
    /// `None` when the record carries no payload (still pending, or the
    /// algorithm returned nothing)
    pub fn decode_result(&self, record: &ResultRecord) -> Result<Option<Value>> {
        record
            .payload()
            .map(|raw| decode_payload(raw, self.cryptor.as_ref()))
            .transpose()
    }
}
