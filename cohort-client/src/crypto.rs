//! Codecs for task inputs and result payloads
//!
//! Inputs are serialized to bytes and encoded by a [`Cryptor`] before they
//! are posted; result payloads come back in the same encoding.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{ClientError, Result};

/// Encodes outgoing payloads and decodes incoming ones
pub trait Cryptor: Send + Sync + std::fmt::Debug {
    /// Encode raw bytes into the string sent to the broker
    fn encrypt(&self, payload: &[u8]) -> Result<String>;

    /// Decode a string received from the broker back into raw bytes
    fn decrypt(&self, payload: &str) -> Result<Vec<u8>>;
}

/// Cryptor for unencrypted collaborations: payloads are only base64-encoded
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughCryptor;

impl Cryptor for PassthroughCryptor {
    fn encrypt(&self, payload: &[u8]) -> Result<String> {
        Ok(STANDARD.encode(payload))
    }

    fn decrypt(&self, payload: &str) -> Result<Vec<u8>> {
        STANDARD
            .decode(payload.trim())
            .map_err(|e| ClientError::ParseError(format!("Invalid base64 payload: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_encodes_base64() {
        let encoded = PassthroughCryptor.encrypt(br#"{"method":"master"}"#).unwrap();
        assert_eq!(encoded, "eyJtZXRob2QiOiJtYXN0ZXIifQ==");
    }

    #[test]
    fn test_passthrough_decodes_with_whitespace() {
        let decoded = PassthroughCryptor.decrypt(" eyJhIjogMX0=\n").unwrap();
        assert_eq!(decoded, br#"{"a": 1}"#);
    }

    #[test]
    fn test_passthrough_rejects_invalid_base64() {
        let err = PassthroughCryptor.decrypt("{not base64}").unwrap_err();
        assert!(matches!(err, ClientError::ParseError(_)));
    }
}
