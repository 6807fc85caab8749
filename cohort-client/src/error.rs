//! Broker client errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Everything a broker call can fail with
///
/// A 404 from the broker surfaces as [`ClientError::NotFound`] carrying the
/// response body; every other non-2xx status is an [`ClientError::ApiError`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure: connection refused, timeout, TLS
    #[error("request to broker failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("broker answered {status}: {message}")]
    ApiError { status: u16, message: String },

    /// A body that does not have the expected shape or encoding
    #[error("cannot decode broker data: {0}")]
    ParseError(String),

    /// The broker has no such collaboration, task or result (404)
    #[error("broker resource not found: {0}")]
    NotFound(String),

    /// Rejected locally before anything is sent
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("not logged in to the broker, authenticate first")]
    NotAuthenticated,
}

impl ClientError {
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::ApiError { status: 404, .. }
        )
    }

    /// The broker refused the request (4xx, including 404)
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::ApiError { status, .. } => (400..500).contains(status),
            _ => false,
        }
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(ClientError::api_error(401, "bad token").is_client_error());
        assert!(!ClientError::api_error(401, "bad token").is_server_error());
        assert!(ClientError::api_error(503, "down").is_server_error());
        assert!(!ClientError::api_error(503, "down").is_client_error());
        assert!(!ClientError::NotAuthenticated.is_client_error());
    }

    #[test]
    fn test_not_found_is_a_client_error() {
        let err = ClientError::NotFound(r#"{"msg": "task id=9 is not found"}"#.into());
        assert!(err.is_not_found());
        assert!(err.is_client_error());
        assert!(!err.is_server_error());
        assert!(err.to_string().contains("task id=9"));
    }
}
