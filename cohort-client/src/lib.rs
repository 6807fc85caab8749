//! Cohort HTTP Client
//!
//! A type-safe HTTP client for the federated-analytics broker API, plus the
//! result poller and the decoders researchers need to read task output.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use cohort_client::{BrokerClient, PollOutcome};
//! use cohort_core::dto::task::{CreateTask, DatabaseRef, TaskInput};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut client = BrokerClient::new("http://localhost:5000/api");
//!     client.authenticate("researcher", "secret").await?;
//!     client.setup_encryption(None)?;
//!
//!     let collaboration = client.list_collaborations().await?.remove(0);
//!     let task = client.create_task(CreateTask {
//!         name: "RetrieveVariables".to_string(),
//!         image: "ghcr.io/maastrichtu-biss/v6-colnames-py".to_string(),
//!         collaboration_id: collaboration.id,
//!         organization_ids: collaboration.organization_ids(),
//!         input: TaskInput::new("master").master(true),
//!         description: None,
//!         databases: vec![DatabaseRef::default()],
//!     }).await?;
//!
//!     match client.await_result(&task, 30, Duration::from_secs(2)).await? {
//!         PollOutcome::Finished(record) => println!("{:?}", client.decode_result(&record)?),
//!         PollOutcome::Pending { attempts, .. } => println!("still running after {} polls", attempts),
//!     }
//!     Ok(())
//! }
//! ```

mod auth;
mod collaborations;
pub mod crypto;
pub mod error;
mod nodes;
pub mod payload;
pub mod poller;
mod results;
pub mod survival;
mod tasks;

// Re-export commonly used types
pub use crypto::{Cryptor, PassthroughCryptor};
pub use error::{ClientError, Result};
pub use poller::{PollOutcome, ResultSource, await_result};
pub use survival::{KaplanMeierCurve, SurvivalPoint};

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// HTTP client for the broker API
///
/// Endpoints are grouped by resource:
/// - Authentication and encryption setup
/// - Collaborations and nodes
/// - Task submission and lookup
/// - Result records
#[derive(Debug, Clone)]
pub struct BrokerClient {
    /// Base URL of the API including its path prefix (e.g., "http://localhost:5000/api")
    base_url: String,
    /// HTTP client instance
    client: Client,
    /// Bearer token obtained by `authenticate`
    token: Option<String>,
    /// Codec applied to task inputs and result payloads
    cryptor: Arc<dyn Cryptor>,
}

impl BrokerClient {
    /// Create a new broker client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the broker API (e.g., "http://localhost:5000/api")
    ///
    /// # Example
    /// ```
    /// use cohort_client::BrokerClient;
    ///
    /// let client = BrokerClient::new("http://localhost:5000/api");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new broker client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use cohort_client::BrokerClient;
    /// use reqwest::{Client, StatusCode};
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = BrokerClient::with_client("http://localhost:5000/api", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            token: None,
            cryptor: Arc::new(PassthroughCryptor),
        }
    }

    /// Get the base URL of the broker API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Bearer token for authenticated endpoints
    fn bearer(&self) -> Result<&str> {
        self.token.as_deref().ok_or(ClientError::NotAuthenticated)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            if status == StatusCode::NOT_FOUND {
                return Err(ClientError::NotFound(error_text));
            }
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}
