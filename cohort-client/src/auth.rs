//! Authentication and encryption setup

use std::path::Path;
use std::sync::Arc;

use cohort_core::dto::auth::{Token, TokenRequest};
use tracing::{debug, info};

use crate::BrokerClient;
use crate::crypto::PassthroughCryptor;
use crate::error::{ClientError, Result};

impl BrokerClient {
    // =============================================================================
    // Session
    // =============================================================================

    /// Log in with a username and password
    ///
    /// The access token is kept by the client and sent as a bearer token on
    /// every following request.
    ///
    /// # Example
    /// ```no_run
    /// # use cohort_client::BrokerClient;
    /// # async fn example() -> anyhow::Result<()> {
    /// let mut client = BrokerClient::new("http://localhost:5000/api");
    /// client.authenticate("fysio", "fysio-password").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn authenticate(&mut self, username: &str, password: &str) -> Result<Token> {
        let url = format!("{}/token/user", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&TokenRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;

        let token: Token = self.handle_response(response).await?;
        info!("Authenticated as {}", username);

        self.token = Some(token.access_token.clone());
        Ok(token)
    }

    /// Whether `authenticate` has succeeded on this client
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Select the codec for task inputs and result payloads
    ///
    /// `None` selects the pass-through codec used by unencrypted
    /// collaborations. Private keys are rejected: envelope encryption is not
    /// supported by this client.
    pub fn setup_encryption(&mut self, private_key: Option<&Path>) -> Result<()> {
        match private_key {
            None => {
                debug!("Using pass-through payload encoding");
                self.cryptor = Arc::new(PassthroughCryptor);
                Ok(())
            }
            Some(path) => Err(ClientError::InvalidRequest(format!(
                "encrypted collaborations are not supported (private key {})",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn test_authenticate_stores_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/token/user")
            .match_body(Matcher::Json(json!({
                "username": "fysio",
                "password": "fysio-password"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token": "abc", "refresh_token": "def", "user_url": "/api/user/1"}"#)
            .create_async()
            .await;

        let mut client = BrokerClient::new(format!("{}/api", server.url()));
        let token = client.authenticate("fysio", "fysio-password").await.unwrap();

        mock.assert_async().await;
        assert_eq!(token.refresh_token.as_deref(), Some("def"));
        assert!(client.is_authenticated());
    }

    #[tokio::test]
    async fn test_authenticate_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/token/user")
            .with_status(401)
            .with_body(r#"{"msg": "Invalid username and/or password!"}"#)
            .create_async()
            .await;

        let mut client = BrokerClient::new(format!("{}/api", server.url()));
        let err = client.authenticate("fysio", "wrong").await.unwrap_err();

        assert!(err.is_client_error());
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_setup_encryption_without_key() {
        let mut client = BrokerClient::new("http://localhost:5000/api");
        assert!(client.setup_encryption(None).is_ok());
    }

    #[test]
    fn test_setup_encryption_with_key_rejected() {
        let mut client = BrokerClient::new("http://localhost:5000/api");
        let err = client
            .setup_encryption(Some(Path::new("/keys/org.pem")))
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidRequest(_)));
    }
}
