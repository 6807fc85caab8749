//! Authentication DTOs

use serde::{Deserialize, Serialize};

/// Credentials posted to the token endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

/// Tokens handed out after a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user_url: Option<String>,
}
