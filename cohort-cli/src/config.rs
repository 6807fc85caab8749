//! Configuration module
//!
//! Broker connection settings: where the API lives and who logs in.

use std::path::PathBuf;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Broker URL without port (e.g., "http://localhost")
    pub broker_url: String,

    /// Broker port
    pub broker_port: u16,

    /// Path prefix of the API (e.g., "/api")
    pub api_path: String,

    pub username: String,
    pub password: String,

    /// Organization private key, only for encrypted collaborations
    pub private_key: Option<PathBuf>,
}

impl Config {
    /// Base URL of the API: `{url}:{port}{api_path}`
    pub fn api_base(&self) -> String {
        format!(
            "{}:{}{}",
            self.broker_url.trim_end_matches('/'),
            self.broker_port,
            self.api_path.trim_end_matches('/')
        )
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.username.is_empty() {
            anyhow::bail!("username cannot be empty");
        }

        if !self.broker_url.starts_with("http://") && !self.broker_url.starts_with("https://") {
            anyhow::bail!("broker url must start with http:// or https://");
        }

        if !self.api_path.starts_with('/') {
            anyhow::bail!("api path must start with /");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            broker_url: "http://localhost".to_string(),
            broker_port: 5000,
            api_path: "/api".to_string(),
            username: "fysio".to_string(),
            password: "fysio-password".to_string(),
            private_key: None,
        }
    }

    #[test]
    fn test_api_base() {
        assert_eq!(config().api_base(), "http://localhost:5000/api");

        let mut config = config();
        config.broker_url = "https://broker.example.org/".to_string();
        config.broker_port = 443;
        config.api_path = "/api/".to_string();
        assert_eq!(config.api_base(), "https://broker.example.org:443/api");
    }

    #[test]
    fn test_config_validation() {
        let mut config = config();

        // Valid config should pass
        assert!(config.validate().is_ok());

        // Empty username should fail
        config.username = String::new();
        assert!(config.validate().is_err());

        config.username = "ortho-user".to_string();

        // Invalid URL should fail
        config.broker_url = "localhost".to_string();
        assert!(config.validate().is_err());

        config.broker_url = "http://localhost".to_string();

        // Relative api path should fail
        config.api_path = "api".to_string();
        assert!(config.validate().is_err());

        config.api_path = "/api".to_string();
        assert!(config.validate().is_ok());
    }
}
