//! Grafana connection configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GrafanaConfig {
    /// Server base URL (e.g. `http://grafana:3000`). The annotation endpoint
    /// path is appended per request.
    #[serde(default)]
    pub url: String,

    /// Basic auth username.
    #[serde(default)]
    pub username: String,

    /// Basic auth password.
    #[serde(default)]
    pub password: String,

    /// Bearer token (Grafana API key or service account token). Mutually
    /// exclusive with the username/password pair.
    #[serde(default)]
    pub api_token: String,
}

impl GrafanaConfig {
    /// Check if the section carries the minimum required fields.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty()
    }

    /// Check if a basic auth pair is present.
    #[must_use]
    pub fn has_basic_auth(&self) -> bool {
        !self.username.is_empty()
    }

    /// Check if a bearer token is present.
    #[must_use]
    pub fn has_token(&self) -> bool {
        !self.api_token.is_empty()
    }

    /// Return the configured base URL.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotConfigured`] when the URL is empty,
    /// [`ConfigError::InvalidValue`] when it carries no HTTP scheme.
    pub fn ensure_url(&self) -> Result<&str, ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::NotConfigured {
                section: "grafana".to_string(),
            });
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                field: "grafana.url".to_string(),
                reason: "expected an http:// or https:// URL".to_string(),
            });
        }
        Ok(&self.url)
    }
}
