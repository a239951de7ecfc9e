//! Authorization header construction.

use base64::Engine as _;

use crate::error::ClientError;

/// Credentials for the annotation API. Exactly one scheme per client.
#[derive(Debug, Clone)]
pub enum Auth {
    /// HTTP Basic auth from a username/password pair.
    Basic {
        username: String,
        password: String,
    },
    /// Bearer token (Grafana API key or service account token).
    Token(String),
}

impl Auth {
    /// Resolve credentials from optional inputs.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] when both a username and a token
    /// are supplied, or when no credentials are supplied at all.
    pub fn resolve(
        username: Option<&str>,
        password: Option<&str>,
        token: Option<&str>,
    ) -> Result<Self, ClientError> {
        match (username, token) {
            (Some(_), Some(_)) => Err(ClientError::Validation(
                "basic auth and api token are mutually exclusive".to_string(),
            )),
            (None, Some(token)) => Ok(Self::Token(token.to_string())),
            (Some(username), None) => Ok(Self::Basic {
                username: username.to_string(),
                password: password.unwrap_or_default().to_string(),
            }),
            (None, None) => Err(ClientError::Validation(
                "credentials are required: either username/password or an api token".to_string(),
            )),
        }
    }

    /// Render the `Authorization` header value.
    #[must_use]
    pub fn header_value(&self) -> String {
        match self {
            Self::Basic { username, password } => {
                let encoded = base64::engine::general_purpose::STANDARD
                    .encode(format!("{username}:{password}"));
                format!("Basic {encoded}")
            }
            Self::Token(token) => format!("Bearer {token}"),
        }
    }
}
