//! Client error types.

use thiserror::Error;

/// Errors that can occur while looking up or publishing annotations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Input failed validation; no request was attempted.
    #[error("validation error: {0}")]
    Validation(String),

    /// The annotation API returned a non-success status code.
    #[error("remote error ({status}): {body}")]
    Remote {
        /// HTTP status code served by the API.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Failed to parse a response body.
    #[error("parse error: {0}")]
    Parse(String),

    /// HTTP transport error (connect, timeout). Distinct from [`Remote`],
    /// which carries a status code the server actually served.
    ///
    /// [`Remote`]: ClientError::Remote
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
