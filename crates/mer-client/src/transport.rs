//! HTTP transport seam.
//!
//! The client talks to Grafana through this narrow collaborator so tests can
//! substitute an in-memory transport. Calls are point-in-time blocking
//! request/response operations with no internal concurrency; timeout policy
//! lives here, not in the reconciliation logic.

use crate::error::ClientError;

/// Raw response: status code plus unparsed body bytes.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Blocking request/response collaborator.
///
/// Served error statuses come back as a normal [`HttpResponse`]; only
/// transport-level failures (connect, timeout) surface as errors.
pub trait Transport {
    /// Perform a GET request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] on transport-level failure.
    fn get(&self, url: &str, headers: &[(String, String)]) -> Result<HttpResponse, ClientError>;

    /// Perform a POST request with a prepared body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] on transport-level failure.
    fn post(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: Vec<u8>,
    ) -> Result<HttpResponse, ClientError>;
}

/// Production transport backed by a blocking reqwest client.
pub struct HttpTransport {
    http: reqwest::blocking::Client,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport {
    /// Create a transport with default settings.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::blocking::Client` fails to build.
    #[must_use]
    pub fn new() -> Self {
        Self {
            http: reqwest::blocking::Client::builder()
                .user_agent("meridian/0.1")
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("reqwest client should build"),
        }
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, headers: &[(String, String)]) -> Result<HttpResponse, ClientError> {
        let mut request = self.http.get(url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        let response = request.send()?;
        let status = response.status().as_u16();
        let body = response.bytes()?.to_vec();
        Ok(HttpResponse { status, body })
    }

    fn post(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: Vec<u8>,
    ) -> Result<HttpResponse, ClientError> {
        let mut request = self.http.post(url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        let response = request.body(body).send()?;
        let status = response.status().as_u16();
        let body = response.bytes()?.to_vec();
        Ok(HttpResponse { status, body })
    }
}
