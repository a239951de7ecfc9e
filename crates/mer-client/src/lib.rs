//! # mer-client
//!
//! Idempotent Grafana annotation client.
//!
//! Ensures exactly one annotation matching a logical identity (text, tags,
//! time, optional end time) exists on the server: search first, create only
//! when nothing matches. Point and region annotations are matched
//! differently: a region lives server-side as two linked point records
//! sharing a `regionId`, and either half may come back as a search hit.
//!
//! The client is an explicitly constructed, immutable value holding the base
//! URL, the fixed header set, and the transport; there is no process-wide
//! connection state. Reconciliation is not atomic against concurrent
//! writers: two simultaneous invocations with the same identity can both
//! observe an empty search and both create. Accepted limitation.

pub mod annotation;
pub mod matching;
pub mod query;

mod auth;
mod error;
mod reconcile;
mod transport;

pub use annotation::{Annotation, CreateAnnotation, MARKER_TAG, RemoteAnnotation};
pub use auth::Auth;
pub use error::ClientError;
pub use reconcile::Reconciliation;
pub use transport::{HttpResponse, HttpTransport, Transport};

/// Client for the Grafana annotation HTTP API.
///
/// Every request carries `Content-Type: application/json`, `Accept:
/// application/json`, and exactly one `Authorization` header derived from
/// the supplied [`Auth`]. Pass by reference; one client per target server.
pub struct AnnotationClient<T = HttpTransport> {
    transport: T,
    base_url: String,
    headers: Vec<(String, String)>,
}

impl AnnotationClient<HttpTransport> {
    /// Build a client over the production HTTP transport.
    ///
    /// `base_url` is the server root (e.g. `http://grafana:3000`); the
    /// annotation endpoint path is appended per request.
    #[must_use]
    pub fn new(base_url: impl Into<String>, auth: &Auth) -> Self {
        Self::with_transport(HttpTransport::new(), base_url, auth)
    }
}

impl<T: Transport> AnnotationClient<T> {
    /// Build a client over a caller-supplied transport.
    #[must_use]
    pub fn with_transport(transport: T, base_url: impl Into<String>, auth: &Auth) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            transport,
            base_url,
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Accept".to_string(), "application/json".to_string()),
                ("Authorization".to_string(), auth.header_value()),
            ],
        }
    }

    /// Borrow the underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }
}
