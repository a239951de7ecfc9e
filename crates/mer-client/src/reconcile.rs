//! Search-then-create reconciliation.

use serde::Serialize;

use crate::AnnotationClient;
use crate::annotation::{Annotation, CreateAnnotation, RemoteAnnotation};
use crate::error::ClientError;
use crate::matching::filter_matches;
use crate::query::{ANNOTATIONS_PATH, build_search_query};
use crate::transport::{HttpResponse, Transport};

/// Outcome of a reconcile call: the matching (or newly created) records and
/// whether anything was written.
#[derive(Debug, Clone, Serialize)]
pub struct Reconciliation {
    pub annotations: Vec<RemoteAnnotation>,
    pub changed: bool,
}

impl<T: Transport> AnnotationClient<T> {
    /// Look up annotations that already represent `annotation`'s identity.
    ///
    /// Candidates come back in server order and are filtered with the point
    /// or region predicate as appropriate.
    ///
    /// # Errors
    ///
    /// [`ClientError::Remote`] on a non-200 status, [`ClientError::Parse`]
    /// if the body is not a JSON annotation list, [`ClientError::Http`] on
    /// transport failure.
    pub fn search(&self, annotation: &Annotation) -> Result<Vec<RemoteAnnotation>, ClientError> {
        let now_ms = chrono::Utc::now().timestamp_millis();
        let url = format!("{}{}", self.base_url, build_search_query(annotation, now_ms));
        tracing::debug!(%url, "searching for existing annotation");

        let response = self.transport.get(&url, &self.headers)?;
        if response.status != 200 {
            return Err(remote_error(response));
        }

        let candidates: Vec<RemoteAnnotation> = parse_json(&response.body)?;
        Ok(filter_matches(candidates, annotation))
    }

    /// Create `annotation` on the server and return the server's record.
    ///
    /// # Errors
    ///
    /// [`ClientError::Remote`] on a non-2xx status, [`ClientError::Parse`]
    /// if the body is not JSON, [`ClientError::Http`] on transport failure.
    pub fn create(&self, annotation: &Annotation) -> Result<RemoteAnnotation, ClientError> {
        let url = format!("{}{ANNOTATIONS_PATH}", self.base_url);
        let payload = serde_json::to_vec(&CreateAnnotation::from(annotation))
            .map_err(|e| ClientError::Parse(format!("failed to serialize payload: {e}")))?;
        tracing::debug!(%url, region = annotation.is_region(), "creating annotation");

        let response = self.transport.post(&url, &self.headers, payload)?;
        if !(200..300).contains(&response.status) {
            return Err(remote_error(response));
        }

        parse_json(&response.body)
    }

    /// Ensure exactly one annotation matching `annotation` exists.
    ///
    /// Searches first; when matches exist nothing is written and `changed`
    /// is false. Otherwise the annotation is created and the server's
    /// response is returned with `changed` true. A single attempt each way,
    /// no retry.
    ///
    /// # Errors
    ///
    /// Propagates [`ClientError`] from [`search`](Self::search) or
    /// [`create`](Self::create); there is no partial-success state.
    pub fn reconcile(&self, annotation: &Annotation) -> Result<Reconciliation, ClientError> {
        let matches = self.search(annotation)?;
        if !matches.is_empty() {
            tracing::debug!(count = matches.len(), "annotation already present");
            return Ok(Reconciliation {
                annotations: matches,
                changed: false,
            });
        }

        let created = self.create(annotation)?;
        Ok(Reconciliation {
            annotations: vec![created],
            changed: true,
        })
    }
}

fn remote_error(response: HttpResponse) -> ClientError {
    ClientError::Remote {
        status: response.status,
        body: String::from_utf8_lossy(&response.body).into_owned(),
    }
}

fn parse_json<D: serde::de::DeserializeOwned>(body: &[u8]) -> Result<D, ClientError> {
    serde_json::from_slice(body).map_err(|e| ClientError::Parse(e.to_string()))
}
