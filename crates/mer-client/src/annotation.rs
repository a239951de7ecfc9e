//! Annotation entity and wire schemas.

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Tag attached to every annotation published by this tool, so
/// playbook-created markers can be told apart from hand-placed ones.
pub const MARKER_TAG: &str = "ansible";

/// One event to be recorded on a dashboard, point-in-time or ranged.
///
/// Immutable once constructed. Times are epoch milliseconds internally; the
/// constructor accepts epoch seconds, matching what playbooks pass around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    text: String,
    tags: Vec<String>,
    time: i64,
    time_end: Option<i64>,
}

impl Annotation {
    /// Build an annotation from caller-supplied parts.
    ///
    /// The marker tag is prepended to `user_tags`. A missing `start_secs`
    /// stamps the annotation with the current wall-clock second. Supplying
    /// `end_secs` makes this a region annotation; an end earlier than the
    /// start is not rejected here (the server renders such regions inverted).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if `text` is empty.
    pub fn new(
        text: impl Into<String>,
        user_tags: &[String],
        start_secs: Option<i64>,
        end_secs: Option<i64>,
    ) -> Result<Self, ClientError> {
        let text = text.into();
        if text.is_empty() {
            return Err(ClientError::Validation(
                "annotation text is required".to_string(),
            ));
        }

        let mut tags = Vec::with_capacity(user_tags.len() + 1);
        tags.push(MARKER_TAG.to_string());
        tags.extend(user_tags.iter().cloned());

        let time = start_secs.unwrap_or_else(|| chrono::Utc::now().timestamp()) * 1000;

        Ok(Self {
            text,
            tags,
            time,
            time_end: end_secs.map(|secs| secs * 1000),
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Start time, epoch milliseconds. Always set after construction.
    #[must_use]
    pub const fn time(&self) -> i64 {
        self.time
    }

    /// End time, epoch milliseconds. Present only for region annotations.
    #[must_use]
    pub const fn time_end(&self) -> Option<i64> {
        self.time_end
    }

    /// Whether this annotation spans a time range.
    #[must_use]
    pub const fn is_region(&self) -> bool {
        self.time_end.is_some()
    }
}

/// Create-request payload.
///
/// Field order is part of the wire contract; absent optionals are omitted
/// entirely rather than serialized as null.
#[derive(Debug, Serialize)]
pub struct CreateAnnotation<'a> {
    text: &'a str,
    tags: &'a [String],
    time: i64,
    #[serde(rename = "timeEnd", skip_serializing_if = "Option::is_none")]
    time_end: Option<i64>,
    #[serde(rename = "isRegion", skip_serializing_if = "is_false")]
    is_region: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl<'a> From<&'a Annotation> for CreateAnnotation<'a> {
    fn from(annotation: &'a Annotation) -> Self {
        Self {
            text: annotation.text(),
            tags: annotation.tags(),
            time: annotation.time(),
            time_end: annotation.time_end(),
            is_region: annotation.is_region(),
        }
    }
}

/// Server-side annotation record, as returned by search and create.
///
/// Parsed leniently: Grafana's create response is a summary object rather
/// than a full record, and list items vary across server versions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteAnnotation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub time: i64,
    #[serde(default, rename = "timeEnd", skip_serializing_if = "Option::is_none")]
    pub time_end: Option<i64>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Region half-records share a non-zero region id; zero or absent marks
    /// a plain point record.
    #[serde(default, rename = "regionId")]
    pub region_id: i64,
    /// Create responses carry a human-readable message instead of a record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
