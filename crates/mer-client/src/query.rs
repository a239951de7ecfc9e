//! Search query construction.

use crate::annotation::Annotation;

/// Annotation endpoint path on the Grafana HTTP API.
pub const ANNOTATIONS_PATH: &str = "/api/annotations";

/// Build the endpoint path plus query string for looking up annotations
/// matching `annotation`'s identity.
///
/// One `tags=` parameter per tag, `from=` at the annotation's start time,
/// and always exactly one `to=`: the end time when the annotation has one,
/// otherwise `now_ms`. The bounded-to-now upper window means a lookup can
/// undercount when the clock moves between calls; kept for compatibility
/// with existing automation rather than silently widened.
#[must_use]
pub fn build_search_query(annotation: &Annotation, now_ms: i64) -> String {
    let mut params: Vec<String> = annotation
        .tags()
        .iter()
        .map(|tag| format!("tags={}", urlencoding::encode(tag)))
        .collect();
    params.push(format!("from={}", annotation.time()));
    params.push(format!("to={}", annotation.time_end().unwrap_or(now_ms)));

    format!("{ANNOTATIONS_PATH}?{}", params.join("&"))
}
