//! Candidate matching against an annotation's identity.

use crate::annotation::{Annotation, RemoteAnnotation};

/// Keep the candidates that already represent `annotation`, preserving
/// server-given order.
#[must_use]
pub fn filter_matches(
    candidates: Vec<RemoteAnnotation>,
    annotation: &Annotation,
) -> Vec<RemoteAnnotation> {
    let predicate = if annotation.is_region() {
        matches_region
    } else {
        matches_point
    };
    candidates
        .into_iter()
        .filter(|candidate| predicate(candidate, annotation))
        .collect()
}

/// A point candidate matches on exact `time`, `text` and `tags` equality.
/// Tags compare as whole ordered lists, not as sets.
fn matches_point(candidate: &RemoteAnnotation, annotation: &Annotation) -> bool {
    candidate.time == annotation.time()
        && candidate.text == annotation.text()
        && candidate.tags.as_slice() == annotation.tags()
}

/// A region is stored server-side as two linked point records sharing a
/// `regionId`, and either half may come back as a hit: the candidate's time
/// may equal the start or the end of the identity. Zero/absent `regionId`
/// marks a plain point record and never matches a region identity.
fn matches_region(candidate: &RemoteAnnotation, annotation: &Annotation) -> bool {
    candidate.region_id != 0
        && candidate.text == annotation.text()
        && candidate.tags.as_slice() == annotation.tags()
        && (candidate.time == annotation.time() || Some(candidate.time) == annotation.time_end())
}
