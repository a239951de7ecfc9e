//! Reconciliation behavior against in-memory transports.

use std::cell::RefCell;

use pretty_assertions::assert_eq;

use mer_client::{
    Annotation, AnnotationClient, Auth, ClientError, HttpResponse, RemoteAnnotation, Transport,
};

const BASE_URL: &str = "http://grafana:3000";

fn token_auth() -> Auth {
    Auth::Token("glsa_test".to_string())
}

fn response(status: u16, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        body: body.as_bytes().to_vec(),
    }
}

#[derive(Debug)]
struct RecordedRequest {
    method: &'static str,
    url: String,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

/// Replays canned responses in order and records every request.
struct ScriptedTransport {
    responses: RefCell<Vec<HttpResponse>>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    fn new(responses: Vec<HttpResponse>) -> Self {
        Self {
            responses: RefCell::new(responses),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn next_response(&self) -> HttpResponse {
        let mut responses = self.responses.borrow_mut();
        assert!(!responses.is_empty(), "transport script exhausted");
        responses.remove(0)
    }
}

impl Transport for ScriptedTransport {
    fn get(&self, url: &str, headers: &[(String, String)]) -> Result<HttpResponse, ClientError> {
        self.requests.borrow_mut().push(RecordedRequest {
            method: "GET",
            url: url.to_string(),
            headers: headers.to_vec(),
            body: None,
        });
        Ok(self.next_response())
    }

    fn post(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: Vec<u8>,
    ) -> Result<HttpResponse, ClientError> {
        self.requests.borrow_mut().push(RecordedRequest {
            method: "POST",
            url: url.to_string(),
            headers: headers.to_vec(),
            body: Some(body),
        });
        Ok(self.next_response())
    }
}

/// Minimal annotation store: persists creates and serves every stored record
/// on search. Filtering is the client's job, so returning the whole store is
/// a faithful stand-in for a wide server-side query window.
struct MemoryStore {
    records: RefCell<Vec<RemoteAnnotation>>,
    next_id: RefCell<i64>,
}

impl MemoryStore {
    fn new() -> Self {
        Self {
            records: RefCell::new(Vec::new()),
            next_id: RefCell::new(1),
        }
    }
}

impl Transport for MemoryStore {
    fn get(&self, _url: &str, _headers: &[(String, String)]) -> Result<HttpResponse, ClientError> {
        let body = serde_json::to_vec(&*self.records.borrow()).unwrap();
        Ok(HttpResponse { status: 200, body })
    }

    fn post(
        &self,
        _url: &str,
        _headers: &[(String, String)],
        body: Vec<u8>,
    ) -> Result<HttpResponse, ClientError> {
        let payload: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let id = *self.next_id.borrow();
        *self.next_id.borrow_mut() += 1;

        let text = payload["text"].as_str().unwrap_or_default().to_string();
        let tags: Vec<String> = payload["tags"]
            .as_array()
            .map(|tags| {
                tags.iter()
                    .filter_map(|tag| tag.as_str().map(ToString::to_string))
                    .collect()
            })
            .unwrap_or_default();
        let time = payload["time"].as_i64().unwrap_or_default();
        let time_end = payload["timeEnd"].as_i64();
        let is_region = payload["isRegion"].as_bool().unwrap_or(false);
        let region_id = if is_region { id } else { 0 };

        let mut records = self.records.borrow_mut();
        records.push(RemoteAnnotation {
            id: Some(id),
            time,
            time_end,
            text: text.clone(),
            tags: tags.clone(),
            region_id,
            message: None,
        });
        if is_region {
            // The server keeps the end of a region as a second linked record.
            records.push(RemoteAnnotation {
                id: Some(id + 1000),
                time: time_end.unwrap_or(time),
                time_end,
                text,
                tags,
                region_id,
                message: None,
            });
        }

        Ok(response(
            200,
            &format!(r#"{{"message":"Annotation added","id":{id}}}"#),
        ))
    }
}

#[test]
fn publishing_twice_is_idempotent() {
    let store = MemoryStore::new();
    let client = AnnotationClient::with_transport(store, BASE_URL, &token_auth());
    let annotation =
        Annotation::new("deploy v1", &["release".to_string()], Some(1000), None).unwrap();

    let first = client.reconcile(&annotation).unwrap();
    assert!(first.changed);
    assert_eq!(first.annotations.len(), 1);

    let second = client.reconcile(&annotation).unwrap();
    assert!(!second.changed);
    assert_eq!(second.annotations[0].text, "deploy v1");
    assert_eq!(second.annotations[0].time, 1_000_000);
}

#[test]
fn region_republish_matches_stored_halves() {
    let store = MemoryStore::new();
    let client = AnnotationClient::with_transport(store, BASE_URL, &token_auth());
    let annotation = Annotation::new(
        "deploy window",
        &["release".to_string()],
        Some(1000),
        Some(2000),
    )
    .unwrap();

    let first = client.reconcile(&annotation).unwrap();
    assert!(first.changed);

    let second = client.reconcile(&annotation).unwrap();
    assert!(!second.changed);
    // Both halves of the stored region satisfy the region predicate.
    assert_eq!(second.annotations.len(), 2);
    assert!(second.annotations.iter().all(|a| a.region_id != 0));
}

#[test]
fn existing_region_hit_prevents_create() {
    let transport = ScriptedTransport::new(vec![response(
        200,
        r#"[{"time":1000000,"text":"deploy window","tags":["ansible","release"],"regionId":7}]"#,
    )]);
    let client = AnnotationClient::with_transport(transport, BASE_URL, &token_auth());
    let annotation = Annotation::new(
        "deploy window",
        &["release".to_string()],
        Some(1000),
        Some(2000),
    )
    .unwrap();

    let outcome = client.reconcile(&annotation).unwrap();
    assert!(!outcome.changed);
    assert_eq!(outcome.annotations.len(), 1);
    assert_eq!(outcome.annotations[0].region_id, 7);

    let requests = client.transport().requests.borrow();
    assert_eq!(requests.len(), 1, "no create should have been issued");
    assert_eq!(requests[0].method, "GET");
}

#[test]
fn non_matching_candidates_trigger_create() {
    let transport = ScriptedTransport::new(vec![
        response(
            200,
            r#"[{"time":1000000,"text":"something else","tags":["ansible"]}]"#,
        ),
        response(200, r#"{"message":"Annotation added","id":42}"#),
    ]);
    let client = AnnotationClient::with_transport(transport, BASE_URL, &token_auth());
    let annotation = Annotation::new("deploy v1", &[], Some(1000), None).unwrap();

    let outcome = client.reconcile(&annotation).unwrap();
    assert!(outcome.changed);
    assert_eq!(outcome.annotations[0].id, Some(42));
}

#[test]
fn search_failure_surfaces_status_and_body() {
    let transport = ScriptedTransport::new(vec![response(500, "database is locked")]);
    let client = AnnotationClient::with_transport(transport, BASE_URL, &token_auth());
    let annotation = Annotation::new("deploy v1", &[], Some(1000), None).unwrap();

    let err = client.reconcile(&annotation).unwrap_err();
    match err {
        ClientError::Remote { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "database is locked");
        }
        other => panic!("expected remote error, got {other:?}"),
    }
}

#[test]
fn create_failure_surfaces_status() {
    let transport = ScriptedTransport::new(vec![
        response(200, "[]"),
        response(403, "insufficient permissions"),
    ]);
    let client = AnnotationClient::with_transport(transport, BASE_URL, &token_auth());
    let annotation = Annotation::new("deploy v1", &[], Some(1000), None).unwrap();

    let err = client.reconcile(&annotation).unwrap_err();
    assert!(matches!(err, ClientError::Remote { status: 403, .. }));
}

#[test]
fn malformed_search_body_is_a_parse_error() {
    let transport = ScriptedTransport::new(vec![response(200, "<html>gateway</html>")]);
    let client = AnnotationClient::with_transport(transport, BASE_URL, &token_auth());
    let annotation = Annotation::new("deploy v1", &[], Some(1000), None).unwrap();

    let err = client.reconcile(&annotation).unwrap_err();
    assert!(matches!(err, ClientError::Parse(_)));
}

#[test]
fn requests_carry_fixed_headers() {
    let transport = ScriptedTransport::new(vec![
        response(200, "[]"),
        response(200, r#"{"message":"Annotation added","id":1}"#),
    ]);
    let auth = Auth::resolve(Some("admin"), Some("admin"), None).unwrap();
    let client = AnnotationClient::with_transport(transport, BASE_URL, &auth);
    let annotation = Annotation::new("deploy v1", &[], Some(1000), None).unwrap();

    client.reconcile(&annotation).unwrap();

    let requests = client.transport().requests.borrow();
    assert_eq!(requests.len(), 2);
    for request in requests.iter() {
        let find = |name: &str| {
            request
                .headers
                .iter()
                .find(|(header, _)| header == name)
                .map(|(_, value)| value.as_str())
        };
        assert_eq!(find("Content-Type"), Some("application/json"));
        assert_eq!(find("Accept"), Some("application/json"));
        assert_eq!(find("Authorization"), Some("Basic YWRtaW46YWRtaW4="));
    }
}

#[test]
fn search_url_carries_identity_query() {
    let transport = ScriptedTransport::new(vec![response(200, "[]"), response(200, "{}")]);
    let client = AnnotationClient::with_transport(transport, BASE_URL, &token_auth());
    let annotation = Annotation::new(
        "deploy window",
        &["release".to_string()],
        Some(1000),
        Some(2000),
    )
    .unwrap();

    client.reconcile(&annotation).unwrap();

    let requests = client.transport().requests.borrow();
    assert_eq!(
        requests[0].url,
        "http://grafana:3000/api/annotations?tags=ansible&tags=release&from=1000000&to=2000000"
    );
    assert_eq!(requests[1].url, "http://grafana:3000/api/annotations");
}

#[test]
fn create_payload_matches_wire_contract() {
    let transport = ScriptedTransport::new(vec![response(200, "[]"), response(200, "{}")]);
    let client = AnnotationClient::with_transport(transport, BASE_URL, &token_auth());
    let annotation = Annotation::new(
        "deploy window",
        &["release".to_string()],
        Some(1000),
        Some(2000),
    )
    .unwrap();

    client.reconcile(&annotation).unwrap();

    let requests = client.transport().requests.borrow();
    let body = requests[1].body.as_ref().unwrap();
    assert_eq!(
        std::str::from_utf8(body).unwrap(),
        r#"{"text":"deploy window","tags":["ansible","release"],"time":1000000,"timeEnd":2000000,"isRegion":true}"#
    );
}
