use std::sync::{Arc, Mutex};

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pipebird_admin::{ApiClient, MemorySession, Navigator, SessionStore};

#[derive(Default)]
struct RecordingNavigator {
    routes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    fn routes(&self) -> Vec<String> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, route: &str) {
        self.routes.lock().unwrap().push(route.to_string());
    }
}

fn client_with(
    server: &MockServer,
    session: Arc<MemorySession>,
) -> (ApiClient, Arc<RecordingNavigator>) {
    let navigator = Arc::new(RecordingNavigator::default());
    let api = ApiClient::new(&server.uri(), session, navigator.clone()).unwrap();
    (api, navigator)
}

#[tokio::test]
async fn requests_carry_the_stored_bearer_credential() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sources"))
        .and(header("authorization", "Bearer sk_live_first"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let session = Arc::new(MemorySession::with_secret("sk_live_first"));
    let (api, _) = client_with(&server, session);

    api.get("/sources").await.unwrap();
}

#[tokio::test]
async fn credential_changes_apply_on_the_next_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sources"))
        .and(header("authorization", "Bearer sk_live_first"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": [] })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sources"))
        .and(header("authorization", "Bearer sk_live_second"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let session = Arc::new(MemorySession::with_secret("sk_live_first"));
    let (api, _) = client_with(&server, session.clone());

    api.get("/sources").await.unwrap();

    // Swap the credential without rebuilding the client.
    session.set("sk_live_second", false);
    api.get("/sources").await.unwrap();
}

#[tokio::test]
async fn anonymous_requests_carry_no_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sources"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": [] })))
        .mount(&server)
        .await;

    let session = Arc::new(MemorySession::new());
    let (api, _) = client_with(&server, session);

    api.get("/sources").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn unauthorized_clears_session_and_redirects_to_login() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/views"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Unauthorized" })),
        )
        .mount(&server)
        .await;

    let session = Arc::new(MemorySession::with_secret("sk_live_expired"));
    let (api, navigator) = client_with(&server, session.clone());

    let err = api.get("/views").await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Unauthorized");

    assert_eq!(session.get(), None);
    assert_eq!(navigator.routes(), vec!["/login".to_string()]);
}

#[tokio::test]
async fn other_error_statuses_propagate_without_side_effects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/views"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "message": "tableName is invalid" })),
        )
        .mount(&server)
        .await;

    let session = Arc::new(MemorySession::with_secret("sk_live_good"));
    let (api, navigator) = client_with(&server, session.clone());

    let err = api.get("/views").await.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(422));
    assert_eq!(err.to_string(), "tableName is invalid");

    // Session survives and no redirect happens.
    assert_eq!(session.get().as_deref(), Some("sk_live_good"));
    assert!(navigator.routes().is_empty());
}

#[tokio::test]
async fn error_message_falls_back_to_the_reason_phrase() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sources"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let session = Arc::new(MemorySession::with_secret("sk_live_good"));
    let (api, _) = client_with(&server, session);

    let err = api.get("/sources").await.unwrap_err();
    assert_eq!(err.to_string(), "Internal Server Error");
}

#[tokio::test]
async fn fetcher_decodes_list_envelopes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sources"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{
                "id": 4,
                "nickname": "prod replica",
                "status": "REACHABLE",
                "sourceType": "POSTGRES",
                "schema": "public",
                "database": "orders"
            }]
        })))
        .mount(&server)
        .await;

    let session = Arc::new(MemorySession::with_secret("sk_live_good"));
    let (api, _) = client_with(&server, session);

    let sources = api.sources().await.unwrap();
    assert_eq!(sources.content.len(), 1);
    assert_eq!(sources.content[0].id, 4);
    assert_eq!(sources.content[0].display_label(), "prod replica (POSTGRES)");
}
