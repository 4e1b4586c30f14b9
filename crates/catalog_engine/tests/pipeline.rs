use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use catalog_engine::{
    ApiSettings, AuthenticatedClient, FailureKind, SessionObserver, SessionStore,
};
use reqwest::Method;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct CountingObserver {
    expired: AtomicUsize,
}

impl SessionObserver for CountingObserver {
    fn session_expired(&self) {
        self.expired.fetch_add(1, Ordering::SeqCst);
    }
}

fn client(
    server: &MockServer,
    session: Arc<SessionStore>,
) -> (AuthenticatedClient, Arc<CountingObserver>) {
    let observer = Arc::new(CountingObserver::default());
    let settings = ApiSettings {
        base_url: server.uri(),
        ..ApiSettings::default()
    };
    let client = AuthenticatedClient::new(&settings, session, observer.clone()).expect("client");
    (client, observer)
}

#[tokio::test]
async fn stored_credential_is_sent_as_bearer() {
    catalog_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/getAll"))
        .and(header("Authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let session = Arc::new(SessionStore::in_memory());
    session.set_credential("abc");
    let (client, _) = client(&server, session);

    let request = client
        .request(Method::GET, "/movie/getAll", &[])
        .expect("request");
    let response = client.send(request).await.expect("response");
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn no_credential_means_no_authorization_header() {
    catalog_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/getAll"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let (client, _) = client(&server, Arc::new(SessionStore::in_memory()));
    let request = client
        .request(Method::GET, "/movie/getAll", &[])
        .expect("request");
    client.send(request).await.expect("response");

    let received = server.received_requests().await.expect("recording enabled");
    assert_eq!(received.len(), 1);
    assert!(received[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn unauthorized_clears_credential_and_signals_once() {
    catalog_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/getAll"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let session = Arc::new(SessionStore::in_memory());
    session.set_credential("stale");
    session.set_remembered_identity("ada@example.com");
    let (client, observer) = client(&server, session.clone());

    let request = client
        .request(Method::GET, "/movie/getAll", &[])
        .expect("request");
    let err = client.send(request).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Unauthorized);
    assert_eq!(session.credential(), None);
    assert_eq!(
        session.remembered_identity().as_deref(),
        Some("ada@example.com")
    );
    assert_eq!(observer.expired.load(Ordering::SeqCst), 1);

    // A second unauthorized response signals again.
    let request = client
        .request(Method::GET, "/movie/getAll", &[])
        .expect("request");
    let _ = client.send(request).await;
    assert_eq!(observer.expired.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn other_error_statuses_pass_through() {
    catalog_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/getAll"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let session = Arc::new(SessionStore::in_memory());
    session.set_credential("abc");
    let (client, observer) = client(&server, session.clone());

    let request = client
        .request(Method::GET, "/movie/getAll", &[])
        .expect("request");
    let response = client.send(request).await.expect("passed through");

    assert_eq!(response.status().as_u16(), 500);
    assert_eq!(session.credential().as_deref(), Some("abc"));
    assert_eq!(observer.expired.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn endpoint_keeps_base_path_and_encodes_query() {
    let server = MockServer::start().await;
    let observer = Arc::new(CountingObserver::default());
    let settings = ApiSettings {
        base_url: format!("{}/api", server.uri()),
        ..ApiSettings::default()
    };
    let client =
        AuthenticatedClient::new(&settings, Arc::new(SessionStore::in_memory()), observer)
            .expect("client");

    let url = client
        .endpoint("/movie/getById", &[("id", "a b")])
        .expect("url");
    assert_eq!(url.path(), "/api/movie/getById");
    assert_eq!(url.query(), Some("id=a+b"));
}

#[test]
fn invalid_base_url_is_rejected() {
    let settings = ApiSettings {
        base_url: "not a url".to_string(),
        ..ApiSettings::default()
    };
    let result = AuthenticatedClient::new(
        &settings,
        Arc::new(SessionStore::in_memory()),
        Arc::new(CountingObserver::default()),
    );
    assert_eq!(result.err().map(|err| err.kind), Some(FailureKind::InvalidUrl));
}
