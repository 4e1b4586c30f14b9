use std::sync::Arc;
use std::time::Duration;

use catalog_core::{SubmitMode, SubmitRequest};
use catalog_engine::{ApiSettings, EngineEvent, EngineHandle, FailureKind, SessionStore};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WAIT: Duration = Duration::from_secs(5);

async fn next_event(engine: Arc<EngineHandle>) -> EngineEvent {
    tokio::task::spawn_blocking(move || engine.recv_timeout(WAIT))
        .await
        .expect("join")
        .expect("event before timeout")
}

fn engine_for(server: &MockServer, session: Arc<SessionStore>) -> Arc<EngineHandle> {
    let settings = ApiSettings {
        base_url: server.uri(),
        ..ApiSettings::default()
    };
    Arc::new(EngineHandle::new(settings, session).expect("engine"))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn fetch_entries_reports_entries() {
    catalog_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/getAll"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "1", "title": "Alien", "publishingyear": "1979"}
        ])))
        .mount(&server)
        .await;

    let engine = engine_for(&server, Arc::new(SessionStore::in_memory()));
    engine.fetch_entries();

    match next_event(engine).await {
        EngineEvent::EntriesFetched(Ok(entries)) => {
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].title, "Alien");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unauthorized_submit_emits_expiry_then_failure() {
    catalog_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/movie/create"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let session = Arc::new(SessionStore::in_memory());
    session.set_credential("expired");
    let engine = engine_for(&server, session.clone());
    engine.submit(
        9,
        SubmitRequest {
            mode: SubmitMode::Create,
            title: "Dune".into(),
            publishing_year: "1965".into(),
            poster: None,
        },
    );

    assert!(matches!(
        next_event(engine.clone()).await,
        EngineEvent::SessionExpired
    ));
    match next_event(engine.clone()).await {
        EngineEvent::SubmitCompleted { form_id, result } => {
            assert_eq!(form_id, 9);
            assert_eq!(result.unwrap_err().kind, FailureKind::Unauthorized);
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(session.credential(), None);
    assert!(engine.try_recv().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn encode_image_reports_read_errors() {
    catalog_logging::initialize_for_tests();
    let server = MockServer::start().await;
    let engine = engine_for(&server, Arc::new(SessionStore::in_memory()));

    engine.encode_image(3, "/definitely/not/here.png");

    match next_event(engine).await {
        EngineEvent::ImageEncoded { form_id, result } => {
            assert_eq!(form_id, 3);
            assert!(result.is_err());
        }
        other => panic!("unexpected event {other:?}"),
    }
}
