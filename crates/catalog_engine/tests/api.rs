use std::sync::Arc;

use catalog_core::{CatalogEntry, EntryId, PosterImage, SubmitMode, SubmitRequest};
use catalog_engine::{
    ApiSettings, AuthenticatedClient, CatalogApi, FailureKind, HttpCatalogApi, SessionObserver,
    SessionStore,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct IgnoreExpiry;

impl SessionObserver for IgnoreExpiry {
    fn session_expired(&self) {}
}

fn api(server: &MockServer, token: Option<&str>) -> HttpCatalogApi {
    let session = Arc::new(SessionStore::in_memory());
    if let Some(token) = token {
        session.set_credential(token);
    }
    let settings = ApiSettings {
        base_url: server.uri(),
        ..ApiSettings::default()
    };
    let client =
        AuthenticatedClient::new(&settings, session, Arc::new(IgnoreExpiry)).expect("client");
    HttpCatalogApi::new(client)
}

#[tokio::test]
async fn list_entries_accepts_loose_scalars() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/getAll"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "Alien", "publishingyear": 1979, "poster": "https://cdn/a.png"},
            {"id": "2", "title": "Heat", "publishingyear": "1995", "poster": null},
            {"_id": "3", "title": "Up", "publishingYear": "2009", "poster": ""},
        ])))
        .mount(&server)
        .await;

    let entries = api(&server, Some("abc")).list_entries().await.expect("entries");
    assert_eq!(
        entries,
        vec![
            CatalogEntry {
                id: EntryId::new("1"),
                title: "Alien".into(),
                publishing_year: 1979,
                poster: Some(PosterImage::new("https://cdn/a.png")),
            },
            CatalogEntry {
                id: EntryId::new("2"),
                title: "Heat".into(),
                publishing_year: 1995,
                poster: None,
            },
            CatalogEntry {
                id: EntryId::new("3"),
                title: "Up".into(),
                publishing_year: 2009,
                poster: None,
            },
        ]
    );
}

#[tokio::test]
async fn list_entries_reports_server_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/getAll"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = api(&server, None).list_entries().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
}

#[tokio::test]
async fn list_entries_rejects_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/getAll"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"oops": true})))
        .mount(&server)
        .await;

    let err = api(&server, None).list_entries().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidResponse);
}

#[tokio::test]
async fn get_entry_passes_id_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/getById"))
        .and(query_param("id", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(
            {"id": "42", "title": "Metropolis", "publishingyear": "1927"}
        )))
        .expect(1)
        .mount(&server)
        .await;

    let entry = api(&server, Some("abc"))
        .get_entry(&EntryId::new("42"))
        .await
        .expect("entry");
    assert_eq!(entry.title, "Metropolis");
    assert_eq!(entry.publishing_year, 1927);
    assert_eq!(entry.poster, None);
}

#[tokio::test]
async fn create_posts_payload_with_null_poster() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/movie/create"))
        .and(header("Authorization", "Bearer abc"))
        .and(body_json(json!({
            "title": "Dune",
            "publishingyear": "1965",
            "poster": null,
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let request = SubmitRequest {
        mode: SubmitMode::Create,
        title: "Dune".into(),
        publishing_year: "1965".into(),
        poster: None,
    };
    api(&server, Some("abc"))
        .submit_entry(&request)
        .await
        .expect("created");
}

#[tokio::test]
async fn update_puts_payload_with_id() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/movie/update"))
        .and(body_json(json!({
            "id": "42",
            "title": "Metropolis",
            "publishingyear": "1927",
            "poster": "data:image/png;base64,AAAA",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let request = SubmitRequest {
        mode: SubmitMode::Update(EntryId::new("42")),
        title: "Metropolis".into(),
        publishing_year: "1927".into(),
        poster: Some(PosterImage::new("data:image/png;base64,AAAA")),
    };
    api(&server, Some("abc"))
        .submit_entry(&request)
        .await
        .expect("updated");
}

#[tokio::test]
async fn submit_failure_surfaces_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/movie/create"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;

    let request = SubmitRequest {
        mode: SubmitMode::Create,
        title: "Dune".into(),
        publishing_year: "1965".into(),
        poster: None,
    };
    let err = api(&server, Some("abc"))
        .submit_entry(&request)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(422));
}

#[tokio::test]
async fn login_returns_token_when_message_present() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "ada@example.com", "password": "abc123!"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"token": "tok-1", "message": "Login successful"})),
        )
        .mount(&server)
        .await;

    let token = api(&server, None)
        .login("ada@example.com", "abc123!")
        .await
        .expect("token");
    assert_eq!(token, "tok-1");
}

#[tokio::test]
async fn login_without_message_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "tok-1"})))
        .mount(&server)
        .await;

    let err = api(&server, None)
        .login("ada@example.com", "abc123!")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::LoginRejected);
}

#[tokio::test]
async fn login_with_other_success_status_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(202).set_body_json(json!({"token": "t", "message": "ok"})),
        )
        .mount(&server)
        .await;

    let err = api(&server, None)
        .login("ada@example.com", "abc123!")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(202));
}
