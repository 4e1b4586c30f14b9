use std::sync::{mpsc, Arc};
use std::time::Duration;

use catalog_logging::{catalog_trace, catalog_warn, redact};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use url::Url;

use crate::{ApiError, EngineEvent, FailureKind, SessionStore};

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Receives the global session-invalidation signal.
pub trait SessionObserver: Send + Sync {
    fn session_expired(&self);
}

pub struct ChannelSessionObserver {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelSessionObserver {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl SessionObserver for ChannelSessionObserver {
    fn session_expired(&self) {
        let _ = self.tx.send(EngineEvent::SessionExpired);
    }
}

/// Single choke point for outbound calls to the catalog service.
///
/// Attaches the stored bearer credential to every request and turns an
/// unauthorized response into a session-wide invalidation: the credential is
/// cleared and the observer notified before the caller sees the error. Any
/// other status is handed back untouched. Holds no per-request state, so
/// concurrent requests are safe.
pub struct AuthenticatedClient {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<SessionStore>,
    observer: Arc<dyn SessionObserver>,
}

impl AuthenticatedClient {
    pub fn new(
        settings: &ApiSettings,
        session: Arc<SessionStore>,
        observer: Arc<dyn SessionObserver>,
    ) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            http,
            base_url,
            session,
            observer,
        })
    }

    pub fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Starts a request, with the bearer credential attached when one is stored.
    pub fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<RequestBuilder, ApiError> {
        let url = self.endpoint(path, query)?;
        catalog_trace!("{} {}", method, url);
        let builder = self.http.request(method, url);
        Ok(match self.session.credential() {
            Some(token) => {
                catalog_trace!("Attaching bearer credential {}", redact(&token));
                builder.bearer_auth(token)
            }
            None => builder,
        })
    }

    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await.map_err(map_reqwest_error)?;
        if response.status() == StatusCode::UNAUTHORIZED {
            catalog_warn!(
                "Unauthorized response from {}; invalidating session",
                response.url().path()
            );
            self.session.clear_credential();
            self.observer.session_expired();
            return Err(ApiError::new(
                FailureKind::Unauthorized,
                StatusCode::UNAUTHORIZED.to_string(),
            ));
        }
        Ok(response)
    }
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(FailureKind::InvalidResponse, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
