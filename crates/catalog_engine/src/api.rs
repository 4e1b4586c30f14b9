use catalog_core::{CatalogEntry, EntryId, SubmitMode, SubmitRequest};
use catalog_logging::{catalog_debug, catalog_info};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::wire::{WireEntry, WireLogin, WireLoginResponse, WirePayload};
use crate::{ApiError, AuthenticatedClient, FailureKind};

pub const LIST_ENTRIES_PATH: &str = "/movie/getAll";
pub const GET_ENTRY_PATH: &str = "/movie/getById";
pub const CREATE_ENTRY_PATH: &str = "/movie/create";
pub const UPDATE_ENTRY_PATH: &str = "/movie/update";
pub const LOGIN_PATH: &str = "/auth/login";

/// Typed view of the remote catalog service.
#[async_trait::async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_entries(&self) -> Result<Vec<CatalogEntry>, ApiError>;

    async fn get_entry(&self, id: &EntryId) -> Result<CatalogEntry, ApiError>;

    /// `POST` for new entries, `PUT` for existing ones.
    async fn submit_entry(&self, request: &SubmitRequest) -> Result<(), ApiError>;

    /// Returns the bearer token issued for the credentials.
    async fn login(&self, email: &str, password: &str) -> Result<String, ApiError>;
}

pub struct HttpCatalogApi {
    client: AuthenticatedClient,
}

impl HttpCatalogApi {
    pub fn new(client: AuthenticatedClient) -> Self {
        Self { client }
    }

    async fn send_checked(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = self.client.send(builder).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        Ok(response)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::new(FailureKind::InvalidResponse, err.to_string()))
}

#[async_trait::async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn list_entries(&self) -> Result<Vec<CatalogEntry>, ApiError> {
        let builder = self.client.request(Method::GET, LIST_ENTRIES_PATH, &[])?;
        let response = self.send_checked(builder).await?;
        let wire: Vec<WireEntry> = read_json(response).await?;
        catalog_debug!("Fetched {} entries", wire.len());
        wire.into_iter().map(CatalogEntry::try_from).collect()
    }

    async fn get_entry(&self, id: &EntryId) -> Result<CatalogEntry, ApiError> {
        let builder = self
            .client
            .request(Method::GET, GET_ENTRY_PATH, &[("id", id.as_str())])?;
        let response = self.send_checked(builder).await?;
        let wire: WireEntry = read_json(response).await?;
        CatalogEntry::try_from(wire)
    }

    async fn submit_entry(&self, request: &SubmitRequest) -> Result<(), ApiError> {
        let (method, path) = match request.mode {
            SubmitMode::Create => (Method::POST, CREATE_ENTRY_PATH),
            SubmitMode::Update(_) => (Method::PUT, UPDATE_ENTRY_PATH),
        };
        let builder = self
            .client
            .request(method, path, &[])?
            .json(&WirePayload::from(request));
        self.send_checked(builder).await?;
        catalog_info!("Submitted entry {:?}", request.id());
        Ok(())
    }

    async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let builder = self
            .client
            .request(Method::POST, LOGIN_PATH, &[])?
            .json(&WireLogin { email, password });
        let response = self.client.send(builder).await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        let body: WireLoginResponse = read_json(response).await?;
        let accepted = body.message.as_deref().is_some_and(|m| !m.is_empty());
        match body.token.filter(|token| !token.is_empty()) {
            Some(token) if accepted => Ok(token),
            _ => Err(ApiError::new(
                FailureKind::LoginRejected,
                body.message.unwrap_or_else(|| "no token issued".to_string()),
            )),
        }
    }
}
