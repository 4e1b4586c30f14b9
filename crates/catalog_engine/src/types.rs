use std::fmt;
use std::io;

use catalog_core::{CatalogEntry, FormId, PosterImage};

use crate::codec::ReadError;

#[derive(Debug)]
pub enum EngineEvent {
    EntriesFetched(Result<Vec<CatalogEntry>, ApiError>),
    EntryFetched {
        form_id: FormId,
        result: Result<CatalogEntry, ApiError>,
    },
    SubmitCompleted {
        form_id: FormId,
        result: Result<(), ApiError>,
    },
    /// Login outcome carrying the issued bearer token.
    LoginCompleted(Result<String, ApiError>),
    ImageEncoded {
        form_id: FormId,
        result: Result<PosterImage, ReadError>,
    },
    /// Emitted once per unauthorized response, after the credential was cleared.
    SessionExpired,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Unauthorized,
    HttpStatus(u16),
    Timeout,
    Network,
    InvalidResponse,
    LoginRejected,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Unauthorized => write!(f, "unauthorized"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::InvalidResponse => write!(f, "invalid response"),
            FailureKind::LoginRejected => write!(f, "login rejected"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] io::Error),
    #[error("failed to configure api client: {0}")]
    Client(#[from] ApiError),
}
