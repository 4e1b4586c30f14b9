//! JSON shapes exchanged with the catalog service.
use catalog_core::{CatalogEntry, EntryId, PosterImage, SubmitRequest};
use serde::{Deserialize, Serialize};

use crate::{ApiError, FailureKind};

/// The service is loose about scalars: ids and years arrive as either
/// strings or numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum WireScalar {
    Text(String),
    Number(i64),
}

impl WireScalar {
    fn into_text(self) -> String {
        match self {
            WireScalar::Text(text) => text,
            WireScalar::Number(number) => number.to_string(),
        }
    }

    fn as_year(&self) -> Option<i32> {
        match self {
            WireScalar::Text(text) => text.trim().parse().ok(),
            WireScalar::Number(number) => i32::try_from(*number).ok(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireEntry {
    #[serde(alias = "_id")]
    id: WireScalar,
    title: String,
    #[serde(alias = "publishingYear")]
    publishingyear: WireScalar,
    #[serde(default)]
    poster: Option<String>,
}

impl TryFrom<WireEntry> for CatalogEntry {
    type Error = ApiError;

    fn try_from(wire: WireEntry) -> Result<Self, Self::Error> {
        let publishing_year = wire.publishingyear.as_year().ok_or_else(|| {
            ApiError::new(
                FailureKind::InvalidResponse,
                format!("entry has an unreadable publishing year: {:?}", wire.publishingyear),
            )
        })?;
        Ok(CatalogEntry {
            id: EntryId::new(wire.id.into_text()),
            title: wire.title,
            publishing_year,
            poster: wire
                .poster
                .filter(|poster| !poster.is_empty())
                .map(PosterImage::new),
        })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct WirePayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    title: &'a str,
    publishingyear: &'a str,
    poster: Option<&'a str>,
}

impl<'a> From<&'a SubmitRequest> for WirePayload<'a> {
    fn from(request: &'a SubmitRequest) -> Self {
        Self {
            id: request.id().map(EntryId::as_str),
            title: &request.title,
            publishingyear: &request.publishing_year,
            poster: request.poster.as_ref().map(PosterImage::as_str),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct WireLogin<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireLoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
