use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// One catalog item exactly as served by the API.
///
/// Everything except `_id` is defaulted; the server tolerates missing
/// fields and so does the client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlantRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cost: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
}

/// Response body of the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageEnvelope {
    pub plants: Vec<PlantRecord>,
    /// Items matching the filter across all pages.
    pub total: u64,
    /// Echo of the requested 1-based page index.
    pub page: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct DeleteEnvelope {
    #[serde(rename = "deletedCount")]
    pub deleted_count: u64,
}

/// Query parameters for one listing request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageQuery {
    pub page: u32,
    pub page_size: u32,
    /// Omitted from the query string when `None` ("all categories").
    pub category: Option<String>,
    /// `priceAsc` or `priceDesc`; omitted means server default order.
    pub sort: Option<String>,
}

/// Fields for a create or full-replacement update, sent as multipart form
/// data because the image travels with the text fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlantDraft {
    pub name: String,
    pub cost: String,
    pub category: String,
    pub status: String,
    pub description: String,
    pub image: Option<ImageUpload>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Failure taxonomy for one request attempt. All variants are terminal;
/// there is no retry or backoff in the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorKind {
    InvalidUrl,
    Network,
    Timeout,
    HttpStatus(u16),
    MalformedBody,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::InvalidUrl => write!(f, "invalid url"),
            ApiErrorKind::Network => write!(f, "network error"),
            ApiErrorKind::Timeout => write!(f, "timeout"),
            ApiErrorKind::HttpStatus(code) => write!(f, "http status {code}"),
            ApiErrorKind::MalformedBody => write!(f, "malformed response body"),
        }
    }
}

/// The write operation an engine result refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    Create,
    Update,
    DeleteOne,
    DeleteMany,
}

/// Completion reports from the engine thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// A listing request finished. `session` is the caller's tag, passed
    /// through untouched so stale replies can be discarded.
    PageFetched {
        session: u64,
        result: Result<PageEnvelope, ApiError>,
    },
    /// A single-item detail request finished.
    DetailFetched {
        result: Result<PlantRecord, ApiError>,
    },
    /// A write finished. On success the payload is the affected-row count
    /// (the server's `deletedCount` for deletes, 1 for create/update).
    Mutated {
        kind: WriteKind,
        result: Result<u64, ApiError>,
    },
}
