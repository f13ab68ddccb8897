//! Error Taxonomy
//!
//! Every core operation returns [`Result`]. The variants map one-to-one onto the
//! client-facing failure classes: bad input is the caller's fault (4xx), while a
//! missing partition or a failing search backend is ours (5xx).

use crate::catalog::types::{Category, Locale};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

pub type Result<T> = std::result::Result<T, SuggestError>;

#[derive(Debug, thiserror::Error)]
pub enum SuggestError {
    /// Malformed CSV/JSON, query text out of bounds, bad limit.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Queried a (category, locale) that no ingestion has installed yet.
    #[error("index not found ({category}-{locale})")]
    PartitionNotFound { category: Category, locale: Locale },

    /// The search index failed to build a query or execute a search.
    #[error("search backend error: {0}")]
    SearchBackend(#[from] tantivy::TantivyError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl SuggestError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        SuggestError::InvalidInput(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            SuggestError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            SuggestError::PartitionNotFound { .. }
            | SuggestError::SearchBackend(_)
            | SuggestError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SuggestError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("err: {}", self);
        } else {
            tracing::warn!("rejected: {}", self);
        }
        (status, self.to_string()).into_response()
    }
}
