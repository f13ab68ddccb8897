use super::types::{IngestResponse, PopularityResponse};
use crate::engine::Engine;
use crate::error::{Result, SuggestError};
use axum::body::Bytes;
use axum::{Extension, Json};
use std::sync::Arc;

/// `POST /upload/suggestions`: replaces the whole catalog with the CSV body.
pub async fn handle_upload_suggestions(
    Extension(engine): Extension<Arc<Engine>>,
    body: Bytes,
) -> Result<Json<IngestResponse>> {
    let rows = tokio::task::spawn_blocking(move || engine.ingest_csv(&body))
        .await
        .map_err(|e| SuggestError::Internal(format!("ingestion worker failed: {}", e)))??;

    Ok(Json(IngestResponse { rows }))
}

/// `POST /upload/popularity`: merges `id,count` rows into the popularity table.
pub async fn handle_upload_popularity(
    Extension(engine): Extension<Arc<Engine>>,
    body: Bytes,
) -> Result<Json<PopularityResponse>> {
    let response = tokio::task::spawn_blocking(move || engine.upload_popularity_csv(&body))
        .await
        .map_err(|e| SuggestError::Internal(format!("popularity worker failed: {}", e)))??;

    Ok(Json(response))
}
