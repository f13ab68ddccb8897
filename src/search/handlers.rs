use super::types::{FlatResponse, GroupedResponse, SuggestRequest};
use crate::catalog::types::Locale;
use crate::engine::Engine;
use crate::error::{Result, SuggestError};
use axum::body::Bytes;
use axum::http::HeaderMap;
use axum::http::header::ACCEPT_LANGUAGE;
use axum::{Extension, Json};
use std::sync::Arc;

/// Decodes a select body. Decoding failures are the caller's fault, whatever
/// the content type says.
fn parse_request(body: &[u8]) -> Result<SuggestRequest> {
    serde_json::from_slice(body).map_err(|e| SuggestError::invalid(format!("invalid request body: {}", e)))
}

fn request_locale(headers: &HeaderMap) -> Locale {
    Locale::from_language_hint(headers.get(ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok()))
}

/// `POST /select/suggestion` and `POST /select/name`: grouped suggestions.
pub async fn handle_select_suggestion(
    Extension(engine): Extension<Arc<Engine>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<GroupedResponse>> {
    let request = parse_request(&body)?;
    let locale = request_locale(&headers);

    let result = tokio::task::spawn_blocking(move || engine.suggest_groups(&request.text, request.limit, locale))
        .await
        .map_err(|e| SuggestError::Internal(format!("query worker failed: {}", e)))??;

    Ok(Json(GroupedResponse::from(result)))
}

/// `POST /select/sugg`: flat autocomplete list.
pub async fn handle_select_sugg(
    Extension(engine): Extension<Arc<Engine>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<FlatResponse>> {
    let request = parse_request(&body)?;
    let locale = request_locale(&headers);

    let result = tokio::task::spawn_blocking(move || engine.suggest_flat(&request.text, request.limit, locale))
        .await
        .map_err(|e| SuggestError::Internal(format!("query worker failed: {}", e)))??;

    Ok(Json(FlatResponse::from(result)))
}
