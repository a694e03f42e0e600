use crate::error::{AppError, Result};
use crate::model::CreateLinkParams;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

pub const GREETING: &str = "hello, this is the shrinkray url shortener";

pub async fn index_handler() -> &'static str {
    GREETING
}

/// Shortens the link in the request body and answers with the short URL.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Query(params): Query<CreateLinkParams>,
    body: String,
) -> Result<String> {
    let outcome = state
        .operations()
        .create_link(&body, params.custom_key())
        .await;
    let status = outcome.status;
    let key = outcome
        .into_result()
        .map_err(|e| AppError::new(status, e))?;
    Ok(key.to_url(state.base_url()))
}

pub async fn resolve_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    let outcome = state.operations().resolve_key(&key).await;
    let status = outcome.status;
    let url = outcome
        .into_result()
        .map_err(|e| AppError::new(status, e))?;
    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, url)]).into_response())
}

/// Dumps every mapping as `key,encodedLink` lines.
pub async fn export_handler(State(state): State<AppState>) -> Result<String> {
    let outcome = state.operations().export_all().await;
    let status = outcome.status;
    let lines = outcome
        .into_result()
        .map_err(|e| AppError::new(status, e))?;
    Ok(lines.join("\n"))
}
