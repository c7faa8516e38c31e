use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json};
use onceread_gate::{SanitizedContent, ValidationError};
use onceread_types::{is_well_formed, EntryKey};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub key: EntryKey,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct EntryResponse {
    pub content: SanitizedContent,
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Info handler.
pub async fn info_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "name": "onceread-server",
        "version": env!("CARGO_PKG_VERSION"),
        "backend": state.backend_kind,
        "max_chars": state.sanitizer.max_chars(),
    }))
}

/// `POST /v1/entries` with `{"content": "..."}`.
pub async fn create_entry(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let Json(body) = payload.map_err(|_| ValidationError::NotText)?;
    let raw = body
        .get("content")
        .and_then(Value::as_str)
        .ok_or(ValidationError::NotText)?;
    let content = state.sanitizer.admit(raw)?;

    let vault = state.vault.clone();
    let key = tokio::task::spawn_blocking(move || vault.create(&content))
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))??;
    info!(key = key.short(), "entry created");

    let url = format!("/v1/entries/{key}");
    Ok((StatusCode::CREATED, Json(CreatedResponse { key, url })))
}

/// `GET /v1/entries/:key`. Succeeds at most once per key.
pub async fn consume_entry(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ServerResult<impl IntoResponse> {
    if !is_well_formed(&key) {
        return Err(ServerError::NotFound);
    }

    let vault = state.vault.clone();
    let content = tokio::task::spawn_blocking(move || vault.consume_once(&key))
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))??
        .ok_or(ServerError::NotFound)?;

    Ok((
        [(header::CACHE_CONTROL, "no-store")],
        Json(EntryResponse { content }),
    ))
}
