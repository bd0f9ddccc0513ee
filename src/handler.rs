//! HTTP request handlers for the PC catalog
//!
//! This module implements the API endpoints:
//! - Listing records, newest first
//! - Creating a record from a validated payload
//! - Deleting a record by id
//!
//! plus the fallback that serves the static front-end. Store calls are
//! blocking SQLite work, so each one runs on tokio's blocking pool.

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::info;

use crate::database::StoreError;
use crate::error::ApiError;
use crate::model::PcRecord;
use crate::route::AppState;
use crate::validation;

/// Lists all PC records
///
/// # Response
///
/// - **200 OK** - JSON array, newest first (empty array when the store is empty)
pub async fn list_pcs(State(state): State<AppState>) -> Result<Json<Vec<PcRecord>>, ApiError> {
    let store = state.store.clone();
    let records = run_blocking(move || store.list()).await?;
    Ok(Json(records))
}

/// Creates a new PC record
///
/// The body is read as raw bytes so a missing or odd `Content-Type` does not
/// matter; decoding and validation decide what is acceptable.
///
/// # Request Body
///
/// ```json
/// {
///   "id": "pc1",
///   "name": "Gaming",
///   "cpu": "i7",
///   "ram": "16",
///   "storage": "512",
///   "purpose": "gaming",
///   "note": ""  // Optional
/// }
/// ```
///
/// # Response
///
/// - **201 Created** - The stored record, including `createdAt`
/// - **400 Bad Request** - Malformed body, missing field, or invalid ram/storage
/// - **409 Conflict** - The id already exists
pub async fn create_pc(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<PcRecord>), ApiError> {
    let body = body.map_err(|rejection| ApiError::MalformedRequest(rejection.body_text()))?;
    let payload =
        validation::decode(&body).map_err(|err| ApiError::MalformedRequest(err.to_string()))?;
    let record = validation::validate(payload)?.into_record(Utc::now());

    let store = state.store.clone();
    let created = run_blocking(move || store.insert(record)).await?;

    info!(id = %created.id, "Created pc record");
    Ok((StatusCode::CREATED, Json(created)))
}

/// Deletes a PC record by id
///
/// The id arrives percent-decoded from the path and is trimmed.
///
/// # Response
///
/// - **200 OK** - `{"message": "Deleted", "deleted_id": "..."}`
/// - **400 Bad Request** - The id is blank or does not decode to UTF-8
/// - **404 Not Found** - No record with that id
pub async fn delete_pc(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::InvalidId)?;
    let id = id.trim().to_owned();
    if id.is_empty() {
        return Err(ApiError::InvalidId);
    }

    let store = state.store.clone();
    let key = id.clone();
    let removed = run_blocking(move || store.delete_by_id(&key)).await?;
    if !removed {
        return Err(ApiError::NotFound(format!("Record '{id}' not found")));
    }

    info!(id = %id, "Deleted pc record");
    Ok(Json(json!({
        "message": "Deleted",
        "deleted_id": id
    })))
}

/// `DELETE /api/pcs/` with nothing after the slash
pub async fn reject_empty_id() -> ApiError {
    ApiError::InvalidId
}

/// Any API method or path without a handler
pub async fn api_not_found() -> ApiError {
    ApiError::not_found()
}

/// Serves the static front-end for every non-API request
///
/// Only GET and HEAD are served; other methods get the JSON 404.
pub async fn serve_static(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Result<Response, ApiError> {
    if method != Method::GET && method != Method::HEAD {
        return Err(ApiError::not_found());
    }

    let asset = state.assets.load(uri.path()).await?;
    Ok(([(header::CONTENT_TYPE, asset.content_type)], asset.bytes).into_response())
}

async fn run_blocking<T, F>(operation: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(operation)
        .await
        .map_err(|err| ApiError::Internal(format!("store task failed: {err}")))?
        .map_err(ApiError::from)
}
