//! HTTP-facing error type
//!
//! Every failure a handler can hit is converted into [`ApiError`] and rendered
//! as `{"message": "..."}` with a matching status code. Internal details are
//! logged, not sent to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::database::StoreError;
use crate::static_files::StaticError;
use crate::validation::ValidationError;

/// Body used for unmatched routes
pub const NOT_FOUND_MESSAGE: &str = "Not found";

#[derive(Error, Debug)]
pub enum ApiError {
    /// The body was not a JSON object of known fields. HTTP 400.
    #[error("Invalid request body: {0}")]
    MalformedRequest(String),

    /// A field failed validation. HTTP 400.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The id in the path was blank. HTTP 400.
    #[error("Invalid ID")]
    InvalidId,

    /// HTTP 409.
    #[error("ID '{0}' already exists, please choose another")]
    DuplicateId(String),

    /// Unknown record or route. HTTP 404.
    #[error("{0}")]
    NotFound(String),

    /// Static path outside the served root. HTTP 403.
    #[error("Forbidden")]
    Forbidden,

    /// Anything unexpected. HTTP 500.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn not_found() -> Self {
        Self::NotFound(NOT_FOUND_MESSAGE.to_owned())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MalformedRequest(_) | Self::Validation(_) | Self::InvalidId => {
                StatusCode::BAD_REQUEST
            }
            Self::DuplicateId(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client.
    pub fn message(&self) -> String {
        match self {
            Self::Internal(_) => "Internal server error".to_owned(),
            other => other.to_string(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateId(id) => Self::DuplicateId(id),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<StaticError> for ApiError {
    fn from(err: StaticError) -> Self {
        match err {
            StaticError::Forbidden => Self::Forbidden,
            StaticError::NotFound => Self::not_found(),
            StaticError::Io(source) => Self::Internal(source.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(detail) = &self {
            error!(error = %detail, "Request failed");
        }

        let status = self.status_code();
        (status, Json(json!({ "message": self.message() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_mapping() {
        assert_eq!(ApiError::MalformedRequest("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Validation(ValidationError::MissingField("id")).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::InvalidId.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::DuplicateId("pc1".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(ApiError::not_found().status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::Internal("x".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn store_errors_convert() {
        let err: ApiError = StoreError::DuplicateId("pc1".into()).into();
        assert!(matches!(err, ApiError::DuplicateId(ref id) if id == "pc1"));

        let err: ApiError = StoreError::Query(rusqlite::Error::QueryReturnedNoRows).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn internal_details_are_hidden() {
        let err = ApiError::Internal("disk I/O error at /var/lib/db".into());
        assert_eq!(err.message(), "Internal server error");
        assert_eq!(ApiError::not_found().message(), "Not found");
        assert_eq!(
            ApiError::Validation(ValidationError::InvalidNumber("ram")).message(),
            "ram must be a positive integer"
        );
    }
}
