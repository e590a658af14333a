//! HTTP error type and `{"message": ...}` error payloads.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contacts_core::RepoError;
use log::error;
use serde::Serialize;

/// Body shape shared by every non-list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Handler error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Create request lacked one of the required fields.
    #[error("First name, last name, and email are required.")]
    MissingContactFields,
    /// Request was rejected by parsing or storage validation.
    #[error("{0}")]
    BadRequest(String),
    /// Referenced contact does not exist.
    #[error("User not found")]
    ContactNotFound,
    /// Storage or runtime failure; details are logged, not returned.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingContactFields | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::ContactNotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(_) => Self::ContactNotFound,
            RepoError::DuplicateEmail(_) | RepoError::Validation(_) => {
                Self::BadRequest(value.to_string())
            }
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::Internal(details) => {
                error!("event=http_error module=http status=error error_code=internal error={details}");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(MessageResponse::new(message))).into_response()
    }
}
