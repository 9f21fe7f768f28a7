//! Domain errors as HTTP responses: status code plus `{"detail": ...}`

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::domain::DomainError;

impl DomainError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message without the variant prefix `Display` adds
    pub fn detail(&self) -> &str {
        match self {
            DomainError::NotFound(msg)
            | DomainError::InvalidInput(msg)
            | DomainError::Conflict(msg)
            | DomainError::Internal(msg) => msg,
        }
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        (status, Json(json!({ "detail": self.detail() }))).into_response()
    }
}

impl From<JsonRejection> for DomainError {
    fn from(rejection: JsonRejection) -> Self {
        DomainError::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for DomainError {
    fn from(rejection: PathRejection) -> Self {
        DomainError::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for DomainError {
    fn from(rejection: QueryRejection) -> Self {
        DomainError::InvalidInput(rejection.body_text())
    }
}
