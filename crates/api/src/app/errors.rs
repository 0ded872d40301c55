use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use infoco_ai::ExternalServiceError;
use infoco_auth::{AuthError, AuthzError, PermissionError};
use infoco_core::DomainError;
use infoco_infra::{StorageError, WorkspaceError};

pub type ApiResult<T> = Result<T, ApiError>;

/// Every failure a handler can report, mapped to one status and a JSON body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Forbidden(#[from] AuthzError),

    #[error(transparent)]
    Permission(#[from] PermissionError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    External(#[from] ExternalServiceError),

    #[error("could not encode response: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Domain(DomainError::Validation { .. }) => (StatusCode::BAD_REQUEST, "validation_error"),
            Self::Domain(DomainError::NotFound { .. }) => (StatusCode::NOT_FOUND, "not_found"),
            Self::Domain(DomainError::Conflict(_)) => (StatusCode::CONFLICT, "conflict"),
            Self::Domain(DomainError::InvariantViolation(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation")
            }
            Self::Auth(AuthError::InvalidCredentials) => (StatusCode::UNAUTHORIZED, "invalid_credentials"),
            Self::Auth(AuthError::NoActiveSession) => (StatusCode::UNAUTHORIZED, "no_session"),
            Self::Auth(AuthError::Vault(_)) => (StatusCode::INTERNAL_SERVER_ERROR, "session_storage"),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden"),
            Self::Permission(_) => (StatusCode::FORBIDDEN, "immutable_capability"),
            Self::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
            Self::External(e) => {
                let status = match e {
                    ExternalServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
                    ExternalServiceError::Timeout => StatusCode::GATEWAY_TIMEOUT,
                    _ => StatusCode::BAD_GATEWAY,
                };
                (status, e.code())
            }
            Self::Encoding(_) => (StatusCode::INTERNAL_SERVER_ERROR, "encoding_error"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
        }
    }
}

impl From<WorkspaceError> for ApiError {
    fn from(err: WorkspaceError) -> Self {
        match err {
            WorkspaceError::Domain(e) => Self::Domain(e),
            WorkspaceError::Permission(e) => Self::Permission(e),
            WorkspaceError::Storage(e) => Self::Storage(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        match &self {
            Self::Storage(e) => tracing::error!(error = %e, "storage failure"),
            Self::External(e) => tracing::warn!(error = %e, "external service failure"),
            _ => {}
        }

        let mut body = json!({
            "error": code,
            "message": self.to_string(),
        });
        if let Self::Domain(e) = &self {
            if !e.fields().is_empty() {
                body["fields"] = json!(e.fields());
            }
        }
        (status, axum::Json(body)).into_response()
    }
}
