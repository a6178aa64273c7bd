//! HTTP error payloads and mapping from core errors.
//!
//! Keeps the core free of transport concerns by translating
//! [`NoteServiceError`] into Actix responses here.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use log::error;
use notedesk_core::db::DbError;
use notedesk_core::{NoteServiceError, RepoError};
use serde::Serialize;
use thiserror::Error;

/// Stable machine-readable error codes returned to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidRequest,
    NotFound,
    InternalError,
}

/// Standard error envelope returned by the API surface.
#[derive(Debug, Clone, Serialize, Error)]
#[error("{message}")]
pub struct ApiError {
    code: ErrorCode,
    message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Internal failure with a generic client message; the cause is logged
    /// server-side only.
    fn internal(cause: impl std::fmt::Display) -> Self {
        error!("event=store_failure module=api status=error error={cause}");
        Self::new(ErrorCode::InternalError, "internal server error")
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }
}

impl From<NoteServiceError> for ApiError {
    fn from(value: NoteServiceError) -> Self {
        match value {
            NoteServiceError::Validation(err) => Self::new(ErrorCode::InvalidRequest, err.to_string()),
            NoteServiceError::NotFound(id) => {
                Self::new(ErrorCode::NotFound, format!("note not found: {id}"))
            }
            NoteServiceError::Repo(err) => Self::internal(err),
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        ApiError::from(NoteServiceError::from(value))
    }
}

impl From<DbError> for ApiError {
    fn from(value: DbError) -> Self {
        Self::internal(value)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.code {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;
