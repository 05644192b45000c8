//! HTTP error payloads and mapping from domain errors.
//!
//! Keep the domain free of transport concerns by translating [`DomainError`]
//! into Actix responses here. The envelope is the `{ time, status, message }`
//! shape this service exposes to its own clients.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{DomainError, ErrorCode};

/// Standard error envelope returned by the HTTP adapter.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiError {
    /// When the failure was observed.
    #[schema(example = "2026-08-23T12:00:00Z")]
    time: DateTime<Utc>,
    /// HTTP status code carried in the body for client convenience.
    #[schema(example = 404)]
    status: u16,
    /// Human-readable message.
    #[schema(example = "No characters found")]
    message: String,
}

impl ApiError {
    /// Status code this error renders with.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        let status = match error.code() {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            // The provider's literal status is forwarded verbatim; an
            // unrepresentable code degrades to 502.
            ErrorCode::UpstreamFailure => error
                .upstream_status()
                .and_then(|status| StatusCode::from_u16(status).ok())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = if error.code() == ErrorCode::InternalError {
            error!(message = error.message(), "internal failure redacted from response");
            "Internal server error".to_owned()
        } else {
            error.message().to_owned()
        };
        Self {
            time: Utc::now(),
            status: status.as_u16(),
            message,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;
