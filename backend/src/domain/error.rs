//! Domain-level error type.
//!
//! `DomainError` is transport agnostic: the inbound HTTP adapter maps it to a
//! response envelope, while the domain only decides the failure category and
//! the message wording.

/// Failure category carried by every [`DomainError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The caller's input is malformed or fails validation.
    InvalidRequest,
    /// The requested resource or collection yielded nothing.
    NotFound,
    /// The upstream catalogue answered with a 4xx/5xx status.
    UpstreamFailure,
    /// An unexpected failure inside the service.
    InternalError,
}

/// Domain error payload.
///
/// Carries a human-readable message plus, for upstream failures, the literal
/// status code the provider answered with so adapters can forward it
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainError {
    code: ErrorCode,
    message: String,
    upstream_status: Option<u16>,
}

impl DomainError {
    /// Create an error with the given category and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            upstream_status: None,
        }
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Build an upstream failure preserving the provider's literal status.
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::UpstreamFailure,
            message: message.into(),
            upstream_status: Some(status),
        }
    }

    /// Failure category.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Literal upstream status, present only for [`ErrorCode::UpstreamFailure`].
    #[must_use]
    pub fn upstream_status(&self) -> Option<u16> {
        self.upstream_status
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DomainError {}
