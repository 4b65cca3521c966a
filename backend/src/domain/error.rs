//! Domain-level error payload.
//!
//! Transport agnostic: inbound adapters decide how an [`ErrorCode`] maps
//! onto status codes. Route failures convert through
//! `From<RouteError>`, which keeps the taxonomy tag and any raw provider
//! status in `details` so clients can react without parsing messages.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::TraceId;
use super::ports::RouteError;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The requested route or location does not exist.
    NotFound,
    /// The directions provider quota is exhausted.
    RateLimited,
    /// The directions provider refused the call or answered unusably.
    UpstreamFailure,
    /// The directions provider did not answer in time.
    UpstreamTimeout,
    /// A dependency could not be reached.
    ServiceUnavailable,
    /// An unexpected error occurred inside the service.
    InternalError,
}

/// Error payload shared by every adapter.
///
/// Captures the [`TraceId`] in scope at construction time.
///
/// # Examples
/// ```
/// use wayfinder::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("no route");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert!(err.trace_id().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Create a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach a trace identifier to the error.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details to the error.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
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
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

fn code_for(error: &RouteError) -> ErrorCode {
    match error {
        RouteError::InvalidCoordinates { .. } | RouteError::InvalidRequest => {
            ErrorCode::InvalidRequest
        }
        RouteError::NoRouteFound | RouteError::LocationNotFound => ErrorCode::NotFound,
        RouteError::QuotaExceeded => ErrorCode::RateLimited,
        RouteError::RequestDenied
        | RouteError::ProviderServerError
        | RouteError::UnexpectedProviderStatus { .. }
        | RouteError::MalformedProviderResponse { .. }
        | RouteError::MalformedPolyline { .. } => ErrorCode::UpstreamFailure,
        RouteError::NetworkTimeout { .. } => ErrorCode::UpstreamTimeout,
        RouteError::NetworkUnreachable { .. } => ErrorCode::ServiceUnavailable,
    }
}

impl From<RouteError> for Error {
    fn from(error: RouteError) -> Self {
        let mut details = Map::new();
        details.insert("kind".to_owned(), json!(error.kind()));
        if let Some(status) = error.provider_status() {
            details.insert("providerStatus".to_owned(), json!(status));
        }
        details.insert("retryable".to_owned(), json!(error.is_retryable()));
        Self::new(code_for(&error), error.to_string()).with_details(Value::Object(details))
    }
}
