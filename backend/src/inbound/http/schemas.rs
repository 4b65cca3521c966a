//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`. The
//! wrappers below mirror their structure for utoipa's external schema
//! registration.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested route or location does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The directions provider quota is exhausted.
    #[schema(rename = "rate_limited")]
    RateLimited,
    /// The directions provider refused the call or answered unusably.
    #[schema(rename = "upstream_failure")]
    UpstreamFailure,
    /// The directions provider did not answer in time.
    #[schema(rename = "upstream_timeout")]
    UpstreamTimeout,
    /// A dependency could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "no route found between these locations")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "6f9619ff-8b86-d011-b42d-00c04fc964ff")]
    trace_id: Option<String>,
    /// Route failure kind, provider status, and retry hint.
    #[schema(example = json!({"kind": "no_route_found", "providerStatus": "ZERO_RESULTS", "retryable": false}))]
    details: Option<serde_json::Value>,
}
