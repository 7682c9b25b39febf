//! OpenAPI schema definitions for types that do not derive `ToSchema`.
//!
//! Domain types and the pagination envelope stay free of utoipa. The wrappers
//! here mirror their serialised shape so the document can reference them.

use utoipa::ToSchema;

use crate::inbound::http::cheeps::CheepResponse;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// No acting user was supplied.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The referenced user or cheep does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    #[schema(rename = "conflict")]
    Conflict,
    /// The backing store could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "cheep text must be at most 160 characters, got 161")]
    message: String,
    /// Request correlation id, echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level context such as `{"field": "text", "max": 160}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for `pagination::Paginated<CheepResponse>`.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CheepPageSchema {
    data: Vec<CheepResponse>,
    /// One-based page number served.
    #[schema(example = 1)]
    page: u32,
    #[schema(example = 32)]
    page_size: usize,
}
