//! Shared validation helpers for inbound HTTP adapters.

use pagination::{MAX_PAGE_SIZE, PageRequest, PageSize};
use serde_json::json;

use crate::domain::{CheepId, Error, UserId};

/// Validation error codes reported in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidCheepId,
    InvalidUserId,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidCheepId => "invalid_cheep_id",
            ErrorCode::InvalidUserId => "invalid_user_id",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ErrorCode, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    field_error(
        field,
        ErrorCode::MissingField,
        format!("missing required field: {}", field.as_str()),
    )
}

/// Validate a cheep id taken from a path segment.
pub(crate) fn parse_cheep_id(raw: i64) -> Result<CheepId, Error> {
    CheepId::new(raw).map_err(|err| {
        field_error(
            FieldName::new("id"),
            ErrorCode::InvalidCheepId,
            err.to_string(),
        )
    })
}

/// Validate a user id taken from a path segment.
pub(crate) fn parse_user_id(raw: String) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|err| {
        field_error(
            FieldName::new("id"),
            ErrorCode::InvalidUserId,
            err.to_string(),
        )
    })
}

/// Convert a caller-supplied item count into a first-page request.
///
/// Counts above [`MAX_PAGE_SIZE`] are clamped; `None` is returned when the
/// count is zero or negative so callers can answer with an empty list.
pub(crate) fn first_items(count: i64) -> Option<PageRequest> {
    let count = usize::try_from(count).ok()?.min(MAX_PAGE_SIZE);
    PageSize::new(count)
        .ok()
        .map(|size| PageRequest::default().with_size(size))
}
