//! Shared request validation helpers for HTTP handlers.
//!
//! Payload DTOs carry loosely-typed strings; these helpers convert them to
//! domain values and produce `invalid_request` errors with a `field` detail
//! so clients can highlight the offending input.

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::Error;

/// Build an `invalid_request` error pointing at one payload field.
pub fn field_error(field: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field }))
}

/// Parse an RFC 3339 timestamp from a request field.
pub fn parse_timestamp(field: &str, raw: &str) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| {
            field_error(
                field,
                format!("{field} must be an RFC 3339 timestamp, e.g. 2026-02-13T15:00:00Z"),
            )
        })
}
