//! Shared validation helpers for inbound HTTP adapters.
//!
//! Dates and times cross the wire as strings: `YYYY-MM-DD` for calendar
//! dates and `YYYY-MM-DDTHH:MM` for booking start times (the format the
//! public booking form submits). Failures become `invalid_request` errors
//! carrying the offending field name.

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::json;

use crate::domain::Error;

/// Validation error codes attached to request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorKind {
    MissingField,
    InvalidInteger,
    InvalidDate,
    InvalidDateTime,
}

impl ErrorKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidInteger => "invalid_integer",
            Self::InvalidDate => "invalid_date",
            Self::InvalidDateTime => "invalid_datetime",
        }
    }
}

/// Newtype for field names so helpers cannot mix up message and field.
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

fn field_error(kind: ErrorKind, field: FieldName, message: String, value: Option<&str>) -> Error {
    let mut details = json!({
        "field": field.as_str(),
        "code": kind.as_str(),
    });
    if let (Some(value), Some(map)) = (value, details.as_object_mut()) {
        map.insert("value".to_owned(), json!(value));
    }
    Error::invalid_request(message).with_details(details)
}

/// Error for an absent required field.
pub(crate) fn missing_field_error(field: FieldName) -> Error {
    field_error(
        ErrorKind::MissingField,
        field,
        format!("missing required field: {}", field.as_str()),
        None,
    )
}

/// Require a field that the query string may omit.
pub(crate) fn require_field(value: Option<String>, field: FieldName) -> Result<String, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Parse a decimal integer id.
pub(crate) fn parse_id(value: &str, field: FieldName) -> Result<i32, Error> {
    value.parse::<i32>().map_err(|_| {
        field_error(
            ErrorKind::InvalidInteger,
            field,
            format!("{} must be an integer", field.as_str()),
            Some(value),
        )
    })
}

/// Parse a `YYYY-MM-DD` calendar date.
pub(crate) fn parse_date(value: &str, field: FieldName) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        field_error(
            ErrorKind::InvalidDate,
            field,
            "invalid date format".to_owned(),
            Some(value),
        )
    })
}

/// Parse a `YYYY-MM-DDTHH:MM` wall-clock timestamp.
pub(crate) fn parse_datetime(value: &str, field: FieldName) -> Result<NaiveDateTime, Error> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").map_err(|_| {
        field_error(
            ErrorKind::InvalidDateTime,
            field,
            format!("{} must use the format YYYY-MM-DDTHH:MM", field.as_str()),
            Some(value),
        )
    })
}
