//! Drop classification for row-level cleaning.
//!
//! Rows failing semantic rules are excluded from the pipeline, never fatal
//! to the run. The classification mirrors the cleaning rules: required
//! fields must be present and non-empty, numeric casts must be
//! representable.

use thiserror::Error;

/// Why a row was dropped during cleaning.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RowDrop {
    #[error("Field '{0}' is required but was missing")]
    MissingField(&'static str),

    #[error("Field '{0}' is required but was empty")]
    EmptyField(&'static str),

    #[error("Field '{field}' value '{value}' is not representable as an integer")]
    NotAnInteger { field: &'static str, value: String },

    #[error("Timestamp {0} is outside the representable range")]
    TimestampOutOfRange(i64),
}

/// Require a present, non-empty string field.
pub fn require<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, RowDrop> {
    match value {
        None => Err(RowDrop::MissingField(field)),
        Some("") => Err(RowDrop::EmptyField(field)),
        Some(value) => Ok(value),
    }
}

/// Require a present scalar field.
pub fn require_value<T>(field: &'static str, value: Option<T>) -> Result<T, RowDrop> {
    value.ok_or(RowDrop::MissingField(field))
}
