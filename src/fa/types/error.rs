//! Custom error types for the fa-reader crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum FaError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// The leading header does not carry the FA structural constants.
    #[error("Not a regular FA file: name length {name_length} (expected 16), header length {header_len} (expected 22)")]
    NotAnFaFile { name_length: u64, header_len: u64 },

    /// The file is structurally invalid beyond the header constants.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// An index slot holds a name that is not 16 bytes of ASCII.
    #[error("Invalid field name in index slot {position}: {raw:?}")]
    InvalidFieldName { position: u64, raw: Vec<u8> },

    /// The requested field is absent from the catalog.
    #[error("Field {0} not found")]
    FieldNotFound(String),

    /// Fewer bytes were available than the location requires.
    #[error("Truncated read at offset {offset}: expected {expected} bytes, but found {found} bytes")]
    Truncated { offset: u64, expected: u64, found: u64 },

    /// A fixed-schema field is shorter than its schema.
    #[error("Field {field} too short: expected {expected} bytes, but found {found} bytes")]
    FieldTooShort {
        field: String,
        expected: u64,
        found: u64,
    },

    /// The lead-time unit code is none of minutes (0), hours (1) or seconds (254).
    #[error("Unsupported lead-time unit code: {0}")]
    UnsupportedLeadUnit(u64),

    /// The base date stored in the file is not a calendar date.
    #[error("Invalid forecast date: {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: u64, month: u64, day: u64 },

    /// A mutation was attempted through a handle opened read-only.
    #[error("Cannot patch {field}: handle is not write-capable")]
    PermissionDenied { field: String },

    /// The patched word lies outside the field.
    #[error("Word {word_offset} is outside field {field} ({words} words)")]
    PatchOutOfRange {
        field: String,
        word_offset: u64,
        words: u64,
    },
}

impl FaError {
    /// Structural failures after which nothing else can be decoded from the handle.
    pub fn is_format_error(&self) -> bool {
        matches!(self, FaError::NotAnFaFile { .. } | FaError::InvalidFormat(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FaError::FieldNotFound(_))
    }
}

/// Hole bookkeeping in the index disagrees with the header.
///
/// Carried by the catalog rather than returned as an error: every field that
/// was found is still addressable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Inconsistent holes in index: header declares {declared}, index holds {found}")]
pub struct ConsistencyWarning {
    pub declared: u64,
    pub found: u64,
}

/// A convenience `Result` type alias using the crate's `FaError` type.
pub type Result<T> = std::result::Result<T, FaError>;
