//! Custom error types for the segy-reader crate.

use thiserror::Error;

/// A malformed schema definition.
///
/// Every variant is detectable at `build()` time from the schema alone;
/// none of these checks depend on input data. A `SchemaError` indicates a
/// programming error in the format description, not a bad file.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// A field's byte range is empty or inverted (`start >= end`).
    #[error("Field '{name}' has an empty range: {start}..{end}")]
    EmptyRange {
        name: String,
        start: usize,
        end: usize,
    },

    /// A field's byte range extends past the declared block size.
    #[error("Field '{name}' ends at byte {end}, past the {block_size}-byte block")]
    OutOfBounds {
        name: String,
        end: usize,
        block_size: usize,
    },

    /// A numeric field's range length does not match its type's fixed width.
    #[error("Field '{name}' spans {actual} bytes, but its type requires {expected}")]
    WidthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// Two fields in the same schema share a name.
    #[error("Duplicate field name '{0}' in schema")]
    DuplicateField(String),

    /// A field name referenced by a caller does not exist in the schema.
    #[error("Schema has no field named '{0}'")]
    UnknownField(String),

    /// A field designated as a record count is not an integer field.
    #[error("Field '{0}' cannot size a sample block; an integer field is required")]
    NonIntegerField(String),

    /// A trace sample type must be numeric; `FixedString` is not decodable
    /// as a sample.
    #[error("Trace sample type must be numeric, got a text type")]
    TextSampleType,
}

/// The primary error type for all extraction operations in this crate.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// A malformed schema definition (see [`SchemaError`]).
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// The requested character encoding is not one this crate bundles.
    ///
    /// Checked eagerly, before any stream bytes are consumed, so the stream
    /// is untouched when this is returned.
    #[error("Charset '{label}' is not available; the file cannot be parsed")]
    CharsetUnavailable { label: String },

    /// The stream ended before a declared fixed-size header block was fully
    /// present. Fatal for the file: no partial header is ever returned.
    #[error("Truncated header: expected {expected} bytes, got {actual}")]
    TruncatedHeader { expected: usize, actual: usize },

    /// The stream ended mid-record during trace iteration.
    ///
    /// Non-fatal to the overall extraction: traces already decoded remain
    /// valid. `index` is the zero-based index of the record that could not
    /// be completed.
    #[error("Truncated trace record at index {index}: stream ended mid-record")]
    TruncatedTrace { index: u64 },
}

/// A convenience `Result` type alias using the crate's `ExtractError` type.
pub type Result<T> = std::result::Result<T, ExtractError>;
