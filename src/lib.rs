//! # segy-reader
//!
//! Structured metadata extraction from fixed-layout geophysical exchange
//! formats: SEG-Y seismic trace files and LAS (CWLS) well-log text files.
//!
//! The core is a declarative binary-header engine: a [`FormatSchema`] maps
//! named fields to byte ranges and decode types within a fixed-size block,
//! [`decode_header`] turns a block into a typed [`DecodedHeader`], and a
//! [`TraceCursor`] lazily walks the variable-length trace records that
//! follow, sized by each record's own sub-header. The [`segy`] and [`las`]
//! modules wrap the engine with the two formats' concrete layouts.
//!
//! Everything is synchronous and forward-only over `std::io::Read`;
//! schemas are built once and shared read-only across parses.

pub mod charset;
pub mod error;
pub mod extract;
pub mod header;
pub mod las;
pub mod schema;
pub mod segy;
pub mod text;
pub mod trace;

// Re-export the main types for convenience
pub use charset::Charset;
pub use error::{ExtractError, Result, SchemaError};
pub use extract::{extract_header_only, extract_with_trace_summary, ExtractedRecord};
pub use header::{decode_header, DecodedHeader, FieldValue};
pub use schema::{DecodeType, FieldRange, FieldSpec, FormatSchema};
pub use segy::SegyReader;
pub use trace::{SeismicTrace, TraceCursor, TraceSummary};
