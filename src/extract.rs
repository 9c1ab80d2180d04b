//! Format-independent extraction entry points.
//!
//! Each format adapter calls into these with its own prebuilt schemas and
//! charset label; the host receives a [`DecodedHeader`] (plus an optional
//! [`TraceSummary`]) and maps them into its own metadata vocabulary.

use std::io::Read;

use crate::charset::Charset;
use crate::error::{ExtractError, Result};
use crate::header::{decode_header, DecodedHeader};
use crate::schema::{DecodeType, FormatSchema};
use crate::text::read_block;
use crate::trace::{TraceCursor, TraceSummary};

/// What an adapter hands back to the host once extraction succeeds.
///
/// `content` is either raw decoded text or a synthesized summary string;
/// the host translates these three fields into its own metadata names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRecord {
    pub mime_override: String,
    pub dcmi_type: String,
    pub content: String,
}

/// Resolve a charset label, eagerly.
///
/// Called before any stream byte is consumed so an unavailable charset is
/// reported with the stream untouched.
pub(crate) fn resolve_charset(label: &str) -> Result<Charset> {
    Charset::for_label(label).ok_or_else(|| ExtractError::CharsetUnavailable {
        label: label.to_string(),
    })
}

/// Decode one fixed-size binary header from the stream's current
/// position; the trace region, if any, is left unread.
pub fn extract_header_only(
    stream: &mut impl Read,
    schema: &FormatSchema,
    charset_label: &str,
) -> Result<DecodedHeader> {
    let charset = resolve_charset(charset_label)?;
    let block = read_block(stream, schema.block_size())?;
    decode_header(schema, &block, charset)
}

/// Decode the binary header, then fold aggregate statistics over every
/// trace record that follows.
///
/// The fold is streaming: memory use is one trace, however large the
/// file. A stream that ends mid-trace yields a summary marked truncated
/// rather than an error; the header and all fully-read traces stand.
pub fn extract_with_trace_summary(
    stream: &mut impl Read,
    header_schema: &FormatSchema,
    trace_schema: &FormatSchema,
    charset_label: &str,
    sample_count_field: &str,
    sample_type: DecodeType,
) -> Result<(DecodedHeader, TraceSummary)> {
    let charset = resolve_charset(charset_label)?;
    let block = read_block(stream, header_schema.block_size())?;
    let header = decode_header(header_schema, &block, charset)?;
    let cursor = TraceCursor::new(stream, trace_schema, charset, sample_count_field, sample_type)?;
    Ok((header, TraceSummary::collect(cursor)))
}
