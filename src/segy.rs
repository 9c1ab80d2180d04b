//! SEG-Y adapter: the fixed layouts of the SEG-Y rev 1 headers and the
//! reader/extraction entry points built on them.
//!
//! A SEG-Y file opens with a 3200-byte EBCDIC free-text header, then a
//! 400-byte binary header, then zero or more traces, each a 240-byte
//! sub-header followed by its sample block.

use std::io::Read;
use std::sync::OnceLock;

use log::info;

use crate::extract::{
    extract_header_only, extract_with_trace_summary, resolve_charset, ExtractedRecord,
};
use crate::header::DecodedHeader;
use crate::schema::{DecodeType, FormatSchema};
use crate::text::read_block;
use crate::trace::{TraceCursor, TraceSummary};
use crate::Result;

pub const SEGY_MIME: &str = "application/segy";
pub const SEGY_DCMI_TYPE: &str = "Dataset";

/// Charset of the free-text header and of any text fields: EBCDIC Cp1047.
pub const SEGY_CHARSET: &str = "Cp1047";

/// The free-text header: 40 card images of 80 characters each.
pub const TEXT_HEADER_LEN: usize = 3200;

const BINARY_HEADER_LEN: usize = 400;
const TRACE_HEADER_LEN: usize = 240;

/// Trace-header field that sizes each trace's sample block.
pub const SAMPLE_COUNT_FIELD: &str = "number_of_samples";

/// Layout of the 400-byte binary header.
///
/// Built once, shared by every parse. A different format revision gets a
/// different prebuilt schema, not a branch in the decoder.
pub fn binary_header_format() -> &'static FormatSchema {
    static SCHEMA: OnceLock<FormatSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        FormatSchema::builder(BINARY_HEADER_LEN)
            .field("line_number", 4, 8, DecodeType::Int32BE)
            .field("sample_interval", 16, 18, DecodeType::Int16BE)
            .field("samples_per_trace", 20, 22, DecodeType::Int16BE)
            .field("data_sample_code", 24, 26, DecodeType::Int16BE)
            .field("format_revision", 300, 302, DecodeType::Int16BE)
            .field("fixed_length_flag", 302, 304, DecodeType::Int16BE)
            .field("extended_headers", 304, 306, DecodeType::Int16BE)
            .build()
            .expect("SEG-Y binary header layout is well-formed")
    })
}

/// Layout of the 240-byte trace sub-header.
pub fn trace_header_format() -> &'static FormatSchema {
    static SCHEMA: OnceLock<FormatSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        FormatSchema::builder(TRACE_HEADER_LEN)
            .field("ensemble_number", 20, 24, DecodeType::Int32BE)
            .field("source_x", 72, 76, DecodeType::Int32BE)
            .field("source_y", 76, 80, DecodeType::Int32BE)
            .field(SAMPLE_COUNT_FIELD, 114, 116, DecodeType::Int16BE)
            .field("cdp_x", 180, 184, DecodeType::Int32BE)
            .field("cdp_y", 184, 188, DecodeType::Int32BE)
            .build()
            .expect("SEG-Y trace header layout is well-formed")
    })
}

/// An open SEG-Y stream with both leading headers already decoded.
///
/// The stream is positioned at the first trace; [`traces`](Self::traces)
/// hands it over to a forward-only cursor. Dropping the reader without
/// touching the traces is the normal header-only path.
pub struct SegyReader<R: Read> {
    input: R,
    text_header: String,
    header: DecodedHeader,
}

impl<R: Read> SegyReader<R> {
    /// Read the text header and binary header from a stream positioned at
    /// the start of the file.
    pub fn open(mut input: R) -> Result<Self> {
        let charset = resolve_charset(SEGY_CHARSET)?;
        let text_block = read_block(&mut input, TEXT_HEADER_LEN)?;
        let text_header = charset.decode(&text_block);
        let header = extract_header_only(&mut input, binary_header_format(), SEGY_CHARSET)?;
        info!(
            "SEG-Y headers read: revision={:?}, data_sample_code={:?}",
            header.get_int("format_revision"),
            header.get_int("data_sample_code"),
        );
        Ok(Self {
            input,
            text_header,
            header,
        })
    }

    /// The 3200-character free-text header, decoded verbatim.
    pub fn text_header(&self) -> &str {
        &self.text_header
    }

    /// The decoded binary header fields.
    pub fn header(&self) -> &DecodedHeader {
        &self.header
    }

    /// Consume the reader and iterate the trace records.
    ///
    /// Samples decode as IBM floats; each record's length comes from its
    /// own `number_of_samples` field.
    pub fn traces(self) -> Result<TraceCursor<'static, R>> {
        let charset = resolve_charset(SEGY_CHARSET)?;
        TraceCursor::new(
            self.input,
            trace_header_format(),
            charset,
            SAMPLE_COUNT_FIELD,
            DecodeType::IbmFloat32,
        )
    }
}

/// Header-only extraction: the primary path.
///
/// The record's content is the data sample code followed by the verbatim
/// text header; traces are never read.
pub fn extract<R: Read>(stream: R) -> Result<ExtractedRecord> {
    let reader = SegyReader::open(stream)?;
    Ok(make_record(&reader.header, &reader.text_header, None))
}

/// Opt-in extraction that also folds min/max statistics over every trace.
pub fn extract_with_summary<R: Read>(mut stream: R) -> Result<(ExtractedRecord, TraceSummary)> {
    let charset = resolve_charset(SEGY_CHARSET)?;
    let text_block = read_block(&mut stream, TEXT_HEADER_LEN)?;
    let text_header = charset.decode(&text_block);
    let (header, summary) = extract_with_trace_summary(
        &mut stream,
        binary_header_format(),
        trace_header_format(),
        SEGY_CHARSET,
        SAMPLE_COUNT_FIELD,
        DecodeType::IbmFloat32,
    )?;
    let record = make_record(&header, &text_header, Some(&summary));
    Ok((record, summary))
}

fn make_record(
    header: &DecodedHeader,
    text_header: &str,
    summary: Option<&TraceSummary>,
) -> ExtractedRecord {
    let code = header.get_int("data_sample_code").unwrap_or(0);
    let mut content = format!("{code} {text_header} ");
    if let Some(s) = summary {
        content.push_str(&format!(
            "Traces: {} Max Value: {} Min Value: {}",
            s.count,
            s.max.map_or_else(|| "n/a".to_string(), |v| v.to_string()),
            s.min.map_or_else(|| "n/a".to_string(), |v| v.to_string()),
        ));
        if s.truncated {
            content.push_str(" (file is incomplete)");
        }
    }
    ExtractedRecord {
        mime_override: SEGY_MIME.to_string(),
        dcmi_type: SEGY_DCMI_TYPE.to_string(),
        content,
    }
}
