//! Lazy, forward-only iteration over the trace records that follow a
//! binary header.
//!
//! A [`TraceCursor`] reads one record per advance: a fixed-size sub-header
//! decoded against a trace schema, then the sample block whose length the
//! sub-header declares. Iteration stops cleanly at end-of-stream or
//! poisons itself on a structural failure; traces already yielded stay
//! valid either way.

use std::io::Read;

use byteorder::{BigEndian, ByteOrder};
use log::{debug, warn};

use crate::charset::Charset;
use crate::error::{ExtractError, Result, SchemaError};
use crate::header::{decode_header, ibm_f32, DecodedHeader};
use crate::schema::{DecodeType, FormatSchema};
use crate::text::read_fully;

/// One seismic recording unit: its decoded sub-header and its samples.
///
/// Constructed per cursor advance and handed to the caller; the cursor
/// retains nothing.
#[derive(Debug, Clone)]
pub struct SeismicTrace {
    pub header: DecodedHeader,
    pub samples: Vec<f32>,
}

/// Numeric sample representations a trace schema may declare.
#[derive(Debug, Clone, Copy)]
enum SampleFormat {
    Int16,
    Int32,
    Ibm32,
}

impl SampleFormat {
    fn from_decode_type(decode_type: DecodeType) -> std::result::Result<Self, SchemaError> {
        match decode_type {
            DecodeType::Int16BE => Ok(SampleFormat::Int16),
            DecodeType::Int32BE => Ok(SampleFormat::Int32),
            DecodeType::IbmFloat32 => Ok(SampleFormat::Ibm32),
            DecodeType::FixedString => Err(SchemaError::TextSampleType),
        }
    }

    fn width(self) -> usize {
        match self {
            SampleFormat::Int16 => 2,
            SampleFormat::Int32 | SampleFormat::Ibm32 => 4,
        }
    }

    fn decode(self, bytes: &[u8]) -> f32 {
        match self {
            SampleFormat::Int16 => BigEndian::read_i16(bytes) as f32,
            SampleFormat::Int32 => BigEndian::read_i32(bytes) as f32,
            SampleFormat::Ibm32 => ibm_f32(BigEndian::read_u32(bytes)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorState {
    /// Constructed; nothing read yet.
    Ready,
    /// At least one trace has been returned.
    Active,
    /// Stream ended cleanly at a record boundary.
    Exhausted,
    /// Structural failure; no further reads.
    Failed,
}

/// Sequential reader of trace records.
///
/// Bound to one stream and one trace schema for its whole lifetime;
/// forward-only, restartable only by creating a fresh cursor over a fresh
/// stream positioned at the start of the trace region. Abandoning the
/// cursor at any point is equivalent to closing the stream and is not an
/// error.
#[derive(Debug)]
pub struct TraceCursor<'a, R: Read> {
    input: R,
    schema: &'a FormatSchema,
    charset: Charset,
    sample_count_field: String,
    sample_format: SampleFormat,
    state: CursorState,
    bytes_consumed: u64,
    traces_read: u64,
}

impl<'a, R: Read> TraceCursor<'a, R> {
    /// Bind a cursor to a stream positioned at the first trace record.
    ///
    /// `sample_count_field` names the integer field of `schema` that
    /// carries each record's sample count; `sample_type` is the numeric
    /// representation of the samples. A missing count field or a
    /// non-numeric sample type is a [`SchemaError`] here, before anything
    /// is read.
    pub fn new(
        input: R,
        schema: &'a FormatSchema,
        charset: Charset,
        sample_count_field: &str,
        sample_type: DecodeType,
    ) -> Result<Self> {
        let sample_format = SampleFormat::from_decode_type(sample_type)?;
        let count_spec = schema
            .field(sample_count_field)
            .ok_or_else(|| SchemaError::UnknownField(sample_count_field.to_string()))?;
        if !matches!(
            count_spec.decode_type,
            DecodeType::Int16BE | DecodeType::Int32BE
        ) {
            return Err(SchemaError::NonIntegerField(sample_count_field.to_string()).into());
        }
        Ok(Self {
            input,
            schema,
            charset,
            sample_count_field: sample_count_field.to_string(),
            sample_format,
            state: CursorState::Ready,
            bytes_consumed: 0,
            traces_read: 0,
        })
    }

    /// Bytes consumed from the trace region so far, partial reads
    /// included. Progress indication for callers that want it.
    pub fn bytes_consumed(&self) -> u64 {
        self.bytes_consumed
    }

    /// Traces successfully returned so far.
    pub fn traces_read(&self) -> u64 {
        self.traces_read
    }

    fn fail(&mut self) -> ExtractError {
        self.state = CursorState::Failed;
        ExtractError::TruncatedTrace {
            index: self.traces_read,
        }
    }

    /// Advance by one record.
    ///
    /// - End-of-stream before any byte of a new sub-header: clean end,
    ///   `None` now and on every later call.
    /// - End-of-stream mid-record: `Some(Err(TruncatedTrace))` once, then
    ///   `None`; traces already returned are unaffected.
    pub fn next_trace(&mut self) -> Option<Result<SeismicTrace>> {
        if matches!(self.state, CursorState::Exhausted | CursorState::Failed) {
            return None;
        }

        let mut sub_header = vec![0u8; self.schema.block_size()];
        let got = match read_fully(&mut self.input, &mut sub_header) {
            Ok(n) => n,
            Err(e) => {
                self.state = CursorState::Failed;
                return Some(Err(e.into()));
            }
        };
        self.bytes_consumed += got as u64;
        if got == 0 {
            debug!(
                "Trace stream exhausted after {} traces ({} bytes)",
                self.traces_read, self.bytes_consumed
            );
            self.state = CursorState::Exhausted;
            return None;
        }
        if got < sub_header.len() {
            return Some(Err(self.fail()));
        }

        let header = match decode_header(self.schema, &sub_header, self.charset) {
            Ok(h) => h,
            Err(e) => {
                self.state = CursorState::Failed;
                return Some(Err(e));
            }
        };

        // A negative or non-integer declared count leaves no way to size
        // the sample block; treat it as a structural failure.
        let count = match header
            .get(&self.sample_count_field)
            .and_then(|v| v.as_u64())
        {
            Some(n) => n as usize,
            None => {
                warn!(
                    "Trace {} declares an unusable sample count",
                    self.traces_read
                );
                return Some(Err(self.fail()));
            }
        };

        let mut sample_bytes = vec![0u8; count * self.sample_format.width()];
        let got = match read_fully(&mut self.input, &mut sample_bytes) {
            Ok(n) => n,
            Err(e) => {
                self.state = CursorState::Failed;
                return Some(Err(e.into()));
            }
        };
        self.bytes_consumed += got as u64;
        if got < sample_bytes.len() {
            return Some(Err(self.fail()));
        }

        let samples = sample_bytes
            .chunks_exact(self.sample_format.width())
            .map(|chunk| self.sample_format.decode(chunk))
            .collect();

        self.state = CursorState::Active;
        self.traces_read += 1;
        Some(Ok(SeismicTrace { header, samples }))
    }
}

impl<R: Read> Iterator for TraceCursor<'_, R> {
    type Item = Result<SeismicTrace>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_trace()
    }
}

/// Aggregate statistics over a full cursor walk.
///
/// `min`/`max` span every sample of every trace read; `None` when no
/// sample was seen. `truncated` distinguishes a walk that ended in a
/// structural failure from a clean end-of-stream; the counted traces are
/// valid either way.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceSummary {
    pub count: u64,
    pub min: Option<f32>,
    pub max: Option<f32>,
    pub truncated: bool,
}

impl TraceSummary {
    /// Fold a cursor to completion in O(1) memory beyond the current
    /// trace.
    ///
    /// A structural failure ends the walk and marks the summary truncated
    /// rather than discarding the traces already counted.
    pub fn collect<R: Read>(cursor: TraceCursor<'_, R>) -> TraceSummary {
        let mut summary = TraceSummary {
            count: 0,
            min: None,
            max: None,
            truncated: false,
        };
        for result in cursor {
            match result {
                Ok(trace) => {
                    summary.count += 1;
                    for &sample in &trace.samples {
                        summary.min = Some(summary.min.map_or(sample, |m| m.min(sample)));
                        summary.max = Some(summary.max.map_or(sample, |m| m.max(sample)));
                    }
                }
                Err(e) => {
                    warn!("Trace iteration stopped early: {e}");
                    summary.truncated = true;
                    break;
                }
            }
        }
        summary
    }
}
