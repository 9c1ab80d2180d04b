//! LAS adapter: CWLS well-log ASCII files.
//!
//! A LAS file is plain 7-bit text end to end; extraction decodes the
//! whole stream and hands it back as the record content.

use std::io::Read;

use crate::extract::{resolve_charset, ExtractedRecord};
use crate::text::read_to_string;
use crate::Result;

pub const LAS_MIME: &str = "text/las";
pub const LAS_DCMI_TYPE: &str = "Dataset";
pub const LAS_CHARSET: &str = "US-ASCII";

/// Extract a LAS file: the content is the decoded text, verbatim.
///
/// An empty stream yields an empty content string, not an error.
pub fn extract<R: Read>(mut stream: R) -> Result<ExtractedRecord> {
    let charset = resolve_charset(LAS_CHARSET)?;
    let content = read_to_string(&mut stream, charset)?;
    Ok(ExtractedRecord {
        mime_override: LAS_MIME.to_string(),
        dcmi_type: LAS_DCMI_TYPE.to_string(),
        content,
    })
}
