//! Whole-stream and fixed-length text block reading.

use std::io::Read;

use crate::charset::Charset;
use crate::error::{ExtractError, Result};

/// Read the entire remaining stream and decode it under `charset`.
///
/// An empty stream yields an empty string, not an error. Used for
/// whole-file text formats (LAS); for the fixed-length free-text block
/// preceding a binary header, use [`read_block`] and decode the block.
pub fn read_to_string(reader: &mut impl Read, charset: Charset) -> Result<String> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(charset.decode(&bytes))
}

/// Read exactly `len` bytes from the stream.
///
/// A stream that ends short is reported as
/// [`ExtractError::TruncatedHeader`] with the expected and actual byte
/// counts; no partial block is returned.
pub fn read_block(reader: &mut impl Read, len: usize) -> Result<Vec<u8>> {
    let mut block = vec![0u8; len];
    let got = read_fully(reader, &mut block)?;
    if got < len {
        return Err(ExtractError::TruncatedHeader {
            expected: len,
            actual: got,
        });
    }
    Ok(block)
}

/// Fill `buf` from the stream, returning how many bytes were actually
/// read. Short only at end-of-stream; interrupted reads are retried.
pub(crate) fn read_fully(reader: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn empty_stream_reads_as_empty_string() {
        let mut stream = Cursor::new(Vec::<u8>::new());
        assert_eq!(read_to_string(&mut stream, Charset::Ascii).unwrap(), "");
    }

    #[test]
    fn short_block_is_truncated_header() {
        let mut stream = Cursor::new(vec![1u8, 2, 3]);
        let err = read_block(&mut stream, 8).unwrap_err();
        match err {
            ExtractError::TruncatedHeader { expected, actual } => {
                assert_eq!((expected, actual), (8, 3));
            }
            other => panic!("expected TruncatedHeader, got {other:?}"),
        }
    }
}
