//! Decoding of fixed-size header blocks against a [`FormatSchema`].

use std::collections::HashMap;

use byteorder::{BigEndian, ByteOrder};
use log::debug;

use crate::charset::Charset;
use crate::error::{ExtractError, Result};
use crate::schema::{DecodeType, FormatSchema};

/// A single decoded field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int16(i16),
    Int32(i32),
    Float32(f32),
    Text(String),
}

impl FieldValue {
    /// Numeric coercion for count/size fields, regardless of declared
    /// width. `None` for text values and for negative integers.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            FieldValue::Int16(v) => u64::try_from(v).ok(),
            FieldValue::Int32(v) => u64::try_from(v).ok(),
            FieldValue::Float32(_) | FieldValue::Text(_) => None,
        }
    }

    /// Signed integer view of this value, if it is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            FieldValue::Int16(v) => Some(v as i64),
            FieldValue::Int32(v) => Some(v as i64),
            _ => None,
        }
    }

    /// Text view of this value, if it is a string field.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// The complete result of decoding one header block: field name to value.
///
/// Immutable after construction; decoding is all-or-nothing, so every
/// field the schema declares is present.
#[derive(Debug, Clone)]
pub struct DecodedHeader {
    values: HashMap<String, FieldValue>,
}

impl DecodedHeader {
    /// Look up a decoded field by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Integer field by name, coerced to `i64`.
    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.values.get(name).and_then(FieldValue::as_i64)
    }

    /// Number of decoded fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Decode every field a schema declares out of one fixed-size block.
///
/// The block must cover the schema's full declared size; a shorter block
/// fails with [`ExtractError::TruncatedHeader`] and no partial header is
/// returned. String fields are decoded under `charset` verbatim, numeric
/// fields per their [`DecodeType`].
pub fn decode_header(
    schema: &FormatSchema,
    block: &[u8],
    charset: Charset,
) -> Result<DecodedHeader> {
    if block.len() < schema.block_size() {
        return Err(ExtractError::TruncatedHeader {
            expected: schema.block_size(),
            actual: block.len(),
        });
    }

    let mut values = HashMap::with_capacity(schema.fields().len());
    for spec in schema.fields() {
        let bytes = &block[spec.range.start..spec.range.end];
        let value = match spec.decode_type {
            DecodeType::Int16BE => FieldValue::Int16(BigEndian::read_i16(bytes)),
            DecodeType::Int32BE => FieldValue::Int32(BigEndian::read_i32(bytes)),
            DecodeType::IbmFloat32 => FieldValue::Float32(ibm_f32(BigEndian::read_u32(bytes))),
            DecodeType::FixedString => FieldValue::Text(charset.decode(bytes)),
        };
        values.insert(spec.name.clone(), value);
    }
    debug!("Decoded {} header fields", values.len());
    Ok(DecodedHeader { values })
}

/// Decode an IBM System/370 single-precision float from its big-endian
/// bit pattern.
///
/// Layout: bit 0 sign, bits 1-7 base-16 exponent biased by 64, bits 8-31 a
/// 24-bit fraction. Value = sign x fraction x 16^(exponent - 64). A zero
/// fraction decodes to 0.0 whatever the other bits say; no bit pattern is
/// an error.
pub fn ibm_f32(bits: u32) -> f32 {
    let fraction = bits & 0x00FF_FFFF;
    if fraction == 0 {
        return 0.0;
    }
    let sign = if bits & 0x8000_0000 != 0 { -1.0 } else { 1.0 };
    let exponent = ((bits >> 24) & 0x7F) as i32 - 64;
    let mantissa = fraction as f64 / f64::from(1u32 << 24);
    (sign * mantissa * 16f64.powi(exponent)) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    // Reference vectors from the SEG-Y rev 1 specification appendix.
    #[test]
    fn ibm_float_reference_vectors() {
        assert_eq!(ibm_f32(0x0000_0000), 0.0);
        assert_eq!(ibm_f32(0x4110_0000), 1.0);
        assert_eq!(ibm_f32(0xC110_0000), -1.0);
        assert_eq!(ibm_f32(0x4264_0000), 100.0);
        assert_eq!(ibm_f32(0x4276_A000), 118.625);
        assert_eq!(ibm_f32(0xC276_A000), -118.625);
        assert_eq!(ibm_f32(0x4210_0000), 16.0);
    }

    #[test]
    fn ibm_float_zero_fraction_is_zero_regardless_of_exponent() {
        assert_eq!(ibm_f32(0x7F00_0000), 0.0);
        assert_eq!(ibm_f32(0x8000_0000), 0.0);
    }
}
