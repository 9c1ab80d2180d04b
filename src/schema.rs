//! Declarative field layouts for fixed-size binary header blocks.
//!
//! A [`FormatSchema`] maps logical field names to byte ranges and decode
//! types within one fixed-size block. Schemas are built once per format
//! revision and shared read-only across every parse of that revision;
//! supporting a new revision means building a different schema, never
//! branching inside the decoder.

use crate::error::SchemaError;

/// Where a field lives inside a fixed-size header block: the half-open
/// byte range `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRange {
    pub start: usize,
    pub end: usize,
}

impl FieldRange {
    /// Number of bytes the range covers.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// How the bytes of a field are to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeType {
    /// Big-endian two's-complement 16-bit integer.
    Int16BE,
    /// Big-endian two's-complement 32-bit integer.
    Int32BE,
    /// IBM System/370 single-precision hexadecimal float.
    IbmFloat32,
    /// Fixed-length text, decoded under the call's charset; length is the
    /// field's range length.
    FixedString,
}

impl DecodeType {
    /// Fixed byte width for numeric types; `None` for `FixedString`, whose
    /// width is whatever the field range declares.
    pub fn width(&self) -> Option<usize> {
        match self {
            DecodeType::Int16BE => Some(2),
            DecodeType::Int32BE | DecodeType::IbmFloat32 => Some(4),
            DecodeType::FixedString => None,
        }
    }
}

/// One named field of a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub range: FieldRange,
    pub decode_type: DecodeType,
}

/// An ordered, immutable set of named fields within a fixed-size block.
///
/// Built via [`FormatSchema::builder`]; all validation happens at build
/// time, so a schema that exists is a schema the decoder can trust.
/// Field ranges may overlap (some format revisions reuse bytes), but field
/// names are unique. Safe to share across threads.
#[derive(Debug, Clone)]
pub struct FormatSchema {
    block_size: usize,
    fields: Vec<FieldSpec>,
}

impl FormatSchema {
    /// Start building a schema for a block of `block_size` bytes.
    pub fn builder(block_size: usize) -> FormatSchemaBuilder {
        FormatSchemaBuilder {
            block_size,
            fields: Vec::new(),
        }
    }

    /// Declared size of the block this schema describes.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Fields in insertion order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Builder for [`FormatSchema`]. Consuming, chainable; checks everything
/// at [`build`](FormatSchemaBuilder::build).
#[derive(Debug)]
pub struct FormatSchemaBuilder {
    block_size: usize,
    fields: Vec<FieldSpec>,
}

impl FormatSchemaBuilder {
    /// Declare a field occupying bytes `start..end` of the block.
    pub fn field(
        mut self,
        name: impl Into<String>,
        start: usize,
        end: usize,
        decode_type: DecodeType,
    ) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            range: FieldRange { start, end },
            decode_type,
        });
        self
    }

    /// Validate every declared field and produce the immutable schema.
    ///
    /// Rejects empty/inverted ranges, ranges past the block, numeric
    /// fields whose range length differs from the type's fixed width, and
    /// duplicate names. None of these checks ever depends on input data.
    pub fn build(self) -> Result<FormatSchema, SchemaError> {
        for (i, spec) in self.fields.iter().enumerate() {
            if spec.range.is_empty() {
                return Err(SchemaError::EmptyRange {
                    name: spec.name.clone(),
                    start: spec.range.start,
                    end: spec.range.end,
                });
            }
            if spec.range.end > self.block_size {
                return Err(SchemaError::OutOfBounds {
                    name: spec.name.clone(),
                    end: spec.range.end,
                    block_size: self.block_size,
                });
            }
            if let Some(expected) = spec.decode_type.width() {
                if spec.range.len() != expected {
                    return Err(SchemaError::WidthMismatch {
                        name: spec.name.clone(),
                        expected,
                        actual: spec.range.len(),
                    });
                }
            }
            if self.fields[..i].iter().any(|prev| prev.name == spec.name) {
                return Err(SchemaError::DuplicateField(spec.name.clone()));
            }
        }
        Ok(FormatSchema {
            block_size: self.block_size,
            fields: self.fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_keeps_insertion_order() {
        let schema = FormatSchema::builder(16)
            .field("b", 4, 6, DecodeType::Int16BE)
            .field("a", 0, 4, DecodeType::Int32BE)
            .build()
            .unwrap();
        let names: Vec<_> = schema.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(schema.block_size(), 16);
    }

    #[test]
    fn rejects_width_mismatch() {
        // An Int32BE field spanning only 2 bytes must fail at build time.
        let err = FormatSchema::builder(16)
            .field("bad", 0, 2, DecodeType::Int32BE)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::WidthMismatch {
                name: "bad".into(),
                expected: 4,
                actual: 2,
            }
        );
    }

    #[test]
    fn rejects_empty_and_out_of_bounds_ranges() {
        assert!(matches!(
            FormatSchema::builder(8)
                .field("x", 4, 4, DecodeType::FixedString)
                .build(),
            Err(SchemaError::EmptyRange { .. })
        ));
        assert!(matches!(
            FormatSchema::builder(8)
                .field("x", 6, 10, DecodeType::Int32BE)
                .build(),
            Err(SchemaError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_names_but_allows_overlap() {
        assert!(matches!(
            FormatSchema::builder(8)
                .field("x", 0, 2, DecodeType::Int16BE)
                .field("x", 2, 4, DecodeType::Int16BE)
                .build(),
            Err(SchemaError::DuplicateField(_))
        ));
        // Overlapping ranges under distinct names are legal.
        let schema = FormatSchema::builder(8)
            .field("wide", 0, 4, DecodeType::Int32BE)
            .field("low", 2, 4, DecodeType::Int16BE)
            .build()
            .unwrap();
        assert_eq!(schema.fields().len(), 2);
    }
}
