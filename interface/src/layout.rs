//! Statically declared field layouts shared by instructions and account state.
//!
//! A layout is a leading tag followed by fixed-width fields in declared order. Every multi-byte
//! integer is little-endian, there are no delimiters, no length prefix and no padding, so a
//! field's offset is always the cumulative width of the tag and the fields before it.

use alloc::vec::Vec;

use solana_address::Address;

use crate::error::{
    CodecError,
    CodecResult,
};

pub const U8_SIZE: usize = core::mem::size_of::<u8>();
pub const U16_SIZE: usize = core::mem::size_of::<u16>();
pub const U32_SIZE: usize = core::mem::size_of::<u32>();
pub const U64_SIZE: usize = core::mem::size_of::<u64>();
pub const ADDRESS_SIZE: usize = 32;

/// Width of the leading discriminant.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TagWidth {
    U8,
    U64,
}

impl TagWidth {
    #[inline(always)]
    pub const fn len(self) -> usize {
        match self {
            TagWidth::U8 => U8_SIZE,
            TagWidth::U64 => U64_SIZE,
        }
    }

    /// Appends `tag` as little-endian bytes. Fails with [`CodecError::TagOverflow`] if `tag`
    /// doesn't fit in the width.
    pub fn write(self, tag: u64, dst: &mut Vec<u8>) -> CodecResult {
        match self {
            TagWidth::U8 => {
                let tag = u8::try_from(tag).map_err(|_| CodecError::TagOverflow {
                    width: U8_SIZE,
                    tag,
                })?;
                dst.push(tag);
            }
            TagWidth::U64 => dst.extend_from_slice(&tag.to_le_bytes()),
        }
        Ok(())
    }

    /// Reads the tag at offset 0. Returns `None` if `src` is too short to hold it.
    pub fn read(self, src: &[u8]) -> Option<u64> {
        match self {
            TagWidth::U8 => src.first().map(|tag| *tag as u64),
            TagWidth::U64 => src
                .get(..U64_SIZE)
                .and_then(|bytes| bytes.try_into().ok())
                .map(u64::from_le_bytes),
        }
    }
}

/// The kind of a fixed-width field. Only fixed-width kinds exist, so a layout can't declare a
/// variable-length field and every encoding has exactly one length.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    U8,
    U16,
    U32,
    U64,
    Address,
}

impl FieldKind {
    #[inline(always)]
    pub const fn len(self) -> usize {
        match self {
            FieldKind::U8 => U8_SIZE,
            FieldKind::U16 => U16_SIZE,
            FieldKind::U32 => U32_SIZE,
            FieldKind::U64 => U64_SIZE,
            FieldKind::Address => ADDRESS_SIZE,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Layout {
    pub tag_width: TagWidth,
    pub fields: &'static [FieldSpec],
}

impl Layout {
    pub const fn new(tag_width: TagWidth, fields: &'static [FieldSpec]) -> Self {
        Self { tag_width, fields }
    }

    /// The total encoded length: the tag plus every field.
    pub const fn len(&self) -> usize {
        let mut len = self.tag_width.len();
        let mut i = 0;
        while i < self.fields.len() {
            len += self.fields[i].kind.len();
            i += 1;
        }
        len
    }

    /// Each field paired with its byte offset from the start of the record.
    pub fn field_offsets(&self) -> impl Iterator<Item = (usize, &'static FieldSpec)> {
        let fields: &'static [FieldSpec] = self.fields;
        fields.iter().scan(self.tag_width.len(), |offset, field| {
            let start = *offset;
            *offset += field.kind.len();
            Some((start, field))
        })
    }

    pub fn offset_of(&self, name: &str) -> Option<usize> {
        self.field_offsets()
            .find(|(_, field)| field.name == name)
            .map(|(offset, _)| offset)
    }
}

/// A single decoded or to-be-encoded field value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldValue {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Address(Address),
}

impl FieldValue {
    pub const fn kind(&self) -> FieldKind {
        match self {
            FieldValue::U8(_) => FieldKind::U8,
            FieldValue::U16(_) => FieldKind::U16,
            FieldValue::U32(_) => FieldKind::U32,
            FieldValue::U64(_) => FieldKind::U64,
            FieldValue::Address(_) => FieldKind::Address,
        }
    }

    /// Appends the value's little-endian bytes to `dst`.
    pub fn write(&self, dst: &mut Vec<u8>) {
        match self {
            FieldValue::U8(v) => dst.push(*v),
            FieldValue::U16(v) => dst.extend_from_slice(&v.to_le_bytes()),
            FieldValue::U32(v) => dst.extend_from_slice(&v.to_le_bytes()),
            FieldValue::U64(v) => dst.extend_from_slice(&v.to_le_bytes()),
            FieldValue::Address(v) => dst.extend_from_slice(v.as_ref()),
        }
    }

    /// Reads a value of `kind` from the start of `src`. Returns `None` if `src` is too short.
    pub fn read(kind: FieldKind, src: &[u8]) -> Option<Self> {
        let bytes = src.get(..kind.len())?;
        let value = match kind {
            FieldKind::U8 => FieldValue::U8(bytes[0]),
            FieldKind::U16 => FieldValue::U16(u16::from_le_bytes(bytes.try_into().ok()?)),
            FieldKind::U32 => FieldValue::U32(u32::from_le_bytes(bytes.try_into().ok()?)),
            FieldKind::U64 => FieldValue::U64(u64::from_le_bytes(bytes.try_into().ok()?)),
            FieldKind::Address => {
                let array: [u8; ADDRESS_SIZE] = bytes.try_into().ok()?;
                FieldValue::Address(Address::new_from_array(array))
            }
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    const FIELDS: &[FieldSpec] = &[
        FieldSpec::new("a", FieldKind::U8),
        FieldSpec::new("b", FieldKind::Address),
        FieldSpec::new("c", FieldKind::U64),
    ];

    #[test]
    fn offsets_are_cumulative_widths() {
        let layout = Layout::new(TagWidth::U64, FIELDS);
        assert_eq!(layout.len(), 8 + 1 + 32 + 8);
        assert_eq!(layout.offset_of("a"), Some(8));
        assert_eq!(layout.offset_of("b"), Some(9));
        assert_eq!(layout.offset_of("c"), Some(41));
        assert_eq!(layout.offset_of("d"), None);
    }

    #[test]
    fn tag_widths() {
        let mut dst = vec![];
        TagWidth::U8.write(3, &mut dst).unwrap();
        TagWidth::U64.write(3, &mut dst).unwrap();
        assert_eq!(dst, [3, 3, 0, 0, 0, 0, 0, 0, 0]);

        assert_eq!(TagWidth::U8.read(&dst), Some(3));
        assert_eq!(TagWidth::U64.read(&dst[1..]), Some(3));
        assert_eq!(TagWidth::U64.read(&dst[2..]), None);
        assert_eq!(TagWidth::U8.read(&[]), None);
    }

    #[test]
    fn u8_tag_overflow() {
        let mut dst = vec![];
        assert_eq!(TagWidth::U8.write(255, &mut dst), Ok(()));
        assert_eq!(
            TagWidth::U8.write(256, &mut dst),
            Err(CodecError::TagOverflow { width: 1, tag: 256 })
        );
        // Nothing is written on failure.
        assert_eq!(dst, [255]);
        assert_eq!(TagWidth::U64.write(u64::MAX, &mut dst), Ok(()));
    }

    #[test]
    fn field_values_are_little_endian() {
        let mut dst = vec![];
        FieldValue::U16(0x0102).write(&mut dst);
        FieldValue::U32(0x0a0b0c0d).write(&mut dst);
        assert_eq!(dst, [0x02, 0x01, 0x0d, 0x0c, 0x0b, 0x0a]);
        assert_eq!(
            FieldValue::read(FieldKind::U32, &dst[2..]),
            Some(FieldValue::U32(0x0a0b0c0d))
        );
        assert_eq!(FieldValue::read(FieldKind::U64, &dst), None);
    }
}
