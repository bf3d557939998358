use alloc::{
    vec,
    vec::Vec,
};

use solana_address::Address;

use crate::{
    error::{
        CodecError,
        CodecResult,
    },
    layout::FieldValue,
    state::{
        AccountTag,
        StateVariant,
    },
};

/// A decoded snapshot of a program account.
///
/// Address fields are `Some` exactly when the variant's layout declares them.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StateRecord {
    pub variant: StateVariant,
    pub tag: AccountTag,
    /// The bump seed of the account's derived address.
    pub nonce: u8,
    /// The account the state was derived from.
    pub linked: Option<Address>,
    pub owner: Option<Address>,
    pub mint: Option<Address>,
}

impl StateRecord {
    pub fn compact(tag: AccountTag, nonce: u8) -> Self {
        Self::bare(StateVariant::Compact, tag, nonce)
    }

    pub fn seeded(tag: AccountTag, nonce: u8) -> Self {
        Self::bare(StateVariant::Seeded, tag, nonce)
    }

    pub fn linked(
        tag: AccountTag,
        nonce: u8,
        linked: Address,
        owner: Address,
        mint: Address,
    ) -> Self {
        Self {
            linked: Some(linked),
            owner: Some(owner),
            mint: Some(mint),
            ..Self::bare(StateVariant::Linked, tag, nonce)
        }
    }

    fn bare(variant: StateVariant, tag: AccountTag, nonce: u8) -> Self {
        Self {
            variant,
            tag,
            nonce,
            linked: None,
            owner: None,
            mint: None,
        }
    }

    /// Decodes `bytes` against the fixed layout of `variant`.
    ///
    /// The tag is read at offset 0 and every field at the cumulative width of the preceding ones.
    /// Bytes past the end of the layout are ignored. The tag value itself isn't validated; see
    /// [`StateRecord::expect_tag`].
    pub fn decode(variant: StateVariant, bytes: &[u8]) -> CodecResult<Self> {
        let layout = variant.layout();
        let malformed = CodecError::MalformedRecord {
            expected: layout.len(),
            actual: bytes.len(),
        };
        if bytes.len() < layout.len() {
            return Err(malformed);
        }

        let tag = layout.tag_width.read(bytes).ok_or(malformed)?;
        let values = layout
            .field_offsets()
            .map(|(offset, field)| FieldValue::read(field.kind, &bytes[offset..]).ok_or(malformed))
            .collect::<CodecResult<Vec<_>>>()?;

        let mut record = Self::bare(variant, tag.into(), 0);
        match values.as_slice() {
            [FieldValue::U8(nonce)] => record.nonce = *nonce,
            [FieldValue::U8(nonce), FieldValue::Address(linked), FieldValue::Address(owner), FieldValue::Address(mint)] =>
            {
                record.nonce = *nonce;
                record.linked = Some(*linked);
                record.owner = Some(*owner);
                record.mint = Some(*mint);
            }
            _ => return Err(malformed),
        }

        Ok(record)
    }

    /// Encodes the record into the exact bytes the program stores for it.
    ///
    /// An address the layout declares but the record doesn't carry is written as zeroes. Fails
    /// with [`CodecError::TagOverflow`] if the tag doesn't fit in the variant's tag width.
    pub fn encode(&self) -> CodecResult<Vec<u8>> {
        let layout = self.variant.layout();
        let mut data = Vec::with_capacity(layout.len());

        layout.tag_width.write(self.tag.raw(), &mut data)?;
        for (field, value) in layout.fields.iter().zip(self.field_values()) {
            if value.kind() != field.kind {
                return Err(CodecError::FieldKindMismatch(field.name));
            }
            value.write(&mut data);
        }

        debug_assert_eq!(data.len(), layout.len());
        Ok(data)
    }

    /// The record's field values, in the variant's layout order.
    fn field_values(&self) -> Vec<FieldValue> {
        let nonce = FieldValue::U8(self.nonce);
        match self.variant {
            StateVariant::Compact | StateVariant::Seeded => vec![nonce],
            StateVariant::Linked => vec![
                nonce,
                FieldValue::Address(self.linked.unwrap_or_default()),
                FieldValue::Address(self.owner.unwrap_or_default()),
                FieldValue::Address(self.mint.unwrap_or_default()),
            ],
        }
    }

    #[inline(always)]
    pub fn is_initialized(&self) -> bool {
        self.tag == AccountTag::Initialized
    }

    /// Fails with [`CodecError::TagMismatch`] unless the record's tag is `expected`.
    pub fn expect_tag(&self, expected: AccountTag) -> CodecResult<&Self> {
        if self.tag != expected {
            return Err(CodecError::TagMismatch {
                expected: expected.raw(),
                actual: self.tag.raw(),
            });
        }
        Ok(self)
    }
}

pub fn decode(variant: StateVariant, bytes: &[u8]) -> CodecResult<StateRecord> {
    StateRecord::decode(variant, bytes)
}
