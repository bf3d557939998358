use alloc::vec::Vec;

use crate::{
    error::{
        CodecError,
        CodecResult,
    },
    layout::{
        FieldKind,
        FieldSpec,
        FieldValue,
        Layout,
        TagWidth,
    },
};

pub mod create_record;
pub mod example_instr;
pub mod initialize_seeded;
pub mod withdraw_tokens;

pub use create_record::CreateRecord;
pub use example_instr::ExampleInstr;
pub use initialize_seeded::InitializeSeeded;
pub use withdraw_tokens::WithdrawTokens;

#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(test, derive(strum_macros::FromRepr, strum_macros::EnumIter))]
#[cfg_attr(feature = "client", derive(strum_macros::Display))]
pub enum InstructionTag {
    ExampleInstr,
    CreateRecord,
    WithdrawTokens,
    InitializeSeeded,
}

impl TryFrom<u8> for InstructionTag {
    type Error = CodecError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            // SAFETY: A valid enum variant is guaranteed with the match pattern.
            // All variants are checked in the exhaustive instruction tag test.
            0..4 => Ok(unsafe { core::mem::transmute::<u8, Self>(value) }),
            _ => Err(CodecError::InvalidInstructionTag(value)),
        }
    }
}

const NONCE_FIELDS: &[FieldSpec] = &[FieldSpec {
    name: "nonce",
    kind: FieldKind::U8,
}];

const AMOUNT_FIELDS: &[FieldSpec] = &[FieldSpec {
    name: "amount",
    kind: FieldKind::U64,
}];

impl InstructionTag {
    /// The statically declared data layout for the instruction.
    pub const fn layout(self) -> Layout {
        match self {
            InstructionTag::ExampleInstr => Layout::new(TagWidth::U8, &[]),
            InstructionTag::CreateRecord => Layout::new(TagWidth::U8, NONCE_FIELDS),
            InstructionTag::WithdrawTokens => Layout::new(TagWidth::U8, AMOUNT_FIELDS),
            // Targets the casting flavor of the program, which reads 8-byte tags.
            InstructionTag::InitializeSeeded => Layout::new(TagWidth::U64, NONCE_FIELDS),
        }
    }
}

/// An instruction variant plus the field values supplied for it.
///
/// Values are looked up by name when encoding, so the order they're supplied in doesn't matter;
/// the layout alone decides the byte order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InstructionDescriptor {
    tag: InstructionTag,
    fields: Vec<(&'static str, FieldValue)>,
}

impl InstructionDescriptor {
    pub fn new(tag: InstructionTag) -> Self {
        Self {
            tag,
            fields: Vec::new(),
        }
    }

    /// Sets `name` to `value`, replacing any earlier value for the same name.
    pub fn with(mut self, name: &'static str, value: FieldValue) -> Self {
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name, value)),
        }
        self
    }

    #[inline(always)]
    pub fn tag(&self) -> InstructionTag {
        self.tag
    }

    pub fn get(&self, name: &str) -> Option<FieldValue> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, value)| *value)
    }

    /// Encodes the tag followed by every field in the layout's declared order.
    ///
    /// Fails if a declared field wasn't supplied or was supplied with the wrong kind. Field values
    /// themselves are never validated; that's up to the receiving program.
    pub fn encode(&self) -> CodecResult<Vec<u8>> {
        let layout = self.tag.layout();
        let mut data = Vec::with_capacity(layout.len());

        layout.tag_width.write(self.tag as u64, &mut data)?;
        for field in layout.fields {
            let value = self
                .get(field.name)
                .ok_or(CodecError::MissingField(field.name))?;
            if value.kind() != field.kind {
                return Err(CodecError::FieldKindMismatch(field.name));
            }
            value.write(&mut data);
        }

        debug_assert_eq!(data.len(), layout.len());
        Ok(data)
    }
}

pub fn encode(descriptor: &InstructionDescriptor) -> CodecResult<Vec<u8>> {
    descriptor.encode()
}

/// Combines the encoded instruction data with the program id and the account references into a
/// call ready for submission.
///
/// The references are passed through in the order given. Their count and flags aren't checked
/// here; the receiving program rejects a call with the wrong accounts.
#[cfg(feature = "client")]
pub fn build_call(
    descriptor: &InstructionDescriptor,
    program_id: &solana_address::Address,
    accounts: impl IntoIterator<Item = crate::AccountReference>,
) -> CodecResult<solana_instruction::Instruction> {
    Ok(solana_instruction::Instruction {
        program_id: *program_id,
        accounts: accounts.into_iter().map(Into::into).collect(),
        data: descriptor.encode()?,
    })
}
