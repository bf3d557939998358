use solana_address::Address;

use crate::{
    instructions::{
        InstructionDescriptor,
        InstructionTag,
    },
    layout::FieldValue,
    AccountReference,
    SYSTEM_PROGRAM_ID,
};

/// Initializes the program-wide seeded state account.
///
/// This instruction is read by the casting flavor of the program, so its tag is encoded as a
/// little-endian u64 rather than a single byte.
///
/// ### Accounts
///  0. `[READ]` System program
///  1. `[WRITE, SIGNER]` Fee payer
///  2. `[WRITE]` Seeded state
pub struct InitializeSeeded {
    pub system_program: Address,
    pub fee_payer: Address,
    pub seeded_state: Address,
    pub nonce: u8,
}

impl InitializeSeeded {
    pub fn new(fee_payer: Address, seeded_state: Address, nonce: u8) -> Self {
        Self {
            system_program: SYSTEM_PROGRAM_ID,
            fee_payer,
            seeded_state,
            nonce,
        }
    }

    #[inline(always)]
    pub fn descriptor(&self) -> InstructionDescriptor {
        InstructionDescriptor::new(InstructionTag::InitializeSeeded)
            .with("nonce", FieldValue::U8(self.nonce))
    }

    #[inline(always)]
    pub fn create_account_references(&self) -> [AccountReference; 3] {
        [
            AccountReference::readonly(self.system_program),
            AccountReference::writable_signer(self.fee_payer),
            AccountReference::writable(self.seeded_state),
        ]
    }

    #[cfg(feature = "client")]
    pub fn instruction(
        &self,
        program_id: &Address,
    ) -> crate::CodecResult<solana_instruction::Instruction> {
        super::build_call(
            &self.descriptor(),
            program_id,
            self.create_account_references(),
        )
    }
}
