use solana_address::Address;

use crate::{
    instructions::{
        InstructionDescriptor,
        InstructionTag,
    },
    AccountReference,
    SYSTEM_PROGRAM_ID,
};

/// The template instruction. Carries no data besides its tag.
///
/// ### Accounts
///  0. `[READ]` System program
///  1. `[READ]` SPL token program
///  2. `[WRITE, SIGNER]` Fee payer
///  3. `[WRITE]` Example state
pub struct ExampleInstr {
    /// The system program.
    pub system_program: Address,
    /// The SPL token program.
    pub spl_token_program: Address,
    /// The fee payer.
    pub fee_payer: Address,
    /// The example state account.
    pub example_state: Address,
}

impl ExampleInstr {
    pub fn new(spl_token_program: Address, fee_payer: Address, example_state: Address) -> Self {
        Self {
            system_program: SYSTEM_PROGRAM_ID,
            spl_token_program,
            fee_payer,
            example_state,
        }
    }

    #[inline(always)]
    pub fn descriptor(&self) -> InstructionDescriptor {
        InstructionDescriptor::new(InstructionTag::ExampleInstr)
    }

    #[inline(always)]
    pub fn create_account_references(&self) -> [AccountReference; 4] {
        [
            AccountReference::readonly(self.system_program),
            AccountReference::readonly(self.spl_token_program),
            AccountReference::writable_signer(self.fee_payer),
            AccountReference::writable(self.example_state),
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
