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

/// Creates the linked state account at the address derived from `linked_account`.
///
/// `nonce` must be the bump returned alongside the derived record address.
///
/// ### Accounts
///  0. `[READ]` System program
///  1. `[WRITE, SIGNER]` Fee payer
///  2. `[READ]` Linked account
///  3. `[READ]` Owner
///  4. `[READ]` Mint
///  5. `[WRITE]` Record
pub struct CreateRecord {
    /// The system program.
    pub system_program: Address,
    /// The fee payer funding the record account.
    pub fee_payer: Address,
    /// The account the record is derived from.
    pub linked_account: Address,
    /// The record's owner.
    pub owner: Address,
    /// The mint tracked by the record.
    pub mint: Address,
    /// The record PDA.
    pub record: Address,
    /// The bump seed of the record PDA.
    pub nonce: u8,
}

impl CreateRecord {
    #[inline(always)]
    pub fn descriptor(&self) -> InstructionDescriptor {
        InstructionDescriptor::new(InstructionTag::CreateRecord)
            .with("nonce", FieldValue::U8(self.nonce))
    }

    #[inline(always)]
    pub fn create_account_references(&self) -> [AccountReference; 6] {
        [
            AccountReference::readonly(self.system_program),
            AccountReference::writable_signer(self.fee_payer),
            AccountReference::readonly(self.linked_account),
            AccountReference::readonly(self.owner),
            AccountReference::readonly(self.mint),
            AccountReference::writable(self.record),
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

impl Default for CreateRecord {
    fn default() -> Self {
        Self {
            system_program: SYSTEM_PROGRAM_ID,
            fee_payer: Address::default(),
            linked_account: Address::default(),
            owner: Address::default(),
            mint: Address::default(),
            record: Address::default(),
            nonce: 0,
        }
    }
}
