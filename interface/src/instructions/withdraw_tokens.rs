use alloc::vec::Vec;

use solana_address::Address;

use crate::{
    instructions::{
        InstructionDescriptor,
        InstructionTag,
    },
    layout::FieldValue,
    AccountReference,
};

/// Withdraws `amount` tokens held by the record's vault into `destination`.
///
/// ### Accounts
///  0. `[READ]` SPL token program
///  1. `[SIGNER]` Record owner
///  2. `[READ]` Record
///  3. `[WRITE]` Vault token account
///  4. `[WRITE]` Destination token account
///  5. `[WRITE]` (Optional) Fee token account
pub struct WithdrawTokens {
    pub spl_token_program: Address,
    pub owner: Address,
    pub record: Address,
    pub vault: Address,
    pub destination: Address,
    /// Only passed to the program when present.
    pub fee_account: Option<Address>,
    pub amount: u64,
}

impl WithdrawTokens {
    #[inline(always)]
    pub fn descriptor(&self) -> InstructionDescriptor {
        InstructionDescriptor::new(InstructionTag::WithdrawTokens)
            .with("amount", FieldValue::U64(self.amount))
    }

    pub fn create_account_references(&self) -> Vec<AccountReference> {
        let mut references = Vec::with_capacity(6);
        references.extend([
            AccountReference::readonly(self.spl_token_program),
            AccountReference::readonly_signer(self.owner),
            AccountReference::readonly(self.record),
            AccountReference::writable(self.vault),
            AccountReference::writable(self.destination),
        ]);
        references.extend(self.fee_account.map(AccountReference::writable));
        references
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

#[cfg(test)]
mod tests {
    use super::*;

    fn withdraw(fee_account: Option<Address>) -> WithdrawTokens {
        WithdrawTokens {
            spl_token_program: Address::new_from_array([1; 32]),
            owner: Address::new_from_array([2; 32]),
            record: Address::new_from_array([3; 32]),
            vault: Address::new_from_array([4; 32]),
            destination: Address::new_from_array([5; 32]),
            fee_account,
            amount: 1_000,
        }
    }

    #[test]
    fn optional_fee_account_is_appended_only_when_present() {
        assert_eq!(withdraw(None).create_account_references().len(), 5);

        let fee = Address::new_from_array([6; 32]);
        let references = withdraw(Some(fee)).create_account_references();
        assert_eq!(references.len(), 6);
        assert_eq!(references[5], AccountReference::writable(fee));
    }

    #[test]
    fn data_layout() {
        let data = withdraw(None).descriptor().encode().unwrap();
        assert_eq!(data.len(), 9);
        assert_eq!(data[0], InstructionTag::WithdrawTokens as u8);
        assert_eq!(u64::from_le_bytes(data[1..9].try_into().unwrap()), 1_000);
    }
}
