use solana_address::Address;

/// An account passed to an instruction. The receiving program indexes accounts by position, so
/// the order of a reference list is part of each instruction's contract.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AccountReference {
    pub address: Address,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl AccountReference {
    #[inline(always)]
    pub const fn new(address: Address, is_signer: bool, is_writable: bool) -> Self {
        Self {
            address,
            is_signer,
            is_writable,
        }
    }

    #[inline(always)]
    pub const fn readonly(address: Address) -> Self {
        Self::new(address, false, false)
    }

    #[inline(always)]
    pub const fn writable(address: Address) -> Self {
        Self::new(address, false, true)
    }

    #[inline(always)]
    pub const fn readonly_signer(address: Address) -> Self {
        Self::new(address, true, false)
    }

    #[inline(always)]
    pub const fn writable_signer(address: Address) -> Self {
        Self::new(address, true, true)
    }
}

#[cfg(feature = "client")]
impl From<AccountReference> for solana_instruction::AccountMeta {
    fn from(reference: AccountReference) -> Self {
        solana_instruction::AccountMeta {
            pubkey: reference.address,
            is_signer: reference.is_signer,
            is_writable: reference.is_writable,
        }
    }
}

#[cfg(feature = "client")]
impl From<&solana_instruction::AccountMeta> for AccountReference {
    fn from(meta: &solana_instruction::AccountMeta) -> Self {
        Self::new(meta.pubkey, meta.is_signer, meta.is_writable)
    }
}
