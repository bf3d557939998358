//! PDA helpers for deriving record program addresses.

use record_interface::state::{
    linked_state_seeds,
    seeded_state_seeds,
};
use solana_sdk::pubkey::Pubkey;

/// A program derived address and the bump seed that moves it off the curve.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DerivedAddress {
    pub address: Pubkey,
    pub nonce: u8,
}

impl From<(Pubkey, u8)> for DerivedAddress {
    fn from((address, nonce): (Pubkey, u8)) -> Self {
        Self { address, nonce }
    }
}

pub fn derive_key(seeds: &[&[u8]], program_id: &Pubkey) -> DerivedAddress {
    Pubkey::find_program_address(seeds, program_id).into()
}

pub fn find_linked_state_address(linked: &Pubkey, program_id: &Pubkey) -> DerivedAddress {
    derive_key(&linked_state_seeds(linked), program_id)
}

pub fn find_seeded_state_address(program_id: &Pubkey) -> DerivedAddress {
    derive_key(&seeded_state_seeds(), program_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROGRAM: Pubkey = Pubkey::new_from_array([9; 32]);

    #[test]
    fn derivation_is_deterministic() {
        let linked = Pubkey::new_from_array([1; 32]);
        assert_eq!(
            find_linked_state_address(&linked, &PROGRAM),
            find_linked_state_address(&linked, &PROGRAM),
        );
        assert_ne!(
            find_linked_state_address(&linked, &PROGRAM).address,
            find_linked_state_address(&Pubkey::new_from_array([2; 32]), &PROGRAM).address,
        );
        assert_ne!(
            find_linked_state_address(&linked, &PROGRAM).address,
            find_seeded_state_address(&PROGRAM).address,
        );
    }

    #[test]
    fn derived_address_is_off_curve() {
        let DerivedAddress { address, nonce } = find_seeded_state_address(&PROGRAM);
        // Fails for on-curve results.
        let recreated =
            Pubkey::create_program_address(&[b"example_seed".as_ref(), &[nonce]], &PROGRAM)
                .unwrap();
        assert_eq!(recreated, address);
    }
}
