//! Wire-level interface for the record program: layout descriptors, instruction encoding, account
//! references and state decoding.
//!
//! Everything here is pure and synchronous. Fetching account data and submitting transactions
//! lives in the `record-client` crate.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod account_reference;
pub mod error;
pub mod instructions;
pub mod layout;
pub mod state;

pub use account_reference::AccountReference;
pub use error::{
    CodecError,
    CodecResult,
};

/// The system program's address, `11111111111111111111111111111111`.
pub const SYSTEM_PROGRAM_ID: solana_address::Address =
    solana_address::Address::new_from_array([0; 32]);
