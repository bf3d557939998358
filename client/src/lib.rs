//! Client-side bindings for the record program.
//!
//! Includes configuration, account lookups and state retrieval, PDA derivations, transaction
//! helpers, test token minting and an end-to-end scaffold.

pub mod config;
pub mod context;
pub mod e2e_helpers;
pub mod error;
pub mod logs;
pub mod lookup;
pub mod pda;
pub mod state;
pub mod transactions;

pub use config::BindingsConfig;
pub use error::RetrieveError;
pub use logs::LogColor;
pub use lookup::{
    AccountLookup,
    InMemoryAccounts,
};
