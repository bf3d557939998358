//! Contexts bundling on-chain addresses with the helpers that act on them.

pub mod token;

pub use token::TokenMint;
