//! Deterministic keypairs for end-to-end runs. Each pubkey starts with a recognizable prefix.

macro_rules! keypair_fn {
    ($fn_name:ident, $b58:literal) => {
        #[inline]
        pub fn $fn_name() -> &'static ::solana_sdk::signature::Keypair {
            static KP: ::std::sync::LazyLock<::solana_sdk::signature::Keypair> =
                ::std::sync::LazyLock::new(|| {
                    ::solana_sdk::signature::Keypair::from_base58_string($b58)
                });

            ::std::sync::LazyLock::force(&KP)
        }
    };
}

#[rustfmt::skip]
mod unformatted {
    keypair_fn!(default_payer, "4UahpeecuKmCQJv3XbkzmBxSd5JxdviM6UGMCZ5FsMw5XZv7APjzDb1WM9WcCdKX7rmsYWSi7Cumcf59TvXyLR45");
    keypair_fn!(owner_1111, "4phi3FwSKx8CQssCGPgBZxabjeLBZK7ZhhPrVVo1vsP4T3F9iUdQPFf7wphop5dhYg9CJV35GoPMSTdb95w3FfoE");
    keypair_fn!(owner_2222, "5LqH8f3NYsSHGvEYbaWnRM8swJgEB9SdSrT6KkCeerTMbyZnQgSZhPQwJEVSsfZVMRPz4q4P4UYynEwvw2KApYrP");
    keypair_fn!(linked_3333, "4L8vaVEXLM2kfRtyo99qNhN1DzuBTcoraWjG6JpJWQ8EypLA26pmi3oGyTaFGNi2ZmNQnx2eg1t827YWLnpg3gcM");
    keypair_fn!(linked_4444, "3opivcTjFYRsZ3LZDdeufMmCeVa448THYJPHTPUxMm6btt3U5k32HsG8nMgabnxzPDjKHnaD6fihDWtc7iTVuTot");
}

pub use unformatted::*;
