use record_interface::CodecError;
use solana_address::Address;

/// Why a state account couldn't be retrieved.
///
/// Absence is reported separately from malformed data so callers can decide whether a missing
/// account means "not created yet" or a real failure.
#[derive(Debug, thiserror::Error)]
pub enum RetrieveError {
    #[error("State account not found: {0}")]
    AccountNotFound(Address),
    #[error(transparent)]
    Malformed(#[from] CodecError),
    #[error("Account lookup failed: {0:#}")]
    Lookup(anyhow::Error),
}

impl RetrieveError {
    #[inline(always)]
    pub fn is_not_found(&self) -> bool {
        matches!(self, RetrieveError::AccountNotFound(_))
    }
}
