//! Fetching and decoding state accounts.

use anyhow::Context;
use record_interface::state::{
    AccountTag,
    StateRecord,
    StateVariant,
    LINKED_OWNER_OFFSET,
};
use solana_address::Address;
use solana_client::{
    nonblocking::rpc_client::RpcClient,
    rpc_config::{
        RpcAccountInfoConfig,
        RpcProgramAccountsConfig,
        UiAccountEncoding,
    },
    rpc_filter::{
        Memcmp,
        RpcFilterType,
    },
};

use crate::{
    config::BindingsConfig,
    error::RetrieveError,
    lookup::AccountLookup,
};

/// Fetches the account at `key` and decodes it as `variant`.
///
/// A missing account and an account with empty data are both [`RetrieveError::AccountNotFound`].
/// The tag isn't checked; use [`StateRecord::expect_tag`] for that.
pub async fn retrieve(
    lookup: &impl AccountLookup,
    variant: StateVariant,
    key: &Address,
) -> Result<StateRecord, RetrieveError> {
    let data = lookup
        .get_account_data(key)
        .await
        .map_err(RetrieveError::Lookup)?;
    decode_data(variant, key, data)
}

/// Fetches every key in one batched lookup and decodes each as `variant`.
///
/// The outer error is a failed lookup. Each inner result corresponds to the key at the same index.
pub async fn retrieve_many(
    lookup: &impl AccountLookup,
    variant: StateVariant,
    keys: &[Address],
) -> Result<Vec<Result<StateRecord, RetrieveError>>, RetrieveError> {
    let all_data = lookup
        .get_multiple_account_data(keys)
        .await
        .map_err(RetrieveError::Lookup)?;

    if all_data.len() != keys.len() {
        return Err(RetrieveError::Lookup(anyhow::anyhow!(
            "Expected {} accounts, got {}",
            keys.len(),
            all_data.len()
        )));
    }

    Ok(keys
        .iter()
        .zip(all_data)
        .map(|(key, data)| decode_data(variant, key, data))
        .collect())
}

/// Whether an account exists at `address`. Existing accounts with empty data count as existing.
pub async fn check_account_exists(
    lookup: &impl AccountLookup,
    address: &Address,
) -> anyhow::Result<bool> {
    let data = lookup
        .get_account_data(address)
        .await
        .with_context(|| format!("Couldn't look up {address}"))?;
    Ok(data.is_some())
}

/// Program account filters matching initialized [`StateVariant::Linked`] records owned by `owner`.
///
/// There's no data size filter, so accounts with bytes past the layout still match, the same way
/// [`StateRecord::decode`] accepts them.
pub fn owner_filters(owner: &Address) -> Vec<RpcFilterType> {
    vec![
        RpcFilterType::Memcmp(Memcmp::new_raw_bytes(
            0,
            vec![AccountTag::Initialized.raw() as u8],
        )),
        RpcFilterType::Memcmp(Memcmp::new_raw_bytes(
            LINKED_OWNER_OFFSET,
            owner.as_ref().to_vec(),
        )),
    ]
}

/// Scans the program's accounts for initialized [`StateVariant::Linked`] records owned by `owner`.
pub async fn get_states_for_owner(
    rpc: &RpcClient,
    config: &BindingsConfig,
    owner: &Address,
) -> anyhow::Result<Vec<(Address, StateRecord)>> {
    let accounts = rpc
        .get_program_accounts_with_config(
            config.active_program_id(),
            RpcProgramAccountsConfig {
                filters: Some(owner_filters(owner)),
                account_config: RpcAccountInfoConfig {
                    commitment: Some(config.commitment.config()),
                    encoding: Some(UiAccountEncoding::Base64),
                    ..Default::default()
                },
                ..Default::default()
            },
        )
        .await
        .context("Couldn't fetch program accounts")?;

    accounts
        .into_iter()
        .map(|(address, account)| {
            let record = StateRecord::decode(StateVariant::Linked, &account.data)
                .with_context(|| format!("Malformed state account {address}"))?;
            Ok((address, record))
        })
        .collect()
}

fn decode_data(
    variant: StateVariant,
    key: &Address,
    data: Option<Vec<u8>>,
) -> Result<StateRecord, RetrieveError> {
    match data {
        Some(data) if !data.is_empty() => Ok(StateRecord::decode(variant, &data)?),
        _ => Err(RetrieveError::AccountNotFound(*key)),
    }
}
