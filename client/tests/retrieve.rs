use async_trait::async_trait;
use record_client::{
    pda::{
        find_linked_state_address,
        find_seeded_state_address,
    },
    state::{
        check_account_exists,
        retrieve,
        retrieve_many,
    },
    AccountLookup,
    InMemoryAccounts,
    RetrieveError,
};
use record_interface::{
    state::{
        AccountTag,
        StateRecord,
        StateVariant,
    },
    CodecError,
};
use solana_address::Address;

const PROGRAM_ID: Address = Address::new_from_array([42; 32]);

/// A lookup whose transport always fails.
struct Unreachable;

#[async_trait]
impl AccountLookup for Unreachable {
    async fn get_account_data(&self, _address: &Address) -> anyhow::Result<Option<Vec<u8>>> {
        anyhow::bail!("connection refused")
    }
}

#[tokio::test]
async fn retrieve_linked_record_at_derived_address() -> anyhow::Result<()> {
    let accounts = InMemoryAccounts::new();
    let linked = Address::new_from_array([1; 32]);
    let owner = Address::new_from_array([2; 32]);
    let mint = Address::new_from_array([3; 32]);

    let derived = find_linked_state_address(&linked, &PROGRAM_ID);
    let record = StateRecord::linked(AccountTag::Initialized, derived.nonce, linked, owner, mint);
    accounts.insert_data(derived.address, PROGRAM_ID, record.encode()?);

    let fetched = retrieve(&accounts, StateVariant::Linked, &derived.address).await?;
    assert_eq!(fetched, record);
    assert_eq!(fetched.owner, Some(owner));
    assert!(fetched.expect_tag(AccountTag::Initialized).is_ok());

    // Same bytes read as a different layout give a different (wrong but well-formed) record.
    let as_compact = retrieve(&accounts, StateVariant::Compact, &derived.address).await?;
    assert_eq!(as_compact.nonce, derived.nonce);
    assert_eq!(as_compact.owner, None);

    Ok(())
}

#[tokio::test]
async fn uninitialized_seeded_state() -> anyhow::Result<()> {
    let accounts = InMemoryAccounts::new();
    let derived = find_seeded_state_address(&PROGRAM_ID);
    accounts.insert_data(derived.address, PROGRAM_ID, vec![0; 9]);

    let record = retrieve(&accounts, StateVariant::Seeded, &derived.address).await?;
    assert_eq!(record.tag, AccountTag::Uninitialized);
    assert!(!record.is_initialized());
    assert_eq!(
        record.expect_tag(AccountTag::Initialized),
        Err(CodecError::TagMismatch {
            expected: 1,
            actual: 0,
        })
    );

    Ok(())
}

#[tokio::test]
async fn missing_account_is_not_found() {
    let accounts = InMemoryAccounts::new();
    let key = find_seeded_state_address(&PROGRAM_ID).address;

    let err = retrieve(&accounts, StateVariant::Seeded, &key)
        .await
        .unwrap_err();
    assert!(matches!(err, RetrieveError::AccountNotFound(missing) if missing == key));
    assert_eq!(err.to_string(), format!("State account not found: {key}"));
    assert!(!check_account_exists(&accounts, &key).await.unwrap());
}

#[tokio::test]
async fn batch_preserves_key_order() -> anyhow::Result<()> {
    let accounts = InMemoryAccounts::new();
    let keys: Vec<Address> = (1..=4).map(|i| Address::new_from_array([i; 32])).collect();
    for (nonce, key) in keys.iter().enumerate().skip(1) {
        accounts.insert_data(
            *key,
            PROGRAM_ID,
            StateRecord::compact(AccountTag::Initialized, nonce as u8).encode()?,
        );
    }

    let results = retrieve_many(&accounts, StateVariant::Compact, &keys).await?;
    assert!(results[0].as_ref().is_err_and(RetrieveError::is_not_found));
    for (nonce, result) in results.iter().enumerate().skip(1) {
        assert_eq!(result.as_ref().unwrap().nonce, nonce as u8);
    }

    Ok(())
}

#[tokio::test]
async fn transport_failures_are_lookup_errors() {
    let key = find_seeded_state_address(&PROGRAM_ID).address;

    let err = retrieve(&Unreachable, StateVariant::Seeded, &key)
        .await
        .unwrap_err();
    assert!(matches!(&err, RetrieveError::Lookup(e) if e.to_string() == "connection refused"));
    assert!(!err.is_not_found());

    let err = retrieve_many(&Unreachable, StateVariant::Seeded, &[key])
        .await
        .unwrap_err();
    assert!(matches!(err, RetrieveError::Lookup(_)));

    assert!(check_account_exists(&Unreachable, &key).await.is_err());
}
