//! Creates a linked record for a test owner, funds the owner's token account and reads the record
//! back. Needs a local validator with the record program deployed at `RECORD_PROGRAM_ID`.

use record_client::{
    e2e_helpers::{
        test_accounts,
        E2e,
    },
    logs::log_success,
    print_kv,
    BindingsConfig,
};
use record_interface::state::AccountTag;
use solana_sdk::signer::Signer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let e2e = E2e::new(BindingsConfig::from_env()?).await?;
    let owner = test_accounts::owner_1111();
    let linked = test_accounts::linked_3333().pubkey();

    e2e.fund_fresh_user(owner).await?;
    let owner_ata = e2e.mint_to_owner(&owner.pubkey(), 1_000_000).await?;

    let (derived, sig) = e2e.send_create_record(&linked, &owner.pubkey()).await?;
    log_success("Create record", sig);

    let record = e2e.retrieve_linked(&linked).await?;
    record.expect_tag(AccountTag::Initialized)?;
    print_kv!(
        "record" => derived.address,
        "nonce" => record.nonce,
        "owner token account" => owner_ata,
    );

    Ok(())
}
