//! End-to-end scaffold against a running validator with the record program deployed.

use anyhow::Context;
use record_interface::{
    instructions::{
        CreateRecord,
        ExampleInstr,
        InitializeSeeded,
        WithdrawTokens,
    },
    state::{
        StateRecord,
        StateVariant,
    },
};
use solana_address::Address;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    signature::{
        Keypair,
        Signature,
    },
    signer::Signer,
};

use crate::{
    config::BindingsConfig,
    context::TokenMint,
    error::RetrieveError,
    pda::{
        find_linked_state_address,
        find_seeded_state_address,
        DerivedAddress,
    },
    state::retrieve,
    transactions::{
        fund_account,
        sign_and_send_instructions,
        DEFAULT_FUND_AMOUNT,
    },
};

pub mod test_accounts;

pub struct E2e {
    pub rpc: RpcClient,
    pub config: BindingsConfig,
    pub payer: Keypair,
    pub mint: TokenMint,
}

impl E2e {
    /// Funds the default payer and creates a test mint it controls.
    pub async fn new(config: BindingsConfig) -> anyhow::Result<Self> {
        let rpc = config.rpc_client();
        let payer = fund_account(&rpc, Some(test_accounts::default_payer().insecure_clone()))
            .await
            .context("Couldn't fund the default payer")?;
        let mint = TokenMint::create(&rpc, &payer, None).await?;

        Ok(Self {
            rpc,
            config,
            payer,
            mint,
        })
    }

    pub fn program_id(&self) -> &Address {
        self.config.active_program_id()
    }

    /// Funds `user` and fails if its balance isn't exactly the default fund amount.
    pub async fn fund_fresh_user(&self, user: &Keypair) -> anyhow::Result<()> {
        fund_account(&self.rpc, Some(user.insecure_clone())).await?;
        let balance = self
            .rpc
            .get_balance(&user.pubkey())
            .await
            .context("Couldn't retrieve the user balance")?;
        anyhow::ensure!(
            balance == DEFAULT_FUND_AMOUNT,
            "User {}'s balance {balance} doesn't match the default fund amount: {}",
            user.pubkey(),
            DEFAULT_FUND_AMOUNT
        );
        Ok(())
    }

    pub async fn send_create_record(
        &self,
        linked: &Address,
        owner: &Address,
    ) -> anyhow::Result<(DerivedAddress, Signature)> {
        let derived = find_linked_state_address(linked, self.program_id());
        let create = CreateRecord {
            fee_payer: self.payer.pubkey(),
            linked_account: *linked,
            owner: *owner,
            mint: self.mint.mint_address,
            record: derived.address,
            nonce: derived.nonce,
            ..Default::default()
        }
        .instruction(self.program_id())?;

        let sig =
            sign_and_send_instructions(&self.rpc, &self.config, &self.payer, &[], &[create])
                .await?;
        Ok((derived, sig))
    }

    pub async fn send_initialize_seeded(&self) -> anyhow::Result<(DerivedAddress, Signature)> {
        let derived = find_seeded_state_address(self.program_id());
        let initialize = InitializeSeeded::new(self.payer.pubkey(), derived.address, derived.nonce)
            .instruction(self.program_id())?;

        let sig =
            sign_and_send_instructions(&self.rpc, &self.config, &self.payer, &[], &[initialize])
                .await?;
        Ok((derived, sig))
    }

    pub async fn send_example_instr(&self, example_state: &Address) -> anyhow::Result<Signature> {
        let example = ExampleInstr::new(
            self.mint.token_program,
            self.payer.pubkey(),
            *example_state,
        )
        .instruction(self.program_id())?;

        sign_and_send_instructions(&self.rpc, &self.config, &self.payer, &[], &[example]).await
    }

    /// Mints `amount` test tokens into `owner`'s associated token account, creating it if needed.
    pub async fn mint_to_owner(&self, owner: &Address, amount: u64) -> anyhow::Result<Address> {
        let ata = self
            .mint
            .get_or_create_ata(&self.rpc, &self.payer, owner)
            .await?;
        self.mint
            .mint_into(&self.rpc, &self.payer, &ata, amount)
            .await?;
        Ok(ata)
    }

    /// Withdraws `amount` from the record's vault into the owner's associated token account.
    pub async fn send_withdraw_tokens(
        &self,
        owner: &Keypair,
        record: &Address,
        amount: u64,
    ) -> anyhow::Result<Signature> {
        let withdraw = WithdrawTokens {
            spl_token_program: self.mint.token_program,
            owner: owner.pubkey(),
            record: *record,
            vault: self.mint.get_ata_for(record),
            destination: self.mint.get_ata_for(&owner.pubkey()),
            fee_account: None,
            amount,
        }
        .instruction(self.program_id())?;

        sign_and_send_instructions(&self.rpc, &self.config, &self.payer, &[owner], &[withdraw])
            .await
    }

    pub async fn retrieve_linked(&self, linked: &Address) -> Result<StateRecord, RetrieveError> {
        let derived = find_linked_state_address(linked, self.program_id());
        retrieve(&self.rpc, StateVariant::Linked, &derived.address).await
    }

    pub async fn retrieve_seeded(&self) -> Result<StateRecord, RetrieveError> {
        let derived = find_seeded_state_address(self.program_id());
        retrieve(&self.rpc, StateVariant::Seeded, &derived.address).await
    }
}
