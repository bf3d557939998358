//! Test mint context: creating a mint, deriving and creating associated token accounts, and minting
//! into them.

use anyhow::Context;
use solana_address::Address;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_instruction::Instruction;
use solana_sdk::{
    program_pack::Pack,
    signature::{
        Keypair,
        Signature,
    },
    signer::Signer,
};
use solana_system_interface::instruction::create_account;
use spl_associated_token_account_interface::{
    address::get_associated_token_address_with_program_id,
    instruction::create_associated_token_account_idempotent,
};
use spl_token_interface::{
    instruction::{
        initialize_mint2,
        mint_to_checked,
    },
    state::Mint,
};

use crate::{
    logs::log_info,
    state::check_account_exists,
    transactions::send_transaction,
};

/// Decimals of mints created with [`TokenMint::create`].
pub const TEST_MINT_DECIMALS: u8 = 6;

pub struct TokenMint {
    pub mint_authority: Option<Address>,
    pub mint_address: Address,
    pub token_program: Address,
    pub mint_decimals: u8,
}

impl TokenMint {
    pub const fn new(
        mint_authority: Option<Address>,
        mint_address: Address,
        token_program: Address,
        mint_decimals: u8,
    ) -> Self {
        Self {
            mint_authority,
            mint_address,
            token_program,
            mint_decimals,
        }
    }

    /// A mint at `mint_address` with [`TEST_MINT_DECIMALS`] decimals, owned by the token program.
    /// The mint authority is `mint_authority`, or `payer` when that's `None`.
    pub fn new_test_mint(
        mint_address: Address,
        payer: &Address,
        mint_authority: Option<&Address>,
    ) -> Self {
        Self::new(
            Some(*mint_authority.unwrap_or(payer)),
            mint_address,
            spl_token_interface::ID,
            TEST_MINT_DECIMALS,
        )
    }

    /// Creates and initializes a new mint with [`TEST_MINT_DECIMALS`] decimals, funded by `payer`.
    /// The mint authority is `mint_authority`, or `payer` when that's `None`.
    pub async fn create(
        rpc: &RpcClient,
        payer: &Keypair,
        mint_authority: Option<&Address>,
    ) -> anyhow::Result<Self> {
        let mint = Keypair::new();
        let rent = rpc
            .get_minimum_balance_for_rent_exemption(Mint::LEN)
            .await
            .context("Couldn't fetch mint rent")?;

        let token_mint = Self::new_test_mint(mint.pubkey(), &payer.pubkey(), mint_authority);
        let instructions = token_mint.create_mint_instructions(&payer.pubkey(), rent)?;
        send_transaction(rpc, payer, &[&mint], &instructions)
            .await
            .context("Couldn't create mint")?;

        log_info("Mint", token_mint.mint_address);
        Ok(token_mint)
    }

    /// Builds the create-account and initialize-mint instructions for this mint, funded by
    /// `funder`. The mint address must sign.
    pub fn create_mint_instructions(
        &self,
        funder: &Address,
        rent_lamports: u64,
    ) -> anyhow::Result<Vec<Instruction>> {
        let authority = self
            .mint_authority
            .context("A new mint needs a mint authority")?;
        Ok(vec![
            create_account(
                funder,
                &self.mint_address,
                rent_lamports,
                Mint::LEN as u64,
                &self.token_program,
            ),
            initialize_mint2(
                &self.token_program,
                &self.mint_address,
                &authority,
                None,
                self.mint_decimals,
            )?,
        ])
    }

    /// The associated token account of `owner`. `owner` may be off-curve.
    pub fn get_ata_for(&self, owner: &Address) -> Address {
        get_associated_token_address_with_program_id(
            owner,
            &self.mint_address,
            &self.token_program,
        )
    }

    /// Builds an idempotent create-ATA instruction for the given `owner`, funded by `funder`.
    pub fn create_ata_idempotent(&self, funder: &Address, owner: &Address) -> Instruction {
        create_associated_token_account_idempotent(
            funder,
            owner,
            &self.mint_address,
            &self.token_program,
        )
    }

    /// Returns `owner`'s associated token account, creating it first if it doesn't exist.
    pub async fn get_or_create_ata(
        &self,
        rpc: &RpcClient,
        payer: &Keypair,
        owner: &Address,
    ) -> anyhow::Result<Address> {
        let ata = self.get_ata_for(owner);
        if !check_account_exists(rpc, &ata).await? {
            let create = self.create_ata_idempotent(&payer.pubkey(), owner);
            send_transaction(rpc, payer, &[], &[create])
                .await
                .with_context(|| format!("Couldn't create the token account for {owner}"))?;
        }
        Ok(ata)
    }

    /// Builds a `mint_to_checked` instruction that mints `amount` tokens to `destination`.
    pub fn mint_to(&self, destination: &Address, amount: u64) -> anyhow::Result<Instruction> {
        let mint_authority = self
            .mint_authority
            .context("Token doesn't have a mint authority.")?;
        Ok(mint_to_checked(
            &self.token_program,
            &self.mint_address,
            destination,
            &mint_authority,
            &[],
            amount,
            self.mint_decimals,
        )?)
    }

    /// Mints `amount` tokens into `destination`, signed by the mint `authority`.
    pub async fn mint_into(
        &self,
        rpc: &RpcClient,
        authority: &Keypair,
        destination: &Address,
        amount: u64,
    ) -> anyhow::Result<Signature> {
        let mint_to = self.mint_to(destination, amount)?;
        send_transaction(rpc, authority, &[], &[mint_to])
            .await
            .with_context(|| format!("Couldn't mint {amount} tokens into {destination}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_mint() -> TokenMint {
        TokenMint::new(
            Some(Address::new_from_array([1; 32])),
            Address::new_from_array([2; 32]),
            spl_token_interface::ID,
            TEST_MINT_DECIMALS,
        )
    }

    #[test]
    fn create_mint_instructions() {
        let mint = test_mint();
        let funder = Address::new_from_array([3; 32]);
        let ixns = mint.create_mint_instructions(&funder, 1_000).unwrap();
        assert_eq!(ixns.len(), 2);
        assert_eq!(ixns[0].accounts[0].pubkey, funder);
        assert_eq!(ixns[0].accounts[1].pubkey, mint.mint_address);
        assert_eq!(ixns[1].program_id, spl_token_interface::ID);

        let no_authority = TokenMint {
            mint_authority: None,
            ..test_mint()
        };
        assert!(no_authority.create_mint_instructions(&funder, 1_000).is_err());
        assert!(no_authority.mint_to(&funder, 1).is_err());
    }

    #[test]
    fn mint_authority_defaults_to_payer() {
        let mint_address = Address::new_from_array([2; 32]);
        let payer = Address::new_from_array([3; 32]);
        let authority = Address::new_from_array([4; 32]);

        let by_payer = TokenMint::new_test_mint(mint_address, &payer, None);
        assert_eq!(by_payer.mint_authority, Some(payer));

        let delegated = TokenMint::new_test_mint(mint_address, &payer, Some(&authority));
        assert_eq!(delegated.mint_authority, Some(authority));
        assert_eq!(delegated.mint_decimals, TEST_MINT_DECIMALS);
        assert_eq!(delegated.token_program, spl_token_interface::ID);

        // The payer still funds the account; the authority goes into initialize_mint2.
        let ixns = delegated.create_mint_instructions(&payer, 1_000).unwrap();
        assert_eq!(ixns[0].accounts[0].pubkey, payer);
        assert_eq!(&ixns[1].data[2..34], authority.as_ref());
        assert_eq!(
            delegated.mint_to(&payer, 1).unwrap().accounts[2].pubkey,
            authority
        );
    }

    #[test]
    fn ata_derivation() {
        let mint = test_mint();
        let owner = Address::new_from_array([4; 32]);
        let ata = mint.get_ata_for(&owner);
        assert_ne!(ata, mint.get_ata_for(&Address::new_from_array([5; 32])));

        let create = mint.create_ata_idempotent(&owner, &owner);
        assert_eq!(create.accounts[1].pubkey, ata);
    }

    #[test]
    fn mint_to_destination() {
        let mint = test_mint();
        let destination = Address::new_from_array([6; 32]);
        let ixn = mint.mint_to(&destination, 42).unwrap();
        assert_eq!(ixn.program_id, mint.token_program);
        assert_eq!(ixn.accounts[1].pubkey, destination);
    }
}
