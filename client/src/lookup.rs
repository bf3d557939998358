//! The account lookup seam: anything that can answer "what bytes live at this address?".
//!
//! The live implementation is the nonblocking [`RpcClient`]; [`InMemoryAccounts`] stands in for it
//! in tests and offline tooling.

use std::{
    collections::HashMap,
    sync::RwLock,
};

use async_trait::async_trait;
use solana_account::Account;
use solana_address::Address;
use solana_client::nonblocking::rpc_client::RpcClient;

/// Asynchronous account data lookup.
///
/// `Ok(None)` means the account doesn't exist. Transport failures are `Err`.
#[async_trait]
pub trait AccountLookup: Send + Sync {
    async fn get_account_data(&self, address: &Address) -> anyhow::Result<Option<Vec<u8>>>;

    /// Batched lookup. The result has one entry per address, in the same order.
    async fn get_multiple_account_data(
        &self,
        addresses: &[Address],
    ) -> anyhow::Result<Vec<Option<Vec<u8>>>> {
        let mut res = Vec::with_capacity(addresses.len());
        for address in addresses {
            res.push(self.get_account_data(address).await?);
        }
        Ok(res)
    }
}

#[async_trait]
impl AccountLookup for RpcClient {
    async fn get_account_data(&self, address: &Address) -> anyhow::Result<Option<Vec<u8>>> {
        let account = self
            .get_account_with_commitment(address, self.commitment())
            .await?
            .value;
        Ok(account.map(|acc| acc.data))
    }

    async fn get_multiple_account_data(
        &self,
        addresses: &[Address],
    ) -> anyhow::Result<Vec<Option<Vec<u8>>>> {
        let accounts = self
            .get_multiple_accounts_with_commitment(addresses, self.commitment())
            .await?
            .value;
        Ok(accounts
            .into_iter()
            .map(|maybe_acc| maybe_acc.map(|acc| acc.data))
            .collect())
    }
}

/// A map of addresses to accounts, for tests and offline use.
#[derive(Debug, Default)]
pub struct InMemoryAccounts {
    accounts: RwLock<HashMap<Address, Account>>,
}

impl InMemoryAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, address: Address, account: Account) {
        self.write().insert(address, account);
    }

    /// Inserts an account holding `data`, owned by `owner`, with no lamports.
    pub fn insert_data(&self, address: Address, owner: Address, data: Vec<u8>) {
        self.insert(
            address,
            Account {
                lamports: 0,
                data,
                owner,
                executable: false,
                rent_epoch: 0,
            },
        );
    }

    pub fn remove(&self, address: &Address) -> Option<Account> {
        self.write().remove(address)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<Address, Account>> {
        self.accounts.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<Address, Account>> {
        self.accounts.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl FromIterator<(Address, Account)> for InMemoryAccounts {
    fn from_iter<T: IntoIterator<Item = (Address, Account)>>(iter: T) -> Self {
        Self {
            accounts: RwLock::new(iter.into_iter().collect()),
        }
    }
}

#[async_trait]
impl AccountLookup for InMemoryAccounts {
    async fn get_account_data(&self, address: &Address) -> anyhow::Result<Option<Vec<u8>>> {
        Ok(self.read().get(address).map(|acc| acc.data.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_lookup() {
        let accounts = InMemoryAccounts::new();
        let (a, b) = (Address::new_from_array([1; 32]), Address::new_from_array([2; 32]));
        accounts.insert_data(a, Address::new_from_array([3; 32]), vec![1, 2, 3]);
        assert_eq!(accounts.len(), 1);

        assert_eq!(accounts.get_account_data(&a).await.unwrap(), Some(vec![1, 2, 3]));
        assert_eq!(accounts.get_account_data(&b).await.unwrap(), None);

        let batch = accounts.get_multiple_account_data(&[b, a]).await.unwrap();
        assert_eq!(batch, vec![None, Some(vec![1, 2, 3])]);

        accounts.remove(&a);
        assert!(accounts.is_empty());
    }
}
