pub mod svm;

use async_trait::async_trait;
use gatekeeper_sdk::core::connection::SolConnection;
use solana_sdk::{
    account::Account, hash::Hash, pubkey::Pubkey, signature::Signature, transaction::Transaction,
};
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Account store standing in for a cluster. Transactions are recorded, not
/// executed.
#[derive(Default)]
pub struct MemoryConnection {
    pub accounts: Mutex<HashMap<Pubkey, Account>>,
    pub sent: Mutex<Vec<Transaction>>,
}

impl MemoryConnection {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn put(&self, address: Pubkey, owner: Pubkey, data: Vec<u8>) {
        let account = Account {
            lamports: 1_000_000,
            data,
            owner,
            executable: false,
            rent_epoch: 0,
        };
        self.accounts.lock().await.insert(address, account);
    }
}

#[async_trait]
impl SolConnection for MemoryConnection {
    async fn send_transaction(
        &self,
        tx: &Transaction,
    ) -> Result<Signature, Box<dyn std::error::Error + Send + Sync>> {
        let signature = tx.signatures.first().copied().unwrap_or_default();
        self.sent.lock().await.push(tx.clone());
        Ok(signature)
    }

    async fn get_account(
        &self,
        pubkey: &Pubkey,
    ) -> Result<Option<Account>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.accounts.lock().await.get(pubkey).cloned())
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Hash::new_from_array([9; 32]))
    }

    async fn get_minimum_balance_for_rent_exemption(
        &self,
        data_len: usize,
    ) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
        Ok((data_len as u64 + 128) * 6_960)
    }
}
