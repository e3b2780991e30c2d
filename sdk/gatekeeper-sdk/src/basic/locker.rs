use crate::advanced::instructions::{self, TokenAccounts};
use crate::core::connection::SolConnection;
use crate::core::constants::{DEFAULT_COUNTER_SEARCH, DEFAULT_PROGRAM_ID};
use crate::core::signer::{AuthorizationSigner, SignedAuthorization};
use crate::error::{GatekeeperSdkError, Result};
use crate::types::LockerInfo;
use crate::utils;
use gatekeeper_program::instruction::AssetKind;
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::transaction::Transaction;

/// A locker on-chain, addressed by its owner.
#[derive(Debug, Clone)]
pub struct Locker {
    pub program_id: Pubkey,
    pub owner: Pubkey,
    /// Config PDA holding owner, signer and secret
    pub config_pda: Pubkey,
    /// Vault PDA holding the assets
    pub vault_pda: Pubkey,
}

impl Locker {
    pub fn new(owner: Pubkey, program_id: Option<Pubkey>) -> Self {
        let program_id = program_id.unwrap_or(DEFAULT_PROGRAM_ID);
        let (config_pda, _) = utils::derive_locker_pda(&program_id, &owner);
        let (vault_pda, _) = utils::derive_vault_pda(&program_id, &config_pda);
        Self {
            program_id,
            owner,
            config_pda,
            vault_pda,
        }
    }

    pub async fn fetch_info(&self, connection: &impl SolConnection) -> Result<LockerInfo> {
        utils::fetch_locker_info(connection, &self.program_id, &self.config_pda).await
    }

    /// Signs a release authorization against the locker's current floor.
    ///
    /// Run by whoever holds the signer key and the secret; the result is
    /// handed to the relayer.
    pub async fn authorize_release(
        &self,
        connection: &impl SolConnection,
        signer: &AuthorizationSigner,
        secret: &[u8],
    ) -> Result<SignedAuthorization> {
        let info = self.fetch_info(connection).await?;
        if info.signer != signer.address() {
            return Err(GatekeeperSdkError::Signing(
                "key is not the locker's configured signer".to_string(),
            ));
        }
        signer.sign_advancing(secret, info.secret.floor(), DEFAULT_COUNTER_SEARCH)
    }

    pub fn release(&self) -> ReleaseBuilder<'_> {
        ReleaseBuilder::new(self)
    }

    /// Stage `(secret, floor)` and rotate it in, in one transaction.
    pub fn rotate_secret_transaction(&self, secret: Vec<u8>, floor: [u8; 32]) -> Result<Transaction> {
        let stage = instructions::stage_secret(&self.program_id, &self.owner, secret, floor)?;
        let rotate = instructions::rotate_locker_secret(&self.program_id, &self.owner)?;
        Ok(Transaction::new_unsigned(Message::new(
            &[stage, rotate],
            Some(&self.owner),
        )))
    }
}

pub struct ReleaseBuilder<'a> {
    locker: &'a Locker,
    caller: Option<Pubkey>,
    kind: AssetKind,
    amount: u64,
    decimals: u8,
    token_accounts: Option<TokenAccounts>,
    authorization: Option<SignedAuthorization>,
}

impl<'a> ReleaseBuilder<'a> {
    pub fn new(locker: &'a Locker) -> Self {
        Self {
            locker,
            caller: None,
            kind: AssetKind::Native,
            amount: 0,
            decimals: 0,
            token_accounts: None,
            authorization: None,
        }
    }

    pub fn with_caller(mut self, caller: Pubkey) -> Self {
        self.caller = Some(caller);
        self
    }

    pub fn native(mut self, lamports: u64) -> Self {
        self.kind = AssetKind::Native;
        self.amount = lamports;
        self.token_accounts = None;
        self
    }

    pub fn token(
        mut self,
        kind: AssetKind,
        amount: u64,
        decimals: u8,
        accounts: TokenAccounts,
    ) -> Self {
        self.kind = kind;
        self.amount = amount;
        self.decimals = decimals;
        self.token_accounts = Some(accounts);
        self
    }

    pub fn with_authorization(mut self, authorization: SignedAuthorization) -> Self {
        self.authorization = Some(authorization);
        self
    }

    pub async fn build_transaction(&self, connection: &impl SolConnection) -> Result<Transaction> {
        let caller = self
            .caller
            .ok_or_else(|| GatekeeperSdkError::Other("Caller required".to_string()))?;
        if self.kind.is_token() && self.token_accounts.is_none() {
            return Err(GatekeeperSdkError::Other(
                "Token accounts required for token releases".to_string(),
            ));
        }
        if caller != self.locker.owner && self.authorization.is_none() {
            return Err(GatekeeperSdkError::Other(
                "Authorization required for non-owner callers".to_string(),
            ));
        }

        let ix = instructions::release_asset(
            &self.locker.program_id,
            &self.locker.config_pda,
            &caller,
            self.kind,
            self.amount,
            self.decimals,
            self.token_accounts,
            self.authorization.as_ref(),
        )?;

        let recent_blockhash = connection
            .get_latest_blockhash()
            .await
            .map_err(|e| GatekeeperSdkError::Connection(e.to_string()))?;
        let mut tx = Transaction::new_unsigned(Message::new(&[ix], Some(&caller)));
        tx.message.recent_blockhash = recent_blockhash;
        Ok(tx)
    }
}
