use crate::advanced::instructions;
use crate::core::connection::SolConnection;
use crate::core::constants::{DEFAULT_COUNTER_SEARCH, DEFAULT_PROGRAM_ID};
use crate::core::signer::{AuthorizationSigner, SignedAuthorization};
use crate::error::{GatekeeperSdkError, Result};
use crate::types::{MintManagerInfo, TokenSecretInfo};
use crate::utils;
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;

/// A mint manager on-chain, addressed by its owner.
#[derive(Debug, Clone)]
pub struct MintManager {
    pub program_id: Pubkey,
    pub owner: Pubkey,
    /// Manager PDA; mint authority of every registered mint
    pub address: Pubkey,
}

impl MintManager {
    pub fn new(owner: Pubkey, program_id: Option<Pubkey>) -> Self {
        let program_id = program_id.unwrap_or(DEFAULT_PROGRAM_ID);
        let (address, _) = utils::derive_mint_manager_pda(&program_id, &owner);
        Self {
            program_id,
            owner,
            address,
        }
    }

    pub fn token_secret_address(&self, mint: &Pubkey) -> Pubkey {
        utils::derive_token_secret_pda(&self.program_id, &self.address, mint).0
    }

    pub async fn fetch_info(&self, connection: &impl SolConnection) -> Result<MintManagerInfo> {
        utils::fetch_mint_manager_info(connection, &self.address).await
    }

    pub async fn fetch_token(
        &self,
        connection: &impl SolConnection,
        mint: &Pubkey,
    ) -> Result<TokenSecretInfo> {
        utils::fetch_token_secret_info(connection, &self.token_secret_address(mint)).await
    }

    /// Signs a mint authorization against the mint's current floor.
    pub async fn authorize_mint(
        &self,
        connection: &impl SolConnection,
        signer: &AuthorizationSigner,
        mint: &Pubkey,
        secret: &[u8],
    ) -> Result<SignedAuthorization> {
        let manager = self.fetch_info(connection).await?;
        if manager.signer != signer.address() {
            return Err(GatekeeperSdkError::Signing(
                "key is not the manager's configured signer".to_string(),
            ));
        }
        let token = self.fetch_token(connection, mint).await?;
        signer.sign_advancing(secret, token.secret.floor(), DEFAULT_COUNTER_SEARCH)
    }

    pub fn relay_mint(
        &self,
        mint: &Pubkey,
        caller: &Pubkey,
        destination: &Pubkey,
        amount: u64,
        authorization: Option<&SignedAuthorization>,
    ) -> Result<Instruction> {
        instructions::relay_mint(
            &self.program_id,
            &self.address,
            mint,
            caller,
            destination,
            amount,
            authorization,
        )
    }
}
