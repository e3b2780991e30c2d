use gatekeeper_state::{Counter, SignerAddress};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

/// Decoded `(secret, floor)` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretInfo {
    /// Empty when authorization is disabled
    pub secret: Vec<u8>,
    /// Big-endian uint256
    pub floor: [u8; 32],
}

impl SecretInfo {
    pub fn floor(&self) -> Counter {
        Counter::from_be_bytes(self.floor)
    }

    pub fn is_configured(&self) -> bool {
        !self.secret.is_empty()
    }
}

/// Complete locker information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockerInfo {
    /// Config PDA
    pub address: Pubkey,
    /// Vault PDA holding released assets
    pub vault: Pubkey,
    pub owner: Pubkey,
    pub signer: SignerAddress,
    pub secret: SecretInfo,
    pub bump: u8,
    pub vault_bump: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintManagerInfo {
    pub address: Pubkey,
    pub owner: Pubkey,
    pub signer: SignerAddress,
    pub bump: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSecretInfo {
    pub address: Pubkey,
    pub manager: Pubkey,
    pub mint: Pubkey,
    pub secret: SecretInfo,
}
