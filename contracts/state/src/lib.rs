//! Gatekeeper State Module
//!
//! Account layouts, the shared secret registry, and the signature-gated
//! authorization core used by the locker and the mint manager.

pub mod authority;
pub mod counter;
pub mod error;
pub mod gate;
pub mod secret;
pub mod transmute;

use pinocchio::{program_error::ProgramError, pubkey::Pubkey};

pub use authority::{
    message_hash, secp256k1::Secp256k1Processor, RecoveredAuthorization, SignatureProcessor,
    SignerAddress,
};
pub use counter::Counter;
pub use error::{GateError, GatekeeperStateError};
pub use gate::{Authorization, AuthorizationGate, AuthorizationRequest};
pub use secret::{SecretRegistry, SharedSecret, MAX_SECRET_LEN};
pub use transmute::{IntoBytes, Transmutable, TransmutableMut};

/// Represents the type discriminator for the accounts owned by the program.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discriminator {
    /// Locker configuration and its shared secret
    LockerConfig = 1,
    /// Mint manager configuration
    MintManagerConfig = 2,
    /// Per-mint shared secret of a mint manager
    TokenSecret = 3,
    /// Staged secret waiting to be rotated in
    SecretSource = 4,
}

impl TryFrom<u8> for Discriminator {
    type Error = ProgramError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Discriminator::LockerConfig),
            2 => Ok(Discriminator::MintManagerConfig),
            3 => Ok(Discriminator::TokenSecret),
            4 => Ok(Discriminator::SecretSource),
            _ => Err(GatekeeperStateError::InvalidDiscriminator.into()),
        }
    }
}

/// Reads the discriminator byte of an account's data.
pub fn read_discriminator(data: &[u8]) -> Result<Discriminator, ProgramError> {
    let first = data
        .first()
        .ok_or(GatekeeperStateError::InvalidAccountData)?;
    Discriminator::try_from(*first)
}

/// Locker configuration.
///
/// PDA Seeds: ["locker", owner]. The vault that holds released assets is the
/// system-owned PDA ["locker-vault", config].
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct LockerConfig {
    /// Account type discriminator (= 1)
    pub discriminator: u8,
    /// PDA bump seed
    pub bump: u8,
    /// Bump seed of the vault PDA
    pub vault_bump: u8,
    pub reserved: [u8; 5],
    /// Owner allowed to act without a signature and to rotate the secret
    pub owner: Pubkey,
    /// Address whose signatures authorize releases
    pub signer: SignerAddress,
    pub reserved2: [u8; 4],
    pub secret: SharedSecret,
}

crate::impl_account_bytes!(LockerConfig);

impl LockerConfig {
    pub const LEN: usize = core::mem::size_of::<LockerConfig>();

    pub fn new(owner: Pubkey, signer: SignerAddress, bump: u8, vault_bump: u8) -> Self {
        Self {
            discriminator: Discriminator::LockerConfig as u8,
            bump,
            vault_bump,
            reserved: [0; 5],
            owner,
            signer,
            reserved2: [0; 4],
            secret: SharedSecret::empty(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.discriminator == Discriminator::LockerConfig as u8 && self.secret.validate().is_ok()
    }
}

/// Mint manager configuration.
///
/// PDA Seeds: ["mint-manager", owner]. The PDA is the mint authority of every
/// mint it relays for.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct MintManagerConfig {
    /// Account type discriminator (= 2)
    pub discriminator: u8,
    /// PDA bump seed
    pub bump: u8,
    pub reserved: [u8; 6],
    pub owner: Pubkey,
    pub signer: SignerAddress,
    pub reserved2: [u8; 4],
}

crate::impl_account_bytes!(MintManagerConfig);

impl MintManagerConfig {
    pub const LEN: usize = core::mem::size_of::<MintManagerConfig>();

    pub fn new(owner: Pubkey, signer: SignerAddress, bump: u8) -> Self {
        Self {
            discriminator: Discriminator::MintManagerConfig as u8,
            bump,
            reserved: [0; 6],
            owner,
            signer,
            reserved2: [0; 4],
        }
    }

    pub fn is_valid(&self) -> bool {
        self.discriminator == Discriminator::MintManagerConfig as u8
    }
}

/// Shared secret of one mint registered with a mint manager.
///
/// PDA Seeds: ["mint-secret", manager, mint]
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct TokenSecret {
    /// Account type discriminator (= 3)
    pub discriminator: u8,
    pub bump: u8,
    pub reserved: [u8; 6],
    pub manager: Pubkey,
    pub mint: Pubkey,
    pub secret: SharedSecret,
}

crate::impl_account_bytes!(TokenSecret);

impl TokenSecret {
    pub const LEN: usize = core::mem::size_of::<TokenSecret>();

    pub fn new(manager: Pubkey, mint: Pubkey, bump: u8) -> Self {
        Self {
            discriminator: Discriminator::TokenSecret as u8,
            bump,
            reserved: [0; 6],
            manager,
            mint,
            secret: SharedSecret::empty(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.discriminator == Discriminator::TokenSecret as u8 && self.secret.validate().is_ok()
    }
}

/// Staged `(secret, floor)` pair read by a rotation and then closed.
///
/// PDA Seeds: ["secret-source", authority]
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct SecretSource {
    /// Account type discriminator (= 4)
    pub discriminator: u8,
    pub bump: u8,
    pub reserved: [u8; 6],
    /// Only this key may consume or discard the source
    pub authority: Pubkey,
    pub secret: SharedSecret,
}

crate::impl_account_bytes!(SecretSource);

impl SecretSource {
    pub const LEN: usize = core::mem::size_of::<SecretSource>();

    pub fn new(authority: Pubkey, bump: u8, secret: SharedSecret) -> Self {
        Self {
            discriminator: Discriminator::SecretSource as u8,
            bump,
            reserved: [0; 6],
            authority,
            secret,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.discriminator == Discriminator::SecretSource as u8 && self.secret.validate().is_ok()
    }
}

pub const LOCKER_SEED: &[u8] = b"locker";
pub const LOCKER_VAULT_SEED: &[u8] = b"locker-vault";
pub const MINT_MANAGER_SEED: &[u8] = b"mint-manager";
pub const TOKEN_SECRET_SEED: &[u8] = b"mint-secret";
pub const SECRET_SOURCE_SEED: &[u8] = b"secret-source";

/// Generate PDA seeds for a locker config
pub fn locker_seeds(owner: &Pubkey) -> [&[u8]; 2] {
    [LOCKER_SEED, owner.as_ref()]
}

pub fn locker_seeds_with_bump<'a>(owner: &'a Pubkey, bump: &'a [u8]) -> [&'a [u8]; 3] {
    [LOCKER_SEED, owner.as_ref(), bump]
}

/// Generate PDA seeds for the locker vault
pub fn vault_seeds(config: &Pubkey) -> [&[u8]; 2] {
    [LOCKER_VAULT_SEED, config.as_ref()]
}

pub fn vault_seeds_with_bump<'a>(config: &'a Pubkey, bump: &'a [u8]) -> [&'a [u8]; 3] {
    [LOCKER_VAULT_SEED, config.as_ref(), bump]
}

pub fn mint_manager_seeds(owner: &Pubkey) -> [&[u8]; 2] {
    [MINT_MANAGER_SEED, owner.as_ref()]
}

pub fn mint_manager_seeds_with_bump<'a>(owner: &'a Pubkey, bump: &'a [u8]) -> [&'a [u8]; 3] {
    [MINT_MANAGER_SEED, owner.as_ref(), bump]
}

pub fn token_secret_seeds<'a>(manager: &'a Pubkey, mint: &'a Pubkey) -> [&'a [u8]; 3] {
    [TOKEN_SECRET_SEED, manager.as_ref(), mint.as_ref()]
}

pub fn token_secret_seeds_with_bump<'a>(
    manager: &'a Pubkey,
    mint: &'a Pubkey,
    bump: &'a [u8],
) -> [&'a [u8]; 4] {
    [TOKEN_SECRET_SEED, manager.as_ref(), mint.as_ref(), bump]
}

pub fn secret_source_seeds(authority: &Pubkey) -> [&[u8]; 2] {
    [SECRET_SOURCE_SEED, authority.as_ref()]
}

pub fn secret_source_seeds_with_bump<'a>(authority: &'a Pubkey, bump: &'a [u8]) -> [&'a [u8]; 3] {
    [SECRET_SOURCE_SEED, authority.as_ref(), bump]
}
