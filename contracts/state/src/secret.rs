//! Shared secret registry.
//!
//! A `SharedSecret` is the `(secret, floor)` pair that binds signatures to an
//! authorization epoch. It is embedded in every account that governs a gated
//! action and in the staging `SecretSource` account used for rotation.

use pinocchio::program_error::ProgramError;

use crate::{counter::Counter, error::GatekeeperStateError, impl_account_bytes};

/// Maximum secret length in bytes.
pub const MAX_SECRET_LEN: usize = 128;

/// Read/rotate access to a secret and its counter floor.
///
/// The gate only sees this trait, so tests can hand it an in-memory registry
/// and the program hands it a view into account data.
pub trait SecretRegistry {
    /// Current secret bytes. Empty means "not configured".
    fn secret(&self) -> &[u8];

    /// Minimum counter a fresh request must claim.
    fn floor(&self) -> Counter;

    /// Advances the floor after a successful signed authorization.
    fn commit_floor(&mut self, floor: Counter);

    /// Atomically replaces both the secret and the floor.
    fn rotate(&mut self, secret: &[u8], floor: Counter) -> Result<(), ProgramError>;

    fn is_configured(&self) -> bool {
        !self.secret().is_empty()
    }
}

/// Fixed-size storage for a shared secret.
///
/// Layout: `floor[32] | secret_len[1] | secret[128]`, alignment 1.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct SharedSecret {
    floor: [u8; 32],
    secret_len: u8,
    secret: [u8; MAX_SECRET_LEN],
}

impl_account_bytes!(SharedSecret);

impl SharedSecret {
    /// An unconfigured secret: empty, floor 0.
    pub const fn empty() -> Self {
        Self {
            floor: [0; 32],
            secret_len: 0,
            secret: [0; MAX_SECRET_LEN],
        }
    }

    pub fn new(secret: &[u8], floor: Counter) -> Result<Self, ProgramError> {
        let mut shared = Self::empty();
        shared.rotate(secret, floor)?;
        Ok(shared)
    }

    /// Validates that the stored length fits the buffer.
    pub fn validate(&self) -> Result<(), ProgramError> {
        if self.secret_len as usize > MAX_SECRET_LEN {
            return Err(GatekeeperStateError::CorruptSecretLength.into());
        }
        Ok(())
    }
}

impl Default for SharedSecret {
    fn default() -> Self {
        Self::empty()
    }
}

impl core::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedSecret")
            .field("secret_len", &self.secret_len)
            .field("floor", &self.floor())
            .finish()
    }
}

impl SecretRegistry for SharedSecret {
    fn secret(&self) -> &[u8] {
        let len = (self.secret_len as usize).min(MAX_SECRET_LEN);
        &self.secret[..len]
    }

    fn floor(&self) -> Counter {
        Counter::from_be_bytes(self.floor)
    }

    fn commit_floor(&mut self, floor: Counter) {
        self.floor = floor.to_be_bytes();
    }

    fn rotate(&mut self, secret: &[u8], floor: Counter) -> Result<(), ProgramError> {
        if secret.len() > MAX_SECRET_LEN {
            return Err(GatekeeperStateError::SecretTooLong.into());
        }
        self.secret = [0; MAX_SECRET_LEN];
        self.secret[..secret.len()].copy_from_slice(secret);
        self.secret_len = secret.len() as u8;
        self.floor = floor.to_be_bytes();
        Ok(())
    }
}
