//! Signature processing for gated actions.
//!
//! An off-chain signer authorizes a request by signing
//! `keccak256(secret || claimed_counter)`. The processor recovers the signer
//! from that hash and derives the next counter floor from the signature
//! itself, so the floor sequence is fixed by the signer, not by the caller.

pub mod secp256k1;

use crate::{counter::Counter, error::GateError};

/// 20-byte Ethereum-style signer address.
pub type SignerAddress = [u8; 20];

/// Result of checking one signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveredAuthorization {
    /// Whether the recovered signer equals the expected signer
    pub is_valid: bool,
    /// Floor to commit if the authorization goes through. Meaningless when
    /// `is_valid` is false.
    pub next_counter: Counter,
}

/// Verifies a signature over a message hash.
pub trait SignatureProcessor {
    /// Recovers the signer of `message_hash` and compares it against
    /// `expected_signer`.
    ///
    /// Returns `Err(GateError::MalformedSignature)` when the signature cannot
    /// be parsed or recovered; a well-formed signature by someone else is
    /// `Ok` with `is_valid == false`.
    fn verify(
        &self,
        signature: &[u8],
        message_hash: &[u8; 32],
        expected_signer: &SignerAddress,
        claimed_counter: &Counter,
    ) -> Result<RecoveredAuthorization, GateError>;
}

#[cfg(target_os = "solana")]
pub fn keccak256(parts: &[&[u8]]) -> [u8; 32] {
    let mut hash = core::mem::MaybeUninit::<[u8; 32]>::uninit();
    unsafe {
        // The syscall only fails on bad pointers, which slices cannot be.
        pinocchio::syscalls::sol_keccak256(
            parts.as_ptr() as *const u8,
            parts.len() as u64,
            hash.as_mut_ptr() as *mut u8,
        );
        hash.assume_init()
    }
}

#[cfg(not(target_os = "solana"))]
pub fn keccak256(parts: &[&[u8]]) -> [u8; 32] {
    use sha3::{Digest, Keccak256};

    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// `keccak256(secret || counter)` with the counter as a 32-byte big-endian
/// word. No signed-message prefix is applied.
pub fn message_hash(secret: &[u8], counter: &Counter) -> [u8; 32] {
    keccak256(&[secret, counter.as_bytes()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keccak_of_empty_input() {
        assert_eq!(
            hex::encode(keccak256(&[])),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn message_hash_is_packed_concatenation() {
        let counter = Counter::from_u64(5);
        let mut packed = b"abc".to_vec();
        packed.extend_from_slice(counter.as_bytes());
        assert_eq!(message_hash(b"abc", &counter), keccak256(&[&packed]));
    }

    #[test]
    fn message_hash_binds_secret_and_counter() {
        let base = message_hash(b"abc", &Counter::from_u64(5));
        assert_ne!(base, message_hash(b"abd", &Counter::from_u64(5)));
        assert_ne!(base, message_hash(b"abc", &Counter::from_u64(6)));
    }
}
