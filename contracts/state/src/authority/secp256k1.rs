//! Secp256k1 signature processor.
//!
//! Signatures are 65 bytes `r || s || v` with `v` in `{0, 1, 27, 28}`. The
//! signer address is the last 20 bytes of the keccak256 of the raw public
//! key, which makes signatures produced by standard Ethereum tooling over a
//! raw 32-byte hash verifiable here.
//!
//! On-chain recovery goes through the `sol_secp256k1_recover` syscall;
//! host builds recover with `libsecp256k1`.

use libsecp256k1::{PublicKey, Signature};

use super::{keccak256, RecoveredAuthorization, SignatureProcessor, SignerAddress};
use crate::{counter::Counter, error::GateError};

/// Length of an `r || s || v` signature.
pub const SIGNATURE_LEN: usize = 65;

/// Derives the next counter floor from signature bytes: `r` as a big-endian
/// 256-bit integer.
pub fn derive_next_counter(signature: &[u8]) -> Option<Counter> {
    Counter::from_be_slice(signature)
}

/// Address of a raw 64-byte `x || y` public key.
pub fn signer_address(public_key: &[u8; 64]) -> SignerAddress {
    let hash = keccak256(&[&public_key[..]]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

pub fn public_key_address(public_key: &PublicKey) -> SignerAddress {
    let serialized = public_key.serialize();
    let mut raw = [0u8; 64];
    raw.copy_from_slice(&serialized[1..]);
    signer_address(&raw)
}

/// Recovers the signer address of `message_hash`.
pub fn recover_signer(
    signature: &[u8],
    message_hash: &[u8; 32],
) -> Result<SignerAddress, GateError> {
    if signature.len() != SIGNATURE_LEN {
        return Err(GateError::MalformedSignature);
    }

    // Range-checks r and s.
    let parsed = Signature::parse_standard_slice(&signature[..64])
        .map_err(|_| GateError::MalformedSignature)?;

    // Reject the malleable twin of every signature.
    if parsed.s.is_high() {
        return Err(GateError::MalformedSignature);
    }

    let recovery_id = match signature[64] {
        v @ (0 | 1) => v,
        v @ (27 | 28) => v - 27,
        _ => return Err(GateError::MalformedSignature),
    };

    let public_key = recover_public_key(message_hash, recovery_id, &signature[..64])?;
    Ok(signer_address(&public_key))
}

#[cfg(target_os = "solana")]
fn recover_public_key(
    message_hash: &[u8; 32],
    recovery_id: u8,
    signature: &[u8],
) -> Result<[u8; 64], GateError> {
    let mut recovered = core::mem::MaybeUninit::<[u8; 64]>::uninit();
    let res = unsafe {
        pinocchio::syscalls::sol_secp256k1_recover(
            message_hash.as_ptr(),
            recovery_id as u64,
            signature.as_ptr(),
            recovered.as_mut_ptr() as *mut u8,
        )
    };
    if res != 0 {
        return Err(GateError::MalformedSignature);
    }
    Ok(unsafe { recovered.assume_init() })
}

#[cfg(not(target_os = "solana"))]
fn recover_public_key(
    message_hash: &[u8; 32],
    recovery_id: u8,
    signature: &[u8],
) -> Result<[u8; 64], GateError> {
    use libsecp256k1::{Message, RecoveryId};

    let parsed =
        Signature::parse_standard_slice(signature).map_err(|_| GateError::MalformedSignature)?;
    let recovery_id = RecoveryId::parse(recovery_id).map_err(|_| GateError::MalformedSignature)?;
    let public_key = libsecp256k1::recover(&Message::parse(message_hash), &parsed, &recovery_id)
        .map_err(|_| GateError::MalformedSignature)?;

    let serialized = public_key.serialize();
    let mut raw = [0u8; 64];
    raw.copy_from_slice(&serialized[1..]);
    Ok(raw)
}

/// Production processor backed by `libsecp256k1`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Secp256k1Processor;

impl SignatureProcessor for Secp256k1Processor {
    fn verify(
        &self,
        signature: &[u8],
        message_hash: &[u8; 32],
        expected_signer: &SignerAddress,
        _claimed_counter: &Counter,
    ) -> Result<RecoveredAuthorization, GateError> {
        let recovered = recover_signer(signature, message_hash)?;
        let next_counter = derive_next_counter(signature).ok_or(GateError::MalformedSignature)?;
        Ok(RecoveredAuthorization {
            is_valid: recovered == *expected_signer,
            next_counter,
        })
    }
}
