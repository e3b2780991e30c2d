use gatekeeper_state::authority::secp256k1::{derive_next_counter, public_key_address};
use gatekeeper_state::{message_hash, Counter, SignerAddress};
use libsecp256k1::{Message, PublicKey, SecretKey};

use crate::error::{GatekeeperSdkError, Result};

/// A signature ready to be relayed, with the counters it commits to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedAuthorization {
    pub claimed_counter: Counter,
    /// 65 bytes, `r || s || v` with `v` in {27, 28}
    pub signature: Vec<u8>,
    /// Floor the program will store once this signature is accepted
    pub next_counter: Counter,
}

impl SignedAuthorization {
    /// Whether the program would accept this against `floor`.
    pub fn advances(&self, floor: &Counter) -> bool {
        self.claimed_counter >= *floor && self.next_counter > *floor
    }
}

/// Off-chain holder of the secp256k1 key whose address is configured as a
/// locker's or mint manager's signer.
pub struct AuthorizationSigner {
    key: SecretKey,
    address: SignerAddress,
}

impl AuthorizationSigner {
    pub fn from_bytes(secret_key: &[u8; 32]) -> Result<Self> {
        let key = SecretKey::parse(secret_key)
            .map_err(|e| GatekeeperSdkError::Signing(format!("invalid secret key: {:?}", e)))?;
        let address = public_key_address(&PublicKey::from_secret_key(&key));
        Ok(Self { key, address })
    }

    pub fn address(&self) -> SignerAddress {
        self.address
    }

    /// Signs `keccak256(secret || claimed_counter)`.
    pub fn sign(&self, secret: &[u8], claimed_counter: Counter) -> Result<SignedAuthorization> {
        let hash = message_hash(secret, &claimed_counter);
        let (signature, recovery_id) = libsecp256k1::sign(&Message::parse(&hash), &self.key);

        let mut bytes = signature.serialize().to_vec();
        bytes.push(recovery_id.serialize() + 27);

        let next_counter = derive_next_counter(&bytes)
            .ok_or_else(|| GatekeeperSdkError::Signing("signature too short".to_string()))?;

        Ok(SignedAuthorization {
            claimed_counter,
            signature: bytes,
            next_counter,
        })
    }

    /// Signs successive claimed counters starting at `floor` until one yields
    /// a signature whose derived counter is above `floor`.
    ///
    /// Signing is deterministic, so the same inputs always give the same
    /// result. Stops after `max_attempts` tries.
    ///
    /// Each accepted signature lifts the floor to a random point above it, so
    /// the chance of a hit shrinks with every use. `CounterSearchExhausted`
    /// means the owner has to rotate the secret to a lower floor.
    pub fn sign_advancing(
        &self,
        secret: &[u8],
        floor: Counter,
        max_attempts: u32,
    ) -> Result<SignedAuthorization> {
        let mut claimed = floor;
        for _ in 0..max_attempts {
            let signed = self.sign(secret, claimed)?;
            if signed.advances(&floor) {
                return Ok(signed);
            }
            claimed = match claimed.checked_add_u64(1) {
                Some(next) => next,
                None => break,
            };
        }
        Err(GatekeeperSdkError::CounterSearchExhausted(max_attempts))
    }
}

impl std::fmt::Debug for AuthorizationSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationSigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatekeeper_state::{Secp256k1Processor, SignatureProcessor};

    #[test]
    fn signature_recovers_to_signer_address() {
        let signer = AuthorizationSigner::from_bytes(&[3; 32]).unwrap();
        let signed = signer.sign(b"abc", Counter::from_u64(5)).unwrap();

        let recovered = Secp256k1Processor
            .verify(
                &signed.signature,
                &message_hash(b"abc", &Counter::from_u64(5)),
                &signer.address(),
                &signed.claimed_counter,
            )
            .unwrap();
        assert!(recovered.is_valid);
        assert_eq!(recovered.next_counter, signed.next_counter);
    }

    #[test]
    fn advancing_search_is_bounded() {
        let signer = AuthorizationSigner::from_bytes(&[3; 32]).unwrap();
        assert!(matches!(
            signer.sign_advancing(b"abc", Counter::MAX, 4),
            Err(GatekeeperSdkError::CounterSearchExhausted(4))
        ));

        let signed = signer.sign_advancing(b"abc", Counter::from_u64(9), 8).unwrap();
        assert!(signed.advances(&Counter::from_u64(9)));
    }

    #[test]
    fn zero_key_is_rejected() {
        assert!(AuthorizationSigner::from_bytes(&[0; 32]).is_err());
    }
}
