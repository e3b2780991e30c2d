//! Authorization gate.
//!
//! Every privileged action calls through here. A request passes if the caller
//! is the owner, or if it carries a fresh signature by the expected signer
//! over `keccak256(secret || claimed_counter)`. A signed pass commits the
//! counter derived from the signature as the new floor.

use pinocchio::{program_error::ProgramError, pubkey::Pubkey};

use crate::{
    authority::{message_hash, SignatureProcessor, SignerAddress},
    counter::Counter,
    error::GateError,
    secret::SecretRegistry,
};

/// Per-call authorization input. Never persisted.
#[derive(Debug, Clone, Copy)]
pub struct AuthorizationRequest<'a> {
    pub caller: &'a Pubkey,
    pub claimed_counter: Counter,
    pub signature: &'a [u8],
}

/// How a request was let through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    /// The owner called directly. The floor is untouched.
    Owner,
    /// A signed request. `floor` is the floor to commit.
    Signed { floor: Counter },
}

impl Authorization {
    pub fn via(&self) -> &'static str {
        match self {
            Authorization::Owner => "owner",
            Authorization::Signed { .. } => "signature",
        }
    }
}

/// Guard bound to one authorization domain's owner and signer.
pub struct AuthorizationGate<'a, P: SignatureProcessor> {
    owner: &'a Pubkey,
    signer: &'a SignerAddress,
    processor: &'a P,
}

impl<'a, P: SignatureProcessor> AuthorizationGate<'a, P> {
    pub fn new(owner: &'a Pubkey, signer: &'a SignerAddress, processor: &'a P) -> Self {
        Self {
            owner,
            signer,
            processor,
        }
    }

    /// Decides whether `request` may proceed without mutating `registry`.
    pub fn check<R: SecretRegistry + ?Sized>(
        &self,
        registry: &R,
        request: &AuthorizationRequest,
    ) -> Result<Authorization, GateError> {
        if request.caller == self.owner {
            return Ok(Authorization::Owner);
        }

        if !registry.is_configured() {
            return Err(GateError::NotConfigured);
        }

        let floor = registry.floor();
        if request.claimed_counter < floor {
            return Err(GateError::StaleCounter);
        }

        let hash = message_hash(registry.secret(), &request.claimed_counter);
        let recovered = self.processor.verify(
            request.signature,
            &hash,
            self.signer,
            &request.claimed_counter,
        )?;
        if !recovered.is_valid {
            return Err(GateError::InvalidSignature);
        }

        // Equal or lower would let the same signature pass again.
        if recovered.next_counter <= floor {
            return Err(GateError::CounterNotAdvanced);
        }

        Ok(Authorization::Signed {
            floor: recovered.next_counter,
        })
    }

    /// Checks `request` and commits the advanced floor.
    pub fn authorize<R: SecretRegistry + ?Sized>(
        &self,
        registry: &mut R,
        request: &AuthorizationRequest,
    ) -> Result<Authorization, GateError> {
        let authorization = self.check(registry, request)?;
        commit(registry, &authorization);
        Ok(authorization)
    }

    /// Checks `request`, runs `action`, and commits the advanced floor only
    /// if `action` succeeds. A failing action leaves the floor where it was.
    pub fn authorize_and_execute<R, T, F>(
        &self,
        registry: &mut R,
        request: &AuthorizationRequest,
        action: F,
    ) -> Result<(Authorization, T), GateError>
    where
        R: SecretRegistry + ?Sized,
        F: FnOnce(&Authorization) -> Result<T, ProgramError>,
    {
        let authorization = self.check(registry, request)?;
        let output = action(&authorization).map_err(GateError::ExecutorFailure)?;
        commit(registry, &authorization);
        Ok((authorization, output))
    }
}

fn commit<R: SecretRegistry + ?Sized>(registry: &mut R, authorization: &Authorization) {
    if let Authorization::Signed { floor } = authorization {
        registry.commit_floor(*floor);
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;
    use crate::{
        authority::{
            secp256k1::{test_support::*, Secp256k1Processor},
            RecoveredAuthorization,
        },
        secret::SharedSecret,
    };

    const OWNER: Pubkey = [1u8; 32];
    const CALLER: Pubkey = [2u8; 32];

    /// Processor with a scripted answer that counts its calls.
    struct ScriptedProcessor {
        answer: Result<RecoveredAuthorization, GateError>,
        calls: Cell<u32>,
    }

    impl ScriptedProcessor {
        fn valid(next: u64) -> Self {
            Self {
                answer: Ok(RecoveredAuthorization {
                    is_valid: true,
                    next_counter: Counter::from_u64(next),
                }),
                calls: Cell::new(0),
            }
        }

        fn answering(answer: Result<RecoveredAuthorization, GateError>) -> Self {
            Self {
                answer,
                calls: Cell::new(0),
            }
        }
    }

    impl SignatureProcessor for ScriptedProcessor {
        fn verify(
            &self,
            _signature: &[u8],
            _message_hash: &[u8; 32],
            _expected_signer: &SignerAddress,
            _claimed_counter: &Counter,
        ) -> Result<RecoveredAuthorization, GateError> {
            self.calls.set(self.calls.get() + 1);
            self.answer.clone()
        }
    }

    fn request<'a>(caller: &'a Pubkey, claimed: u64, signature: &'a [u8]) -> AuthorizationRequest<'a> {
        AuthorizationRequest {
            caller,
            claimed_counter: Counter::from_u64(claimed),
            signature,
        }
    }

    #[test]
    fn scenario_floor_advances_then_replay_is_stale() {
        let signer = [9u8; 20];
        let processor = ScriptedProcessor::valid(7);
        let gate = AuthorizationGate::new(&OWNER, &signer, &processor);
        let mut registry = SharedSecret::new(b"abc", Counter::from_u64(5)).unwrap();

        let first = gate.authorize(&mut registry, &request(&CALLER, 5, &[0; 65]));
        assert_eq!(
            first,
            Ok(Authorization::Signed {
                floor: Counter::from_u64(7)
            })
        );
        assert_eq!(registry.floor(), Counter::from_u64(7));

        let replay = gate.authorize(&mut registry, &request(&CALLER, 5, &[0; 65]));
        assert_eq!(replay, Err(GateError::StaleCounter));
        assert_eq!(registry.floor(), Counter::from_u64(7));
    }

    #[test]
    fn claimed_equal_to_floor_is_fresh() {
        let signer = [9u8; 20];
        let processor = ScriptedProcessor::valid(11);
        let gate = AuthorizationGate::new(&OWNER, &signer, &processor);
        let mut registry = SharedSecret::new(b"abc", Counter::from_u64(10)).unwrap();
        assert!(gate.authorize(&mut registry, &request(&CALLER, 10, &[0; 65])).is_ok());
    }

    #[test]
    fn stale_counter_is_rejected_before_verification() {
        let signer = [9u8; 20];
        let processor = ScriptedProcessor::valid(100);
        let gate = AuthorizationGate::new(&OWNER, &signer, &processor);
        let mut registry = SharedSecret::new(b"abc", Counter::from_u64(10)).unwrap();

        for claimed in [0, 1, 9] {
            assert_eq!(
                gate.authorize(&mut registry, &request(&CALLER, claimed, &[0; 65])),
                Err(GateError::StaleCounter)
            );
        }
        assert_eq!(processor.calls.get(), 0);
        assert_eq!(registry.floor(), Counter::from_u64(10));
    }

    #[test]
    fn unconfigured_secret_denies_non_owner() {
        let signer = [9u8; 20];
        let processor = ScriptedProcessor::valid(100);
        let gate = AuthorizationGate::new(&OWNER, &signer, &processor);
        let mut registry = SharedSecret::empty();
        assert_eq!(
            gate.authorize(&mut registry, &request(&CALLER, 0, &[0; 65])),
            Err(GateError::NotConfigured)
        );
        assert_eq!(processor.calls.get(), 0);
    }

    #[test]
    fn owner_bypasses_verification() {
        let signer = [9u8; 20];
        let processor = ScriptedProcessor::answering(Err(GateError::MalformedSignature));
        let gate = AuthorizationGate::new(&OWNER, &signer, &processor);

        let mut unconfigured = SharedSecret::empty();
        assert_eq!(
            gate.authorize(&mut unconfigured, &request(&OWNER, 0, &[])),
            Ok(Authorization::Owner)
        );

        let mut configured = SharedSecret::new(b"abc", Counter::from_u64(50)).unwrap();
        assert_eq!(
            gate.authorize(&mut configured, &request(&OWNER, 3, b"garbage")),
            Ok(Authorization::Owner)
        );
        assert_eq!(configured.floor(), Counter::from_u64(50));
        assert_eq!(processor.calls.get(), 0);
    }

    #[test]
    fn processor_errors_and_mismatches_map_to_distinct_kinds() {
        let signer = [9u8; 20];
        let mut registry = SharedSecret::new(b"abc", Counter::from_u64(0)).unwrap();

        let malformed = ScriptedProcessor::answering(Err(GateError::MalformedSignature));
        let gate = AuthorizationGate::new(&OWNER, &signer, &malformed);
        assert_eq!(
            gate.authorize(&mut registry, &request(&CALLER, 0, &[0; 3])),
            Err(GateError::MalformedSignature)
        );

        let mismatch = ScriptedProcessor::answering(Ok(RecoveredAuthorization {
            is_valid: false,
            next_counter: Counter::from_u64(99),
        }));
        let gate = AuthorizationGate::new(&OWNER, &signer, &mismatch);
        assert_eq!(
            gate.authorize(&mut registry, &request(&CALLER, 0, &[0; 65])),
            Err(GateError::InvalidSignature)
        );
        assert_eq!(registry.floor(), Counter::ZERO);
    }

    #[test]
    fn derived_counter_must_pass_the_floor() {
        let signer = [9u8; 20];
        let mut registry = SharedSecret::new(b"abc", Counter::from_u64(20)).unwrap();
        for next in [5, 20] {
            let processor = ScriptedProcessor::valid(next);
            let gate = AuthorizationGate::new(&OWNER, &signer, &processor);
            assert_eq!(
                gate.authorize(&mut registry, &request(&CALLER, 25, &[0; 65])),
                Err(GateError::CounterNotAdvanced)
            );
        }
        assert_eq!(registry.floor(), Counter::from_u64(20));
    }

    #[test]
    fn executor_failure_keeps_floor() {
        let signer = [9u8; 20];
        let processor = ScriptedProcessor::valid(7);
        let gate = AuthorizationGate::new(&OWNER, &signer, &processor);
        let mut registry = SharedSecret::new(b"abc", Counter::from_u64(5)).unwrap();

        let result: Result<(Authorization, ()), GateError> = gate.authorize_and_execute(
            &mut registry,
            &request(&CALLER, 5, &[0; 65]),
            |_| Err(ProgramError::Custom(42)),
        );
        assert_eq!(
            result,
            Err(GateError::ExecutorFailure(ProgramError::Custom(42)))
        );
        assert_eq!(registry.floor(), Counter::from_u64(5));

        let ok = gate.authorize_and_execute(&mut registry, &request(&CALLER, 5, &[0; 65]), |auth| {
            Ok(auth.via())
        });
        assert_eq!(ok.map(|(_, via)| via), Ok("signature"));
        assert_eq!(registry.floor(), Counter::from_u64(7));
    }

    #[test]
    fn action_is_not_run_when_denied() {
        let signer = [9u8; 20];
        let processor = ScriptedProcessor::valid(7);
        let gate = AuthorizationGate::new(&OWNER, &signer, &processor);
        let mut registry = SharedSecret::empty();
        let ran = Cell::new(false);
        let result = gate.authorize_and_execute(&mut registry, &request(&CALLER, 0, &[0; 65]), |_| {
            ran.set(true);
            Ok(())
        });
        assert_eq!(result, Err(GateError::NotConfigured));
        assert!(!ran.get());
    }

    // End to end with real signatures.

    fn configured(secret: &[u8], floor: Counter) -> SharedSecret {
        SharedSecret::new(secret, floor).unwrap()
    }

    #[test]
    fn real_signature_authorizes_exactly_once() {
        let key = secret_key(21);
        let signer = address_of(&key);
        let gate = AuthorizationGate::new(&OWNER, &signer, &Secp256k1Processor);
        let mut registry = configured(b"abc", Counter::ZERO);

        let signature = sign_request(&key, b"abc", &Counter::ZERO);
        let req = AuthorizationRequest {
            caller: &CALLER,
            claimed_counter: Counter::ZERO,
            signature: &signature,
        };
        let first = gate.authorize(&mut registry, &req).unwrap();
        assert_eq!(
            first,
            Authorization::Signed {
                floor: Counter::from_be_slice(&signature).unwrap()
            }
        );

        let replay = gate.authorize(&mut registry, &req);
        assert!(matches!(
            replay,
            Err(GateError::StaleCounter) | Err(GateError::InvalidSignature)
        ));
    }

    #[test]
    fn foreign_signer_is_rejected_even_when_fresh() {
        let key = secret_key(21);
        let intruder = secret_key(22);
        let signer = address_of(&key);
        let gate = AuthorizationGate::new(&OWNER, &signer, &Secp256k1Processor);
        let mut registry = configured(b"abc", Counter::ZERO);

        let signature = sign_request(&intruder, b"abc", &Counter::from_u64(3));
        let req = AuthorizationRequest {
            caller: &CALLER,
            claimed_counter: Counter::from_u64(3),
            signature: &signature,
        };
        assert_eq!(gate.authorize(&mut registry, &req), Err(GateError::InvalidSignature));
        assert_eq!(registry.floor(), Counter::ZERO);
    }

    #[test]
    fn rotation_invalidates_old_signatures() {
        let key = secret_key(21);
        let signer = address_of(&key);
        let gate = AuthorizationGate::new(&OWNER, &signer, &Secp256k1Processor);
        let mut registry = configured(b"old-secret", Counter::from_u64(10));

        let signature = sign_request(&key, b"old-secret", &Counter::from_u64(10));
        registry.rotate(b"new-secret", Counter::from_u64(1)).unwrap();

        let req = AuthorizationRequest {
            caller: &CALLER,
            claimed_counter: Counter::from_u64(10),
            signature: &signature,
        };
        assert_eq!(gate.authorize(&mut registry, &req), Err(GateError::InvalidSignature));
        assert_eq!(registry.floor(), Counter::from_u64(1));
    }

    #[test]
    fn signature_over_wrong_counter_is_rejected() {
        let key = secret_key(21);
        let signer = address_of(&key);
        let gate = AuthorizationGate::new(&OWNER, &signer, &Secp256k1Processor);
        let mut registry = configured(b"abc", Counter::ZERO);

        let signature = sign_request(&key, b"abc", &Counter::from_u64(4));
        let req = AuthorizationRequest {
            caller: &CALLER,
            claimed_counter: Counter::from_u64(5),
            signature: &signature,
        };
        assert_eq!(gate.authorize(&mut registry, &req), Err(GateError::InvalidSignature));
    }

    /// First claimed counter from `floor` whose signature clears `floor`.
    fn advancing_signature(
        key: &libsecp256k1::SecretKey,
        secret: &[u8],
        floor: Counter,
        attempts: u32,
    ) -> Option<(Counter, Vec<u8>)> {
        let mut claimed = floor;
        for _ in 0..attempts {
            let signature = sign_request(key, secret, &claimed);
            if Counter::from_be_slice(&signature)? > floor {
                return Some((claimed, signature));
            }
            claimed = claimed.checked_add_u64(1)?;
        }
        None
    }

    #[test]
    fn floor_climbs_until_rotation_resets_it() {
        let key = secret_key(21);
        let signer = address_of(&key);
        let gate = AuthorizationGate::new(&OWNER, &signer, &Secp256k1Processor);
        let mut registry = configured(b"abc", Counter::ZERO);

        // Each pass commits a random r above the floor, so the headroom
        // roughly halves and a bounded search eventually runs dry.
        let mut passes = 0;
        while let Some((claimed, signature)) =
            advancing_signature(&key, b"abc", registry.floor(), 64)
        {
            let before = registry.floor();
            let req = AuthorizationRequest {
                caller: &CALLER,
                claimed_counter: claimed,
                signature: &signature,
            };
            assert!(matches!(
                gate.authorize(&mut registry, &req),
                Ok(Authorization::Signed { .. })
            ));
            assert!(registry.floor() > before);
            assert!(gate.authorize(&mut registry, &req).is_err());

            passes += 1;
            assert!(passes < 64, "floor never saturated");
        }
        assert!(passes >= 1);

        // A fresh signature at the saturated floor is refused and changes nothing.
        let floor = registry.floor();
        let signature = sign_request(&key, b"abc", &floor);
        let req = AuthorizationRequest {
            caller: &CALLER,
            claimed_counter: floor,
            signature: &signature,
        };
        assert_eq!(
            gate.authorize(&mut registry, &req),
            Err(GateError::CounterNotAdvanced)
        );
        assert_eq!(registry.floor(), floor);

        // The owner rotates to a new secret at floor 0 and signing works again.
        registry.rotate(b"abc-2", Counter::ZERO).unwrap();
        let (claimed, signature) =
            advancing_signature(&key, b"abc-2", Counter::ZERO, 1).expect("r is never zero");
        let req = AuthorizationRequest {
            caller: &CALLER,
            claimed_counter: claimed,
            signature: &signature,
        };
        assert!(gate.authorize(&mut registry, &req).is_ok());
        assert!(registry.floor() > Counter::ZERO);
    }
}
