use pinocchio::program_error::ProgramError;

/// Reasons the authorization gate refuses (or unwinds) a privileged call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    /// The shared secret has never been configured
    NotConfigured,
    /// Claimed counter is below the current floor
    StaleCounter,
    /// Signature bytes could not be parsed or recovered
    MalformedSignature,
    /// Recovered signer is not the expected signer
    InvalidSignature,
    /// Counter derived from the signature does not move the floor forward
    CounterNotAdvanced,
    /// The gated action failed after authorization succeeded
    ExecutorFailure(ProgramError),
}

impl GateError {
    pub const BASE: u32 = 6000;

    /// Custom error code reported for denials. Executor failures surface the
    /// executor's own error instead.
    pub fn code(&self) -> Option<u32> {
        let offset = match self {
            GateError::NotConfigured => 0,
            GateError::StaleCounter => 1,
            GateError::MalformedSignature => 2,
            GateError::InvalidSignature => 3,
            GateError::CounterNotAdvanced => 4,
            GateError::ExecutorFailure(_) => return None,
        };
        Some(Self::BASE + offset)
    }

    pub fn is_denial(&self) -> bool {
        !matches!(self, GateError::ExecutorFailure(_))
    }
}

impl From<GateError> for ProgramError {
    fn from(e: GateError) -> Self {
        match e {
            GateError::ExecutorFailure(inner) => inner,
            denial => ProgramError::Custom(denial.code().unwrap_or(GateError::BASE)),
        }
    }
}

/// Error types related to state management operations.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatekeeperStateError {
    /// Account data is invalid or corrupted
    InvalidAccountData = 5000,
    /// Account discriminator does not match the expected account type
    InvalidDiscriminator,
    /// Secret exceeds the storage capacity of a shared secret
    SecretTooLong,
    /// Stored secret length is larger than the secret buffer
    CorruptSecretLength,
}

impl From<GatekeeperStateError> for ProgramError {
    fn from(e: GatekeeperStateError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denials_map_to_distinct_codes() {
        let codes: Vec<u32> = [
            GateError::NotConfigured,
            GateError::StaleCounter,
            GateError::MalformedSignature,
            GateError::InvalidSignature,
            GateError::CounterNotAdvanced,
        ]
        .into_iter()
        .map(|e| match ProgramError::from(e) {
            ProgramError::Custom(code) => code,
            other => panic!("unexpected {:?}", other),
        })
        .collect();
        assert_eq!(codes, vec![6000, 6001, 6002, 6003, 6004]);
    }

    #[test]
    fn executor_failure_passes_inner_error_through() {
        let err = GateError::ExecutorFailure(ProgramError::InsufficientFunds);
        assert!(!err.is_denial());
        assert_eq!(ProgramError::from(err), ProgramError::InsufficientFunds);
    }
}
