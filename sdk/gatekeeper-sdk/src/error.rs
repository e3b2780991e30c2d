use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// SDK-specific error types for Gatekeeper operations
#[derive(Debug, Error)]
pub enum GatekeeperSdkError {
    /// Connection or RPC error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Account not found on-chain
    #[error("Account not found: {0}")]
    AccountNotFound(Pubkey),

    /// Invalid account data or deserialization error
    #[error("Invalid account data: {0}")]
    InvalidAccountData(String),

    /// Secp256k1 key or signing failure
    #[error("Signing error: {0}")]
    Signing(String),

    /// No claimed counter within the search window moves the floor forward.
    /// The floor is saturated and the secret needs rotating.
    #[error("No advancing counter found within {0} attempts; rotate the secret")]
    CounterSearchExhausted(u32),

    /// Borsh serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] std::io::Error),

    /// Program error from on-chain
    #[error("Program error: {0}")]
    ProgramError(#[from] solana_sdk::program_error::ProgramError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, GatekeeperSdkError>;
