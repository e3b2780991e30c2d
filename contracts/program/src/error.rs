//! Gatekeeper Error Types

use pinocchio::program_error::ProgramError;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u32)]
pub enum GatekeeperError {
    #[error("Invalid instruction")]
    InvalidInstruction = 7000,

    #[error("Not authorized")]
    Unauthorized,

    #[error("Account already initialized")]
    AlreadyInitialized,

    #[error("Invalid program account")]
    InvalidAccount,

    #[error("Invalid PDA derivation")]
    InvalidPDA,

    #[error("Unsupported asset kind")]
    UnsupportedAssetKind,

    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Invalid token program")]
    InvalidTokenProgram,

    #[error("Mint authority is not the mint manager")]
    MintAuthorityMismatch,

    #[error("Token account is not owned by the caller")]
    RecipientMismatch,

    #[error("Token account does not match the mint")]
    MintMismatch,
}

impl From<GatekeeperError> for ProgramError {
    fn from(e: GatekeeperError) -> Self {
        ProgramError::Custom(e as u32)
    }
}
