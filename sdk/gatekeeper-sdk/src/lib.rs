pub mod advanced;
pub mod basic;
pub mod core;
pub mod error;
pub mod types;
pub mod utils;

pub use crate::core::connection::SolConnection;
pub use crate::core::signer::{AuthorizationSigner, SignedAuthorization};
pub use crate::error::{GatekeeperSdkError, Result};
pub use crate::types::{LockerInfo, MintManagerInfo, TokenSecretInfo};
pub use crate::utils::{
    derive_locker_pda, derive_mint_manager_pda, derive_secret_source_pda,
    derive_token_secret_pda, derive_vault_pda, fetch_locker_info, fetch_mint_manager_info,
    fetch_token_secret_info, parse_locker, parse_mint_manager, parse_token_secret,
};

pub mod state {
    pub use gatekeeper_state::{
        Counter, IntoBytes, LockerConfig, MintManagerConfig, SecretSource, SharedSecret,
        SignerAddress, TokenSecret,
    };
}
