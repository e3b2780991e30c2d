use solana_sdk::pubkey;
use solana_sdk::pubkey::Pubkey;

/// Program ID the SDK targets unless told otherwise.
pub const DEFAULT_PROGRAM_ID: Pubkey = Pubkey::new_from_array(gatekeeper_program::ID);

pub const TOKEN_PROGRAM_ID: Pubkey = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");

/// Attempts `AuthorizationSigner::sign_advancing` makes before giving up.
pub const DEFAULT_COUNTER_SEARCH: u32 = 64;
