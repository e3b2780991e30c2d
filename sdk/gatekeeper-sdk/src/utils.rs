use crate::core::connection::SolConnection;
use crate::error::{GatekeeperSdkError, Result};
use crate::types::{LockerInfo, MintManagerInfo, SecretInfo, TokenSecretInfo};
use gatekeeper_state::{
    read_discriminator, Discriminator, LockerConfig, MintManagerConfig, SecretRegistry,
    SharedSecret, TokenSecret, Transmutable, LOCKER_SEED, LOCKER_VAULT_SEED, MINT_MANAGER_SEED,
    SECRET_SOURCE_SEED, TOKEN_SECRET_SEED,
};
use solana_sdk::pubkey::Pubkey;

//=============================================================================
// PDA Derivation Helpers
//=============================================================================

/// Derive the locker config PDA of `owner`
pub fn derive_locker_pda(program_id: &Pubkey, owner: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[LOCKER_SEED, owner.as_ref()], program_id)
}

/// Derive the vault PDA of a locker config
pub fn derive_vault_pda(program_id: &Pubkey, locker: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[LOCKER_VAULT_SEED, locker.as_ref()], program_id)
}

pub fn derive_mint_manager_pda(program_id: &Pubkey, owner: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[MINT_MANAGER_SEED, owner.as_ref()], program_id)
}

pub fn derive_token_secret_pda(
    program_id: &Pubkey,
    manager: &Pubkey,
    mint: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[TOKEN_SECRET_SEED, manager.as_ref(), mint.as_ref()],
        program_id,
    )
}

pub fn derive_secret_source_pda(program_id: &Pubkey, authority: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[SECRET_SOURCE_SEED, authority.as_ref()], program_id)
}

//=============================================================================
// Account Fetching & Parsing
//=============================================================================

/// Fetch raw account data from the blockchain
pub async fn fetch_account_data(
    connection: &impl SolConnection,
    address: &Pubkey,
) -> Result<Vec<u8>> {
    let account = connection
        .get_account(address)
        .await
        .map_err(|e| GatekeeperSdkError::Connection(e.to_string()))?
        .ok_or(GatekeeperSdkError::AccountNotFound(*address))?;

    Ok(account.data)
}

fn expect_discriminator(data: &[u8], expected: Discriminator) -> Result<()> {
    let found = read_discriminator(data)
        .map_err(|e| GatekeeperSdkError::InvalidAccountData(format!("{:?}", e)))?;
    if found != expected {
        return Err(GatekeeperSdkError::InvalidAccountData(format!(
            "expected {:?} account, found {:?}",
            expected, found
        )));
    }
    Ok(())
}

fn load<T: Transmutable + Copy>(data: &[u8], name: &str) -> Result<T> {
    if data.len() < T::LEN {
        return Err(GatekeeperSdkError::InvalidAccountData(format!(
            "Account data too small for {}",
            name
        )));
    }
    let value = unsafe {
        T::load_unchecked(&data[..T::LEN]).map_err(|e| {
            GatekeeperSdkError::InvalidAccountData(format!("Failed to parse {}: {:?}", name, e))
        })?
    };
    Ok(*value)
}

fn secret_info(shared: &SharedSecret) -> Result<SecretInfo> {
    shared
        .validate()
        .map_err(|e| GatekeeperSdkError::InvalidAccountData(format!("{:?}", e)))?;
    Ok(SecretInfo {
        secret: shared.secret().to_vec(),
        floor: shared.floor().to_be_bytes(),
    })
}

/// Parse a locker config account
pub fn parse_locker(program_id: &Pubkey, address: &Pubkey, data: &[u8]) -> Result<LockerInfo> {
    expect_discriminator(data, Discriminator::LockerConfig)?;
    let config: LockerConfig = load(data, "locker config")?;
    let (vault, _) = derive_vault_pda(program_id, address);

    Ok(LockerInfo {
        address: *address,
        vault,
        owner: Pubkey::new_from_array(config.owner),
        signer: config.signer,
        secret: secret_info(&config.secret)?,
        bump: config.bump,
        vault_bump: config.vault_bump,
    })
}

pub fn parse_mint_manager(address: &Pubkey, data: &[u8]) -> Result<MintManagerInfo> {
    expect_discriminator(data, Discriminator::MintManagerConfig)?;
    let manager: MintManagerConfig = load(data, "mint manager")?;

    Ok(MintManagerInfo {
        address: *address,
        owner: Pubkey::new_from_array(manager.owner),
        signer: manager.signer,
        bump: manager.bump,
    })
}

pub fn parse_token_secret(address: &Pubkey, data: &[u8]) -> Result<TokenSecretInfo> {
    expect_discriminator(data, Discriminator::TokenSecret)?;
    let token: TokenSecret = load(data, "token secret")?;

    Ok(TokenSecretInfo {
        address: *address,
        manager: Pubkey::new_from_array(token.manager),
        mint: Pubkey::new_from_array(token.mint),
        secret: secret_info(&token.secret)?,
    })
}

pub async fn fetch_locker_info(
    connection: &impl SolConnection,
    program_id: &Pubkey,
    locker: &Pubkey,
) -> Result<LockerInfo> {
    let data = fetch_account_data(connection, locker).await?;
    parse_locker(program_id, locker, &data)
}

pub async fn fetch_mint_manager_info(
    connection: &impl SolConnection,
    manager: &Pubkey,
) -> Result<MintManagerInfo> {
    let data = fetch_account_data(connection, manager).await?;
    parse_mint_manager(manager, &data)
}

pub async fn fetch_token_secret_info(
    connection: &impl SolConnection,
    token_secret: &Pubkey,
) -> Result<TokenSecretInfo> {
    let data = fetch_account_data(connection, token_secret).await?;
    parse_token_secret(token_secret, &data)
}
