//! InitializeLocker instruction handler

use gatekeeper_assertions::{check_pda, check_writable_signer};
use gatekeeper_state::{
    locker_seeds_with_bump, vault_seeds_with_bump, IntoBytes, LockerConfig, SignerAddress,
};
use pinocchio::{
    account_info::AccountInfo, msg, program_error::ProgramError, pubkey::Pubkey, ProgramResult,
};

use super::{create_pda_account, next_account};
use crate::error::GatekeeperError;

pub fn process_initialize_locker(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    bump: u8,
    vault_bump: u8,
    signer: SignerAddress,
) -> ProgramResult {
    let mut account_info_iter = accounts.iter();
    let config_account = next_account(&mut account_info_iter)?;
    let owner_account = next_account(&mut account_info_iter)?;
    let vault_account = next_account(&mut account_info_iter)?;

    check_writable_signer(owner_account, ProgramError::MissingRequiredSignature)?;

    let bump_arr = [bump];
    let config_seeds = locker_seeds_with_bump(owner_account.key(), &bump_arr);
    check_pda(&config_seeds, config_account.key(), program_id, GatekeeperError::InvalidPDA)?;

    let vault_bump_arr = [vault_bump];
    let vault_seeds = vault_seeds_with_bump(config_account.key(), &vault_bump_arr);
    check_pda(&vault_seeds, vault_account.key(), program_id, GatekeeperError::InvalidPDA)?;

    create_pda_account(
        owner_account,
        config_account,
        &config_seeds,
        LockerConfig::LEN,
        program_id,
    )?;

    // The vault holds lamports and owns token accounts; it never stores data.
    create_pda_account(
        owner_account,
        vault_account,
        &vault_seeds,
        0,
        &pinocchio_system::ID,
    )?;

    let config = LockerConfig::new(*owner_account.key(), signer, bump, vault_bump);
    let mut config_data = config_account.try_borrow_mut_data()?;
    config_data[..LockerConfig::LEN].copy_from_slice(config.into_bytes()?);

    msg!("Locker created:");
    msg!("  Config: {:?}", config_account.key());
    msg!("  Vault: {:?}", vault_account.key());

    Ok(())
}
