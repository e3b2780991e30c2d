//! RotateLockerSecret / RotateTokenSecret instruction handlers
//!
//! Both install a staged `(secret, floor)` pair in one step and close the
//! source, returning its rent to the owner. The floor is taken as staged,
//! even when it is below the current one.

use gatekeeper_assertions::{check_owner, check_writable_signer};
use gatekeeper_state::{
    LockerConfig, MintManagerConfig, SecretRegistry, TokenSecret, Transmutable, TransmutableMut,
};
use pinocchio::{
    account_info::AccountInfo, msg, program_error::ProgramError, pubkey::Pubkey, ProgramResult,
};

use super::{close_account, next_account, read_secret_source};
use crate::{error::GatekeeperError, events::Event};

pub fn process_rotate_locker_secret(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    let mut account_info_iter = accounts.iter();
    let config_account = next_account(&mut account_info_iter)?;
    let owner_account = next_account(&mut account_info_iter)?;
    let source_account = next_account(&mut account_info_iter)?;

    check_writable_signer(owner_account, ProgramError::MissingRequiredSignature)?;
    check_owner(config_account, program_id, GatekeeperError::InvalidAccount)?;

    let staged = read_secret_source(source_account, owner_account.key(), program_id)?;

    let floor = {
        let mut config_data = config_account.try_borrow_mut_data()?;
        let config = unsafe { LockerConfig::load_mut_unchecked(&mut config_data)? };
        if !config.is_valid() {
            return Err(GatekeeperError::InvalidAccount.into());
        }
        if &config.owner != owner_account.key() {
            msg!("RotateLockerSecret: caller is not the locker owner");
            return Err(GatekeeperError::Unauthorized.into());
        }
        config.secret.rotate(staged.secret(), staged.floor())?;
        config.secret.floor()
    };

    close_account(source_account, owner_account)?;

    Event::SecretRotated {
        domain: config_account.key(),
        floor,
    }
    .emit();

    Ok(())
}

pub fn process_rotate_token_secret(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    let mut account_info_iter = accounts.iter();
    let manager_account = next_account(&mut account_info_iter)?;
    let owner_account = next_account(&mut account_info_iter)?;
    let token_secret_account = next_account(&mut account_info_iter)?;
    let source_account = next_account(&mut account_info_iter)?;

    check_writable_signer(owner_account, ProgramError::MissingRequiredSignature)?;
    check_owner(manager_account, program_id, GatekeeperError::InvalidAccount)?;
    check_owner(token_secret_account, program_id, GatekeeperError::InvalidAccount)?;

    {
        let manager_data = manager_account.try_borrow_data()?;
        let manager = unsafe { MintManagerConfig::load_unchecked(&manager_data)? };
        if !manager.is_valid() {
            return Err(GatekeeperError::InvalidAccount.into());
        }
        if &manager.owner != owner_account.key() {
            msg!("RotateTokenSecret: caller is not the manager owner");
            return Err(GatekeeperError::Unauthorized.into());
        }
    }

    let staged = read_secret_source(source_account, owner_account.key(), program_id)?;

    let (mint, floor) = {
        let mut token_data = token_secret_account.try_borrow_mut_data()?;
        let token = unsafe { TokenSecret::load_mut_unchecked(&mut token_data)? };
        if !token.is_valid() || &token.manager != manager_account.key() {
            return Err(GatekeeperError::InvalidAccount.into());
        }
        token.secret.rotate(staged.secret(), staged.floor())?;
        (token.mint, token.secret.floor())
    };

    close_account(source_account, owner_account)?;

    msg!("Token secret rotated for mint {:?}", mint);
    Event::SecretRotated {
        domain: token_secret_account.key(),
        floor,
    }
    .emit();

    Ok(())
}
