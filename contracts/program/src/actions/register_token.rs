//! RegisterToken instruction handler
//!
//! Creates the per-mint secret account. It starts unconfigured, so only the
//! owner can mint until a secret is rotated in.

use gatekeeper_assertions::{check_owner, check_pda, check_writable_signer};
use gatekeeper_state::{
    token_secret_seeds_with_bump, IntoBytes, MintManagerConfig, TokenSecret, Transmutable,
};
use pinocchio::{
    account_info::AccountInfo, msg, program_error::ProgramError, pubkey::Pubkey, ProgramResult,
};

use super::{create_pda_account, next_account};
use crate::{error::GatekeeperError, executor::check_mint_authority};

pub fn process_register_token(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    bump: u8,
) -> ProgramResult {
    let mut account_info_iter = accounts.iter();
    let manager_account = next_account(&mut account_info_iter)?;
    let owner_account = next_account(&mut account_info_iter)?;
    let token_secret_account = next_account(&mut account_info_iter)?;
    let mint_account = next_account(&mut account_info_iter)?;

    check_writable_signer(owner_account, ProgramError::MissingRequiredSignature)?;
    check_owner(manager_account, program_id, GatekeeperError::InvalidAccount)?;

    {
        let manager_data = manager_account.try_borrow_data()?;
        let manager = unsafe { MintManagerConfig::load_unchecked(&manager_data)? };
        if !manager.is_valid() {
            return Err(GatekeeperError::InvalidAccount.into());
        }
        if &manager.owner != owner_account.key() {
            msg!("RegisterToken: caller is not the manager owner");
            return Err(GatekeeperError::Unauthorized.into());
        }
    }

    check_mint_authority(mint_account, manager_account.key())?;

    let bump_arr = [bump];
    let token_seeds =
        token_secret_seeds_with_bump(manager_account.key(), mint_account.key(), &bump_arr);
    check_pda(&token_seeds, token_secret_account.key(), program_id, GatekeeperError::InvalidPDA)?;

    create_pda_account(
        owner_account,
        token_secret_account,
        &token_seeds,
        TokenSecret::LEN,
        program_id,
    )?;

    let token = TokenSecret::new(*manager_account.key(), *mint_account.key(), bump);
    let mut token_data = token_secret_account.try_borrow_mut_data()?;
    token_data[..TokenSecret::LEN].copy_from_slice(token.into_bytes()?);

    msg!("Token registered: mint {:?}", mint_account.key());

    Ok(())
}
