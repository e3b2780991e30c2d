//! DiscardSecretSource instruction handler

use gatekeeper_assertions::check_writable_signer;
use pinocchio::{
    account_info::AccountInfo, msg, program_error::ProgramError, pubkey::Pubkey, ProgramResult,
};

use super::{close_account, next_account, read_secret_source};

pub fn process_discard_secret_source(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
) -> ProgramResult {
    let mut account_info_iter = accounts.iter();
    let source_account = next_account(&mut account_info_iter)?;
    let authority_account = next_account(&mut account_info_iter)?;

    check_writable_signer(authority_account, ProgramError::MissingRequiredSignature)?;
    read_secret_source(source_account, authority_account.key(), program_id)?;

    close_account(source_account, authority_account)?;
    msg!("Secret source discarded: {:?}", source_account.key());

    Ok(())
}
