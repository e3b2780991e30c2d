//! StageSecret instruction handler
//!
//! Writes a `(secret, floor)` pair into the authority's secret source. The
//! source is created on first use and overwritten while it is still staged.

use alloc::vec::Vec;
use gatekeeper_assertions::{check_pda, check_writable_signer};
use gatekeeper_state::{
    secret_source_seeds_with_bump, Counter, IntoBytes, SecretSource, SharedSecret,
};
use pinocchio::{
    account_info::AccountInfo, msg, program_error::ProgramError, pubkey::Pubkey, ProgramResult,
};

use super::{create_pda_account, next_account, read_secret_source};
use crate::error::GatekeeperError;

pub fn process_stage_secret(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    bump: u8,
    secret: Vec<u8>,
    floor: [u8; 32],
) -> ProgramResult {
    let mut account_info_iter = accounts.iter();
    let source_account = next_account(&mut account_info_iter)?;
    let authority_account = next_account(&mut account_info_iter)?;

    check_writable_signer(authority_account, ProgramError::MissingRequiredSignature)?;

    let bump_arr = [bump];
    let source_seeds = secret_source_seeds_with_bump(authority_account.key(), &bump_arr);
    check_pda(&source_seeds, source_account.key(), program_id, GatekeeperError::InvalidPDA)?;

    let shared = SharedSecret::new(&secret, Counter::from_be_bytes(floor))?;

    if source_account.data_len() == 0 {
        create_pda_account(
            authority_account,
            source_account,
            &source_seeds,
            SecretSource::LEN,
            program_id,
        )?;
    } else {
        read_secret_source(source_account, authority_account.key(), program_id)?;
    }

    let source = SecretSource::new(*authority_account.key(), bump, shared);
    let mut source_data = source_account.try_borrow_mut_data()?;
    source_data[..SecretSource::LEN].copy_from_slice(source.into_bytes()?);

    msg!(
        "Secret staged: source {:?}, {} bytes, floor {}",
        source_account.key(),
        secret.len(),
        Counter::from_be_bytes(floor)
    );

    Ok(())
}
