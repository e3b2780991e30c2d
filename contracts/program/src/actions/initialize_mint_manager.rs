//! InitializeMintManager instruction handler

use gatekeeper_assertions::{check_pda, check_writable_signer};
use gatekeeper_state::{mint_manager_seeds_with_bump, IntoBytes, MintManagerConfig, SignerAddress};
use pinocchio::{
    account_info::AccountInfo, msg, program_error::ProgramError, pubkey::Pubkey, ProgramResult,
};

use super::{create_pda_account, next_account};
use crate::error::GatekeeperError;

pub fn process_initialize_mint_manager(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    bump: u8,
    signer: SignerAddress,
) -> ProgramResult {
    let mut account_info_iter = accounts.iter();
    let manager_account = next_account(&mut account_info_iter)?;
    let owner_account = next_account(&mut account_info_iter)?;

    check_writable_signer(owner_account, ProgramError::MissingRequiredSignature)?;

    let bump_arr = [bump];
    let manager_seeds = mint_manager_seeds_with_bump(owner_account.key(), &bump_arr);
    check_pda(&manager_seeds, manager_account.key(), program_id, GatekeeperError::InvalidPDA)?;

    create_pda_account(
        owner_account,
        manager_account,
        &manager_seeds,
        MintManagerConfig::LEN,
        program_id,
    )?;

    let manager = MintManagerConfig::new(*owner_account.key(), signer, bump);
    let mut manager_data = manager_account.try_borrow_mut_data()?;
    manager_data[..MintManagerConfig::LEN].copy_from_slice(manager.into_bytes()?);

    msg!("Mint manager created: {:?}", manager_account.key());

    Ok(())
}
