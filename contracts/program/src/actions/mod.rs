pub mod discard_secret_source;
pub mod initialize_locker;
pub mod initialize_mint_manager;
pub mod register_token;
pub mod relay_mint;
pub mod release_asset;
pub mod rotate_secret;
pub mod set_signer;
pub mod stage_secret;

pub use discard_secret_source::*;
pub use initialize_locker::*;
pub use initialize_mint_manager::*;
pub use register_token::*;
pub use relay_mint::*;
pub use release_asset::*;
pub use rotate_secret::*;
pub use set_signer::*;
pub use stage_secret::*;

use core::slice::Iter;

use gatekeeper_assertions::{check_owner, check_system_owner, check_zero_data};
use gatekeeper_state::{GateError, SecretSource, SharedSecret, Transmutable};
use pinocchio::{
    account_info::AccountInfo,
    instruction::{Seed, Signer},
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
    sysvars::{rent::Rent, Sysvar},
    ProgramResult,
};
use pinocchio_system::instructions::{Allocate, Assign, CreateAccount, Transfer};

use crate::error::GatekeeperError;

pub fn next_account<'a>(iter: &mut Iter<'a, AccountInfo>) -> Result<&'a AccountInfo, ProgramError> {
    iter.next().ok_or(ProgramError::NotEnoughAccountKeys)
}

pub fn seed_list<'a, const N: usize>(seeds: &[&'a [u8]; N]) -> [Seed<'a>; N] {
    core::array::from_fn(|i| Seed::from(seeds[i]))
}

/// Allocates a rent-exempt PDA of `space` bytes owned by `owner`.
///
/// An address that already holds lamports is topped up, then allocated and
/// assigned under the PDA's signature, so pre-funding cannot block creation.
pub fn create_pda_account<const N: usize>(
    payer: &AccountInfo,
    account: &AccountInfo,
    seeds: &[&[u8]; N],
    space: usize,
    owner: &Pubkey,
) -> ProgramResult {
    check_zero_data(account, GatekeeperError::AlreadyInitialized)?;

    let required = Rent::get()?.minimum_balance(space);
    let seeds = seed_list(seeds);
    let current = account.lamports();

    if current == 0 {
        return CreateAccount {
            from: payer,
            to: account,
            lamports: required,
            space: space as u64,
            owner,
        }
        .invoke_signed(&[Signer::from(&seeds)]);
    }

    check_system_owner(account, GatekeeperError::AlreadyInitialized)?;
    if current < required {
        Transfer {
            from: payer,
            to: account,
            lamports: required - current,
        }
        .invoke()?;
    }
    Allocate {
        account,
        space: space as u64,
    }
    .invoke_signed(&[Signer::from(&seeds)])?;
    Assign { account, owner }.invoke_signed(&[Signer::from(&seeds)])
}

/// Moves all lamports of a program account to `destination` and closes it.
pub fn close_account(account: &AccountInfo, destination: &AccountInfo) -> ProgramResult {
    let amount = account.lamports();
    let balance = destination
        .lamports()
        .checked_add(amount)
        .ok_or(ProgramError::ArithmeticOverflow)?;

    *destination.try_borrow_mut_lamports()? = balance;
    *account.try_borrow_mut_lamports()? = 0;
    account.close()
}

/// Reads the staged secret of `source`, which must belong to `authority`.
pub fn read_secret_source(
    source: &AccountInfo,
    authority: &Pubkey,
    program_id: &Pubkey,
) -> Result<SharedSecret, ProgramError> {
    check_owner(source, program_id, GatekeeperError::InvalidAccount)?;
    let data = source.try_borrow_data()?;
    let staged = unsafe { SecretSource::load_unchecked(&data)? };
    if !staged.is_valid() {
        return Err(GatekeeperError::InvalidAccount.into());
    }
    if &staged.authority != authority {
        msg!("Secret source belongs to {:?}", staged.authority);
        return Err(GatekeeperError::Unauthorized.into());
    }
    Ok(staged.secret)
}

/// Logs a gate refusal and converts it into the instruction error.
pub fn gate_error(error: GateError) -> ProgramError {
    if error.is_denial() {
        msg!("Authorization denied: {:?}", error);
    } else {
        msg!("Authorized action failed: {:?}", error);
    }
    error.into()
}
