//! SetSigner instruction handler
//!
//! Works on either a locker or a mint manager, picked by discriminator.
//! Secrets and floors are left untouched.

use gatekeeper_assertions::{check_owner, check_signer};
use gatekeeper_state::{
    read_discriminator, Discriminator, LockerConfig, MintManagerConfig, SignerAddress,
    Transmutable, TransmutableMut,
};
use pinocchio::{
    account_info::AccountInfo, msg, program_error::ProgramError, pubkey::Pubkey, ProgramResult,
};

use super::next_account;
use crate::{error::GatekeeperError, events::Event};

pub fn process_set_signer(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    signer: SignerAddress,
) -> ProgramResult {
    let mut account_info_iter = accounts.iter();
    let target_account = next_account(&mut account_info_iter)?;
    let owner_account = next_account(&mut account_info_iter)?;

    check_signer(owner_account, ProgramError::MissingRequiredSignature)?;
    check_owner(target_account, program_id, GatekeeperError::InvalidAccount)?;

    let mut data = target_account.try_borrow_mut_data()?;
    let (owner, slot) = match read_discriminator(&data)? {
        Discriminator::LockerConfig => {
            let config = unsafe { LockerConfig::load_mut_unchecked(&mut data)? };
            (config.owner, &mut config.signer)
        },
        Discriminator::MintManagerConfig => {
            let manager = unsafe { MintManagerConfig::load_mut_unchecked(&mut data)? };
            (manager.owner, &mut manager.signer)
        },
        other => {
            msg!("SetSigner: unsupported account type {:?}", other);
            return Err(GatekeeperError::InvalidAccount.into());
        },
    };

    if &owner != owner_account.key() {
        msg!("SetSigner: caller is not the owner");
        return Err(GatekeeperError::Unauthorized.into());
    }
    *slot = signer;

    Event::SignerUpdated {
        domain: target_account.key(),
        signer: &signer,
    }
    .emit();

    Ok(())
}
