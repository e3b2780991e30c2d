//! RelayMint instruction handler

use alloc::vec::Vec;
use gatekeeper_assertions::{check_owner, check_signer};
use gatekeeper_state::{
    mint_manager_seeds_with_bump, AuthorizationGate, AuthorizationRequest, Counter,
    MintManagerConfig, Secp256k1Processor, SecretRegistry, TokenSecret, Transmutable,
    TransmutableMut,
};
use pinocchio::{
    account_info::AccountInfo, instruction::Signer, program_error::ProgramError, pubkey::Pubkey,
    ProgramResult,
};

use super::{gate_error, next_account, seed_list};
use crate::{
    error::GatekeeperError,
    events::Event,
    executor::{check_token_account, check_token_program, Mintable, SplMint},
};

pub fn process_relay_mint(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    amount: u64,
    claimed_counter: [u8; 32],
    signature: Vec<u8>,
) -> ProgramResult {
    if amount == 0 {
        return Err(GatekeeperError::InvalidAmount.into());
    }

    let mut account_info_iter = accounts.iter();
    let manager_account = next_account(&mut account_info_iter)?;
    let token_secret_account = next_account(&mut account_info_iter)?;
    let caller_account = next_account(&mut account_info_iter)?;
    let mint_account = next_account(&mut account_info_iter)?;
    let destination_account = next_account(&mut account_info_iter)?;
    let token_program = next_account(&mut account_info_iter)?;

    check_signer(caller_account, ProgramError::MissingRequiredSignature)?;
    check_owner(manager_account, program_id, GatekeeperError::InvalidAccount)?;
    check_owner(token_secret_account, program_id, GatekeeperError::InvalidAccount)?;
    check_token_program(token_program)?;
    check_token_account(destination_account, caller_account.key(), mint_account.key())?;

    let (owner, signer, manager_bump) = {
        let manager_data = manager_account.try_borrow_data()?;
        let manager = unsafe { MintManagerConfig::load_unchecked(&manager_data)? };
        if !manager.is_valid() {
            return Err(GatekeeperError::InvalidAccount.into());
        }
        (manager.owner, manager.signer, manager.bump)
    };

    let mut token_data = token_secret_account.try_borrow_mut_data()?;
    let token = unsafe { TokenSecret::load_mut_unchecked(&mut token_data)? };
    if !token.is_valid()
        || &token.manager != manager_account.key()
        || &token.mint != mint_account.key()
    {
        return Err(GatekeeperError::InvalidAccount.into());
    }

    let bump_arr = [manager_bump];
    let manager_seeds = mint_manager_seeds_with_bump(&owner, &bump_arr);
    let manager_seed_list = seed_list(&manager_seeds);
    let manager_signer = Signer::from(&manager_seed_list);

    let mint = SplMint {
        mint: mint_account,
        destination: destination_account,
        authority: manager_account,
        amount,
    };

    let processor = Secp256k1Processor;
    let gate = AuthorizationGate::new(&owner, &signer, &processor);
    let request = AuthorizationRequest {
        caller: caller_account.key(),
        claimed_counter: Counter::from_be_bytes(claimed_counter),
        signature: &signature,
    };

    let (authorization, _) = gate
        .authorize_and_execute(&mut token.secret, &request, |_| {
            mint.mint(&[manager_signer])
        })
        .map_err(gate_error)?;

    Event::MintRelayed {
        mint: mint_account.key(),
        amount: mint.amount(),
        recipient: caller_account.key(),
        floor: token.secret.floor(),
        via: authorization.via(),
    }
    .emit();

    Ok(())
}
