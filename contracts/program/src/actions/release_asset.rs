//! ReleaseAsset instruction handler
//!
//! Moves an asset from the locker vault to the caller once the caller is the
//! owner or presents a fresh signature over the locker secret.

use alloc::vec::Vec;
use gatekeeper_assertions::{check_owner, check_pda, check_signer};
use gatekeeper_state::{
    vault_seeds_with_bump, AuthorizationGate, AuthorizationRequest, Counter, LockerConfig,
    Secp256k1Processor, SecretRegistry, Transmutable, TransmutableMut,
};
use pinocchio::{
    account_info::AccountInfo, instruction::Signer, msg, program_error::ProgramError,
    pubkey::Pubkey, ProgramResult,
};

use super::{gate_error, next_account, seed_list};
use crate::{
    error::GatekeeperError,
    events::Event,
    executor::{check_token_account, check_token_program, NativeRelease, TokenRelease, Transferable},
    instruction::AssetKind,
};

pub fn process_release_asset(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    kind: u8,
    amount: u64,
    decimals: u8,
    claimed_counter: [u8; 32],
    signature: Vec<u8>,
) -> ProgramResult {
    let kind = AssetKind::try_from(kind)?;
    if amount == 0 && kind != AssetKind::NonFungible {
        return Err(GatekeeperError::InvalidAmount.into());
    }

    let mut account_info_iter = accounts.iter();
    let config_account = next_account(&mut account_info_iter)?;
    let vault_account = next_account(&mut account_info_iter)?;
    let caller_account = next_account(&mut account_info_iter)?;
    let _system_program = next_account(&mut account_info_iter)?;

    check_signer(caller_account, ProgramError::MissingRequiredSignature)?;
    check_owner(config_account, program_id, GatekeeperError::InvalidAccount)?;

    let mut config_data = config_account.try_borrow_mut_data()?;
    let config = unsafe { LockerConfig::load_mut_unchecked(&mut config_data)? };
    if !config.is_valid() {
        return Err(GatekeeperError::InvalidAccount.into());
    }

    let vault_bump = [config.vault_bump];
    let vault_seeds = vault_seeds_with_bump(config_account.key(), &vault_bump);
    check_pda(&vault_seeds, vault_account.key(), program_id, GatekeeperError::InvalidPDA)?;
    let vault_seed_list = seed_list(&vault_seeds);
    let vault_signer = Signer::from(&vault_seed_list);

    let release = if kind.is_token() {
        let vault_token = next_account(&mut account_info_iter)?;
        let caller_token = next_account(&mut account_info_iter)?;
        let mint = next_account(&mut account_info_iter)?;
        let token_program = next_account(&mut account_info_iter)?;

        check_token_program(token_program)?;
        check_token_account(vault_token, vault_account.key(), mint.key())?;
        check_token_account(caller_token, caller_account.key(), mint.key())?;

        TransferPlan::Token(TokenRelease::new(
            kind,
            vault_token,
            caller_token,
            mint,
            vault_account,
            amount,
            decimals,
        )?)
    } else {
        TransferPlan::Native(NativeRelease {
            vault: vault_account,
            recipient: caller_account,
            lamports: amount,
        })
    };

    let owner = config.owner;
    let signer = config.signer;
    let processor = Secp256k1Processor;
    let gate = AuthorizationGate::new(&owner, &signer, &processor);
    let request = AuthorizationRequest {
        caller: caller_account.key(),
        claimed_counter: Counter::from_be_bytes(claimed_counter),
        signature: &signature,
    };

    let transfer = release.as_transferable();
    let (authorization, _) = gate
        .authorize_and_execute(&mut config.secret, &request, |_| {
            transfer.transfer(&[vault_signer])
        })
        .map_err(gate_error)?;

    Event::AssetReleased {
        config: config_account.key(),
        kind: transfer.kind(),
        amount: transfer.amount(),
        recipient: caller_account.key(),
        floor: config.secret.floor(),
        via: authorization.via(),
    }
    .emit();

    Ok(())
}

enum TransferPlan<'a> {
    Native(NativeRelease<'a>),
    Token(TokenRelease<'a>),
}

impl TransferPlan<'_> {
    fn as_transferable(&self) -> &dyn Transferable {
        match self {
            TransferPlan::Native(release) => release,
            TransferPlan::Token(release) => release,
        }
    }
}
