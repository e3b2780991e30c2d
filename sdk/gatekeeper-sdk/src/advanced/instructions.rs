//! Raw instruction constructors. Account order follows
//! `gatekeeper_program::instruction::GatekeeperInstruction`.

use gatekeeper_program::instruction::{AssetKind, GatekeeperInstruction};
use gatekeeper_state::SignerAddress;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_program;

use crate::core::constants::TOKEN_PROGRAM_ID;
use crate::core::signer::SignedAuthorization;
use crate::error::Result;
use crate::utils::{
    derive_locker_pda, derive_mint_manager_pda, derive_secret_source_pda,
    derive_token_secret_pda, derive_vault_pda,
};

fn build(
    program_id: &Pubkey,
    accounts: Vec<AccountMeta>,
    instruction: &GatekeeperInstruction,
) -> Result<Instruction> {
    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data: borsh::to_vec(instruction)?,
    })
}

pub fn initialize_locker(
    program_id: &Pubkey,
    owner: &Pubkey,
    signer: SignerAddress,
) -> Result<Instruction> {
    let (locker, bump) = derive_locker_pda(program_id, owner);
    let (vault, vault_bump) = derive_vault_pda(program_id, &locker);

    let accounts = vec![
        AccountMeta::new(locker, false),
        AccountMeta::new(*owner, true),
        AccountMeta::new(vault, false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];
    build(
        program_id,
        accounts,
        &GatekeeperInstruction::InitializeLocker {
            bump,
            vault_bump,
            signer,
        },
    )
}

pub fn stage_secret(
    program_id: &Pubkey,
    authority: &Pubkey,
    secret: Vec<u8>,
    floor: [u8; 32],
) -> Result<Instruction> {
    let (source, bump) = derive_secret_source_pda(program_id, authority);

    let accounts = vec![
        AccountMeta::new(source, false),
        AccountMeta::new(*authority, true),
        AccountMeta::new_readonly(system_program::id(), false),
    ];
    build(
        program_id,
        accounts,
        &GatekeeperInstruction::StageSecret {
            bump,
            secret,
            floor,
        },
    )
}

pub fn rotate_locker_secret(program_id: &Pubkey, owner: &Pubkey) -> Result<Instruction> {
    let (locker, _) = derive_locker_pda(program_id, owner);
    let (source, _) = derive_secret_source_pda(program_id, owner);

    let accounts = vec![
        AccountMeta::new(locker, false),
        AccountMeta::new(*owner, true),
        AccountMeta::new(source, false),
    ];
    build(program_id, accounts, &GatekeeperInstruction::RotateLockerSecret)
}

/// Token accounts needed by SPL releases.
#[derive(Debug, Clone, Copy)]
pub struct TokenAccounts {
    pub vault_token: Pubkey,
    pub caller_token: Pubkey,
    pub mint: Pubkey,
}

/// Release from `locker` to `caller`. `authorization` is `None` for owner
/// calls.
#[allow(clippy::too_many_arguments)]
pub fn release_asset(
    program_id: &Pubkey,
    locker: &Pubkey,
    caller: &Pubkey,
    kind: AssetKind,
    amount: u64,
    decimals: u8,
    token_accounts: Option<TokenAccounts>,
    authorization: Option<&SignedAuthorization>,
) -> Result<Instruction> {
    let (vault, _) = derive_vault_pda(program_id, locker);

    let mut accounts = vec![
        AccountMeta::new(*locker, false),
        AccountMeta::new(vault, false),
        AccountMeta::new(*caller, true),
        AccountMeta::new_readonly(system_program::id(), false),
    ];
    if let Some(tokens) = token_accounts {
        accounts.extend([
            AccountMeta::new(tokens.vault_token, false),
            AccountMeta::new(tokens.caller_token, false),
            AccountMeta::new_readonly(tokens.mint, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ]);
    }

    let (claimed_counter, signature) = match authorization {
        Some(signed) => (signed.claimed_counter.to_be_bytes(), signed.signature.clone()),
        None => ([0; 32], Vec::new()),
    };
    build(
        program_id,
        accounts,
        &GatekeeperInstruction::ReleaseAsset {
            kind: kind as u8,
            amount,
            decimals,
            claimed_counter,
            signature,
        },
    )
}

pub fn initialize_mint_manager(
    program_id: &Pubkey,
    owner: &Pubkey,
    signer: SignerAddress,
) -> Result<Instruction> {
    let (manager, bump) = derive_mint_manager_pda(program_id, owner);

    let accounts = vec![
        AccountMeta::new(manager, false),
        AccountMeta::new(*owner, true),
        AccountMeta::new_readonly(system_program::id(), false),
    ];
    build(
        program_id,
        accounts,
        &GatekeeperInstruction::InitializeMintManager { bump, signer },
    )
}

pub fn register_token(program_id: &Pubkey, owner: &Pubkey, mint: &Pubkey) -> Result<Instruction> {
    let (manager, _) = derive_mint_manager_pda(program_id, owner);
    let (token_secret, bump) = derive_token_secret_pda(program_id, &manager, mint);

    let accounts = vec![
        AccountMeta::new_readonly(manager, false),
        AccountMeta::new(*owner, true),
        AccountMeta::new(token_secret, false),
        AccountMeta::new_readonly(*mint, false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];
    build(
        program_id,
        accounts,
        &GatekeeperInstruction::RegisterToken { bump },
    )
}

pub fn rotate_token_secret(
    program_id: &Pubkey,
    owner: &Pubkey,
    mint: &Pubkey,
) -> Result<Instruction> {
    let (manager, _) = derive_mint_manager_pda(program_id, owner);
    let (token_secret, _) = derive_token_secret_pda(program_id, &manager, mint);
    let (source, _) = derive_secret_source_pda(program_id, owner);

    let accounts = vec![
        AccountMeta::new_readonly(manager, false),
        AccountMeta::new(*owner, true),
        AccountMeta::new(token_secret, false),
        AccountMeta::new(source, false),
    ];
    build(program_id, accounts, &GatekeeperInstruction::RotateTokenSecret)
}

pub fn relay_mint(
    program_id: &Pubkey,
    manager: &Pubkey,
    mint: &Pubkey,
    caller: &Pubkey,
    destination: &Pubkey,
    amount: u64,
    authorization: Option<&SignedAuthorization>,
) -> Result<Instruction> {
    let (token_secret, _) = derive_token_secret_pda(program_id, manager, mint);

    let accounts = vec![
        AccountMeta::new_readonly(*manager, false),
        AccountMeta::new(token_secret, false),
        AccountMeta::new_readonly(*caller, true),
        AccountMeta::new(*mint, false),
        AccountMeta::new(*destination, false),
        AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
    ];

    let (claimed_counter, signature) = match authorization {
        Some(signed) => (signed.claimed_counter.to_be_bytes(), signed.signature.clone()),
        None => ([0; 32], Vec::new()),
    };
    build(
        program_id,
        accounts,
        &GatekeeperInstruction::RelayMint {
            amount,
            claimed_counter,
            signature,
        },
    )
}

pub fn discard_secret_source(program_id: &Pubkey, authority: &Pubkey) -> Result<Instruction> {
    let (source, _) = derive_secret_source_pda(program_id, authority);

    let accounts = vec![
        AccountMeta::new(source, false),
        AccountMeta::new(*authority, true),
    ];
    build(program_id, accounts, &GatekeeperInstruction::DiscardSecretSource)
}

/// `target` is a locker config or a mint manager owned by `owner`.
pub fn set_signer(
    program_id: &Pubkey,
    target: &Pubkey,
    owner: &Pubkey,
    signer: SignerAddress,
) -> Result<Instruction> {
    let accounts = vec![
        AccountMeta::new(*target, false),
        AccountMeta::new_readonly(*owner, true),
    ];
    build(
        program_id,
        accounts,
        &GatekeeperInstruction::SetSigner { signer },
    )
}
