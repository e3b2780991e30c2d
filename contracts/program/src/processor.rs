//! Instruction Processor
//!
//! Thin dispatcher that routes instructions to individual handlers.

use pinocchio::{account_info::AccountInfo, msg, pubkey::Pubkey, ProgramResult};

use crate::actions;
use crate::instruction::GatekeeperInstruction;

pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let instruction = GatekeeperInstruction::unpack(instruction_data).map_err(|e| {
        msg!(
            "Failed to unpack instruction (discriminator {:?}): {:?}",
            instruction_data.first(),
            e
        );
        e
    })?;
    msg!("Instruction: {:?}", instruction.discriminator());

    match instruction {
        GatekeeperInstruction::InitializeLocker {
            bump,
            vault_bump,
            signer,
        } => actions::process_initialize_locker(program_id, accounts, bump, vault_bump, signer),

        GatekeeperInstruction::StageSecret {
            bump,
            secret,
            floor,
        } => actions::process_stage_secret(program_id, accounts, bump, secret, floor),

        GatekeeperInstruction::RotateLockerSecret => {
            actions::process_rotate_locker_secret(program_id, accounts)
        },

        GatekeeperInstruction::ReleaseAsset {
            kind,
            amount,
            decimals,
            claimed_counter,
            signature,
        } => actions::process_release_asset(
            program_id,
            accounts,
            kind,
            amount,
            decimals,
            claimed_counter,
            signature,
        ),

        GatekeeperInstruction::InitializeMintManager { bump, signer } => {
            actions::process_initialize_mint_manager(program_id, accounts, bump, signer)
        },

        GatekeeperInstruction::RegisterToken { bump } => {
            actions::process_register_token(program_id, accounts, bump)
        },

        GatekeeperInstruction::RotateTokenSecret => {
            actions::process_rotate_token_secret(program_id, accounts)
        },

        GatekeeperInstruction::RelayMint {
            amount,
            claimed_counter,
            signature,
        } => actions::process_relay_mint(program_id, accounts, amount, claimed_counter, signature),

        GatekeeperInstruction::DiscardSecretSource => {
            actions::process_discard_secret_source(program_id, accounts)
        },

        GatekeeperInstruction::SetSigner { signer } => {
            actions::process_set_signer(program_id, accounts, signer)
        },
    }
}
