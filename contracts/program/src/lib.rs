//! Gatekeeper Program - Main Entry Point
//!
//! A locker that releases custody only to owner calls or fresh signed
//! authorizations, and a mint relay gated the same way per mint.

extern crate alloc;

pub mod actions;
pub mod error;
pub mod events;
pub mod executor;
pub mod instruction;
pub mod processor;

use pinocchio::{account_info::AccountInfo, pubkey::Pubkey, ProgramResult};
use pinocchio_pubkey::declare_id;

declare_id!("Gatekeeper111111111111111111111111111111111");

#[cfg(not(feature = "no-entrypoint"))]
pinocchio::entrypoint!(process_instruction);

pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    processor::process_instruction(program_id, accounts, instruction_data)
}
