//! Privileged action executors.
//!
//! Executors only move value. They run after the authorization gate has let a
//! request through and never look at secrets or counters themselves.

use gatekeeper_assertions::check_key_match;
use pinocchio::{
    account_info::AccountInfo, instruction::Signer, program_error::ProgramError, pubkey::Pubkey,
    ProgramResult,
};
use pinocchio_token::instructions::{MintTo, Transfer, TransferChecked};

use crate::{error::GatekeeperError, instruction::AssetKind};

/// Moves an asset out of custody. `signers` are the custody PDA's seeds.
pub trait Transferable {
    fn kind(&self) -> AssetKind;
    fn amount(&self) -> u64;
    fn transfer(&self, signers: &[Signer]) -> ProgramResult;
}

/// Creates new units of an asset. `signers` are the mint authority's seeds.
pub trait Mintable {
    fn amount(&self) -> u64;
    fn mint(&self, signers: &[Signer]) -> ProgramResult;
}

/// Lamports held directly by a system-owned vault.
pub struct NativeRelease<'a> {
    pub vault: &'a AccountInfo,
    pub recipient: &'a AccountInfo,
    pub lamports: u64,
}

impl Transferable for NativeRelease<'_> {
    fn kind(&self) -> AssetKind {
        AssetKind::Native
    }

    fn amount(&self) -> u64 {
        self.lamports
    }

    fn transfer(&self, signers: &[Signer]) -> ProgramResult {
        pinocchio_system::instructions::Transfer {
            from: self.vault,
            to: self.recipient,
            lamports: self.lamports,
        }
        .invoke_signed(signers)
    }
}

/// SPL tokens held in a token account owned by the vault.
pub struct TokenRelease<'a> {
    pub kind: AssetKind,
    pub source: &'a AccountInfo,
    pub destination: &'a AccountInfo,
    pub mint: &'a AccountInfo,
    pub authority: &'a AccountInfo,
    pub amount: u64,
    pub decimals: u8,
}

impl<'a> TokenRelease<'a> {
    /// Normalizes `amount` and `decimals` for `kind`.
    ///
    /// Non-fungible releases always move exactly one unit with zero decimals.
    pub fn new(
        kind: AssetKind,
        source: &'a AccountInfo,
        destination: &'a AccountInfo,
        mint: &'a AccountInfo,
        authority: &'a AccountInfo,
        amount: u64,
        decimals: u8,
    ) -> Result<Self, ProgramError> {
        let (amount, decimals) = match kind {
            AssetKind::Native => return Err(GatekeeperError::UnsupportedAssetKind.into()),
            AssetKind::NonFungible => {
                if amount > 1 {
                    return Err(GatekeeperError::InvalidAmount.into());
                }
                (1, 0)
            },
            AssetKind::Fungible | AssetKind::MultiToken => (amount, decimals),
        };
        Ok(Self {
            kind,
            source,
            destination,
            mint,
            authority,
            amount,
            decimals,
        })
    }
}

impl Transferable for TokenRelease<'_> {
    fn kind(&self) -> AssetKind {
        self.kind
    }

    fn amount(&self) -> u64 {
        self.amount
    }

    fn transfer(&self, signers: &[Signer]) -> ProgramResult {
        match self.kind {
            AssetKind::Fungible => Transfer {
                from: self.source,
                to: self.destination,
                authority: self.authority,
                amount: self.amount,
            }
            .invoke_signed(signers),
            AssetKind::NonFungible | AssetKind::MultiToken => TransferChecked {
                from: self.source,
                mint: self.mint,
                to: self.destination,
                authority: self.authority,
                amount: self.amount,
                decimals: self.decimals,
            }
            .invoke_signed(signers),
            AssetKind::Native => Err(GatekeeperError::UnsupportedAssetKind.into()),
        }
    }
}

/// SPL `MintTo` signed by the mint authority PDA.
pub struct SplMint<'a> {
    pub mint: &'a AccountInfo,
    pub destination: &'a AccountInfo,
    pub authority: &'a AccountInfo,
    pub amount: u64,
}

impl Mintable for SplMint<'_> {
    fn amount(&self) -> u64 {
        self.amount
    }

    fn mint(&self, signers: &[Signer]) -> ProgramResult {
        MintTo {
            mint: self.mint,
            account: self.destination,
            mint_authority: self.authority,
            amount: self.amount,
        }
        .invoke_signed(signers)
    }
}

// SPL token account: mint[0..32] | owner[32..64] | amount[64..72] | ...
const TOKEN_ACCOUNT_MINT: core::ops::Range<usize> = 0..32;
const TOKEN_ACCOUNT_OWNER: core::ops::Range<usize> = 32..64;
const TOKEN_ACCOUNT_MIN_LEN: usize = 165;

// SPL mint: mint_authority COption<Pubkey> = tag(u32 le)[0..4] | key[4..36]
const MINT_AUTHORITY_TAG: core::ops::Range<usize> = 0..4;
const MINT_AUTHORITY_KEY: core::ops::Range<usize> = 4..36;
const MINT_MIN_LEN: usize = 82;

/// Requires `account` to be an SPL token account owned by `owner` for `mint`.
pub fn check_token_account(
    account: &AccountInfo,
    owner: &Pubkey,
    mint: &Pubkey,
) -> ProgramResult {
    if !account.is_owned_by(&pinocchio_token::ID) {
        return Err(GatekeeperError::InvalidAccount.into());
    }
    let data = account.try_borrow_data()?;
    check_token_account_data(&data, owner, mint)
}

pub(crate) fn check_token_account_data(
    data: &[u8],
    owner: &Pubkey,
    mint: &Pubkey,
) -> ProgramResult {
    if data.len() < TOKEN_ACCOUNT_MIN_LEN {
        return Err(GatekeeperError::InvalidAccount.into());
    }
    if data[TOKEN_ACCOUNT_MINT] != mint[..] {
        return Err(GatekeeperError::MintMismatch.into());
    }
    if data[TOKEN_ACCOUNT_OWNER] != owner[..] {
        return Err(GatekeeperError::RecipientMismatch.into());
    }
    Ok(())
}

/// Requires `mint` to be an SPL mint whose authority is `authority`.
pub fn check_mint_authority(mint: &AccountInfo, authority: &Pubkey) -> ProgramResult {
    if !mint.is_owned_by(&pinocchio_token::ID) {
        return Err(GatekeeperError::InvalidAccount.into());
    }
    let data = mint.try_borrow_data()?;
    check_mint_authority_data(&data, authority)
}

pub(crate) fn check_mint_authority_data(data: &[u8], authority: &Pubkey) -> ProgramResult {
    if data.len() < MINT_MIN_LEN {
        return Err(GatekeeperError::InvalidAccount.into());
    }
    if data[MINT_AUTHORITY_TAG] != 1u32.to_le_bytes() || data[MINT_AUTHORITY_KEY] != authority[..]
    {
        return Err(GatekeeperError::MintAuthorityMismatch.into());
    }
    Ok(())
}

pub fn check_token_program(account: &AccountInfo) -> ProgramResult {
    check_key_match(account, &pinocchio_token::ID, GatekeeperError::InvalidTokenProgram)
}
