//! Gatekeeper Instruction Definitions

use alloc::vec::Vec;
use borsh::{BorshDeserialize, BorshSerialize};
use gatekeeper_state::SignerAddress;
use pinocchio::program_error::ProgramError;

use crate::error::GatekeeperError;

/// Instruction discriminators (borsh variant index)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum InstructionDiscriminator {
    InitializeLocker = 0,
    StageSecret = 1,
    RotateLockerSecret = 2,
    ReleaseAsset = 3,
    InitializeMintManager = 4,
    RegisterToken = 5,
    RotateTokenSecret = 6,
    RelayMint = 7,
    DiscardSecretSource = 8,
    SetSigner = 9,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub enum GatekeeperInstruction {
    /// Create a locker and its vault
    ///
    /// Accounts:
    /// 0. `[writable]` Locker config (PDA: ["locker", owner])
    /// 1. `[writable, signer]` Owner (pays rent)
    /// 2. `[writable]` Vault (PDA: ["locker-vault", config])
    /// 3. `[]` System program
    InitializeLocker {
        bump: u8,
        vault_bump: u8,
        /// Address whose signatures authorize releases
        signer: SignerAddress,
    },

    /// Stage a `(secret, floor)` pair for a later rotation
    ///
    /// Accounts:
    /// 0. `[writable]` Secret source (PDA: ["secret-source", authority])
    /// 1. `[writable, signer]` Authority (pays rent)
    /// 2. `[]` System program
    StageSecret {
        bump: u8,
        secret: Vec<u8>,
        /// Big-endian uint256
        floor: [u8; 32],
    },

    /// Install the staged secret into a locker and close the source
    ///
    /// Accounts:
    /// 0. `[writable]` Locker config
    /// 1. `[writable, signer]` Owner (receives the source's rent)
    /// 2. `[writable]` Secret source
    RotateLockerSecret,

    /// Release an asset from the vault to the caller
    ///
    /// Accounts:
    /// 0. `[writable]` Locker config
    /// 1. `[writable]` Vault
    /// 2. `[writable, signer]` Caller (recipient)
    /// 3. `[]` System program
    /// 4. `[writable]` Vault token account (token kinds only)
    /// 5. `[writable]` Caller token account (token kinds only)
    /// 6. `[]` Mint (token kinds only)
    /// 7. `[]` Token program (token kinds only)
    ReleaseAsset {
        /// See `AssetKind`
        kind: u8,
        amount: u64,
        /// Used by `MultiToken` only
        decimals: u8,
        claimed_counter: [u8; 32],
        /// Empty for owner calls
        signature: Vec<u8>,
    },

    /// Create a mint manager
    ///
    /// Accounts:
    /// 0. `[writable]` Mint manager (PDA: ["mint-manager", owner])
    /// 1. `[writable, signer]` Owner (pays rent)
    /// 2. `[]` System program
    InitializeMintManager { bump: u8, signer: SignerAddress },

    /// Register a mint whose authority is the mint manager
    ///
    /// Accounts:
    /// 0. `[]` Mint manager
    /// 1. `[writable, signer]` Owner (pays rent)
    /// 2. `[writable]` Token secret (PDA: ["mint-secret", manager, mint])
    /// 3. `[]` Mint
    /// 4. `[]` System program
    RegisterToken { bump: u8 },

    /// Install the staged secret into a token secret and close the source
    ///
    /// Accounts:
    /// 0. `[]` Mint manager
    /// 1. `[writable, signer]` Owner
    /// 2. `[writable]` Token secret
    /// 3. `[writable]` Secret source
    RotateTokenSecret,

    /// Mint to the caller's token account
    ///
    /// Accounts:
    /// 0. `[]` Mint manager
    /// 1. `[writable]` Token secret
    /// 2. `[signer]` Caller
    /// 3. `[writable]` Mint
    /// 4. `[writable]` Destination token account (owned by caller)
    /// 5. `[]` Token program
    RelayMint {
        amount: u64,
        claimed_counter: [u8; 32],
        signature: Vec<u8>,
    },

    /// Close a staged secret that will not be used
    ///
    /// Accounts:
    /// 0. `[writable]` Secret source
    /// 1. `[writable, signer]` Authority
    DiscardSecretSource,

    /// Replace the expected signer of a locker or mint manager
    ///
    /// Accounts:
    /// 0. `[writable]` Locker config or mint manager
    /// 1. `[signer]` Owner
    SetSigner { signer: SignerAddress },
}

impl GatekeeperInstruction {
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        Self::try_from_slice(input).map_err(|_| GatekeeperError::InvalidInstruction.into())
    }

    pub fn discriminator(&self) -> InstructionDiscriminator {
        match self {
            Self::InitializeLocker { .. } => InstructionDiscriminator::InitializeLocker,
            Self::StageSecret { .. } => InstructionDiscriminator::StageSecret,
            Self::RotateLockerSecret => InstructionDiscriminator::RotateLockerSecret,
            Self::ReleaseAsset { .. } => InstructionDiscriminator::ReleaseAsset,
            Self::InitializeMintManager { .. } => InstructionDiscriminator::InitializeMintManager,
            Self::RegisterToken { .. } => InstructionDiscriminator::RegisterToken,
            Self::RotateTokenSecret => InstructionDiscriminator::RotateTokenSecret,
            Self::RelayMint { .. } => InstructionDiscriminator::RelayMint,
            Self::DiscardSecretSource => InstructionDiscriminator::DiscardSecretSource,
            Self::SetSigner { .. } => InstructionDiscriminator::SetSigner,
        }
    }
}

/// What a `ReleaseAsset` moves out of the vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AssetKind {
    /// Lamports held by the vault itself
    Native = 0,
    /// SPL token, plain `Transfer`
    Fungible = 1,
    /// Single-supply SPL token, always one unit
    NonFungible = 2,
    /// SPL token moved with caller supplied decimals
    MultiToken = 3,
}

impl AssetKind {
    pub fn name(&self) -> &'static str {
        match self {
            AssetKind::Native => "native",
            AssetKind::Fungible => "fungible",
            AssetKind::NonFungible => "non-fungible",
            AssetKind::MultiToken => "multi-token",
        }
    }

    pub fn is_token(&self) -> bool {
        !matches!(self, AssetKind::Native)
    }
}

impl TryFrom<u8> for AssetKind {
    type Error = ProgramError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AssetKind::Native),
            1 => Ok(AssetKind::Fungible),
            2 => Ok(AssetKind::NonFungible),
            3 => Ok(AssetKind::MultiToken),
            _ => Err(GatekeeperError::UnsupportedAssetKind.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn variant_index_is_discriminator() {
        let ix = GatekeeperInstruction::RelayMint {
            amount: 10,
            claimed_counter: [0; 32],
            signature: vec![1, 2, 3],
        };
        let bytes = borsh::to_vec(&ix).unwrap();
        assert_eq!(bytes[0], InstructionDiscriminator::RelayMint as u8);
        assert_eq!(ix.discriminator(), InstructionDiscriminator::RelayMint);

        let unit = borsh::to_vec(&GatekeeperInstruction::DiscardSecretSource).unwrap();
        assert_eq!(unit, vec![InstructionDiscriminator::DiscardSecretSource as u8]);
    }

    #[test]
    fn release_asset_layout() {
        let mut claimed = [0u8; 32];
        claimed[31] = 5;
        let ix = GatekeeperInstruction::ReleaseAsset {
            kind: AssetKind::Fungible as u8,
            amount: 1_000,
            decimals: 6,
            claimed_counter: claimed,
            signature: vec![0xaa; 65],
        };
        let bytes = borsh::to_vec(&ix).unwrap();

        // tag | kind | amount(le u64) | decimals | counter[32] | len(le u32) | sig
        assert_eq!(bytes.len(), 1 + 1 + 8 + 1 + 32 + 4 + 65);
        assert_eq!(bytes[1], 1);
        assert_eq!(&bytes[2..10], &1_000u64.to_le_bytes());
        assert_eq!(bytes[10], 6);
        assert_eq!(bytes[11 + 31], 5);
        assert_eq!(&bytes[43..47], &65u32.to_le_bytes());

        assert_eq!(GatekeeperInstruction::unpack(&bytes).unwrap(), ix);
    }

    #[test]
    fn unpack_rejects_garbage() {
        assert_eq!(
            GatekeeperInstruction::unpack(&[42]),
            Err(GatekeeperError::InvalidInstruction.into())
        );
        assert!(GatekeeperInstruction::unpack(&[]).is_err());
        // Truncated InitializeLocker
        assert!(GatekeeperInstruction::unpack(&[0, 1, 2, 3]).is_err());
    }

    #[test]
    fn asset_kind_parsing() {
        assert_eq!(AssetKind::try_from(2), Ok(AssetKind::NonFungible));
        assert!(!AssetKind::Native.is_token());
        assert!(AssetKind::MultiToken.is_token());
        assert_eq!(
            AssetKind::try_from(4),
            Err(GatekeeperError::UnsupportedAssetKind.into())
        );
    }
}
