//! Program log events.
//!
//! One line per effect, `Name key=value ...`, so indexers can parse them
//! straight out of the transaction logs.

use alloc::{format, string::String};

use gatekeeper_state::{Counter, SignerAddress};
use pinocchio::{msg, pubkey::Pubkey};

use crate::instruction::AssetKind;

#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    SecretRotated {
        domain: &'a Pubkey,
        floor: Counter,
    },
    AssetReleased {
        config: &'a Pubkey,
        kind: AssetKind,
        amount: u64,
        recipient: &'a Pubkey,
        floor: Counter,
        via: &'static str,
    },
    MintRelayed {
        mint: &'a Pubkey,
        amount: u64,
        recipient: &'a Pubkey,
        floor: Counter,
        via: &'static str,
    },
    SignerUpdated {
        domain: &'a Pubkey,
        signer: &'a SignerAddress,
    },
}

impl Event<'_> {
    pub fn render(&self) -> String {
        match self {
            Event::SecretRotated { domain, floor } => format!(
                "SecretRotated domain={} floor={}",
                to_hex(&domain[..]),
                floor
            ),
            Event::AssetReleased {
                config,
                kind,
                amount,
                recipient,
                floor,
                via,
            } => format!(
                "AssetReleased config={} kind={} amount={} recipient={} floor={} via={}",
                to_hex(&config[..]),
                kind.name(),
                amount,
                to_hex(&recipient[..]),
                floor,
                via
            ),
            Event::MintRelayed {
                mint,
                amount,
                recipient,
                floor,
                via,
            } => format!(
                "MintRelayed mint={} amount={} recipient={} floor={} via={}",
                to_hex(&mint[..]),
                amount,
                to_hex(&recipient[..]),
                floor,
                via
            ),
            Event::SignerUpdated { domain, signer } => format!(
                "SignerUpdated domain={} signer=0x{}",
                to_hex(&domain[..]),
                to_hex(&signer[..])
            ),
        }
    }

    pub fn emit(&self) {
        msg!("{}", self.render());
    }
}

pub fn to_hex(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_lowercase_and_padded() {
        assert_eq!(to_hex(&[0x00, 0x0f, 0xab]), "000fab");
    }

    #[test]
    fn released_line_carries_floor_and_path() {
        let config = [0x11; 32];
        let recipient = [0x22; 32];
        let line = Event::AssetReleased {
            config: &config,
            kind: AssetKind::Native,
            amount: 500,
            recipient: &recipient,
            floor: Counter::from_u64(7),
            via: "signature",
        }
        .render();
        assert!(line.starts_with("AssetReleased config=1111"));
        assert!(line.contains(" kind=native amount=500 "));
        assert!(line.ends_with(" floor=7 via=signature"));
    }

    #[test]
    fn signer_update_prints_address() {
        let domain = [0u8; 32];
        let signer = [0xab; 20];
        let line = Event::SignerUpdated {
            domain: &domain,
            signer: &signer,
        }
        .render();
        assert!(line.ends_with(&format!("signer=0x{}", "ab".repeat(20))));
    }
}
