use std::path::PathBuf;

use gatekeeper_sdk::core::constants::{DEFAULT_PROGRAM_ID, TOKEN_PROGRAM_ID};
use litesvm::LiteSVM;
use solana_sdk::{
    account::Account,
    instruction::Instruction,
    message::{v0, VersionedMessage},
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
    transaction::VersionedTransaction,
};

// SPL layouts, written directly so tests need no token client crate.
const MINT_LEN: usize = 82;
const TOKEN_ACCOUNT_LEN: usize = 165;

pub struct TestContext {
    pub svm: LiteSVM,
    pub payer: Keypair,
    pub program_id: Pubkey,
}

/// Built program; `GATEKEEPER_PROGRAM_SO` overrides the default location.
fn program_path() -> PathBuf {
    std::env::var_os("GATEKEEPER_PROGRAM_SO")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("../../target/deploy/gatekeeper_program.so")
        })
}

/// `None` when the program has not been built with `cargo build-sbf`.
pub fn setup_test() -> Option<TestContext> {
    let path = program_path();
    if !path.exists() {
        eprintln!(
            "skipping: {} not found, build it with `cargo build-sbf --manifest-path contracts/program/Cargo.toml`",
            path.display()
        );
        return None;
    }

    let payer = Keypair::new();
    let mut svm = LiteSVM::new();
    svm.airdrop(&payer.pubkey(), 100_000_000_000)
        .expect("Failed to airdrop");

    let program_id = DEFAULT_PROGRAM_ID;
    svm.add_program_from_file(program_id, &path)
        .expect("Failed to load program");

    Some(TestContext {
        svm,
        payer,
        program_id,
    })
}

impl TestContext {
    pub fn funded_keypair(&mut self) -> Keypair {
        let keypair = Keypair::new();
        self.svm
            .airdrop(&keypair.pubkey(), 10_000_000_000)
            .expect("Failed to airdrop");
        keypair
    }

    /// Sends `instructions` with the context payer paying fees. Each call
    /// gets a fresh blockhash, so an identical transaction can be resent.
    pub fn send(&mut self, instructions: &[Instruction], signers: &[&Keypair]) -> Result<(), String> {
        self.send_with_logs(instructions, signers).map(|_| ())
    }

    /// Like `send`, returning the program log lines.
    pub fn send_with_logs(
        &mut self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> Result<Vec<String>, String> {
        self.svm.expire_blockhash();
        let message = v0::Message::try_compile(
            &self.payer.pubkey(),
            instructions,
            &[],
            self.svm.latest_blockhash(),
        )
        .map_err(|e| format!("{:?}", e))?;

        let mut keypairs: Vec<&Keypair> = vec![&self.payer];
        keypairs.extend_from_slice(signers);
        let tx = VersionedTransaction::try_new(VersionedMessage::V0(message), &keypairs[..])
            .map_err(|e| format!("{:?}", e))?;

        self.svm
            .send_transaction(tx)
            .map(|meta| meta.logs)
            .map_err(|e| format!("{:?}", e.err))
    }

    pub fn lamports(&self, address: &Pubkey) -> u64 {
        self.svm
            .get_account(address)
            .map_or(0, |account| account.lamports)
    }

    pub fn data(&self, address: &Pubkey) -> Vec<u8> {
        self.svm
            .get_account(address)
            .map(|account| account.data)
            .unwrap_or_default()
    }

    fn put_token_owned(&mut self, address: Pubkey, data: Vec<u8>) {
        let lamports = self.svm.minimum_balance_for_rent_exemption(data.len());
        let _ = self.svm.set_account(
            address,
            Account {
                lamports,
                data,
                owner: TOKEN_PROGRAM_ID,
                executable: false,
                rent_epoch: 0,
            },
        );
    }

    /// Initialized mint with `authority` as mint authority and no supply.
    pub fn put_mint(&mut self, mint: Pubkey, authority: &Pubkey, decimals: u8) {
        let mut data = vec![0u8; MINT_LEN];
        data[0..4].copy_from_slice(&1u32.to_le_bytes());
        data[4..36].copy_from_slice(authority.as_ref());
        data[44] = decimals;
        data[45] = 1;
        self.put_token_owned(mint, data);
    }

    /// Initialized token account of `owner` for `mint`.
    pub fn put_token_account(&mut self, address: Pubkey, mint: &Pubkey, owner: &Pubkey, amount: u64) {
        let mut data = vec![0u8; TOKEN_ACCOUNT_LEN];
        data[0..32].copy_from_slice(mint.as_ref());
        data[32..64].copy_from_slice(owner.as_ref());
        data[64..72].copy_from_slice(&amount.to_le_bytes());
        data[108] = 1;
        self.put_token_owned(address, data);
    }

    pub fn token_amount(&self, address: &Pubkey) -> u64 {
        let data = self.data(address);
        let mut amount = [0u8; 8];
        amount.copy_from_slice(&data[64..72]);
        u64::from_le_bytes(amount)
    }
}

/// Asserts that `result` failed with custom program error `code`.
pub fn assert_custom_error(result: Result<(), String>, code: u32) {
    let err = result.expect_err("transaction should have failed");
    assert!(
        err.contains(&format!("Custom({})", code)),
        "expected Custom({}), got {}",
        code,
        err
    );
}
