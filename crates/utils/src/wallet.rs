use std::path::Path;

use anyhow::{anyhow, ensure, Context, Result};
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};

use avs_config::WalletConfig;
use avs_types::{keccak256, Address, SignedTransaction, Transaction};

/// Node key: signs blocks and transactions, and derives the node address the
/// staking contract knows this participant by.
pub struct Wallet {
    secret: SecretKey,
    address: Address,
}

impl Wallet {
    pub fn new(secret: SecretKey) -> Self {
        let address = address_from_secret(&secret);
        Wallet { secret, address }
    }

    pub fn from_privkey_path(p: &Path) -> Result<Self> {
        let secret = {
            let content = std::fs::read_to_string(p).context("read wallet privkey")?;
            let content = content.trim_start_matches("0x").trim();
            ensure!(content.as_bytes().len() == 64, "invalid privkey length");
            let mut decoded = [0u8; 32];
            hex::decode_to_slice(content, &mut decoded).context("decode wallet privkey")?;
            SecretKey::from_slice(&decoded).context("load wallet privkey")?
        };
        Ok(Self::new(secret))
    }

    pub fn from_config(config: &WalletConfig) -> Result<Self> {
        Self::from_privkey_path(&config.privkey_path)
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Recoverable signature: 64 compact bytes plus the recovery id.
    pub fn sign_message(&self, msg: [u8; 32]) -> Result<[u8; 65]> {
        let secp = Secp256k1::new();
        let message = Message::from_slice(&msg).map_err(|err| anyhow!("signing error: {}", err))?;
        let signature = secp.sign_ecdsa_recoverable(&message, &self.secret);
        let (recovery_id, compact) = signature.serialize_compact();
        let mut inner = [0u8; 65];
        inner[..64].copy_from_slice(&compact);
        inner[64] = recovery_id.to_i32() as u8;
        Ok(inner)
    }

    pub fn sign_transaction(&self, raw: Transaction) -> Result<SignedTransaction> {
        let signature = self.sign_message(raw.hash().into())?;
        Ok(SignedTransaction { raw, signature })
    }
}

fn address_from_secret(secret: &SecretKey) -> Address {
    let secp = Secp256k1::new();
    let pubkey = PublicKey::from_secret_key(&secp, secret);
    let hash = keccak256(&pubkey.serialize_uncompressed()[1..]);
    let mut inner = [0u8; 20];
    inner.copy_from_slice(&hash[12..]);
    Address::new(inner)
}
