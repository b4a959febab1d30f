use parity_scale_codec::{Decode, Encode};

use crate::primitives::{keccak256, Address, H256};

/// Unsigned settlement-chain transaction.
#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode)]
pub struct Transaction {
    pub nonce: u64,
    pub gas_price: u64,
    pub gas_limit: u64,
    /// `None` for contract creation.
    pub to: Option<Address>,
    /// Value in wei.
    pub value: u128,
    pub input: Vec<u8>,
}

impl Transaction {
    pub fn hash(&self) -> H256 {
        keccak256(&self.encode()).into()
    }
}

/// A transaction plus its recoverable secp256k1 signature.
#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode)]
pub struct SignedTransaction {
    pub raw: Transaction,
    pub signature: [u8; 65],
}
