use parity_scale_codec::{Decode, Encode};
use sha3::{Digest, Keccak256};

/// Represent 256 bits.
#[derive(Eq, PartialEq, Debug, Default, Hash, Clone, Copy, PartialOrd, Ord, Encode, Decode)]
pub struct H256([u8; 32]);

const ZERO: H256 = H256([0u8; 32]);

impl H256 {
    pub const fn zero() -> Self {
        ZERO
    }

    pub fn is_zero(&self) -> bool {
        self == &ZERO
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0[..]
    }
}

impl From<[u8; 32]> for H256 {
    fn from(v: [u8; 32]) -> Self {
        H256(v)
    }
}

impl From<H256> for [u8; 32] {
    fn from(h: H256) -> [u8; 32] {
        h.0
    }
}

impl std::fmt::Display for H256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// A 20-byte account address on the settlement chain.
#[derive(Eq, PartialEq, Debug, Default, Hash, Clone, Copy, PartialOrd, Ord, Encode, Decode)]
pub struct Address([u8; 20]);

impl Address {
    pub const fn new(inner: [u8; 20]) -> Self {
        Address(inner)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0[..]
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl From<[u8; 20]> for Address {
    fn from(v: [u8; 20]) -> Self {
        Address(v)
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&hasher.finalize());
    hash
}
