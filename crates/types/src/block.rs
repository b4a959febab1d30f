use parity_scale_codec::{Decode, Encode};

use crate::primitives::{keccak256, Address, H256};
use crate::transaction::SignedTransaction;

/// Settlement-chain block header.
#[derive(Clone, Debug, Eq, PartialEq, Default, Encode, Decode)]
pub struct Header {
    pub parent_hash: H256,
    pub number: u64,
    pub timestamp: u64,
    /// Address credited for producing this block.
    pub coinbase: Address,
    pub state_root: H256,
    pub transactions_root: H256,
    /// Consensus seal: the producer's recoverable signature over
    /// [`Header::seal_hash`]. Empty until the block is signed.
    pub seal: Vec<u8>,
}

impl Header {
    /// Block hash: Keccak-256 of the full encoded header, seal included.
    pub fn hash(&self) -> H256 {
        keccak256(&self.encode()).into()
    }

    /// The message a producer signs. Computed with the seal cleared so the
    /// signature does not cover itself.
    pub fn seal_hash(&self) -> [u8; 32] {
        let unsealed = Header {
            seal: Vec::new(),
            ..self.clone()
        };
        keccak256(&unsealed.encode())
    }
}

/// The unit this bridge writes to local chain state.
#[derive(Clone, Debug, Eq, PartialEq, Default, Encode, Decode)]
pub struct Block {
    pub header: Header,
    pub transactions: Vec<SignedTransaction>,
}

impl Block {
    pub fn hash(&self) -> H256 {
        self.header.hash()
    }

    pub fn number(&self) -> u64 {
        self.header.number
    }

    pub fn parent_hash(&self) -> H256 {
        self.header.parent_hash
    }
}
