//! Interfaces to the external collaborators of the bridge: local chain
//! state, the shared transaction pool, the staking contract's participant
//! view, fraud and validity verdicts, peer info and block building.
//!
//! Their implementations live outside this workspace (storage and execution
//! engine, fraud-proof resolver, network layer); the bridge only depends on
//! these traits, and tests provide in-memory versions.

use anyhow::Result;
use async_trait::async_trait;

use avs_types::{Address, Block, BlockSource, Header, ParticipantKind, SignedTransaction};
use avs_utils::Wallet;

/// Local settlement-chain state. Append-only from this bridge's perspective:
/// both the syncer and the staking direct-block path only ever add blocks on
/// top, and the implementation serializes concurrent writers.
pub trait LocalChain: Send + Sync {
    fn header(&self) -> Header;
    fn write_block(&self, block: Block, source: BlockSource) -> Result<()>;
}

/// Shared transaction pool an active sequencer drains.
#[async_trait]
pub trait TxPool: Send + Sync {
    async fn add_tx(&self, tx: SignedTransaction) -> Result<()>;
}

/// Participant records as observed through settlement-chain state. Never
/// mutated directly; changes happen by executing stake transactions.
#[async_trait]
pub trait ParticipantQuerier: Send + Sync {
    async fn contains(&self, address: Address, kind: ParticipantKind) -> Result<bool>;
    async fn in_probation(&self, address: Address) -> Result<bool>;
}

/// Yes/no fraud verdict per candidate block. A fraud-proof block is evidence
/// against another block, not chain state to apply.
pub trait FraudGate: Send + Sync {
    fn is_fraud_proof_block(&self, block: &Block) -> bool;
}

/// Validity verdict per candidate block.
pub trait BlockValidator: Send + Sync {
    fn check(&self, block: &Block) -> Result<()>;
}

/// View of the peer layer; the bridge only needs to know whether a bootnode
/// connection exists yet.
pub trait PeerInfo: Send + Sync {
    fn bootnode_conn_count(&self) -> usize;
}

/// One in-progress block under construction on top of the current head.
pub trait BlockBuilder: Send {
    fn set_coinbase(&mut self, address: Address);
    fn add_transaction(&mut self, tx: SignedTransaction);
    /// Seal the block with the producer's key.
    fn sign_with(&mut self, wallet: &Wallet);
    fn build(self: Box<Self>) -> Result<Block>;
}

pub trait BlockBuilderFactory: Send + Sync {
    fn from_chain_head(&self) -> Result<Box<dyn BlockBuilder>>;
}
