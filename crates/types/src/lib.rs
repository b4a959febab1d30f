//! Settlement-chain primitives.
//!
//! These are the types the bridge ultimately moves around: settlement blocks
//! and transactions in their native SCALE encoding, plus the node role and
//! provenance enums shared by the staking and sync components.

pub mod block;
pub mod core;
pub mod primitives;
pub mod transaction;

pub use crate::core::{BlockSource, NodeType, ParticipantKind};
pub use block::{Block, Header};
pub use primitives::{keccak256, Address, H256};
pub use transaction::{SignedTransaction, Transaction};
