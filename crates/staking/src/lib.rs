//! Staking state machine: brings this node's on-chain participant status to
//! "staked, not in probation" for its configured role, then keeps defending
//! that status for the node's lifetime.

pub mod contract;
mod error;
mod staker;
mod strategy;

pub use error::StakingError;
pub use staker::Staker;
pub use strategy::{strategy_for, DirectBlockStaking, PoolStaking, StakingStrategy};
