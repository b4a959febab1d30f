//! Reconciles local settlement-chain state with DA-chain history: replays
//! embedded settlement blocks from the resume point up to the DA head,
//! filtering through the fraud gate and the validator, and runs the node's
//! long-lived tasks.

pub mod runner;
pub mod syncer;

pub use runner::{spawn_node, NodeHandle};
pub use syncer::Syncer;
