//! Client interface to the DA chain.
//!
//! The concrete transport (RPC, light client) lives outside this workspace;
//! the bridge only depends on this trait. Tests drive it with in-memory
//! implementations.

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use avs_types::Block;

use crate::types::{CallIndex, DaBlock, DaHeader};

/// Submission status to wait for when handing a block to the DA chain.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubmitStatus {
    /// The submission made it into a DA block.
    InBlock,
    /// The containing DA block is final.
    Finalized,
}

/// Predicate handed to [`DaClient::search_block`]: does this DA block match?
/// The search strategy (linear, binary, indexed) belongs to the client.
pub type SearchPredicate<'a> = &'a (dyn Fn(&DaBlock) -> Result<bool> + Send + Sync);

#[async_trait]
pub trait DaClient: Send + Sync {
    /// Current head of the DA chain.
    async fn latest_header(&self) -> Result<DaHeader>;

    /// Dispatch index of the data-submission call on this DA chain, resolved
    /// from chain metadata.
    async fn submit_data_call_index(&self) -> Result<CallIndex>;

    /// Search the inclusive DA block range `[from, to]` for a block matching
    /// the predicate. A predicate error aborts the search.
    async fn search_block(
        &self,
        from: u64,
        to: u64,
        predicate: SearchPredicate<'_>,
    ) -> Result<Option<DaBlock>>;

    /// Live stream of DA blocks starting at `from`. Dropping the receiver
    /// closes the subscription.
    fn block_stream(&self, from: u64) -> mpsc::Receiver<DaBlock>;

    /// Submit a settlement block to the DA chain and block until the chain
    /// reports the requested status for it.
    async fn send_and_wait(&self, block: &Block, status: SubmitStatus) -> Result<()>;
}
