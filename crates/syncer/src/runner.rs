//! Long-running node tasks: one driving the staking state machine, one
//! driving the syncer. They communicate only through shared chain state and
//! a cancellation token; each performs its own cleanup on cancellation.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use avs_staking::Staker;

use crate::syncer::Syncer;

pub struct NodeHandle {
    cancel: CancellationToken,
    staking_task: JoinHandle<()>,
    sync_task: JoinHandle<Result<u64>>,
}

/// Spawn the staking and sync tasks. Both observe the syncer's cancellation
/// token; cancel it (or call [`NodeHandle::shutdown`]) to stop the node.
pub fn spawn_node(staker: Arc<Staker>, syncer: Syncer) -> NodeHandle {
    let cancel = syncer.cancel.clone();
    let staking_task = tokio::spawn({
        let staker = staker.clone();
        let cancel = cancel.clone();
        async move { staker.ensure_staked(cancel).await }
    });
    let sync_task = tokio::spawn(async move { syncer.sync_node().await });
    NodeHandle {
        cancel,
        staking_task,
        sync_task,
    }
}

impl NodeHandle {
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Signal both tasks and wait for them to stop. The sync task performs
    /// its best-effort unstake on the way out. Returns the DA cursor the
    /// syncer reached.
    pub async fn shutdown(self) -> Result<u64> {
        self.cancel.cancel();
        if let Err(err) = self.staking_task.await {
            log::warn!("staking task did not stop cleanly: {}", err);
        }
        let cursor = self
            .sync_task
            .await
            .map_err(|err| anyhow!("sync task panicked: {}", err))??;
        log::info!("node tasks stopped at DA cursor {}", cursor);
        Ok(cursor)
    }

    /// Wait for the sync task to finish on its own (caught up or stream
    /// ended), then stop the staking task. Returns the DA cursor reached.
    pub async fn wait_synced(self) -> Result<u64> {
        let cursor = self
            .sync_task
            .await
            .map_err(|err| anyhow!("sync task panicked: {}", err))??;
        self.cancel.cancel();
        if let Err(err) = self.staking_task.await {
            log::warn!("staking task did not stop cleanly: {}", err);
        }
        Ok(cursor)
    }
}
