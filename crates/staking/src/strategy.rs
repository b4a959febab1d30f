//! The two admission protocols, selected by role. Both end in the same
//! state: this node's address staked in the participant set.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use avs_da::SubmitStatus;
use avs_types::{NodeType, ParticipantKind};

use crate::contract;
use crate::error::StakingError;
use crate::staker::{sleep_or_cancelled, submit_to_pool, Staker};

#[async_trait]
pub trait StakingStrategy: Send + Sync {
    /// Run one admission attempt. `Ok(true)` means the stake is effective;
    /// `Ok(false)` means the attempt was interrupted by cancellation and
    /// nothing should be retried.
    async fn stake(
        &self,
        staker: &Staker,
        cancel: &CancellationToken,
    ) -> Result<bool, StakingError>;
}

/// Admission path for the node's role.
pub fn strategy_for(node_type: NodeType) -> Box<dyn StakingStrategy> {
    match node_type {
        // The first node of the network: nobody can relay a pool transaction
        // yet, so it includes the stake in a block it produces itself. The
        // contract has no bootstrap kind; it stakes as a plain sequencer.
        NodeType::BootstrapSequencer => Box::new(DirectBlockStaking {
            kind: ParticipantKind::Sequencer,
            wait_for_peers: false,
        }),
        NodeType::Sequencer | NodeType::WatchTower => Box::new(PoolStaking),
    }
}

/// Stake by building, signing and submitting a block that carries the stake
/// transaction, then waiting for DA inclusion.
pub struct DirectBlockStaking {
    pub kind: ParticipantKind,
    pub wait_for_peers: bool,
}

#[async_trait]
impl StakingStrategy for DirectBlockStaking {
    async fn stake(
        &self,
        staker: &Staker,
        cancel: &CancellationToken,
    ) -> Result<bool, StakingError> {
        if self.wait_for_peers && wait_for_bootnode(staker, cancel).await {
            return Ok(false);
        }

        let mut builder = staker
            .block_builders
            .from_chain_head()
            .map_err(StakingError::BuildBlock)?;
        builder.set_coinbase(staker.wallet.address());

        let tx = contract::stake_tx(
            self.kind,
            staker.staking_config.stake_amount(),
            staker.staking_config.gas_limit,
        );
        let signed = staker
            .wallet
            .sign_transaction(tx)
            .map_err(StakingError::Sign)?;
        builder.add_transaction(signed);
        builder.sign_with(&staker.wallet);
        let block = builder.build().map_err(StakingError::BuildBlock)?;

        log::debug!("sending block with staking tx to the DA chain");
        staker
            .da_client
            .send_and_wait(&block, SubmitStatus::InBlock)
            .await
            .map_err(StakingError::DaSubmit)?;
        log::info!("staking block {} included on the DA chain", block.hash());

        staker
            .chain
            .write_block(block, staker.node_type.into())
            .map_err(StakingError::Commit)?;
        Ok(true)
    }
}

/// Stake by handing the transaction to the shared pool and waiting for an
/// active sequencer to include it.
pub struct PoolStaking;

#[async_trait]
impl StakingStrategy for PoolStaking {
    async fn stake(
        &self,
        staker: &Staker,
        cancel: &CancellationToken,
    ) -> Result<bool, StakingError> {
        // A bootstrap peer must exist to pick the transaction up.
        if wait_for_bootnode(staker, cancel).await {
            return Ok(false);
        }
        // The pool can accept the transaction before the bootstrap node is
        // ready to observe it; give the network a moment to settle.
        if sleep_or_cancelled(cancel, staker.backoff.pool_settle_delay()).await {
            return Ok(false);
        }

        let kind = staker.node_type.participant_kind();
        let tx = contract::stake_tx(
            kind,
            staker.staking_config.stake_amount(),
            staker.staking_config.gas_limit,
        );
        let signed = staker
            .wallet
            .sign_transaction(tx)
            .map_err(StakingError::Sign)?;
        submit_to_pool(staker, signed).await?;

        // Background sync surfaces the sequencer's eventual inclusion of the
        // transaction; poll our own participant record until it flips.
        loop {
            log::info!("stake transaction submitted, waiting for the participant record to update");
            match staker
                .participants
                .contains(staker.wallet.address(), kind)
                .await
            {
                Ok(true) => return Ok(true),
                Ok(false) => {}
                Err(err) => return Err(StakingError::Query(err)),
            }
            if sleep_or_cancelled(cancel, staker.backoff.staked_poll()).await {
                return Ok(false);
            }
        }
    }
}

/// Poll until at least one bootnode connection exists; returns true if
/// cancelled first.
async fn wait_for_bootnode(staker: &Staker, cancel: &CancellationToken) -> bool {
    loop {
        if staker.peers.bootnode_conn_count() > 0 {
            return false;
        }
        if sleep_or_cancelled(cancel, staker.backoff.peer_poll()).await {
            return true;
        }
    }
}
