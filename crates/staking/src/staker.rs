use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use avs_config::{BackoffConfig, StakingConfig};
use avs_da::DaClient;
use avs_traits::{BlockBuilderFactory, LocalChain, ParticipantQuerier, PeerInfo, TxPool};
use avs_types::{NodeType, SignedTransaction};
use avs_utils::{Backoff, Wallet};

use crate::contract;
use crate::error::StakingError;
use crate::strategy::strategy_for;

/// Everything the staking state machine needs to act on behalf of this node.
pub struct Staker {
    pub node_type: NodeType,
    pub wallet: Wallet,
    pub chain: Arc<dyn LocalChain>,
    pub tx_pool: Arc<dyn TxPool>,
    pub participants: Arc<dyn ParticipantQuerier>,
    pub peers: Arc<dyn PeerInfo>,
    pub block_builders: Arc<dyn BlockBuilderFactory>,
    pub da_client: Arc<dyn DaClient>,
    pub staking_config: StakingConfig,
    pub backoff: BackoffConfig,
    /// Last hard error from a staking attempt; the loop itself keeps going.
    pub last_error: Mutex<Option<StakingError>>,
}

impl Staker {
    /// Drive this node to "staked, not in probation" and keep it there.
    ///
    /// Runs until cancelled: once staked the loop degrades into a periodic
    /// health check that would notice unexpected de-staking and re-admit the
    /// node. Transient query failures are retried with the configured
    /// backoff; hard staking errors are recorded in [`Staker::last_error`]
    /// and retried on the next iteration.
    pub async fn ensure_staked(&self, cancel: CancellationToken) {
        let address = self.wallet.address();
        let kind = self.node_type.participant_kind();

        loop {
            if cancel.is_cancelled() {
                log::info!("staking loop cancelled");
                return;
            }

            match self.participants.in_probation(address).await {
                Err(err) => {
                    log::error!(
                        "failed to check probation status, rechecking shortly: {:#}",
                        err
                    );
                    if sleep_or_cancelled(&cancel, self.backoff.query_retry()).await {
                        return;
                    }
                    continue;
                }
                Ok(true) => {
                    log::warn!(
                        "participant {} is in probation, holding off staking until it clears",
                        address
                    );
                    if sleep_or_cancelled(&cancel, self.backoff.probation_recheck()).await {
                        return;
                    }
                    continue;
                }
                Ok(false) => {}
            }

            match self.participants.contains(address, kind).await {
                Err(err) => {
                    log::error!(
                        "failed to check staked status, rechecking shortly: {:#}",
                        err
                    );
                    if sleep_or_cancelled(&cancel, self.backoff.query_retry()).await {
                        return;
                    }
                    continue;
                }
                Ok(true) => {
                    log::info!("node is staked as {}, rechecking for changes shortly", kind);
                    if sleep_or_cancelled(&cancel, self.backoff.staked_recheck()).await {
                        return;
                    }
                    continue;
                }
                Ok(false) => {}
            }

            let strategy = strategy_for(self.node_type);
            match strategy.stake(self, &cancel).await {
                Ok(true) => {
                    log::info!("node {} staked as {}", address, kind);
                }
                // Interrupted by cancellation; the loop top exits.
                Ok(false) => {}
                Err(err) => {
                    log::error!("staking attempt failed: {}", err);
                    *self.last_error.lock().unwrap() = Some(err);
                }
            }
        }
    }

    /// Best-effort release of this node's bond, used on shutdown so an
    /// unreachable node is not left staked.
    pub async fn unstake(&self) -> Result<(), StakingError> {
        let tx = contract::unstake_tx(self.staking_config.gas_limit);
        let signed = self
            .wallet
            .sign_transaction(tx)
            .map_err(StakingError::Sign)?;
        submit_to_pool(self, signed).await?;
        log::info!("unstake transaction submitted for {}", self.wallet.address());
        Ok(())
    }

    pub fn last_error_message(&self) -> Option<String> {
        self.last_error
            .lock()
            .unwrap()
            .as_ref()
            .map(|err| err.to_string())
    }
}

/// Submit a transaction to the shared pool with the configured bounded
/// retry. Exceeding the bound surfaces the last submission error.
pub(crate) async fn submit_to_pool(
    staker: &Staker,
    tx: SignedTransaction,
) -> Result<(), StakingError> {
    let attempts = staker.backoff.pool_submit_attempts.max(1);
    let mut backoff = Backoff::fixed(staker.backoff.pool_submit_retry());
    let mut last_err = None;
    for attempt in 1..=attempts {
        match staker.tx_pool.add_tx(tx.clone()).await {
            Ok(()) => return Ok(()),
            Err(err) => {
                log::error!(
                    "failed to add staking tx to the pool (attempt {}/{}): {:#}",
                    attempt,
                    attempts,
                    err
                );
                last_err = Some(err);
                if attempt < attempts {
                    tokio::time::sleep(backoff.next_sleep()).await;
                }
            }
        }
    }
    Err(StakingError::PoolSubmit {
        attempts,
        source: last_err.expect("bounded retry ran at least once"),
    })
}

/// Sleep that loses against cancellation; returns true if cancelled.
pub(crate) async fn sleep_or_cancelled(cancel: &CancellationToken, duration: Duration) -> bool {
    tokio::select! {
        _ = cancel.cancelled() => true,
        _ = tokio::time::sleep(duration) => false,
    }
}
