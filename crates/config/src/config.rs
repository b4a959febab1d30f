use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use avs_types::NodeType;

use crate::constants::{DEFAULT_STAKE_GAS_LIMIT, DEFAULT_STAKE_TOKENS, TOKEN_UNIT};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub node: NodeConfig,
    pub da: DaConfig,
    #[serde(default)]
    pub staking: StakingConfig,
    #[serde(default)]
    pub backoff: BackoffConfig,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("read config file {:?}", path.as_ref()))?;
        let config = toml::from_str(&content).context("parse config file")?;
        Ok(config)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    pub node_type: NodeType,
    pub wallet: WalletConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WalletConfig {
    pub privkey_path: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DaConfig {
    /// Application id our settlement blobs are submitted under.
    pub app_id: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StakingConfig {
    /// Bond size in whole tokens.
    pub stake_tokens: u64,
    pub gas_limit: u64,
}

impl StakingConfig {
    pub fn stake_amount(&self) -> u128 {
        u128::from(self.stake_tokens) * TOKEN_UNIT
    }
}

impl Default for StakingConfig {
    fn default() -> Self {
        StakingConfig {
            stake_tokens: DEFAULT_STAKE_TOKENS,
            gas_limit: DEFAULT_STAKE_GAS_LIMIT,
        }
    }
}

/// Retry and poll timing for the staking state machine and the syncer.
///
/// Centralized so tests can run the state machines with zeroed delays.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackoffConfig {
    /// Delay before retrying a failed participant-status query.
    pub query_retry_ms: u64,
    /// Delay between probation re-checks while in probation.
    pub probation_recheck_ms: u64,
    /// Delay between health re-checks once staked.
    pub staked_recheck_ms: u64,
    /// Poll interval while waiting for a bootnode connection.
    pub peer_poll_ms: u64,
    /// Extra wait after a bootnode connection appears, before submitting a
    /// pool staking transaction.
    pub pool_settle_delay_ms: u64,
    /// Bounded attempts for submitting a transaction to the pool.
    pub pool_submit_attempts: u32,
    /// Delay between pool submission attempts.
    pub pool_submit_retry_ms: u64,
    /// Poll interval while waiting for an own stake to become visible.
    pub staked_poll_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        BackoffConfig {
            query_retry_ms: 3_000,
            probation_recheck_ms: 5_000,
            staked_recheck_ms: 3_000,
            peer_poll_ms: 1_000,
            pool_settle_delay_ms: 5_000,
            pool_submit_attempts: 10,
            pool_submit_retry_ms: 2_000,
            staked_poll_ms: 3_000,
        }
    }
}

impl BackoffConfig {
    pub fn query_retry(&self) -> Duration {
        Duration::from_millis(self.query_retry_ms)
    }

    pub fn probation_recheck(&self) -> Duration {
        Duration::from_millis(self.probation_recheck_ms)
    }

    pub fn staked_recheck(&self) -> Duration {
        Duration::from_millis(self.staked_recheck_ms)
    }

    pub fn peer_poll(&self) -> Duration {
        Duration::from_millis(self.peer_poll_ms)
    }

    pub fn pool_settle_delay(&self) -> Duration {
        Duration::from_millis(self.pool_settle_delay_ms)
    }

    pub fn pool_submit_retry(&self) -> Duration {
        Duration::from_millis(self.pool_submit_retry_ms)
    }

    pub fn staked_poll(&self) -> Duration {
        Duration::from_millis(self.staked_poll_ms)
    }

    /// Zeroed delays with a small retry bound, for driving the state
    /// machines in tests without real waits.
    pub fn immediate() -> Self {
        BackoffConfig {
            query_retry_ms: 0,
            probation_recheck_ms: 0,
            staked_recheck_ms: 0,
            peer_poll_ms: 0,
            pool_settle_delay_ms: 0,
            pool_submit_attempts: 10,
            pool_submit_retry_ms: 0,
            staked_poll_ms: 0,
        }
    }
}
