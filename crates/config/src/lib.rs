mod config;
pub mod constants;

pub use config::{BackoffConfig, Config, DaConfig, NodeConfig, StakingConfig, WalletConfig};
