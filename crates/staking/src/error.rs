use thiserror::Error;

/// Hard staking failures surfaced to the caller. Transient query errors are
/// retried inside the state machine and never reach this type.
#[derive(Error, Debug)]
pub enum StakingError {
    #[error("failed to build staking block: {0}")]
    BuildBlock(#[source] anyhow::Error),

    #[error("failed to sign staking transaction: {0}")]
    Sign(#[source] anyhow::Error),

    #[error("failed to submit staking block to the DA chain: {0}")]
    DaSubmit(#[source] anyhow::Error),

    #[error("failed to commit staking block locally: {0}")]
    Commit(#[source] anyhow::Error),

    #[error("pool submission failed after {attempts} attempts: {source}")]
    PoolSubmit {
        attempts: u32,
        #[source]
        source: anyhow::Error,
    },

    #[error("participant status query failed: {0}")]
    Query(#[source] anyhow::Error),
}
