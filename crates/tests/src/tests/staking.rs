use std::time::Duration;

use avs_config::BackoffConfig;
use avs_staking::{contract, strategy_for, StakingError, StakingStrategy as _};
use avs_types::{BlockSource, NodeType, ParticipantKind};
use ethabi::{short_signature, ParamType};

use crate::testing_tool::node::{setup_node, setup_node_with_backoff, wait_until};

#[tokio::test]
async fn test_already_staked_node_submits_nothing() {
    let node = setup_node(NodeType::Sequencer, Vec::new());
    let address = node.staker.wallet.address();
    node.participants
        .set_staked(address, ParticipantKind::Sequencer);
    node.peers.set_bootnode_conn_count(1);

    let staker = node.staker.clone();
    let cancel = node.cancel.clone();
    let task = tokio::spawn(async move { staker.ensure_staked(cancel).await });

    // Let the health-check loop run a few cycles.
    tokio::time::sleep(Duration::from_millis(50)).await;
    node.cancel.cancel();
    task.await.unwrap();

    assert!(node.pool.txs().is_empty());
    assert!(node.da.submissions().is_empty());
    assert!(node.chain.committed().is_empty());
}

#[tokio::test]
async fn test_pool_staking_through_state_machine() {
    let node = setup_node(NodeType::WatchTower, Vec::new());
    let address = node.staker.wallet.address();
    node.peers.set_bootnode_conn_count(1);
    // The pool stands in for the sequencer that executes the transaction.
    node.pool
        .link_auto_stake(node.participants.clone(), address, ParticipantKind::WatchTower);

    let staker = node.staker.clone();
    let cancel = node.cancel.clone();
    let task = tokio::spawn(async move { staker.ensure_staked(cancel).await });

    let staked = wait_until(|| !node.pool.txs().is_empty(), Duration::from_secs(5)).await;
    assert!(staked, "stake transaction never reached the pool");
    node.cancel.cancel();
    task.await.unwrap();

    let txs = node.pool.txs();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].raw.to, Some(contract::STAKING_CONTRACT));
    assert_eq!(
        &txs[0].raw.input[..4],
        &short_signature("stake", &[ParamType::String])
    );
    assert!(node.staker.last_error_message().is_none());
}

#[tokio::test]
async fn test_pool_submission_retries_up_to_bound() {
    let node = setup_node_with_backoff(
        NodeType::Sequencer,
        Vec::new(),
        BackoffConfig::immediate(),
    );
    node.peers.set_bootnode_conn_count(1);
    node.pool.set_fail_always(true);

    let strategy = strategy_for(NodeType::Sequencer);
    let err = strategy
        .stake(&node.staker, &node.cancel)
        .await
        .unwrap_err();
    match err {
        StakingError::PoolSubmit { attempts, .. } => assert_eq!(attempts, 10),
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(node.pool.attempt_count(), 10);
}

#[tokio::test]
async fn test_probation_blocks_staking_attempts() {
    let node = setup_node(NodeType::Sequencer, Vec::new());
    let address = node.staker.wallet.address();
    node.participants.set_probation(address);
    node.peers.set_bootnode_conn_count(1);

    let staker = node.staker.clone();
    let cancel = node.cancel.clone();
    let task = tokio::spawn(async move { staker.ensure_staked(cancel).await });

    tokio::time::sleep(Duration::from_millis(50)).await;
    node.cancel.cancel();
    task.await.unwrap();

    assert!(node.pool.txs().is_empty());
    assert!(node.da.submissions().is_empty());
}

#[tokio::test]
async fn test_bootstrap_stakes_through_its_own_block() {
    let node = setup_node(NodeType::BootstrapSequencer, Vec::new());
    let address = node.staker.wallet.address();

    // No peers at all: the bootstrap path must not wait for any.
    let strategy = strategy_for(NodeType::BootstrapSequencer);
    let staked = strategy.stake(&node.staker, &node.cancel).await.unwrap();
    assert!(staked);

    // The block went to the DA chain and into local state, tagged with the
    // bootstrap role.
    let submissions = node.da.submissions();
    assert_eq!(submissions.len(), 1);
    let committed = node.chain.committed();
    assert_eq!(committed.len(), 1);
    let (block, source) = &committed[0];
    assert_eq!(*source, BlockSource::BootstrapSequencer);
    assert_eq!(block.header.coinbase, address);
    assert!(!block.header.seal.is_empty());

    // It carries exactly the stake transaction, for the plain sequencer kind.
    assert_eq!(block.transactions.len(), 1);
    let tx = &block.transactions[0].raw;
    assert_eq!(tx.to, Some(contract::STAKING_CONTRACT));
    assert_eq!(
        tx.input,
        contract::stake_tx(
            ParticipantKind::Sequencer,
            node.staker.staking_config.stake_amount(),
            node.staker.staking_config.gas_limit
        )
        .input
    );
    // Nothing went through the pool.
    assert!(node.pool.txs().is_empty());
}

#[tokio::test]
async fn test_cancellation_interrupts_backoff() {
    let node = setup_node_with_backoff(
        NodeType::Sequencer,
        Vec::new(),
        BackoffConfig {
            query_retry_ms: 60_000,
            ..BackoffConfig::default()
        },
    );
    // Every query fails, parking the loop in its retry backoff.
    node.participants.fail_next_queries(u32::MAX);

    let staker = node.staker.clone();
    let cancel = node.cancel.clone();
    let task = tokio::spawn(async move { staker.ensure_staked(cancel).await });

    tokio::time::sleep(Duration::from_millis(20)).await;
    node.cancel.cancel();
    tokio::time::timeout(Duration::from_secs(1), task)
        .await
        .expect("staking loop did not exit on cancellation")
        .unwrap();
}

#[tokio::test]
async fn test_unstake_submits_release_transaction() {
    let node = setup_node(NodeType::Sequencer, Vec::new());
    node.staker.unstake().await.unwrap();

    let txs = node.pool.txs();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].raw.to, Some(contract::STAKING_CONTRACT));
    assert_eq!(txs[0].raw.input, short_signature("unstake", &[]).to_vec());
    assert_eq!(txs[0].raw.value, 0);
}
