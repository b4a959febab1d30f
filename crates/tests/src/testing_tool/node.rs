//! Assembly of a full test node from the in-memory collaborators.

use std::sync::Arc;
use std::time::Duration;

use secp256k1::SecretKey;
use tokio_util::sync::CancellationToken;

use avs_config::{BackoffConfig, StakingConfig};
use avs_da::{embed_block, AppId, CallIndex, DaBlock, DaHeader};
use avs_staking::Staker;
use avs_syncer::Syncer;
use avs_types::{Block, Header, NodeType};
use avs_utils::Wallet;

use super::chain::{
    MemChain, MemParticipants, MemTxPool, TestBlockBuilderFactory, TestFraudGate, TestPeerInfo,
    TestValidator,
};
use super::da::MockDaClient;

pub const TEST_APP_ID: AppId = AppId(10);
pub const TEST_CALL_INDEX: CallIndex = CallIndex::new(29, 1);

pub fn test_wallet() -> Wallet {
    Wallet::new(SecretKey::from_slice(&[0x42; 32]).expect("test secret key"))
}

/// Millisecond-scale delays: fast, but every wait still yields to the
/// scheduler so concurrent tasks make progress under the test runtime.
pub fn fast_backoff() -> BackoffConfig {
    BackoffConfig {
        query_retry_ms: 1,
        probation_recheck_ms: 1,
        staked_recheck_ms: 1,
        peer_poll_ms: 1,
        pool_settle_delay_ms: 1,
        pool_submit_attempts: 10,
        pool_submit_retry_ms: 1,
        staked_poll_ms: 1,
    }
}

pub fn settlement_block(number: u64) -> Block {
    Block {
        header: Header {
            number,
            timestamp: number * 1_000,
            ..Default::default()
        },
        transactions: Vec::new(),
    }
}

/// A DA block embedding the given settlement blocks in order.
pub fn da_block(number: u64, embedded: &[Block]) -> DaBlock {
    DaBlock {
        header: DaHeader {
            number,
            hash: [number as u8; 32].into(),
        },
        extrinsics: embedded
            .iter()
            .map(|block| embed_block(TEST_APP_ID, TEST_CALL_INDEX, block))
            .collect(),
    }
}

pub struct TestNode {
    pub chain: Arc<MemChain>,
    pub da: Arc<MockDaClient>,
    pub pool: Arc<MemTxPool>,
    pub participants: Arc<MemParticipants>,
    pub peers: Arc<TestPeerInfo>,
    pub fraud_gate: Arc<TestFraudGate>,
    pub validator: Arc<TestValidator>,
    pub staker: Arc<Staker>,
    pub cancel: CancellationToken,
}

pub fn setup_node(node_type: NodeType, da_history: Vec<DaBlock>) -> TestNode {
    setup_node_with_backoff(node_type, da_history, fast_backoff())
}

pub fn setup_node_with_backoff(
    node_type: NodeType,
    da_history: Vec<DaBlock>,
    backoff: BackoffConfig,
) -> TestNode {
    let chain = Arc::new(MemChain::new());
    let da = Arc::new(MockDaClient::with_history(TEST_CALL_INDEX, da_history));
    let pool = Arc::new(MemTxPool::default());
    let participants = Arc::new(MemParticipants::default());
    let peers = Arc::new(TestPeerInfo::default());
    let fraud_gate = Arc::new(TestFraudGate::default());
    let validator = Arc::new(TestValidator::default());

    let staker = Arc::new(Staker {
        node_type,
        wallet: test_wallet(),
        chain: chain.clone(),
        tx_pool: pool.clone(),
        participants: participants.clone(),
        peers: peers.clone(),
        block_builders: Arc::new(TestBlockBuilderFactory {
            chain: chain.clone(),
        }),
        da_client: da.clone(),
        staking_config: StakingConfig::default(),
        backoff,
        last_error: Default::default(),
    });

    TestNode {
        chain,
        da,
        pool,
        participants,
        peers,
        fraud_gate,
        validator,
        staker,
        cancel: CancellationToken::new(),
    }
}

impl TestNode {
    pub fn syncer(&self) -> Syncer {
        Syncer {
            da_client: self.da.clone(),
            chain: self.chain.clone(),
            fraud_gate: self.fraud_gate.clone(),
            validator: self.validator.clone(),
            staker: self.staker.clone(),
            app_id: TEST_APP_ID,
            node_type: self.staker.node_type,
            cancel: self.cancel.clone(),
        }
    }
}

/// Poll a condition until it holds or the timeout passes.
pub async fn wait_until<F: Fn() -> bool>(condition: F, timeout: Duration) -> bool {
    let start = std::time::Instant::now();
    while start.elapsed() < timeout {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    condition()
}
