use std::sync::Arc;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use avs_da::{extract_blocks, AppId, CallIndex, DaBlock, DaClient, ExtractError};
use avs_staking::Staker;
use avs_traits::{BlockValidator, FraudGate, LocalChain};
use avs_types::NodeType;

/// The DA catch-up loop and its collaborators.
pub struct Syncer {
    pub da_client: Arc<dyn DaClient>,
    pub chain: Arc<dyn LocalChain>,
    pub fraud_gate: Arc<dyn FraudGate>,
    pub validator: Arc<dyn BlockValidator>,
    pub staker: Arc<Staker>,
    pub app_id: AppId,
    pub node_type: NodeType,
    pub cancel: CancellationToken,
}

impl Syncer {
    /// DA block number to resume scanning from.
    ///
    /// A fresh chain starts at DA block 1. Otherwise the DA range up to the
    /// local head height is searched for the block that embedded the current
    /// settlement head; a failed search falls back to 0, which re-scans
    /// history (degraded but safe, every block re-extracted this way is
    /// already known locally).
    pub async fn next_da_block_number(&self) -> u64 {
        let head = self.chain.header();
        if head.number == 0 {
            return 1;
        }

        let call_index = match self.da_client.submit_data_call_index().await {
            Ok(call_index) => call_index,
            Err(err) => {
                log::error!("failure to resolve data submission call index: {:#}", err);
                return 0;
            }
        };

        let app_id = self.app_id;
        let target = head.number;
        let predicate =
            move |da_block: &DaBlock| embeds_block_number(da_block, app_id, call_index, target);
        match self.da_client.search_block(0, head.number, &predicate).await {
            Ok(Some(da_block)) => da_block.header.number,
            Ok(None) => {
                log::error!(
                    "no DA block embeds settlement block {}, resuming from genesis",
                    target
                );
                0
            }
            Err(err) => {
                log::error!("failure to sync node: {:#}", err);
                0
            }
        }
    }

    /// Replay DA history from the resume point up to the DA chain's current
    /// head, committing every settlement block that passes the fraud gate
    /// and the validator. Returns the DA cursor reached.
    ///
    /// On cancellation the loop attempts one best-effort unstake before
    /// exiting, so a cleanly shut-down node is not left staked while
    /// unreachable.
    pub async fn sync_node(&self) -> Result<u64> {
        let mut cursor = self.next_da_block_number().await;

        let target = match self.da_client.latest_header().await {
            Ok(header) => header,
            Err(err) => {
                log::error!("couldn't fetch latest DA header: {:#}", err);
                return Ok(cursor);
            }
        };

        let call_index = self
            .da_client
            .submit_data_call_index()
            .await
            .context("resolve data submission call index")?;

        let mut stream = self.da_client.block_stream(cursor);

        loop {
            let da_block = tokio::select! {
                _ = self.cancel.cancelled() => {
                    if let Err(err) = self.staker.unstake().await {
                        log::error!("failed to unstake the node: {}", err);
                    }
                    return Ok(cursor);
                }
                maybe_block = stream.recv() => match maybe_block {
                    Some(block) => block,
                    None => {
                        log::warn!("DA block stream closed at cursor {}", cursor);
                        return Ok(cursor);
                    }
                },
            };

            // Settlement blocks may only ever be considered in increasing
            // DA order; drop anything the stream delivers behind the cursor.
            if da_block.header.number < cursor {
                log::warn!(
                    "DA stream delivered block {} behind cursor {}, ignoring",
                    da_block.header.number,
                    cursor
                );
                continue;
            }

            self.apply_da_block(&da_block, call_index);

            cursor = da_block.header.number;
            // Caught up with the head observed at start; live following takes
            // over from here.
            if da_block.header.number == target.number {
                break;
            }
        }

        Ok(cursor)
    }

    #[instrument(skip_all, fields(da_block = da_block.header.number))]
    fn apply_da_block(&self, da_block: &DaBlock, call_index: CallIndex) {
        let blocks = match extract_blocks(da_block, self.app_id, call_index) {
            Ok(blocks) => blocks,
            Err(ExtractError::NoCompatibleExtrinsic) => {
                log::debug!(
                    "DA block {} carried no settlement data",
                    da_block.header.number
                );
                return;
            }
            Err(err) => {
                // A matching extrinsic with a corrupted payload. Skipping the
                // DA block keeps sync alive; the error log is the alert.
                log::error!("skipping DA block: {}", err);
                return;
            }
        };

        for block in blocks {
            if self.fraud_gate.is_fraud_proof_block(&block) {
                // Fraud evidence, not chain state to apply.
                continue;
            }
            match self.validator.check(&block) {
                Ok(()) => {
                    let hash = block.hash();
                    if let Err(err) = self.chain.write_block(block, self.node_type.into()) {
                        log::warn!(
                            "failed to write settlement block {} received from DA: {:#}",
                            hash,
                            err
                        );
                    }
                }
                Err(err) => {
                    log::warn!(
                        "failed to validate settlement block {} received from DA: {:#}",
                        block.hash(),
                        err
                    );
                }
            }
        }
    }
}

/// Search predicate: does this DA block embed the settlement block with the
/// given number? "Nothing embedded" is a non-match; a decode failure aborts
/// the search.
fn embeds_block_number(
    da_block: &DaBlock,
    app_id: AppId,
    call_index: CallIndex,
    target: u64,
) -> Result<bool> {
    match extract_blocks(da_block, app_id, call_index) {
        Ok(blocks) => Ok(blocks.iter().any(|block| block.number() == target)),
        Err(ExtractError::NoCompatibleExtrinsic) => Ok(false),
        Err(err) => Err(err.into()),
    }
}
