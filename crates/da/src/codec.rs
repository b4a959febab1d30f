//! Extraction of settlement blocks embedded in DA-chain blocks.

use parity_scale_codec::{Decode, Encode};
use thiserror::Error;

use avs_types::Block;

use crate::types::{AppId, Blob, CallIndex, DaBlock, Extrinsic};

#[derive(Error, Debug)]
pub enum ExtractError {
    /// The DA block carried nothing for us. Callers treat this differently
    /// from a decode failure.
    #[error("no compatible extrinsic found")]
    NoCompatibleExtrinsic,
    /// An extrinsic matched our app id and call index but its settlement
    /// block payload would not decode. This signals corruption or a protocol
    /// version mismatch, not foreign data, so the whole extraction fails.
    #[error("malformed settlement block in extrinsic {index} of DA block {da_block}: {source}")]
    Block {
        da_block: u64,
        index: usize,
        source: parity_scale_codec::Error,
    },
}

/// Scan a DA block's extrinsics and decode every settlement block embedded
/// under `app_id` and `call_index`, preserving extrinsic order.
///
/// Extrinsics that do not match the filter, or whose outer byte wrapping does
/// not decode, are skipped. A matching extrinsic whose block payload is
/// malformed fails the whole call with [`ExtractError::Block`].
pub fn extract_blocks(
    da_block: &DaBlock,
    app_id: AppId,
    call_index: CallIndex,
) -> Result<Vec<Block>, ExtractError> {
    let da_number = da_block.header.number;
    let mut blocks = Vec::new();

    for (index, extrinsic) in da_block.extrinsics.iter().enumerate() {
        if extrinsic.app_id != app_id {
            log::debug!(
                "extrinsic {} of DA block {} has app id {:?}, want {:?}",
                index,
                da_number,
                extrinsic.app_id,
                app_id
            );
            continue;
        }
        if extrinsic.call_index != call_index {
            log::debug!(
                "extrinsic {} of DA block {} has call index {:?}, want {:?}",
                index,
                da_number,
                extrinsic.call_index,
                call_index
            );
            continue;
        }

        let blob = {
            let bytes = match Vec::<u8>::decode(&mut &extrinsic.args[..]) {
                Ok(bytes) => bytes,
                Err(err) => {
                    log::info!(
                        "decoding raw bytes from args of extrinsic {} in DA block {} failed: {}",
                        index,
                        da_number,
                        err
                    );
                    continue;
                }
            };
            match Blob::decode(&mut &bytes[..]) {
                Ok(blob) => blob,
                Err(err) => {
                    log::info!(
                        "decoding blob from extrinsic {} in DA block {} failed: {}",
                        index,
                        da_number,
                        err
                    );
                    continue;
                }
            }
        };

        let block =
            Block::decode(&mut &blob.data[..]).map_err(|source| ExtractError::Block {
                da_block: da_number,
                index,
                source,
            })?;

        log::info!(
            "received new settlement block from DA: number {}, hash {}, parent {}",
            block.number(),
            block.hash(),
            block.parent_hash()
        );
        blocks.push(block);
    }

    if blocks.is_empty() {
        return Err(ExtractError::NoCompatibleExtrinsic);
    }

    Ok(blocks)
}

/// Wrap a settlement block into an extrinsic the codec above will accept.
/// This is the encode direction used when handing blocks to the DA chain.
pub fn embed_block(app_id: AppId, call_index: CallIndex, block: &Block) -> Extrinsic {
    let blob = Blob::new(block.encode());
    Extrinsic {
        app_id,
        call_index,
        args: blob.encode().encode(),
    }
}
