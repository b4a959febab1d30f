//! DA-chain side of the bridge: the data model for observed DA blocks, the
//! codec that extracts embedded settlement blocks from them, and the client
//! interface the syncer drives.

pub mod client;
pub mod codec;
pub mod types;

pub use client::{DaClient, SearchPredicate, SubmitStatus};
pub use codec::{embed_block, extract_blocks, ExtractError};
pub use types::{AppId, Blob, CallIndex, DaBlock, DaHeader, Extrinsic};
