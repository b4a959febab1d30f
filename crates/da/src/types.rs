use parity_scale_codec::{Decode, Encode, Error as CodecError, Input, Output};

use avs_types::H256;

/// Application identifier an extrinsic was submitted under.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Encode, Decode)]
pub struct AppId(pub u32);

/// Dispatch index of the on-chain method an extrinsic invokes:
/// pallet index plus call index within the pallet.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Encode, Decode)]
pub struct CallIndex {
    pub section: u8,
    pub method: u8,
}

impl CallIndex {
    pub const fn new(section: u8, method: u8) -> Self {
        CallIndex { section, method }
    }
}

/// Header of an observed DA block.
#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode)]
pub struct DaHeader {
    pub number: u64,
    pub hash: H256,
}

/// A DA-chain transaction. The argument bytes are opaque at this level; the
/// codec decides whether they embed settlement data.
#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode)]
pub struct Extrinsic {
    pub app_id: AppId,
    pub call_index: CallIndex,
    pub args: Vec<u8>,
}

/// An observed DA block: ordered extrinsics under a numbered header.
#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode)]
pub struct DaBlock {
    pub header: DaHeader,
    pub extrinsics: Vec<Extrinsic>,
}

/// Leading bytes of every blob this bridge writes to the DA chain. Anything
/// submitted under our app id that does not start with these bytes is not
/// ours.
pub const BLOB_MAGIC: [u8; 4] = *b"avsb";

/// Self-describing payload wrapper carrying an encoded settlement block.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Blob {
    pub data: Vec<u8>,
}

impl Blob {
    pub fn new(data: Vec<u8>) -> Self {
        Blob { data }
    }
}

impl Encode for Blob {
    fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
        dest.write(&BLOB_MAGIC);
        self.data.encode_to(dest);
    }
}

impl Decode for Blob {
    fn decode<I: Input>(input: &mut I) -> Result<Self, CodecError> {
        let mut magic = [0u8; 4];
        input.read(&mut magic)?;
        if magic != BLOB_MAGIC {
            return Err("blob magic mismatch".into());
        }
        let data = Vec::<u8>::decode(input)?;
        Ok(Blob { data })
    }
}
