use firehose_bytecursor::ByteCursor;

use crate::{
  codec::{
    Codec,
    Decode,
    UnsupportedCodec,
  },
  error::Error,
  value::Value,
};

pub mod decode;

/// A struct representing the dag-cbor IPLD codec.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct DagCborCodec;

impl Codec for DagCborCodec {}

impl From<DagCborCodec> for u64 {
  fn from(_: DagCborCodec) -> Self { 0x71 }
}

impl TryFrom<u64> for DagCborCodec {
  type Error = UnsupportedCodec;

  fn try_from(n: u64) -> Result<Self, Self::Error> {
    match n {
      0x71 => Ok(Self),
      n => Err(UnsupportedCodec(n)),
    }
  }
}

impl Decode<DagCborCodec> for Value {
  fn decode(_: DagCborCodec, r: &mut ByteCursor<'_>) -> Result<Self, Error> {
    decode::read_value(r)
  }
}
