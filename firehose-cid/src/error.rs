use firehose_bytecursor::UnexpectedEof;
use thiserror::Error;

/// Failure while reading or building a CID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
  #[error("unexpected end of input")]
  UnexpectedEof,
  #[error("invalid cid version {0}")]
  InvalidCidVersion(u64),
  /// CIDv0 admits exactly one hash shape.
  #[error("cid v0 requires a sha2-256 multihash with a 32-byte digest")]
  InvalidCidV0Multihash,
  /// Version 0 only exists in its implicit 34-byte form.
  #[error("cid v0 must not be encoded with an explicit version prefix")]
  InvalidExplicitCidV0,
  #[error("invalid varint: {0}")]
  Varint(firehose_varint::decode::Error),
  #[error("invalid multihash: {0}")]
  Multihash(firehose_multihash::Error),
}

impl From<UnexpectedEof> for Error {
  fn from(_: UnexpectedEof) -> Self { Error::UnexpectedEof }
}

impl From<firehose_varint::decode::Error> for Error {
  fn from(e: firehose_varint::decode::Error) -> Self {
    match e {
      firehose_varint::decode::Error::Insufficient => Error::UnexpectedEof,
      e => Error::Varint(e),
    }
  }
}

impl From<firehose_multihash::Error> for Error {
  fn from(e: firehose_multihash::Error) -> Self {
    match e {
      firehose_multihash::Error::UnexpectedEof => Error::UnexpectedEof,
      e => Error::Multihash(e),
    }
  }
}
