use firehose_bytecursor::UnexpectedEof;
use thiserror::Error;

/// Failure while reading or building a multihash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
  #[error("unexpected end of input")]
  UnexpectedEof,
  /// The digest size exceeds the capacity of the type.
  #[error("invalid multihash size {0}")]
  InvalidSize(u64),
  #[error("invalid varint: {0}")]
  Varint(firehose_varint::decode::Error),
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
