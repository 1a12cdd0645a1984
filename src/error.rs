use firehose_bytecursor::UnexpectedEof;
use thiserror::Error;

/// Errors raised while decoding the firehose wire stack.
///
/// All of these are fatal to the current decode; the cursor's position
/// after a failure is unspecified and the caller should discard it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
  #[error("unexpected end of input")]
  UnexpectedEof,
  #[error("integer argument overflows its target width")]
  Overflow,
  #[error("integer argument is not minimally encoded")]
  NotMinimal,
  /// A major byte with reserved info bits, or an unknown simple value.
  #[error("invalid major byte 0x{0:02x}")]
  InvalidCode(u8),
  /// DAG-CBOR admits no tag but 42.
  #[error("unknown cbor tag {0}")]
  UnknownTag(u64),
  /// A tag-42 payload that is empty or lacks the identity prefix.
  #[error("cbor link must be a byte string with a zero multibase prefix")]
  InvalidCidPrefix,
  #[error("invalid cid: {0}")]
  Cid(firehose_cid::Error),
  #[error("duplicate map key {0:?}")]
  DuplicateKey(String),
  #[error("map key is not a text string")]
  KeyNotText,
  #[error("text string is not valid utf-8")]
  InvalidUtf8,
  /// A CAR header that is not a map of `version` and `roots`.
  #[error("malformed car header")]
  InvalidHeader,
  #[error("unsupported car version {0}")]
  UnsupportedVersion(u64),
  #[error("car header has no roots")]
  EmptyCar,
  #[error("car frame of {0} bytes exceeds the allocation limit")]
  FrameTooLarge(u64),
}

impl From<UnexpectedEof> for Error {
  fn from(_: UnexpectedEof) -> Self { Error::UnexpectedEof }
}

impl From<firehose_varint::decode::Error> for Error {
  fn from(e: firehose_varint::decode::Error) -> Self {
    use firehose_varint::decode::Error as Varint;
    match e {
      Varint::Insufficient => Error::UnexpectedEof,
      Varint::Overflow => Error::Overflow,
      Varint::NotMinimal => Error::NotMinimal,
    }
  }
}

impl From<firehose_cid::Error> for Error {
  fn from(e: firehose_cid::Error) -> Self {
    match e {
      firehose_cid::Error::UnexpectedEof => Error::UnexpectedEof,
      e => Error::Cid(e),
    }
  }
}
