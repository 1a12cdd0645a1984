use firehose_bytecursor::ByteCursor;

use crate::error::Error;

/// Raised when constructing a codec from an unknown multicodec number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnsupportedCodec(pub u64);

pub trait Codec:
  Copy
  + Unpin
  + Send
  + Sync
  + 'static
  + Sized
  + TryFrom<u64, Error = UnsupportedCodec>
  + Into<u64> {
  /// Decodes a single value of type `T` from the front of `bytes`.
  ///
  /// # Errors
  ///
  /// Will return `Err` if the bytes are not a valid encoding of `T`
  /// under this codec.
  fn decode<T: Decode<Self>>(&self, bytes: &[u8]) -> Result<T, Error> {
    let mut r = ByteCursor::new(bytes);
    T::decode(*self, &mut r)
  }
}

/// A trait representing the ability to decode with the codec `C` for
/// the type.
pub trait Decode<C: Codec>: Sized {
  /// Decodes the bytes in `r` using the codec `C` into `Self`. The
  /// cursor is left just past the decoded value, so consecutive values
  /// can be read back to back.
  ///
  /// # Errors
  ///
  /// Will return `Err` if `r` did not contain a valid encoding of the
  /// type with codec `C`.
  fn decode(c: C, r: &mut ByteCursor<'_>) -> Result<Self, Error>;
}
