//! Cursor-backed varint reading.

use firehose_bytecursor::ByteCursor;

use crate::decode::{
  self,
  Error,
};

/// Reads a `u64` varint from the cursor one byte at a time, stopping at
/// the first terminator byte. The strict decoding rules of
/// [`decode::u64`] apply to the collected bytes.
pub fn u64(r: &mut ByteCursor<'_>) -> Result<u64, Error> {
  let mut b = [0u8; 9];
  for i in 0..b.len() {
    let n = r.read(&mut b[i..i + 1]);
    if n == 0 {
      return Err(Error::Insufficient);
    }
    if decode::is_last(b[i]) {
      return Ok(decode::u64(&b[..=i])?.0);
    }
  }
  Err(Error::Overflow)
}
