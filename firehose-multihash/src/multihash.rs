use core::hash::{
  Hash,
  Hasher,
};

use firehose_bytecursor::ByteCursor;
use firehose_varint::{
  encode as varint_encode,
  read as varint_read,
};

use crate::error::Error;

/// Multicodec code for the SHA2-256 hash function.
pub const SHA2_256: u64 = 0x12;

/// A multihash generic over its maximum digest capacity `S`.
///
/// Only the first `size` digest bytes are meaningful; bytes past that are
/// unspecified and ignored by equality and hashing.
#[derive(Clone, Copy, Debug)]
pub struct MultihashGeneric<const S: usize> {
  code: u64,
  size: u8,
  digest: [u8; S],
}

impl<const S: usize> MultihashGeneric<S> {
  /// Wraps a precomputed digest.
  ///
  /// # Errors
  ///
  /// Returns `InvalidSize` if the digest does not fit the capacity `S`.
  pub fn wrap(code: u64, input_digest: &[u8]) -> Result<Self, Error> {
    if input_digest.len() > S || input_digest.len() > 255 {
      return Err(Error::InvalidSize(input_digest.len() as u64));
    }
    let size = input_digest.len() as u8;
    let mut digest = [0; S];
    digest[..input_digest.len()].copy_from_slice(input_digest);
    Ok(Self { code, size, digest })
  }

  /// The hash function code from the multicodec table.
  pub fn code(&self) -> u64 { self.code }

  /// The digest length in bytes.
  pub fn size(&self) -> u8 { self.size }

  /// The digest itself.
  pub fn digest(&self) -> &[u8] { &self.digest[..self.size as usize] }

  /// Reads the wire form `varint(code) || varint(size) || digest`.
  pub fn read(r: &mut ByteCursor<'_>) -> Result<Self, Error> {
    let code = varint_read::u64(r)?;
    let size = varint_read::u64(r)?;
    if size > S as u64 || size > 255 {
      return Err(Error::InvalidSize(size));
    }
    let mut digest = [0; S];
    r.read_exact(&mut digest[..size as usize])?;
    Ok(Self { code, size: size as u8, digest })
  }

  /// Appends the wire form onto `buf`.
  pub fn write_to(&self, buf: &mut Vec<u8>) {
    let mut code_buf = varint_encode::u64_buffer();
    buf.extend_from_slice(varint_encode::u64(self.code, &mut code_buf));
    let mut size_buf = varint_encode::u64_buffer();
    buf.extend_from_slice(varint_encode::u64(
      u64::from(self.size),
      &mut size_buf,
    ));
    buf.extend_from_slice(self.digest());
  }

  /// The length of the wire form in bytes.
  pub fn encoded_len(&self) -> usize {
    varint_encode::encoded_len(self.code)
      + varint_encode::encoded_len(u64::from(self.size))
      + self.size as usize
  }

  /// Lowers the effective digest size. The digest is never re-hashed and
  /// the size never grows.
  pub fn truncate(&self, size: u8) -> Self {
    let mut mh = *self;
    mh.size = mh.size.min(size);
    mh
  }

  /// Copies into a multihash with capacity `R`.
  ///
  /// # Errors
  ///
  /// Returns `InvalidSize` if the current digest does not fit in `R`.
  pub fn resize<const R: usize>(&self) -> Result<MultihashGeneric<R>, Error> {
    let size = self.size as usize;
    if size > R {
      return Err(Error::InvalidSize(u64::from(self.size)));
    }
    let mut digest = [0; R];
    digest[..size].copy_from_slice(&self.digest[..size]);
    Ok(MultihashGeneric { code: self.code, size: self.size, digest })
  }
}

impl<const S: usize> PartialEq for MultihashGeneric<S> {
  fn eq(&self, other: &Self) -> bool {
    self.code == other.code
      && self.size == other.size
      && self.digest() == other.digest()
  }
}

impl<const S: usize> Eq for MultihashGeneric<S> {}

impl<const S: usize> Hash for MultihashGeneric<S> {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.code.hash(state);
    self.digest().hash(state);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn hex(s: &str) -> Vec<u8> {
    (0..s.len())
      .step_by(2)
      .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
      .collect()
  }

  #[test]
  fn wrap_and_accessors() {
    let mh = MultihashGeneric::<64>::wrap(SHA2_256, &[0xab; 32]).unwrap();
    assert_eq!(mh.code(), 0x12);
    assert_eq!(mh.size(), 32);
    assert_eq!(mh.digest(), &[0xab; 32]);
  }

  #[test]
  fn wrap_rejects_digests_over_capacity() {
    let err = MultihashGeneric::<16>::wrap(SHA2_256, &[0; 32]).unwrap_err();
    assert_eq!(err, Error::InvalidSize(32));
  }

  #[test]
  fn wire_roundtrip() {
    let mh = MultihashGeneric::<64>::wrap(SHA2_256, &[7; 32]).unwrap();
    let mut buf = Vec::new();
    mh.write_to(&mut buf);
    assert_eq!(buf.len(), mh.encoded_len());
    assert_eq!(buf[0], 0x12);
    assert_eq!(buf[1], 0x20);
    let mut r = ByteCursor::new(&buf);
    assert_eq!(MultihashGeneric::<64>::read(&mut r), Ok(mh));
    assert!(r.is_empty());
  }

  #[test]
  fn read_rejects_sizes_over_capacity() {
    // code 0x12, size 0x20, but only 16 bytes of capacity.
    let mut bytes = hex("1220");
    bytes.extend_from_slice(&[0; 32]);
    let mut r = ByteCursor::new(&bytes);
    let err = MultihashGeneric::<16>::read(&mut r).unwrap_err();
    assert_eq!(err, Error::InvalidSize(32));
  }

  #[test]
  fn read_rejects_short_digests() {
    let mut bytes = hex("1220");
    bytes.extend_from_slice(&[0; 10]);
    let mut r = ByteCursor::new(&bytes);
    let err = MultihashGeneric::<64>::read(&mut r).unwrap_err();
    assert_eq!(err, Error::UnexpectedEof);
  }

  #[test]
  fn equality_ignores_bytes_past_the_size() {
    let a = MultihashGeneric::<64>::wrap(0x55, &[1, 2, 3, 4, 5]).unwrap();
    let b = MultihashGeneric::<64>::wrap(0x55, &[1, 2, 3, 4, 9]).unwrap();
    assert_ne!(a, b);
    assert_eq!(a.truncate(4), b.truncate(4));
    assert_eq!(a.truncate(4).digest(), &[1, 2, 3, 4]);
  }

  #[test]
  fn truncate_never_grows() {
    let mh = MultihashGeneric::<64>::wrap(0x55, &[1, 2, 3]).unwrap();
    assert_eq!(mh.truncate(10).size(), 3);
    assert_eq!(mh.truncate(2).size(), 2);
  }

  #[test]
  fn resize_between_capacities() {
    let mh = MultihashGeneric::<64>::wrap(SHA2_256, &[9; 32]).unwrap();
    let grown: MultihashGeneric<128> = mh.resize().unwrap();
    assert_eq!(grown.digest(), mh.digest());
    let shrunk: Result<MultihashGeneric<16>, _> = mh.resize();
    assert_eq!(shrunk.unwrap_err(), Error::InvalidSize(32));
    let exact: MultihashGeneric<32> = mh.resize().unwrap();
    assert_eq!(exact.digest(), mh.digest());
  }

  #[test]
  fn zero_sized_digests_are_legal() {
    let mh = MultihashGeneric::<64>::wrap(0x00, &[]).unwrap();
    let mut buf = Vec::new();
    mh.write_to(&mut buf);
    assert_eq!(buf, vec![0x00, 0x00]);
    let mut r = ByteCursor::new(&buf);
    assert_eq!(MultihashGeneric::<64>::read(&mut r), Ok(mh));
  }
}
