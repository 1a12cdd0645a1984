use std::fmt;

use firehose_bytecursor::ByteCursor;
use firehose_multihash::{
  MultihashGeneric,
  SHA2_256,
};
use firehose_varint::{
  encode as varint_encode,
  read as varint_read,
};
use multibase::Base;

use crate::{
  error::Error,
  version::Version,
};

/// Multicodec code for the DAG-PB content codec.
pub const DAG_PB: u64 = 0x70;

/// A content identifier generic over its multihash digest capacity `S`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CidGeneric<const S: usize> {
  version: Version,
  codec: u64,
  hash: MultihashGeneric<S>,
}

impl<const S: usize> CidGeneric<S> {
  /// Creates a v0 CID from a sha2-256 multihash. The codec is fixed to
  /// DAG-PB.
  ///
  /// # Errors
  ///
  /// Will return `Err` if the multihash is not sha2-256 with a 32-byte
  /// digest.
  pub fn new_v0(hash: MultihashGeneric<S>) -> Result<Self, Error> {
    if hash.code() != SHA2_256 || hash.size() != 32 {
      return Err(Error::InvalidCidV0Multihash);
    }
    Ok(Self { version: Version::V0, codec: DAG_PB, hash })
  }

  /// Creates a v1 CID from a codec and a multihash.
  pub fn new_v1(codec: u64, hash: MultihashGeneric<S>) -> Self {
    Self { version: Version::V1, codec, hash }
  }

  pub fn version(&self) -> Version { self.version }

  pub fn codec(&self) -> u64 { self.codec }

  pub fn hash(&self) -> &MultihashGeneric<S> { &self.hash }

  /// Converts to the equivalent v1 CID; v1 values pass through.
  pub fn into_v1(self) -> Self {
    match self.version {
      Version::V0 => Self { version: Version::V1, ..self },
      Version::V1 => self,
    }
  }

  /// Reads a CID from its binary form, either the implicit 34-byte v0
  /// shape or the self-describing v1 shape.
  ///
  /// # Errors
  ///
  /// Will return `Err` on an unknown version, an explicit version-0
  /// prefix, or a malformed multihash.
  pub fn read_bytes(r: &mut ByteCursor<'_>) -> Result<Self, Error> {
    let version = varint_read::u64(r)?;
    let codec = varint_read::u64(r)?;
    // A v0 CID starts with the sha2-256 code and digest length; as a v1
    // prefix that pair (version 18, codec 32) is never legal.
    if [version, codec] == [0x12, 0x20] {
      let mut digest = [0u8; 32];
      r.read_exact(&mut digest)?;
      let hash = MultihashGeneric::wrap(SHA2_256, &digest)?;
      return Self::new_v0(hash);
    }
    match Version::try_from(version)? {
      Version::V0 => Err(Error::InvalidExplicitCidV0),
      Version::V1 => Ok(Self::new_v1(codec, MultihashGeneric::read(r)?)),
    }
  }

  /// Appends the binary form onto `buf`. The v1 shape is emitted even
  /// for values read in the legacy v0 shape.
  pub fn write_bytes(&self, buf: &mut Vec<u8>) {
    let mut version_buf = varint_encode::u64_buffer();
    buf.extend_from_slice(varint_encode::u64(
      Version::V1.into(),
      &mut version_buf,
    ));
    let mut codec_buf = varint_encode::u64_buffer();
    buf.extend_from_slice(varint_encode::u64(self.codec, &mut codec_buf));
    self.hash.write_to(buf);
  }

  /// The length of the binary form in bytes.
  pub fn encoded_len(&self) -> usize {
    varint_encode::encoded_len(Version::V1.into())
      + varint_encode::encoded_len(self.codec)
      + self.hash.encoded_len()
  }

  /// The binary form as an owned buffer.
  pub fn to_bytes(&self) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(self.encoded_len());
    self.write_bytes(&mut bytes);
    bytes
  }
}

impl<const S: usize> fmt::Display for CidGeneric<S> {
  /// The multibase base32-lower form of the v1 byte encoding.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&multibase::encode(Base::Base32Lower, self.to_bytes()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Cid;
  use quickcheck::{
    Arbitrary,
    Gen,
  };
  use rand::Rng;

  fn arbitrary_cid_v1(g: &mut Gen) -> Cid {
    let mut digest = [0u8; 32];
    for x in digest.iter_mut() {
      *x = Arbitrary::arbitrary(g);
    }
    let codecs = [0x55u64, 0x70, 0x71];
    let mut rng = rand::thread_rng();
    let codec = codecs[rng.gen_range(0..codecs.len())];
    let hash = MultihashGeneric::wrap(SHA2_256, &digest).unwrap();
    Cid::new_v1(codec, hash)
  }

  #[derive(Debug, Clone)]
  struct ACid(pub Cid);

  impl Arbitrary for ACid {
    fn arbitrary(g: &mut Gen) -> Self { ACid(arbitrary_cid_v1(g)) }
  }

  fn v0_bytes(digest: &[u8; 32]) -> Vec<u8> {
    let mut bytes = vec![0x12, 0x20];
    bytes.extend_from_slice(digest);
    bytes
  }

  #[test]
  fn reads_the_implicit_v0_shape() {
    let bytes = v0_bytes(&[0xaa; 32]);
    let mut r = ByteCursor::new(&bytes);
    let cid = Cid::read_bytes(&mut r).unwrap();
    assert_eq!(cid.version(), Version::V0);
    assert_eq!(cid.codec(), DAG_PB);
    assert_eq!(cid.hash().code(), SHA2_256);
    assert_eq!(cid.hash().digest(), &[0xaa; 32]);
    assert!(r.is_empty());
  }

  #[test]
  fn truncated_v0_digests_fail() {
    let bytes = &v0_bytes(&[0xaa; 32])[..20];
    let mut r = ByteCursor::new(bytes);
    assert_eq!(Cid::read_bytes(&mut r), Err(Error::UnexpectedEof));
  }

  #[test]
  fn explicit_v0_is_rejected() {
    let mut bytes = vec![0x00, 0x70];
    bytes.extend_from_slice(&v0_bytes(&[0xbb; 32]));
    let mut r = ByteCursor::new(&bytes);
    assert_eq!(Cid::read_bytes(&mut r), Err(Error::InvalidExplicitCidV0));
  }

  #[test]
  fn unknown_versions_are_rejected() {
    let bytes = [0x02, 0x55, 0x12, 0x00];
    let mut r = ByteCursor::new(&bytes);
    assert_eq!(Cid::read_bytes(&mut r), Err(Error::InvalidCidVersion(2)));
  }

  #[test]
  fn v0_writes_in_the_v1_shape() {
    let bytes = v0_bytes(&[0xcc; 32]);
    let mut r = ByteCursor::new(&bytes);
    let cid = Cid::read_bytes(&mut r).unwrap();
    let out = cid.to_bytes();
    assert_eq!(out.len(), 36);
    assert_eq!(out.len(), cid.encoded_len());
    assert_eq!(&out[..4], &[0x01, 0x70, 0x12, 0x20]);
    assert_eq!(&out[4..], &[0xcc; 32]);
  }

  #[test]
  fn into_v1_preserves_codec_and_hash() {
    let hash = MultihashGeneric::wrap(SHA2_256, &[0xdd; 32]).unwrap();
    let v0 = Cid::new_v0(hash).unwrap();
    let v1 = v0.into_v1();
    assert_eq!(v1.version(), Version::V1);
    assert_eq!(v1.codec(), v0.codec());
    assert_eq!(v1.hash(), v0.hash());
    assert_eq!(v1.into_v1(), v1);
    // The version is part of structural identity.
    assert_ne!(v0, v1);
    // But both emit the same canonical bytes.
    assert_eq!(v0.to_bytes(), v1.to_bytes());
  }

  #[test]
  fn new_v0_enforces_the_hash_shape() {
    let wrong_code = MultihashGeneric::wrap(0x55, &[0; 32]).unwrap();
    assert_eq!(Cid::new_v0(wrong_code), Err(Error::InvalidCidV0Multihash));
    let wrong_size = MultihashGeneric::wrap(SHA2_256, &[0; 20]).unwrap();
    assert_eq!(Cid::new_v0(wrong_size), Err(Error::InvalidCidV0Multihash));
  }

  #[quickcheck]
  fn v1_roundtrips_at_the_byte_level(x: ACid) -> bool {
    let cid = x.0;
    let bytes = cid.to_bytes();
    let mut r = ByteCursor::new(&bytes);
    Cid::read_bytes(&mut r) == Ok(cid) && r.is_empty()
  }

  #[quickcheck]
  fn display_is_multibase_base32_lower(x: ACid) -> bool {
    let s = x.0.to_string();
    s.starts_with('b')
      && s[1..]
        .chars()
        .all(|c| "abcdefghijklmnopqrstuvwxyz234567".contains(c))
  }

  #[test]
  fn display_of_v0_uses_the_v1_form() {
    let bytes = v0_bytes(&[0xee; 32]);
    let mut r = ByteCursor::new(&bytes);
    let cid = Cid::read_bytes(&mut r).unwrap();
    let s = cid.to_string();
    assert!(s.starts_with('b'));
    assert!(!s.contains('='));
    assert_eq!(s, cid.into_v1().to_string());
  }
}
