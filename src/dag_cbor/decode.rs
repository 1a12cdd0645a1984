//! Strict DAG-CBOR decoding.
//!
//! DAG-CBOR narrows CBOR to a canonical subset: integer arguments must
//! be minimally encoded, lengths are definite, map keys are unique text
//! strings, and the only tag is 42, which carries a CID behind an
//! identity multibase prefix.

use std::collections::{
  btree_map::Entry,
  BTreeMap,
};

use firehose_bytecursor::ByteCursor;
use firehose_cid::Cid;

use crate::{
  error::Error,
  value::Value,
};

/// Cap on up-front container allocations. Declared lengths are attacker
/// controlled, so this only limits the initial reservation; containers
/// may still grow past it while decoding.
const PREALLOC_CAP: usize = 16 * 1024;

/// The major type of a CBOR item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MajorKind {
  UnsignedInt,
  NegativeInt,
  ByteString,
  TextString,
  Array,
  Map,
  Tag,
  Other,
}

/// A validated major byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Major(u8);

impl Major {
  /// Validates a raw major byte. Info values 28 to 31 are reserved in
  /// all major types and rejected here; unknown major-7 simple values
  /// are rejected by the value loop instead.
  pub fn from_byte(byte: u8) -> Result<Self, Error> {
    if byte & 0x1f > 0x1b {
      return Err(Error::InvalidCode(byte));
    }
    Ok(Major(byte))
  }

  pub fn kind(self) -> MajorKind {
    match self.0 >> 5 {
      0 => MajorKind::UnsignedInt,
      1 => MajorKind::NegativeInt,
      2 => MajorKind::ByteString,
      3 => MajorKind::TextString,
      4 => MajorKind::Array,
      5 => MajorKind::Map,
      6 => MajorKind::Tag,
      _ => MajorKind::Other,
    }
  }

  /// The low five info bits.
  pub fn info(self) -> u8 { self.0 & 0x1f }

  fn byte(self) -> u8 { self.0 }
}

fn read_u8(r: &mut ByteCursor<'_>) -> Result<u8, Error> {
  let mut buf = [0; 1];
  r.read_exact(&mut buf)?;
  Ok(buf[0])
}

fn read_u16(r: &mut ByteCursor<'_>) -> Result<u16, Error> {
  let mut buf = [0; 2];
  r.read_exact(&mut buf)?;
  Ok(u16::from_be_bytes(buf))
}

fn read_u32(r: &mut ByteCursor<'_>) -> Result<u32, Error> {
  let mut buf = [0; 4];
  r.read_exact(&mut buf)?;
  Ok(u32::from_be_bytes(buf))
}

fn read_u64(r: &mut ByteCursor<'_>) -> Result<u64, Error> {
  let mut buf = [0; 8];
  r.read_exact(&mut buf)?;
  Ok(u64::from_be_bytes(buf))
}

/// Reads and validates the next major byte.
pub fn read_major(r: &mut ByteCursor<'_>) -> Result<Major, Error> {
  Major::from_byte(read_u8(r)?)
}

/// Reads the integer argument of `major`, enforcing minimality: an
/// argument that would fit a shorter info slot is rejected.
pub fn read_uint(r: &mut ByteCursor<'_>, major: Major) -> Result<u64, Error> {
  match major.info() {
    info @ 0..=23 => Ok(u64::from(info)),
    24 => {
      let n = u64::from(read_u8(r)?);
      if n <= 23 {
        return Err(Error::NotMinimal);
      }
      Ok(n)
    }
    25 => {
      let n = u64::from(read_u16(r)?);
      if n <= u64::from(u8::MAX) {
        return Err(Error::NotMinimal);
      }
      Ok(n)
    }
    26 => {
      let n = u64::from(read_u32(r)?);
      if n <= u64::from(u16::MAX) {
        return Err(Error::NotMinimal);
      }
      Ok(n)
    }
    27 => {
      let n = read_u64(r)?;
      if n <= u64::from(u32::MAX) {
        return Err(Error::NotMinimal);
      }
      Ok(n)
    }
    _ => Err(Error::InvalidCode(major.byte())),
  }
}

/// Reads `len` bytes, limiting the up-front allocation since the length
/// is untrusted.
fn read_bytes(r: &mut ByteCursor<'_>, len: u64) -> Result<Vec<u8>, Error> {
  let len = len as usize;
  let mut buf = Vec::with_capacity(len.min(PREALLOC_CAP));
  let n = r.take(len).read_to_end(&mut buf);
  if n < len {
    return Err(Error::UnexpectedEof);
  }
  Ok(buf)
}

fn read_text(r: &mut ByteCursor<'_>, len: u64) -> Result<String, Error> {
  String::from_utf8(read_bytes(r, len)?).map_err(|_| Error::InvalidUtf8)
}

/// Reads the payload of tag 42: a byte string whose first byte is the
/// identity multibase prefix, followed by a binary CID.
fn read_link(r: &mut ByteCursor<'_>) -> Result<Cid, Error> {
  let major = read_major(r)?;
  if major.kind() != MajorKind::ByteString {
    return Err(Error::InvalidCode(major.byte()));
  }
  let len = read_uint(r, major)?;
  let bytes = read_bytes(r, len)?;
  match bytes.split_first() {
    Some((0, cid_bytes)) => {
      let mut r = ByteCursor::new(cid_bytes);
      Ok(Cid::read_bytes(&mut r)?)
    }
    _ => Err(Error::InvalidCidPrefix),
  }
}

/// Widens an IEEE-754 half-precision value to `f64`.
fn f16_to_f64(bits: u16) -> f64 {
  let sign = if bits >> 15 == 1 { -1.0 } else { 1.0 };
  let exp = (bits >> 10) & 0x1f;
  let frac = f64::from(bits & 0x3ff);
  match exp {
    0 => sign * frac * (2.0f64).powi(-24),
    0x1f if frac == 0.0 => sign * f64::INFINITY,
    0x1f => f64::NAN,
    _ => {
      sign * (1.0 + frac * (2.0f64).powi(-10)) * (2.0f64).powi(i32::from(exp) - 15)
    }
  }
}

/// Decodes a single DAG-CBOR value, leaving the cursor just past it.
pub fn read_value(r: &mut ByteCursor<'_>) -> Result<Value, Error> {
  let major = read_major(r)?;
  match major.kind() {
    MajorKind::UnsignedInt => Ok(Value::Unsigned(read_uint(r, major)?)),
    MajorKind::NegativeInt => {
      let n = read_uint(r, major)?;
      let n = i64::try_from(n).map_err(|_| Error::Overflow)?;
      Ok(Value::Negative(-1 - n))
    }
    MajorKind::ByteString => {
      let len = read_uint(r, major)?;
      Ok(Value::Bytes(read_bytes(r, len)?))
    }
    MajorKind::TextString => {
      let len = read_uint(r, major)?;
      Ok(Value::Text(read_text(r, len)?))
    }
    MajorKind::Array => {
      let len = read_uint(r, major)?;
      let cap = (len as usize).min(PREALLOC_CAP / std::mem::size_of::<Value>());
      let mut list = Vec::with_capacity(cap);
      for _ in 0..len {
        list.push(read_value(r)?);
      }
      Ok(Value::List(list))
    }
    MajorKind::Map => {
      let len = read_uint(r, major)?;
      let mut map = BTreeMap::new();
      for _ in 0..len {
        let key_major = read_major(r)?;
        if key_major.kind() != MajorKind::TextString {
          return Err(Error::KeyNotText);
        }
        let key_len = read_uint(r, key_major)?;
        let key = read_text(r, key_len)?;
        let value = read_value(r)?;
        match map.entry(key) {
          Entry::Occupied(e) => {
            return Err(Error::DuplicateKey(e.key().clone()));
          }
          Entry::Vacant(e) => {
            e.insert(value);
          }
        }
      }
      Ok(Value::Map(map))
    }
    MajorKind::Tag => {
      let tag = read_uint(r, major)?;
      if tag != 42 {
        return Err(Error::UnknownTag(tag));
      }
      Ok(Value::Link(read_link(r)?))
    }
    MajorKind::Other => match major.info() {
      20 => Ok(Value::Bool(false)),
      21 => Ok(Value::Bool(true)),
      22 => Ok(Value::Null),
      25 => Ok(Value::Float(f16_to_f64(read_u16(r)?))),
      26 => Ok(Value::Float(f64::from(f32::from_bits(read_u32(r)?)))),
      27 => Ok(Value::Float(f64::from_bits(read_u64(r)?))),
      _ => Err(Error::InvalidCode(major.byte())),
    },
  }
}
