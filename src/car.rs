//! CAR v1 reading.
//!
//! A CAR v1 stream is a sequence of length-delimited frames, each a
//! varint byte count followed by that many bytes. The first frame is a
//! DAG-CBOR header map; every later frame is a binary CID followed by
//! the block's payload bytes.

use std::collections::HashMap;

use firehose_bytecursor::ByteCursor;
use firehose_cid::Cid;
use firehose_varint::read as varint_read;

use crate::{
  dag_cbor::decode,
  error::Error,
  value::Value,
};

/// Hard cap on a single length-delimited frame, so a hostile producer
/// cannot force an arbitrarily large allocation.
pub const MAX_ALLOC: usize = 4 * 1024 * 1024;

/// The decoded header of a CAR v1 stream.
#[derive(Clone, Debug, PartialEq)]
pub struct CarHeader {
  version: u64,
  roots: Vec<Cid>,
}

impl CarHeader {
  /// Decodes a header from the contents of the first frame.
  ///
  /// # Errors
  ///
  /// Will return `Err` unless the frame holds a map with `version` 1
  /// and a non-empty `roots` list of links.
  pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
    let mut r = ByteCursor::new(bytes);
    let value = decode::read_value(&mut r)?;
    let map = value.as_map().ok_or(Error::InvalidHeader)?;
    let version = map
      .get("version")
      .and_then(Value::as_u64)
      .ok_or(Error::InvalidHeader)?;
    if version != 1 {
      return Err(Error::UnsupportedVersion(version));
    }
    let roots = map
      .get("roots")
      .and_then(Value::as_list)
      .ok_or(Error::InvalidHeader)?
      .iter()
      .map(|root| root.as_cid().copied().ok_or(Error::InvalidHeader))
      .collect::<Result<Vec<_>, _>>()?;
    if roots.is_empty() {
      return Err(Error::EmptyCar);
    }
    Ok(CarHeader { version, roots })
  }

  pub fn version(&self) -> u64 { self.version }

  pub fn roots(&self) -> &[Cid] { &self.roots }
}

/// A frame-by-frame reader over a CAR v1 byte stream.
///
/// The frame scratch buffer is owned by the reader and reused between
/// blocks; it grows in place and is never shrunk.
#[derive(Debug)]
pub struct CarReader<'a> {
  cursor: ByteCursor<'a>,
  header: CarHeader,
  scratch: Vec<u8>,
}

impl<'a> CarReader<'a> {
  /// Reads and decodes the header frame.
  ///
  /// # Errors
  ///
  /// Will return `Err` if the stream is empty, truncated, or carries a
  /// header this version does not support.
  pub fn new(mut cursor: ByteCursor<'a>) -> Result<Self, Error> {
    let mut scratch = Vec::new();
    if !read_frame(&mut cursor, &mut scratch)? {
      return Err(Error::UnexpectedEof);
    }
    let header = CarHeader::decode(&scratch)?;
    Ok(CarReader { cursor, header, scratch })
  }

  pub fn header(&self) -> &CarHeader { &self.header }

  /// Reads the next block as `(cid, payload)`, or `None` at the end of
  /// the stream.
  ///
  /// # Errors
  ///
  /// Will return `Err` on a truncated or oversized frame, or a frame
  /// that does not start with a CID.
  pub fn next_block(&mut self) -> Result<Option<(Cid, Vec<u8>)>, Error> {
    if !read_frame(&mut self.cursor, &mut self.scratch)? {
      return Ok(None);
    }
    let mut frame = ByteCursor::new(&self.scratch);
    let cid = Cid::read_bytes(&mut frame)?;
    Ok(Some((cid, self.scratch[frame.position()..].to_vec())))
  }
}

/// Reads the next length-delimited frame into `scratch`. Returns `false`
/// on a clean end of stream; an end of stream inside the frame is an
/// error.
fn read_frame(
  cursor: &mut ByteCursor<'_>,
  scratch: &mut Vec<u8>,
) -> Result<bool, Error> {
  if cursor.is_empty() {
    return Ok(false);
  }
  let len = varint_read::u64(cursor)?;
  if len > MAX_ALLOC as u64 {
    return Err(Error::FrameTooLarge(len));
  }
  let len = len as usize;
  scratch.clear();
  let n = cursor.take(len).read_to_end(scratch);
  if n < len {
    return Err(Error::UnexpectedEof);
  }
  Ok(true)
}

/// Drains a CAR stream into a map keyed by block CID, the shape firehose
/// consumers resolve commit operations against.
///
/// # Errors
///
/// Will return `Err` if the header or any frame is malformed.
pub fn read_car(
  bytes: &[u8],
) -> Result<(CarHeader, HashMap<Cid, Vec<u8>>), Error> {
  let mut reader = CarReader::new(ByteCursor::new(bytes))?;
  let mut blocks = HashMap::new();
  while let Some((cid, payload)) = reader.next_block()? {
    blocks.insert(cid, payload);
  }
  Ok((reader.header, blocks))
}
