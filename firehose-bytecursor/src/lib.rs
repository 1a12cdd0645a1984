//! # firehose-bytecursor
//!
//! A bounded sequential reader over an in-memory byte slice.
//!
//! `ByteCursor` borrows its input buffer and advances a position through
//! it; the caller keeps ownership of the bytes. `take` hands out a
//! sub-reader that is capped at a byte limit and moves the parent's
//! position in lockstep.

use thiserror::Error;

/// A read needed more bytes than the cursor holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("unexpected end of input")]
pub struct UnexpectedEof;

/// A cursor over a borrowed byte buffer.
#[derive(Clone, Debug)]
pub struct ByteCursor<'a> {
  buf: &'a [u8],
  pos: usize,
}

impl<'a> ByteCursor<'a> {
  pub fn new(buf: &'a [u8]) -> Self { ByteCursor { buf, pos: 0 } }

  /// The current position within the underlying buffer.
  pub fn position(&self) -> usize { self.pos }

  /// Moves the position, clamped to the end of the buffer.
  pub fn set_position(&mut self, pos: usize) {
    self.pos = pos.min(self.buf.len());
  }

  /// Bytes left to read.
  pub fn remaining(&self) -> usize { self.buf.len() - self.pos }

  pub fn is_empty(&self) -> bool { self.pos >= self.buf.len() }

  /// Copies up to `out.len()` bytes into `out`, returning how many were
  /// copied. Returns 0 at the end of the buffer.
  pub fn read(&mut self, out: &mut [u8]) -> usize {
    let n = out.len().min(self.remaining());
    out[..n].copy_from_slice(&self.buf[self.pos..self.pos + n]);
    self.pos += n;
    n
  }

  /// Fills `out` exactly. On failure the position is advanced to the end
  /// of the buffer.
  pub fn read_exact(&mut self, out: &mut [u8]) -> Result<(), UnexpectedEof> {
    if out.len() > self.remaining() {
      self.pos = self.buf.len();
      return Err(UnexpectedEof);
    }
    self.read(out);
    Ok(())
  }

  /// Returns a sub-reader over at most `limit` further bytes. Reads on
  /// the sub-reader advance this cursor's position.
  pub fn take(&mut self, limit: usize) -> Take<'_, 'a> {
    Take { cursor: self, limit }
  }
}

/// A limited view over a parent [`ByteCursor`].
#[derive(Debug)]
pub struct Take<'p, 'a> {
  cursor: &'p mut ByteCursor<'a>,
  limit: usize,
}

impl<'p, 'a> Take<'p, 'a> {
  /// Bytes this view will still hand out, ignoring how many the parent
  /// actually holds.
  pub fn limit(&self) -> usize { self.limit }

  pub fn read(&mut self, out: &mut [u8]) -> usize {
    let n = out.len().min(self.limit);
    let n = self.cursor.read(&mut out[..n]);
    self.limit -= n;
    n
  }

  pub fn read_exact(&mut self, out: &mut [u8]) -> Result<(), UnexpectedEof> {
    if out.len() > self.limit {
      self.cursor.pos = self.cursor.buf.len();
      self.limit = 0;
      return Err(UnexpectedEof);
    }
    match self.cursor.read_exact(out) {
      Ok(()) => {
        self.limit -= out.len();
        Ok(())
      }
      Err(e) => {
        self.limit = 0;
        Err(e)
      }
    }
  }

  /// Appends all remaining bytes, up to the limit, onto `sink`.
  /// Returns how many bytes were appended.
  pub fn read_to_end(&mut self, sink: &mut Vec<u8>) -> usize {
    let n = self.limit.min(self.cursor.remaining());
    sink.extend_from_slice(&self.cursor.buf[self.cursor.pos..self.cursor.pos + n]);
    self.cursor.pos += n;
    self.limit -= n;
    n
  }
}
