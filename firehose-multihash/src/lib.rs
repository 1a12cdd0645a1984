//! # firehose-multihash
//!
//! Implementation of the [multihash](https://github.com/multiformats/multihash)
//! wire format: `varint(code) || varint(size) || digest`.
//!
//! Digest storage is fixed at the type level; [`Multihash`] holds up to
//! 64 bytes, the largest digest size in the default code table.

mod error;
mod multihash;

pub use self::{
  error::Error,
  multihash::{
    MultihashGeneric,
    SHA2_256,
  },
};

/// A multihash with an allocated digest capacity of 512 bits.
pub type Multihash = MultihashGeneric<64>;
