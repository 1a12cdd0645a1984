//! # firehose-cid
//!
//! Implementation of [cid](https://github.com/ipld/cid) for the firehose
//! wire stack.

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;
#[cfg(test)]
extern crate rand;

mod cid;
mod error;
mod version;

pub use self::{
  cid::{
    CidGeneric,
    DAG_PB,
  },
  error::Error,
  version::Version,
};

pub use firehose_multihash;
pub use multibase;

/// A Cid that contains a multihash with an allocated size of 512 bits.
///
/// This is the same digest size the default multihash code table has.
///
/// If you need a CID that is generic over its digest size, use
/// [`CidGeneric`] instead.
pub type Cid = CidGeneric<64>;
