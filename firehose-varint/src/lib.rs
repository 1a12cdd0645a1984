//! # firehose-varint
//!
//! Unsigned LEB128-style varints as used by the multiformats stack.
//!
//! Every byte except the last has its high bit set; the low seven bits
//! carry the value little-endian. Decoding is strict: an encoding longer
//! than the target width, or one with a redundant trailing zero byte, is
//! rejected rather than accepted as an alias.

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

pub mod decode;
pub mod encode;
pub mod read;
