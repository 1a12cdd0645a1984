//! # firehose-ipld
//!
//! Reader for the IPLD binary stack carried by the AT Protocol
//! firehose: strict DAG-CBOR values and CAR v1 archives, over the
//! varint, multihash, and CID layers of the multiformats family.
//!
//! A repo-subscription frame decodes as two consecutive DAG-CBOR values
//! (header and body); the body's `blocks` byte string is a CAR v1
//! archive whose blocks are DAG-CBOR records keyed by CID.

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

pub mod car;
pub mod codec;
pub mod dag_cbor;
pub mod error;
pub mod value;

pub use car::{
  read_car,
  CarHeader,
  CarReader,
  MAX_ALLOC,
};
pub use codec::*;
pub use dag_cbor::DagCborCodec;
pub use error::Error;
pub use value::Value;

pub use firehose_bytecursor::ByteCursor;
pub use firehose_cid::{
  Cid,
  Version,
};

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    car::tests::{
      block_frame,
      header_frame,
    },
    value::tests::{
      cbor_bytes,
      cbor_head,
      cbor_link,
      cbor_text,
      test_cid,
    },
  };

  /// A subscription frame the way the firehose emits one: a header
  /// value, a body value, and a CAR archive inside the body's `blocks`
  /// byte string.
  #[test]
  fn firehose_frame_end_to_end() {
    let commit_cid = test_cid(0x21);
    let record_cid = test_cid(0x42);

    // Two records inside the archive.
    let mut commit_block = Vec::new();
    cbor_head(5, 1, &mut commit_block);
    cbor_text("data", &mut commit_block);
    cbor_link(&record_cid, &mut commit_block);
    let mut record_block = Vec::new();
    cbor_head(5, 1, &mut record_block);
    cbor_text("text", &mut record_block);
    cbor_text("hello world", &mut record_block);

    let mut archive = Vec::new();
    header_frame(&[commit_cid], 1, &mut archive);
    block_frame(&commit_cid, &commit_block, &mut archive);
    block_frame(&record_cid, &record_block, &mut archive);

    // The frame: an event header value, then a body value carrying the
    // archive.
    let mut frame = Vec::new();
    cbor_head(5, 2, &mut frame);
    cbor_text("op", &mut frame);
    cbor_head(0, 1, &mut frame);
    cbor_text("t", &mut frame);
    cbor_text("#commit", &mut frame);
    cbor_head(5, 3, &mut frame);
    cbor_text("blocks", &mut frame);
    cbor_bytes(&archive, &mut frame);
    cbor_text("prev", &mut frame);
    frame.push(0xf6);
    cbor_text("seq", &mut frame);
    cbor_head(0, 1042, &mut frame);

    let mut r = ByteCursor::new(&frame);
    let header = Value::decode(&mut r).unwrap();
    assert_eq!(header.as_map().unwrap()["t"].as_text(), Some("#commit"));

    let body = Value::decode(&mut r).unwrap();
    assert!(r.is_empty());
    let body_map = body.as_map().unwrap();
    assert_eq!(body_map["seq"].as_u64(), Some(1042));
    assert_eq!(body_map["prev"].as_opt_cid(), Some(None));

    let (car_header, blocks) =
      read_car(body_map["blocks"].as_bytes().unwrap()).unwrap();
    assert_eq!(car_header.roots(), &[commit_cid]);
    assert_eq!(blocks.len(), 2);

    let commit: Value = DagCborCodec.decode(&blocks[&commit_cid]).unwrap();
    let data = commit.as_map().unwrap()["data"].as_cid().unwrap();
    assert_eq!(data, &record_cid);

    let record: Value = DagCborCodec.decode(&blocks[data]).unwrap();
    assert_eq!(
      record.as_map().unwrap()["text"].as_text(),
      Some("hello world")
    );

    // Every link in the commit is resolvable against the block map.
    let mut links = Vec::new();
    commit.references(&mut links);
    assert!(links.iter().all(|cid| blocks.contains_key(cid)));
  }
}
