use std::collections::BTreeMap;

use firehose_bytecursor::ByteCursor;
use firehose_cid::Cid;

use crate::{
  dag_cbor::decode,
  error::Error,
};

/// A decoded DAG-CBOR value.
#[derive(Clone, PartialEq)]
pub enum Value {
  /// Represents the absence of a value.
  Null,
  /// Represents a boolean value.
  Bool(bool),
  /// Represents an unsigned integer.
  Unsigned(u64),
  /// Represents a negative integer in `[-2^63, -1]`.
  Negative(i64),
  /// Represents a floating point value.
  Float(f64),
  /// Represents an UTF-8 string.
  Text(String),
  /// Represents a sequence of bytes.
  Bytes(Vec<u8>),
  /// Represents a list.
  List(Vec<Value>),
  /// Represents a map of strings.
  Map(BTreeMap<String, Value>),
  /// Represents a link to another block.
  Link(Cid),
}

impl std::fmt::Debug for Value {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    use Value::*;
    match self {
      Null => write!(f, "null"),
      Bool(b) => write!(f, "{:?}", b),
      Unsigned(n) => write!(f, "{:?}", n),
      Negative(n) => write!(f, "{:?}", n),
      Float(x) => write!(f, "{:?}", x),
      Text(s) => write!(f, "{:?}", s),
      Bytes(b) => write!(f, "{:?}", b),
      List(l) => write!(f, "{:?}", l),
      Map(m) => write!(f, "{:?}", m),
      Link(cid) => write!(f, "{}", cid),
    }
  }
}

impl Value {
  /// Decodes a single DAG-CBOR value from the cursor.
  ///
  /// # Errors
  ///
  /// Will return `Err` if the bytes are not strict DAG-CBOR.
  pub fn decode(r: &mut ByteCursor<'_>) -> Result<Self, Error> {
    decode::read_value(r)
  }

  /// Returns an iterator that walks this value and all its children
  /// depth first.
  pub fn iter(&self) -> ValueIter<'_> {
    ValueIter { stack: vec![Box::new(vec![self].into_iter())] }
  }

  /// Extends `set` with the links this value refers to.
  pub fn references<E: Extend<Cid>>(&self, set: &mut E) {
    for value in self.iter() {
      if let Value::Link(cid) = value {
        set.extend(std::iter::once(*cid));
      }
    }
  }

  pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
    match self {
      Value::Map(m) => Some(m),
      _ => None,
    }
  }

  pub fn as_list(&self) -> Option<&[Value]> {
    match self {
      Value::List(l) => Some(l),
      _ => None,
    }
  }

  pub fn as_bytes(&self) -> Option<&[u8]> {
    match self {
      Value::Bytes(b) => Some(b),
      _ => None,
    }
  }

  pub fn as_text(&self) -> Option<&str> {
    match self {
      Value::Text(s) => Some(s),
      _ => None,
    }
  }

  pub fn as_u64(&self) -> Option<u64> {
    match self {
      Value::Unsigned(n) => Some(*n),
      _ => None,
    }
  }

  /// The value as a signed integer, covering both integer variants.
  pub fn as_i64(&self) -> Option<i64> {
    match self {
      Value::Unsigned(n) => i64::try_from(*n).ok(),
      Value::Negative(n) => Some(*n),
      _ => None,
    }
  }

  pub fn as_cid(&self) -> Option<&Cid> {
    match self {
      Value::Link(cid) => Some(cid),
      _ => None,
    }
  }

  /// Distinguishes an absent link (`Null`) from a present one. Returns
  /// `None` when the value is neither.
  pub fn as_opt_cid(&self) -> Option<Option<&Cid>> {
    match self {
      Value::Null => Some(None),
      Value::Link(cid) => Some(Some(cid)),
      _ => None,
    }
  }

  pub fn is_null(&self) -> bool { matches!(self, Value::Null) }
}

impl<'a> Iterator for ValueIter<'a> {
  type Item = &'a Value;

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      if let Some(iter) = self.stack.last_mut() {
        if let Some(value) = iter.next() {
          match value {
            Value::List(list) => {
              self.stack.push(Box::new(list.iter()));
            }
            Value::Map(map) => {
              self.stack.push(Box::new(map.values()));
            }
            _ => {}
          }
          return Some(value);
        }
        else {
          self.stack.pop();
        }
      }
      else {
        return None;
      }
    }
  }
}

/// Depth-first value iterator.
pub struct ValueIter<'a> {
  stack: Vec<Box<dyn Iterator<Item = &'a Value> + 'a>>,
}
