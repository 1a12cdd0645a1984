use crate::error::Error;

/// The version of a CID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Version {
  /// The implicit, legacy version.
  V0,
  /// The self-describing version.
  V1,
}

impl From<Version> for u64 {
  fn from(v: Version) -> u64 {
    match v {
      Version::V0 => 0,
      Version::V1 => 1,
    }
  }
}

impl TryFrom<u64> for Version {
  type Error = Error;

  fn try_from(raw: u64) -> Result<Self, Error> {
    match raw {
      0 => Ok(Version::V0),
      1 => Ok(Version::V1),
      _ => Err(Error::InvalidCidVersion(raw)),
    }
  }
}
