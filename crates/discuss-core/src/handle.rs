//! Opaque entity handles.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

const TAG_PREFIX: &str = "actor";

/// Process-unique identity of an entity. Rendered into markup as `actor{n}`.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct Handle(u64);

impl Handle {
  pub(crate) fn from_index(index: usize) -> Self { Self(index as u64) }

  pub(crate) fn index(self) -> usize { self.0 as usize }
}

impl fmt::Display for Handle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{TAG_PREFIX}{}", self.0)
  }
}

impl FromStr for Handle {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    s.strip_prefix(TAG_PREFIX)
      .filter(|digits| is_canonical(digits))
      .and_then(|digits| digits.parse::<u64>().ok())
      .map(Handle)
      .ok_or_else(|| Error::InvalidHandle(s.to_string()))
  }
}

/// Plain decimal digits with no sign and no leading zero, so each handle has
/// exactly one tag.
fn is_canonical(digits: &str) -> bool {
  digits.bytes().all(|b| b.is_ascii_digit())
    && (digits == "0" || !digits.starts_with('0'))
}
