//! Field names and the value mapping accepted by the generic `add`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::{Error, Kind, NewChild, Result};

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Display,
  EnumString,
  IntoStaticStr,
  Serialize,
  Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FieldName {
  Name,
  Title,
  Url,
  Author,
  Text,
}

impl FieldName {
  /// Human-facing prompt for a form input.
  pub fn label(self) -> &'static str {
    match self {
      Self::Name => "Name",
      Self::Title => "Title",
      Self::Url => "URL",
      Self::Author => "Author",
      Self::Text => "Comment",
    }
  }
}

// ─── FieldValues ─────────────────────────────────────────────────────────────

/// A field-name → value mapping, e.g. `{"title": "T", "url": "U"}`.
///
/// Keys are kept as plain strings so that a mapping carrying an unknown key
/// can still be represented and rejected by the schema check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldValues(BTreeMap<String, String>);

impl FieldValues {
  pub fn new() -> Self { Self::default() }

  /// Builder-style insert.
  pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.insert(name, value);
    self
  }

  pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
    self.0.insert(name.into(), value.into());
  }

  pub fn get(&self, name: FieldName) -> Option<&str> {
    let key: &'static str = name.into();
    self.0.get(key).map(String::as_str)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  /// Build the child that a `parent_kind` entity would append for these
  /// values. The key set must equal the parent's schema exactly; order does
  /// not matter.
  pub(crate) fn into_child(self, parent_kind: Kind) -> Result<NewChild> {
    let schema = parent_kind.schema();
    let matches = self.0.len() == schema.len()
      && schema.iter().all(|name| self.get(*name).is_some());
    if !matches {
      return Err(Error::SchemaMismatch {
        kind:     parent_kind.child_kind(),
        expected: schema.iter().map(ToString::to_string).collect(),
        got:      self.0.into_keys().collect(),
      });
    }

    let mut values = self.0;
    let mut take = |name: FieldName| {
      let key: &'static str = name.into();
      values.remove(key).unwrap_or_default()
    };

    Ok(match parent_kind {
      Kind::Discussion => NewChild::student(take(FieldName::Name)),
      Kind::Student => {
        NewChild::document(take(FieldName::Title), take(FieldName::Url))
      }
      Kind::Document | Kind::Comment => {
        NewChild::comment(take(FieldName::Author), take(FieldName::Text))
      }
    })
  }
}

impl<K, V> FromIterator<(K, V)> for FieldValues
where
  K: Into<String>,
  V: Into<String>,
{
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
  }
}
