//! Named actions that markup controls can trigger.
//!
//! Controls carry an action name (`data-action="upVote"`). This module is the
//! lookup table from those names to typed operations, and from each entity
//! kind to the actions it offers.

use strum::{Display, EnumString, IntoStaticStr};

use crate::{Error, FieldName, Kind, Result};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "camelCase")]
pub enum Action {
  UpVote,
  DownVote,
  /// Label child-list containers for assistive technology. Acts on the page,
  /// not on the model.
  AddContainerLabels,
  AddStudent,
  AddDocument,
  AddComment,
  AddReply,
}

impl Action {
  /// Affordances rendered for `kind`, in display order.
  pub fn offered_by(kind: Kind) -> &'static [Action] {
    match kind {
      Kind::Discussion => &[Self::AddContainerLabels, Self::AddStudent],
      Kind::Student => &[Self::AddDocument],
      Kind::Document => &[Self::UpVote, Self::DownVote, Self::AddComment],
      Kind::Comment => &[Self::UpVote, Self::DownVote, Self::AddReply],
    }
  }

  /// Parse `name` and check that `kind` offers it.
  pub fn resolve(kind: Kind, name: &str) -> Result<Action> {
    let action: Action = name
      .parse()
      .map_err(|_| Error::UnknownAction(name.to_string()))?;
    if Self::offered_by(kind).contains(&action) {
      Ok(action)
    } else {
      Err(Error::UnsupportedAction {
        kind,
        action: name.to_string(),
      })
    }
  }

  /// Immediate actions run synchronously; the rest collect fields first.
  pub fn is_immediate(self) -> bool {
    matches!(self, Self::UpVote | Self::DownVote | Self::AddContainerLabels)
  }

  /// Inputs collected before a deferred action can run. Empty for immediate
  /// actions.
  pub fn field_schema(self) -> &'static [FieldName] {
    match self {
      Self::AddStudent => Kind::Discussion.schema(),
      Self::AddDocument => Kind::Student.schema(),
      Self::AddComment => Kind::Document.schema(),
      Self::AddReply => Kind::Comment.schema(),
      Self::UpVote | Self::DownVote | Self::AddContainerLabels => &[],
    }
  }

  /// Text shown on the control.
  pub fn label(self) -> &'static str {
    match self {
      Self::UpVote => "up vote",
      Self::DownVote => "down vote",
      Self::AddContainerLabels => "Add container labels",
      Self::AddStudent => "add student",
      Self::AddDocument => "add document",
      Self::AddComment => "add comment",
      Self::AddReply => "add reply",
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn names_are_camel_case() {
    assert_eq!(Action::UpVote.to_string(), "upVote");
    assert_eq!(
      "addContainerLabels".parse::<Action>().unwrap(),
      Action::AddContainerLabels
    );
  }

  #[test]
  fn resolve_checks_the_kind() {
    assert_eq!(
      Action::resolve(Kind::Document, "upVote").unwrap(),
      Action::UpVote
    );
    assert!(matches!(
      Action::resolve(Kind::Student, "upVote"),
      Err(Error::UnsupportedAction { kind: Kind::Student, .. })
    ));
    assert!(matches!(
      Action::resolve(Kind::Document, "explode"),
      Err(Error::UnknownAction(name)) if name == "explode"
    ));
  }

  #[test]
  fn deferred_actions_carry_their_schema() {
    for kind in [Kind::Discussion, Kind::Student, Kind::Document, Kind::Comment]
    {
      for action in Action::offered_by(kind) {
        assert_eq!(action.is_immediate(), action.field_schema().is_empty());
      }
    }
    assert_eq!(Action::AddDocument.field_schema(), &[
      FieldName::Title,
      FieldName::Url
    ]);
    assert_eq!(Action::AddReply.field_schema(), &[
      FieldName::Author,
      FieldName::Text
    ]);
  }
}
