//! Entity kinds and the stored entity record.
//!
//! A discussion tree has exactly four kinds of entity. Each kind fixes the kind
//! of its children and the field schema used to construct one:
//!
//! | kind       | children  | child schema      |
//! |------------|-----------|-------------------|
//! | discussion | students  | `name`            |
//! | student    | documents | `title`, `url`    |
//! | document   | comments  | `author`, `text`  |
//! | comment    | replies   | `author`, `text`  |

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::{FieldName, Handle};

// ─── Kind ────────────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Display,
  EnumString,
  IntoStaticStr,
  Serialize,
  Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Kind {
  Discussion,
  Student,
  Document,
  Comment,
}

impl Kind {
  /// The only kind this kind may hold as children. Comments nest under
  /// comments, which is what makes reply threads arbitrarily deep.
  pub fn child_kind(self) -> Kind {
    match self {
      Self::Discussion => Self::Student,
      Self::Student => Self::Document,
      Self::Document | Self::Comment => Self::Comment,
    }
  }

  /// Ordered inputs required to construct a child of this entity.
  pub fn schema(self) -> &'static [FieldName] {
    match self {
      Self::Discussion => &[FieldName::Name],
      Self::Student => &[FieldName::Title, FieldName::Url],
      Self::Document | Self::Comment => &[FieldName::Author, FieldName::Text],
    }
  }

  /// Name of the child collection, also used as the markup class of the
  /// element that contains it.
  pub const fn children_label(self) -> &'static str {
    match self {
      Self::Discussion => "students",
      Self::Student => "documents",
      Self::Document => "comments",
      Self::Comment => "replies",
    }
  }

  pub fn has_votes(self) -> bool {
    matches!(self, Self::Document | Self::Comment)
  }
}

// ─── Attributes ──────────────────────────────────────────────────────────────

/// Kind-specific scalar state. The variant is the entity's kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Attributes {
  Discussion,
  Student {
    name: String,
  },
  Document {
    title: String,
    url:   String,
    votes: u32,
  },
  Comment {
    author: String,
    text:   String,
    votes:  u32,
  },
}

/// Input to [`crate::DiscussionTree::add_child`]: a child that has been fully
/// described but not yet registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewChild {
  Student { name: String },
  Document { title: String, url: String },
  Comment { author: String, text: String },
}

impl NewChild {
  pub fn student(name: impl Into<String>) -> Self {
    Self::Student { name: name.into() }
  }

  pub fn document(title: impl Into<String>, url: impl Into<String>) -> Self {
    Self::Document {
      title: title.into(),
      url:   url.into(),
    }
  }

  pub fn comment(author: impl Into<String>, text: impl Into<String>) -> Self {
    Self::Comment {
      author: author.into(),
      text:   text.into(),
    }
  }

  pub fn kind(&self) -> Kind {
    match self {
      Self::Student { .. } => Kind::Student,
      Self::Document { .. } => Kind::Document,
      Self::Comment { .. } => Kind::Comment,
    }
  }

  pub(crate) fn into_attributes(self) -> Attributes {
    match self {
      Self::Student { name } => Attributes::Student { name },
      Self::Document { title, url } => Attributes::Document {
        title,
        url,
        votes: 0,
      },
      Self::Comment { author, text } => Attributes::Comment {
        author,
        text,
        votes: 0,
      },
    }
  }
}

// ─── Entity ──────────────────────────────────────────────────────────────────

/// A registered node of the discussion tree.
///
/// Entities are only ever created by the [`crate::Registry`] and only mutated
/// through [`crate::DiscussionTree`]; outside the crate they are read-only.
#[derive(Debug, Clone)]
pub struct Entity {
  handle:   Handle,
  /// Non-owning; `None` only for the root.
  parent:   Option<Handle>,
  children: Vec<Handle>,
  attrs:    Attributes,
}

impl Entity {
  pub(crate) fn new(
    handle: Handle,
    parent: Option<Handle>,
    attrs: Attributes,
  ) -> Self {
    Self {
      handle,
      parent,
      children: Vec::new(),
      attrs,
    }
  }

  pub fn handle(&self) -> Handle { self.handle }

  pub fn parent(&self) -> Option<Handle> { self.parent }

  /// Child handles in insertion order.
  pub fn children(&self) -> &[Handle] { &self.children }

  pub fn kind(&self) -> Kind {
    match self.attrs {
      Attributes::Discussion => Kind::Discussion,
      Attributes::Student { .. } => Kind::Student,
      Attributes::Document { .. } => Kind::Document,
      Attributes::Comment { .. } => Kind::Comment,
    }
  }

  /// Field names required by `add` on this entity.
  pub fn fields(&self) -> &'static [FieldName] { self.kind().schema() }

  pub fn name(&self) -> Option<&str> {
    match &self.attrs {
      Attributes::Student { name } => Some(name),
      _ => None,
    }
  }

  pub fn title(&self) -> Option<&str> {
    match &self.attrs {
      Attributes::Document { title, .. } => Some(title),
      _ => None,
    }
  }

  pub fn url(&self) -> Option<&str> {
    match &self.attrs {
      Attributes::Document { url, .. } => Some(url),
      _ => None,
    }
  }

  pub fn author(&self) -> Option<&str> {
    match &self.attrs {
      Attributes::Comment { author, .. } => Some(author),
      _ => None,
    }
  }

  pub fn text(&self) -> Option<&str> {
    match &self.attrs {
      Attributes::Comment { text, .. } => Some(text),
      _ => None,
    }
  }

  /// `None` for kinds without a vote counter.
  pub fn votes(&self) -> Option<u32> {
    match self.attrs {
      Attributes::Document { votes, .. } | Attributes::Comment { votes, .. } => {
        Some(votes)
      }
      _ => None,
    }
  }

  pub(crate) fn push_child(&mut self, child: Handle) {
    self.children.push(child);
  }

  pub(crate) fn votes_mut(&mut self) -> Option<&mut u32> {
    match &mut self.attrs {
      Attributes::Document { votes, .. } | Attributes::Comment { votes, .. } => {
        Some(votes)
      }
      _ => None,
    }
  }
}
