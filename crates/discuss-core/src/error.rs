//! Error types for `discuss-core`.

use thiserror::Error;

use crate::{Handle, Kind};

#[derive(Debug, Error)]
pub enum Error {
  #[error("no entity registered for handle {0}")]
  NotFound(Handle),

  #[error("not an entity handle: {0:?}")]
  InvalidHandle(String),

  #[error("fields for a new {kind} child must be {expected:?}, got {got:?}")]
  SchemaMismatch {
    kind:     Kind,
    expected: Vec<String>,
    got:      Vec<String>,
  },

  #[error("a {parent} cannot hold a {child}")]
  ChildKindMismatch { parent: Kind, child: Kind },

  #[error("{kind} {handle} has no vote counter")]
  NotVotable { handle: Handle, kind: Kind },

  #[error("unknown action name: {0:?}")]
  UnknownAction(String),

  #[error("a {kind} does not offer the {action} action")]
  UnsupportedAction { kind: Kind, action: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
