//! Interactive front end for a discussion tree.
//!
//! A [`Session`] ties a [`discuss_core::DiscussionTree`] to the
//! [`discuss_markup::Page`] showing it. Gestures on page controls are routed
//! to typed mutations, and each mutation is followed by an in-place
//! re-render of the entity it touched.

pub mod command;
pub mod error;
pub mod form;
pub mod seed;
pub mod session;

pub use error::{Error, Result};
pub use form::{FieldPrompt, FormCollaborator, FormRequest};
pub use session::{Outcome, Session, Submitted};

use serde::Deserialize;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime settings, deserialised from `discuss.toml` and `DISCUSS_*`
/// environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// Start with the sample students, documents and comments.
  #[serde(default = "default_seed_demo")]
  pub seed_demo:        bool,
  /// Label child-list containers from the first render on.
  #[serde(default)]
  pub container_labels: bool,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      seed_demo:        default_seed_demo(),
      container_labels: false,
    }
  }
}

fn default_seed_demo() -> bool { true }

#[cfg(test)]
mod tests;
