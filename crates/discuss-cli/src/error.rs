//! Error type for `discuss-cli`.

use discuss_core::FieldName;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Core(#[from] discuss_core::Error),

  #[error(transparent)]
  Markup(#[from] discuss_markup::Error),

  #[error("no form is waiting for input")]
  NoPendingForm,

  #[error("field {0} must not be blank")]
  EmptyField(FieldName),

  #[error("invalid command: {0}")]
  InvalidCommand(String),

  #[error("field values must be a JSON object of strings: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
