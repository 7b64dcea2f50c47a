//! Error types for `discuss-markup`.

use discuss_core::Handle;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Core(#[from] discuss_core::Error),

  #[error("nothing on the page is tagged {0}")]
  NotRendered(Handle),

  #[error("xml error: {0}")]
  Xml(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
