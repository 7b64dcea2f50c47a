//! Core types for the discussion tree.
//!
//! This crate knows nothing about markup or terminals. It owns the identity
//! registry, the four entity kinds and their mutators, the field schemas used
//! by the generic `add` operation, and the table of named actions.

pub mod action;
pub mod entity;
pub mod error;
pub mod fields;
pub mod handle;
pub mod registry;
pub mod tree;

pub use action::Action;
pub use entity::{Entity, Kind, NewChild};
pub use error::{Error, Result};
pub use fields::{FieldName, FieldValues};
pub use handle::Handle;
pub use registry::Registry;
pub use tree::{DiscussionTree, EntityRef};
