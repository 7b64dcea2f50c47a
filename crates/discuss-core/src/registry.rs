//! Identity registry: issues handles and resolves them back to entities.
//!
//! The registry is an append-only arena. Handle `n` is slot `n`, and slots are
//! never vacated, so a handle is never reused within a run. There is no
//! process-wide instance; whoever builds the tree owns its registry.

use crate::{
  Error, Result,
  entity::{Attributes, Entity},
  handle::Handle,
};

#[derive(Debug, Default)]
pub struct Registry {
  entities: Vec<Entity>,
}

impl Registry {
  /// An empty registry. The first handle it issues is `actor0`.
  pub fn new() -> Self { Self::default() }

  /// Store a new entity and return its freshly issued handle.
  pub(crate) fn register(
    &mut self,
    parent: Option<Handle>,
    attrs: Attributes,
  ) -> Handle {
    let handle = Handle::from_index(self.entities.len());
    self.entities.push(Entity::new(handle, parent, attrs));
    handle
  }

  pub fn resolve(&self, handle: Handle) -> Result<&Entity> {
    self.entities.get(handle.index()).ok_or_else(|| {
      tracing::warn!(%handle, "handle does not resolve to an entity");
      Error::NotFound(handle)
    })
  }

  pub(crate) fn resolve_mut(&mut self, handle: Handle) -> Result<&mut Entity> {
    self.entities.get_mut(handle.index()).ok_or_else(|| {
      tracing::warn!(%handle, "handle does not resolve to an entity");
      Error::NotFound(handle)
    })
  }

  /// Number of handles issued so far.
  pub fn len(&self) -> usize { self.entities.len() }

  pub fn is_empty(&self) -> bool { self.entities.is_empty() }
}
