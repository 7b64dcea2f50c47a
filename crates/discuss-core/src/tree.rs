//! The rooted discussion tree and read-only views into it.

use std::ops::Deref;

use crate::{
  Error, FieldValues, Handle, Kind, NewChild, Registry, Result,
  entity::{Attributes, Entity},
};

// ─── DiscussionTree ──────────────────────────────────────────────────────────

/// A discussion and everything below it.
///
/// The tree owns its [`Registry`]; every entity it contains was registered
/// there, and every child handle held by an entity resolves.
#[derive(Debug)]
pub struct DiscussionTree {
  registry: Registry,
  root:     Handle,
}

impl Default for DiscussionTree {
  fn default() -> Self { Self::new() }
}

impl DiscussionTree {
  /// A discussion with no students. The root is always `actor0`.
  pub fn new() -> Self {
    let mut registry = Registry::new();
    let root = registry.register(None, Attributes::Discussion);
    Self { registry, root }
  }

  pub fn root(&self) -> Handle { self.root }

  pub fn registry(&self) -> &Registry { &self.registry }

  pub fn resolve(&self, handle: Handle) -> Result<&Entity> {
    self.registry.resolve(handle)
  }

  /// A borrowed view of `handle` that can walk to its relatives.
  pub fn get(&self, handle: Handle) -> Result<EntityRef<'_>> {
    let entity = self.registry.resolve(handle)?;
    Ok(EntityRef { tree: self, entity })
  }

  pub fn root_ref(&self) -> Result<EntityRef<'_>> { self.get(self.root) }

  // ── Construction ────────────────────────────────────────────────────────

  /// Register `child` under `parent` and append it to the parent's children.
  pub fn add_child(&mut self, parent: Handle, child: NewChild) -> Result<Handle> {
    let parent_kind = self.registry.resolve(parent)?.kind();
    if parent_kind.child_kind() != child.kind() {
      return Err(Error::ChildKindMismatch {
        parent: parent_kind,
        child:  child.kind(),
      });
    }

    let handle = self
      .registry
      .register(Some(parent), child.into_attributes());
    self.registry.resolve_mut(parent)?.push_child(handle);
    tracing::debug!(%parent, child = %handle, "appended child");
    Ok(handle)
  }

  /// Construct the child kind of `parent` from `values` and append it.
  ///
  /// Fails with [`Error::SchemaMismatch`] unless the keys of `values` are
  /// exactly the parent's [`Kind::schema`]; the tree is left unchanged.
  pub fn add(&mut self, parent: Handle, values: FieldValues) -> Result<Handle> {
    let parent_kind = self.registry.resolve(parent)?.kind();
    let child = values.into_child(parent_kind)?;
    self.add_child(parent, child)
  }

  // ── Votes ───────────────────────────────────────────────────────────────

  /// Increment the vote counter; returns the new count.
  pub fn up_vote(&mut self, handle: Handle) -> Result<u32> {
    let votes = self.votes_mut(handle)?;
    *votes = votes.saturating_add(1);
    Ok(*votes)
  }

  /// Decrement the vote counter, stopping at zero; returns the new count.
  pub fn down_vote(&mut self, handle: Handle) -> Result<u32> {
    let votes = self.votes_mut(handle)?;
    *votes = votes.saturating_sub(1);
    Ok(*votes)
  }

  fn votes_mut(&mut self, handle: Handle) -> Result<&mut u32> {
    let entity = self.registry.resolve_mut(handle)?;
    let kind = entity.kind();
    entity
      .votes_mut()
      .ok_or(Error::NotVotable { handle, kind })
  }

  // ── Context ─────────────────────────────────────────────────────────────

  /// Names of every student in the discussion that contains `handle`, found
  /// by following parent links up to the root.
  pub fn author_choices(&self, handle: Handle) -> Result<Vec<String>> {
    let root = self.get(handle)?.root();
    Ok(
      root
        .children()
        .filter_map(|student| student.name().map(str::to_string))
        .collect(),
    )
  }
}

// ─── EntityRef ───────────────────────────────────────────────────────────────

/// An entity together with the tree it lives in.
///
/// Dereferences to [`Entity`] for the attribute getters.
#[derive(Debug, Clone, Copy)]
pub struct EntityRef<'a> {
  tree:   &'a DiscussionTree,
  entity: &'a Entity,
}

impl<'a> EntityRef<'a> {
  pub fn entity(&self) -> &'a Entity { self.entity }

  pub fn parent(&self) -> Option<EntityRef<'a>> {
    let handle = self.entity.parent()?;
    self.tree.get(handle).ok()
  }

  /// Children in insertion order.
  pub fn children(&self) -> impl Iterator<Item = EntityRef<'a>> + use<'a> {
    let tree = self.tree;
    // Child handles are registered before they are appended, so every one
    // resolves.
    self
      .entity
      .children()
      .iter()
      .filter_map(move |handle| tree.get(*handle).ok())
  }

  pub fn child_count(&self) -> usize { self.entity.children().len() }

  /// The discussion at the top of this entity's ancestry.
  pub fn root(&self) -> EntityRef<'a> {
    let mut current = *self;
    while let Some(parent) = current.parent() {
      current = parent;
    }
    current
  }

  pub fn kind(&self) -> Kind { self.entity.kind() }
}

impl Deref for EntityRef<'_> {
  type Target = Entity;

  fn deref(&self) -> &Entity { self.entity }
}
