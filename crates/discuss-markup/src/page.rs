//! The displayed tree and the replace-in-place protocol.
//!
//! A [`Page`] holds the markup currently on screen, rooted at a `body`
//! element. After an entity changes, [`Page::replace_rendering`] swaps its
//! stale wrapper for a fresh rendering at exactly the same position, so the
//! handle tag keeps resolving and siblings are left alone.

use discuss_core::{Action, DiscussionTree, Handle, Kind};

use crate::{Element, Error, Node, NodePath, Result, render};

/// Classes of the elements that hold child lists.
const CONTAINER_CLASSES: [&str; 4] = [
  Kind::Discussion.children_label(),
  Kind::Student.children_label(),
  Kind::Document.children_label(),
  Kind::Comment.children_label(),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
  body:   Element,
  labels: bool,
}

impl Page {
  /// Render the whole discussion into a fresh page.
  pub fn mount(tree: &DiscussionTree) -> Result<Self> {
    let root = tree.root_ref()?;
    Ok(Self {
      body:   Element::new("body").with_child(render(root)),
      labels: false,
    })
  }

  pub fn body(&self) -> &Element { &self.body }

  pub fn element(&self, path: &NodePath) -> Option<&Element> {
    self.body.at(path)
  }

  pub fn element_mut(&mut self, path: &NodePath) -> Option<&mut Element> {
    self.body.at_mut(path)
  }

  pub fn to_markup(&self) -> Result<String> { self.body.to_markup() }

  // ── Lookup ──────────────────────────────────────────────────────────────

  /// Paths of every entity wrapper tagged with `handle`. After any sequence
  /// of replacements there is exactly one.
  pub fn tagged(&self, handle: Handle) -> Vec<NodePath> {
    let tag = handle.to_string();
    self.body.find_paths(
      &NodePath::default(),
      |el: &Element| el.has_class("actor") && el.id() == Some(tag.as_str()),
      |_: &Element| true,
    )
  }

  /// The wrapper currently displayed for `handle`.
  pub fn find(&self, handle: Handle) -> Option<NodePath> {
    self.tagged(handle).into_iter().next()
  }

  /// The nearest entity wrapper at or above `path`.
  pub fn closest_actor(&self, path: &NodePath) -> Option<NodePath> {
    let mut current = Some(path.clone());
    while let Some(path) = current {
      if self.element(&path).is_some_and(|el| el.has_class("actor")) {
        return Some(path);
      }
      current = path.parent();
    }
    None
  }

  /// The control for `action` belonging to `handle` itself, not to one of
  /// its descendants.
  pub fn find_control(&self, handle: Handle, action: Action) -> Option<NodePath> {
    let wrapper_path = self.find(handle)?;
    let wrapper = self.element(&wrapper_path)?;
    let name = action.to_string();
    wrapper
      .find_paths(
        &wrapper_path,
        |el: &Element| el.attr("data-action") == Some(name.as_str()),
        |el: &Element| !el.has_class("actor"),
      )
      .into_iter()
      .next()
  }

  /// The first action control inside the wrapper at `wrapper_path`. This is
  /// where focus lands after the wrapper is replaced.
  pub fn first_control(&self, wrapper_path: &NodePath) -> Option<NodePath> {
    self
      .element(wrapper_path)?
      .find_paths(
        wrapper_path,
        |el: &Element| el.has_class("action"),
        |_: &Element| true,
      )
      .into_iter()
      .next()
  }

  // ── Replace protocol ────────────────────────────────────────────────────

  /// Re-render `handle` and splice the result into the position of the stale
  /// wrapper. Returns the path of the new node, which is the old node's path.
  pub fn replace_rendering(
    &mut self,
    tree: &DiscussionTree,
    handle: Handle,
  ) -> Result<NodePath> {
    let mut fresh = render(tree.get(handle)?);
    if self.labels {
      label_containers(&mut fresh);
    }

    let path = self.find(handle).ok_or(Error::NotRendered(handle))?;
    let (Some(parent_path), Some(index)) = (path.parent(), path.last()) else {
      return Err(Error::NotRendered(handle));
    };
    let parent = self
      .body
      .at_mut(&parent_path)
      .ok_or(Error::NotRendered(handle))?;

    let siblings = parent.children_mut();
    siblings.insert(index, fresh.into());
    siblings.remove(index + 1);

    tracing::debug!(%handle, %path, "replaced rendering");
    Ok(path)
  }

  // ── Container labels ────────────────────────────────────────────────────

  /// Give every child-list container `role="region"` and an `aria-label`
  /// naming its contents. Stays on for nodes spliced in later.
  pub fn add_container_labels(&mut self) {
    self.labels = true;
    label_containers(&mut self.body);
    tracing::debug!("container labels enabled");
  }

  pub fn labels_enabled(&self) -> bool { self.labels }
}

fn label_containers(root: &mut Element) {
  let mut pending = vec![root];
  while let Some(el) = pending.pop() {
    if let Some(class) = el
      .attr("class")
      .filter(|class| CONTAINER_CLASSES.contains(class))
      .map(str::to_string)
    {
      el.set_attr("role", "region");
      el.set_attr("aria-label", class);
    }
    pending.extend(el.children_mut().iter_mut().filter_map(Node::as_element_mut));
  }
}
