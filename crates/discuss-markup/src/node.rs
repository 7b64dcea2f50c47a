//! A minimal element tree and its serialisation.
//!
//! Uses `quick-xml`'s writer API, so attribute values and text are escaped on
//! the way out.

use std::fmt;

use quick_xml::{
  Writer,
  events::{BytesEnd, BytesStart, BytesText, Event},
};

use crate::{Error, Result};

/// Elements written as `<tag/>` and never given children.
const VOID_TAGS: &[&str] = &["br", "input"];

// ─── Node ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
  Element(Element),
  Text(String),
}

impl Node {
  pub fn as_element(&self) -> Option<&Element> {
    match self {
      Self::Element(el) => Some(el),
      Self::Text(_) => None,
    }
  }

  pub(crate) fn as_element_mut(&mut self) -> Option<&mut Element> {
    match self {
      Self::Element(el) => Some(el),
      Self::Text(_) => None,
    }
  }

  /// Serialise this node and its descendants.
  pub fn to_markup(&self) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    write_node(&mut writer, self)?;
    String::from_utf8(writer.into_inner()).map_err(|e| Error::Xml(e.to_string()))
  }
}

impl From<Element> for Node {
  fn from(el: Element) -> Self { Self::Element(el) }
}

impl From<&str> for Node {
  fn from(text: &str) -> Self { Self::Text(text.to_string()) }
}

impl From<String> for Node {
  fn from(text: String) -> Self { Self::Text(text) }
}

// ─── Element ─────────────────────────────────────────────────────────────────

/// Nesting depth is unbounded. Walks over an element tree keep their stack
/// on the heap, including `Clone`, `PartialEq` and `Drop`.
pub struct Element {
  tag:      String,
  attrs:    Vec<(String, String)>,
  children: Vec<Node>,
}

impl Element {
  pub fn new(tag: impl Into<String>) -> Self {
    Self {
      tag:      tag.into(),
      attrs:    Vec::new(),
      children: Vec::new(),
    }
  }

  pub fn with_attr(
    mut self,
    name: impl Into<String>,
    value: impl Into<String>,
  ) -> Self {
    self.set_attr(name, value);
    self
  }

  pub fn with_child(mut self, child: impl Into<Node>) -> Self {
    self.children.push(child.into());
    self
  }

  pub fn with_children<I>(mut self, children: I) -> Self
  where
    I: IntoIterator,
    I::Item: Into<Node>,
  {
    self.children.extend(children.into_iter().map(Into::into));
    self
  }

  pub fn tag(&self) -> &str { &self.tag }

  pub fn attr(&self, name: &str) -> Option<&str> {
    self
      .attrs
      .iter()
      .find(|(k, _)| k == name)
      .map(|(_, v)| v.as_str())
  }

  /// Replace the value of `name`, or append it if absent.
  pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
    let name = name.into();
    let value = value.into();
    match self.attrs.iter_mut().find(|(k, _)| *k == name) {
      Some((_, v)) => *v = value,
      None => self.attrs.push((name, value)),
    }
  }

  /// Remove `name`, returning its value if it was set.
  pub fn remove_attr(&mut self, name: &str) -> Option<String> {
    let index = self.attrs.iter().position(|(k, _)| k == name)?;
    Some(self.attrs.remove(index).1)
  }

  /// The `id` attribute, which carries the entity handle on wrappers.
  pub fn id(&self) -> Option<&str> { self.attr("id") }

  pub fn has_class(&self, class: &str) -> bool {
    self
      .attr("class")
      .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
  }

  pub fn children(&self) -> &[Node] { &self.children }

  pub(crate) fn children_mut(&mut self) -> &mut Vec<Node> { &mut self.children }

  /// Child elements with their index among all children.
  pub fn child_elements(&self) -> impl Iterator<Item = (usize, &Element)> {
    self
      .children
      .iter()
      .enumerate()
      .filter_map(|(i, node)| node.as_element().map(|el| (i, el)))
  }

  /// Concatenated text of all descendants.
  pub fn text_content(&self) -> String {
    let mut out = String::new();
    let mut pending: Vec<&Node> = self.children.iter().rev().collect();
    while let Some(node) = pending.pop() {
      match node {
        Node::Text(text) => out.push_str(text),
        Node::Element(el) => pending.extend(el.children.iter().rev()),
      }
    }
    out
  }

  /// The element at `path`, relative to this one.
  pub fn at(&self, path: &NodePath) -> Option<&Element> {
    path.0.iter().try_fold(self, |el, &i| el.children.get(i)?.as_element())
  }

  pub(crate) fn at_mut(&mut self, path: &NodePath) -> Option<&mut Element> {
    let mut el = self;
    for &i in &path.0 {
      el = match el.children.get_mut(i)? {
        Node::Element(child) => child,
        Node::Text(_) => return None,
      };
    }
    Some(el)
  }

  /// Depth-first, pre-order walk returning the path of every descendant
  /// element for which `pred` holds. `descend` decides whether to look inside
  /// an element once visited. `base` is the path of `self`.
  pub(crate) fn find_paths(
    &self,
    base: &NodePath,
    pred: impl Fn(&Element) -> bool,
    descend: impl Fn(&Element) -> bool,
  ) -> Vec<NodePath> {
    let mut out = Vec::new();
    let mut path = base.clone();
    let mut open: Vec<(&Element, usize)> = vec![(self, 0)];

    while let Some((el, next)) = open.last_mut() {
      let index = *next;
      *next += 1;
      let el: &Element = *el;

      match el.children.get(index) {
        Some(Node::Element(child)) => {
          path.0.push(index);
          if pred(child) {
            out.push(path.clone());
          }
          if descend(child) {
            open.push((child, 0));
          } else {
            path.0.pop();
          }
        }
        Some(Node::Text(_)) => {}
        None => {
          open.pop();
          if !open.is_empty() {
            path.0.pop();
          }
        }
      }
    }
    out
  }

  fn shallow_clone(&self) -> Self {
    Self {
      tag:      self.tag.clone(),
      attrs:    self.attrs.clone(),
      children: Vec::with_capacity(self.children.len()),
    }
  }

  pub fn to_markup(&self) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    write_element(&mut writer, self)?;
    String::from_utf8(writer.into_inner()).map_err(|e| Error::Xml(e.to_string()))
  }
}

impl Clone for Element {
  fn clone(&self) -> Self {
    let mut open: Vec<(&Element, Element)> = Vec::new();
    let mut src = self;
    let mut dst = self.shallow_clone();
    loop {
      match src.children.get(dst.children.len()) {
        Some(Node::Text(text)) => dst.children.push(Node::Text(text.clone())),
        Some(Node::Element(child)) => {
          open.push((src, std::mem::replace(&mut dst, child.shallow_clone())));
          src = child;
        }
        None => match open.pop() {
          Some((parent_src, parent_dst)) => {
            let finished = std::mem::replace(&mut dst, parent_dst);
            dst.children.push(finished.into());
            src = parent_src;
          }
          None => return dst,
        },
      }
    }
  }
}

impl PartialEq for Element {
  fn eq(&self, other: &Self) -> bool {
    let mut pending = vec![(self, other)];
    while let Some((a, b)) = pending.pop() {
      if a.tag != b.tag || a.attrs != b.attrs || a.children.len() != b.children.len()
      {
        return false;
      }
      for pair in a.children.iter().zip(&b.children) {
        match pair {
          (Node::Text(x), Node::Text(y)) if x == y => {}
          (Node::Element(x), Node::Element(y)) => pending.push((x, y)),
          _ => return false,
        }
      }
    }
    true
  }
}

impl Eq for Element {}

impl Drop for Element {
  fn drop(&mut self) {
    let mut pending = std::mem::take(&mut self.children);
    while let Some(node) = pending.pop() {
      if let Node::Element(mut el) = node {
        pending.append(&mut el.children);
      }
    }
  }
}

/// Shows the element as markup.
impl fmt::Debug for Element {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.to_markup() {
      Ok(markup) => f.debug_tuple("Element").field(&markup).finish(),
      Err(_) => f
        .debug_struct("Element")
        .field("tag", &self.tag)
        .field("attrs", &self.attrs)
        .field("children", &self.children.len())
        .finish(),
    }
  }
}

// ─── NodePath ────────────────────────────────────────────────────────────────

/// Child indices leading from a page's `body` to an element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
  pub fn new(indices: impl Into<Vec<usize>>) -> Self { Self(indices.into()) }

  pub fn child(&self, index: usize) -> NodePath {
    let mut indices = self.0.clone();
    indices.push(index);
    Self(indices)
  }

  pub fn parent(&self) -> Option<NodePath> {
    let (_, rest) = self.0.split_last()?;
    Some(Self(rest.to_vec()))
  }

  /// Index among the parent's children; `None` for the body itself.
  pub fn last(&self) -> Option<usize> { self.0.last().copied() }

  pub fn indices(&self) -> &[usize] { &self.0 }

  pub fn is_ancestor_of(&self, other: &NodePath) -> bool {
    other.0.len() > self.0.len() && other.0.starts_with(&self.0)
  }
}

impl fmt::Display for NodePath {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("/")?;
    let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
    f.write_str(&parts.join("/"))
  }
}

// ─── Writer helpers ──────────────────────────────────────────────────────────

fn write_node(w: &mut Writer<Vec<u8>>, node: &Node) -> Result<()> {
  match node {
    Node::Text(text) => write_event(w, Event::Text(BytesText::new(text))),
    Node::Element(el) => write_element(w, el),
  }
}

fn write_element(w: &mut Writer<Vec<u8>>, root: &Element) -> Result<()> {
  let mut open: Vec<(&Element, usize)> = Vec::new();
  if write_start(w, root)? {
    open.push((root, 0));
  }

  while let Some((el, next)) = open.last_mut() {
    let index = *next;
    *next += 1;
    let el: &Element = *el;

    match el.children.get(index) {
      Some(Node::Text(text)) => write_event(w, Event::Text(BytesText::new(text)))?,
      Some(Node::Element(child)) => {
        if write_start(w, child)? {
          open.push((child, 0));
        }
      }
      None => {
        write_event(w, Event::End(BytesEnd::new(el.tag.as_str())))?;
        open.pop();
      }
    }
  }
  Ok(())
}

/// Write the opening tag of `el`. Returns whether a closing tag must follow.
fn write_start(w: &mut Writer<Vec<u8>>, el: &Element) -> Result<bool> {
  let mut start = BytesStart::new(el.tag.as_str());
  for (k, v) in &el.attrs {
    start.push_attribute((k.as_str(), v.as_str()));
  }

  if el.children.is_empty() && VOID_TAGS.contains(&el.tag.as_str()) {
    write_event(w, Event::Empty(start))?;
    Ok(false)
  } else {
    write_event(w, Event::Start(start))?;
    Ok(true)
  }
}

fn write_event(w: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
  w.write_event(event).map_err(|e| Error::Xml(e.to_string()))
}
