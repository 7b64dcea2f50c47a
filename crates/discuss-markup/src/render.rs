//! Entity → markup.
//!
//! Rendering reads the tree and nothing else: it never fails and always
//! renders every descendant.

use discuss_core::{Action, EntityRef, Kind};

use crate::Element;

/// Wrapper tag for a rendered child list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListKind {
  #[default]
  Unordered,
  Ordered,
}

impl ListKind {
  fn tag(self) -> &'static str {
    match self {
      Self::Unordered => "ul",
      Self::Ordered => "ol",
    }
  }

  /// Students and documents are plain lists; comment threads are numbered.
  pub fn for_children_of(kind: Kind) -> Self {
    match kind {
      Kind::Discussion | Kind::Student => Self::Unordered,
      Kind::Document | Kind::Comment => Self::Ordered,
    }
  }
}

/// Render `entity` and all of its descendants.
///
/// Descendants are rendered from a work stack, so thread depth is limited
/// only by memory.
pub fn render(entity: EntityRef<'_>) -> Element {
  let mut open: Vec<Frame<'_>> = Vec::new();
  let mut frame = Frame::new(entity);
  loop {
    if let Some(child) = frame.pending.next() {
      open.push(std::mem::replace(&mut frame, Frame::new(child)));
      continue;
    }

    let finished = frame.finish();
    match open.pop() {
      Some(parent) => {
        frame = parent;
        frame.items.push(list_item(finished));
      }
      None => return finished,
    }
  }
}

/// Render each item as one `li` of a list, keeping the given order.
pub fn render_list<'a, I>(items: I, list: ListKind) -> Element
where
  I: IntoIterator<Item = EntityRef<'a>>,
{
  Element::new(list.tag())
    .with_children(items.into_iter().map(|item| list_item(render(item))))
}

fn list_item(rendered: Element) -> Element { Element::new("li").with_child(rendered) }

/// An entity whose children are still being rendered.
struct Frame<'a> {
  entity:  EntityRef<'a>,
  pending: std::vec::IntoIter<EntityRef<'a>>,
  items:   Vec<Element>,
}

impl<'a> Frame<'a> {
  fn new(entity: EntityRef<'a>) -> Self {
    let pending: Vec<EntityRef<'a>> = entity.children().collect();
    Self {
      entity,
      items: Vec::with_capacity(pending.len()),
      pending: pending.into_iter(),
    }
  }

  fn finish(self) -> Element {
    let entity = self.entity;
    let kind = entity.kind();
    let kind_name: &'static str = kind.into();

    Element::new("div")
      .with_attr("class", format!("{kind_name} actor"))
      .with_attr("id", entity.handle().to_string())
      .with_attr("data-kind", kind_name)
      .with_child(header(entity))
      .with_child(actions(kind))
      .with_child(children(kind, self.items))
  }
}

// ─── Parts ───────────────────────────────────────────────────────────────────

fn header(entity: EntityRef<'_>) -> Element {
  let votes = entity.votes().unwrap_or_default();
  match entity.kind() {
    Kind::Discussion => Element::new("h1")
      .with_attr("class", "info")
      .with_child("Discussion"),
    Kind::Student => Element::new("h2")
      .with_attr("class", "info")
      .with_child(format!(
        "{}: {} documents",
        entity.name().unwrap_or_default(),
        entity.child_count()
      )),
    Kind::Document => Element::new("h3")
      .with_attr("class", "info")
      .with_child(
        Element::new("a")
          .with_attr("href", entity.url().unwrap_or_default())
          .with_child(entity.title().unwrap_or_default()),
      )
      .with_child(Element::new("br"))
      .with_child(format!("({votes} votes)")),
    Kind::Comment => Element::new("div")
      .with_attr("class", "info")
      .with_child(format!(
        "From {} ({votes} votes):",
        entity.author().unwrap_or_default()
      ))
      .with_child(Element::new("br"))
      .with_child(entity.text().unwrap_or_default()),
  }
}

fn actions(kind: Kind) -> Element {
  Element::new("div")
    .with_attr("class", "actions")
    .with_children(Action::offered_by(kind).iter().map(|a| control(*a)))
}

fn control(action: Action) -> Element {
  let class = if action.is_immediate() {
    "action immediate"
  } else {
    "action"
  };

  match action {
    // Rendered as a checkbox.
    Action::AddContainerLabels => Element::new("label")
      .with_child(format!("{} ", action.label()))
      .with_child(
        Element::new("input")
          .with_attr("type", "checkbox")
          .with_attr("class", class)
          .with_attr("data-action", action.to_string()),
      ),
    _ => Element::new("button")
      .with_attr("class", class)
      .with_attr("data-action", action.to_string())
      .with_child(action.label()),
  }
}

fn children(kind: Kind, items: Vec<Element>) -> Element {
  let container = Element::new("div").with_attr("class", kind.children_label());

  if items.is_empty() {
    container.with_child(placeholder(kind))
  } else {
    container.with_child(
      Element::new(ListKind::for_children_of(kind).tag()).with_children(items),
    )
  }
}

fn placeholder(kind: Kind) -> &'static str {
  match kind {
    Kind::Discussion => "no students",
    Kind::Student => "no documents to discuss",
    Kind::Document => "no comments",
    Kind::Comment => "no replies",
  }
}
