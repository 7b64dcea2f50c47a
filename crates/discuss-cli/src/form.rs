//! Field collection for deferred actions.
//!
//! A deferred action (e.g. `addComment`) cannot run until the user has filled
//! in the fields of the child it creates. The session describes what it needs
//! as a [`FormRequest`] and hands it to a [`FormCollaborator`], which presents
//! it however the front end likes. Values come back through
//! [`crate::Session::submit`].

use discuss_core::{Action, DiscussionTree, FieldName, FieldValues, Handle};
use discuss_markup::NodePath;

use crate::{Error, Result};

/// Presents forms to the user.
pub trait FormCollaborator {
  /// Show the inputs for `form` in order, with focus on the first. Called
  /// once per deferred dispatch.
  fn present(&mut self, form: &FormRequest);

  /// The pending form was submitted or cancelled; hide it.
  fn dismiss(&mut self) {}
}

/// One input of a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPrompt {
  pub name:    FieldName,
  pub label:   &'static str,
  /// Suggested values; only the `author` field has any.
  pub choices: Vec<String>,
}

/// Everything needed to collect the fields of one deferred action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRequest {
  pub target:  Handle,
  pub action:  Action,
  /// The control that opened the form.
  pub control: NodePath,
  pub fields:  Vec<FieldPrompt>,
}

impl FormRequest {
  pub(crate) fn build(
    tree: &DiscussionTree,
    target: Handle,
    action: Action,
    control: NodePath,
  ) -> Result<Self> {
    let fields = action
      .field_schema()
      .iter()
      .map(|&name| -> Result<FieldPrompt> {
        let choices = match name {
          FieldName::Author => tree.author_choices(target)?,
          _ => Vec::new(),
        };
        Ok(FieldPrompt {
          name,
          label: name.label(),
          choices,
        })
      })
      .collect::<Result<Vec<_>>>()?;

    Ok(Self {
      target,
      action,
      control,
      fields,
    })
  }

  /// Trim submitted values and reject blank ones, in prompt order.
  pub(crate) fn check(&self, values: FieldValues) -> Result<FieldValues> {
    let values: FieldValues = values
      .iter()
      .map(|(name, value)| (name, value.trim()))
      .collect();
    for prompt in &self.fields {
      if values.get(prompt.name).is_some_and(str::is_empty) {
        return Err(Error::EmptyField(prompt.name));
      }
    }
    Ok(values)
  }
}

#[cfg(test)]
mod tests {
  use discuss_core::NewChild;

  use super::*;

  #[test]
  fn comment_form_offers_students_as_authors() {
    let mut tree = DiscussionTree::new();
    let rich = tree.add_child(tree.root(), NewChild::student("Rich")).unwrap();
    tree.add_child(tree.root(), NewChild::student("Mary")).unwrap();
    let doc = tree.add_child(rich, NewChild::document("T", "U")).unwrap();

    let form =
      FormRequest::build(&tree, doc, Action::AddComment, NodePath::default())
        .unwrap();
    assert_eq!(form.fields.len(), 2);
    assert_eq!(form.fields[0].name, FieldName::Author);
    assert_eq!(form.fields[0].choices, ["Rich", "Mary"]);
    assert_eq!(form.fields[1].name, FieldName::Text);
    assert_eq!(form.fields[1].label, "Comment");
    assert!(form.fields[1].choices.is_empty());
  }

  #[test]
  fn blank_values_are_rejected() {
    let tree = DiscussionTree::new();
    let form = FormRequest::build(
      &tree,
      tree.root(),
      Action::AddStudent,
      NodePath::default(),
    )
    .unwrap();

    let err = form.check(FieldValues::new().with("name", "   ")).unwrap_err();
    assert!(matches!(err, Error::EmptyField(FieldName::Name)));

    let ok = form.check(FieldValues::new().with("name", " Rich ")).unwrap();
    assert_eq!(ok.get(FieldName::Name), Some("Rich"));
  }
}
