//! Gesture dispatch and the mutate-then-replace cycle.

use discuss_core::{Action, DiscussionTree, FieldValues, Handle, Kind};
use discuss_markup::{NodePath, Page};

use crate::{Error, FormCollaborator, FormRequest, Result};

/// What a gesture led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  /// The element is not an action control; nothing happened.
  Ignored,
  /// `target` was mutated and its rendering at `path` replaced.
  Replaced { target: Handle, path: NodePath },
  /// Child-list containers are now labelled.
  Labelled,
  /// A form was handed to the collaborator; nothing changes until it is
  /// submitted.
  FormOpened { target: Handle, action: Action },
}

/// A form that was submitted and applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted {
  /// The entity that received the new child.
  pub target: Handle,
  /// Path of its fresh rendering, which is where the stale one was.
  pub path:   NodePath,
  /// The first action control inside the fresh rendering. Focus returns
  /// here once the form closes.
  pub focus:  Option<NodePath>,
}

/// A discussion tree, the page displaying it, and at most one pending form.
pub struct Session<F> {
  tree:    DiscussionTree,
  page:    Page,
  forms:   F,
  pending: Option<FormRequest>,
}

impl<F: FormCollaborator> Session<F> {
  pub fn new(tree: DiscussionTree, forms: F) -> Result<Self> {
    let page = Page::mount(&tree)?;
    Ok(Self {
      tree,
      page,
      forms,
      pending: None,
    })
  }

  pub fn tree(&self) -> &DiscussionTree { &self.tree }

  pub fn page(&self) -> &Page { &self.page }

  pub fn page_mut(&mut self) -> &mut Page { &mut self.page }

  pub fn forms(&self) -> &F { &self.forms }

  /// The form waiting for [`Session::submit`], if any.
  pub fn pending(&self) -> Option<&FormRequest> { self.pending.as_ref() }

  // ── Gestures ────────────────────────────────────────────────────────────

  /// Handle a click on the element at `control`.
  ///
  /// Elements that are not tagged as actions, or carry no action name, are
  /// ignored. Otherwise the owning entity is found through the closest
  /// enclosing wrapper and the action is performed on it.
  pub fn click(&mut self, control: &NodePath) -> Result<Outcome> {
    let Some(el) = self.page.element(control) else {
      return Ok(Outcome::Ignored);
    };
    if !el.has_class("action") {
      return Ok(Outcome::Ignored);
    }
    let Some(action) = el.attr("data-action").filter(|a| !a.is_empty()) else {
      return Ok(Outcome::Ignored);
    };
    let action = action.to_string();
    let immediate = el.has_class("immediate");

    let Some(wrapper) = self
      .page
      .closest_actor(control)
      .and_then(|path| self.page.element(&path))
    else {
      tracing::debug!(%control, "action control outside any entity");
      return Ok(Outcome::Ignored);
    };
    let target: Handle = wrapper.id().unwrap_or_default().parse()?;

    self.perform(&action, target, immediate, control.clone())
  }

  /// Route `action` on `target`: immediate actions run now, the rest open a
  /// form.
  pub fn perform(
    &mut self,
    action: &str,
    target: Handle,
    immediate: bool,
    control: NodePath,
  ) -> Result<Outcome> {
    let kind = self.tree.resolve(target)?.kind();
    let action = Action::resolve(kind, action)?;
    tracing::debug!(handle = %target, %action, immediate, "perform");

    if immediate {
      self.run_immediate(kind, target, action)
    } else {
      self.open_form(kind, target, action, control)
    }
  }

  /// Find `target`'s own control for `action` and click it.
  pub fn click_action(&mut self, target: Handle, action: &str) -> Result<Outcome> {
    let kind = self.tree.resolve(target)?.kind();
    let action = Action::resolve(kind, action)?;
    let control = self
      .page
      .find_control(target, action)
      .ok_or(discuss_markup::Error::NotRendered(target))?;
    self.click(&control)
  }

  fn run_immediate(
    &mut self,
    kind: Kind,
    target: Handle,
    action: Action,
  ) -> Result<Outcome> {
    match action {
      Action::UpVote => {
        self.tree.up_vote(target)?;
      }
      Action::DownVote => {
        self.tree.down_vote(target)?;
      }
      Action::AddContainerLabels => {
        self.page.add_container_labels();
        return Ok(Outcome::Labelled);
      }
      Action::AddStudent
      | Action::AddDocument
      | Action::AddComment
      | Action::AddReply => {
        return Err(unsupported(kind, action, "immediate"));
      }
    }

    let path = self.page.replace_rendering(&self.tree, target)?;
    Ok(Outcome::Replaced { target, path })
  }

  // ── Forms ───────────────────────────────────────────────────────────────

  fn open_form(
    &mut self,
    kind: Kind,
    target: Handle,
    action: Action,
    control: NodePath,
  ) -> Result<Outcome> {
    if action.is_immediate() {
      return Err(unsupported(kind, action, "deferred"));
    }

    let request = FormRequest::build(&self.tree, target, action, control)?;
    self.forms.present(&request);
    if let Some(stale) = self.pending.replace(request) {
      tracing::debug!(
        handle = %stale.target,
        action = %stale.action,
        "discarded unsubmitted form"
      );
    }
    Ok(Outcome::FormOpened { target, action })
  }

  /// Complete the pending form: add the child, then re-render its parent.
  ///
  /// Blank values and values that do not match the schema leave the form
  /// pending so it can be resubmitted.
  pub fn submit(&mut self, values: FieldValues) -> Result<Submitted> {
    let form = self.pending.take().ok_or(Error::NoPendingForm)?;

    let added = form
      .check(values)
      .and_then(|values| self.tree.add(form.target, values).map_err(Error::from));
    if let Err(e) = added {
      self.pending = Some(form);
      return Err(e);
    }

    self.forms.dismiss();
    let path = self.page.replace_rendering(&self.tree, form.target)?;
    let focus = self.page.first_control(&path);
    tracing::debug!(handle = %form.target, %path, "form applied");
    Ok(Submitted {
      target: form.target,
      path,
      focus,
    })
  }

  /// Drop the pending form without changing anything. Returns whether there
  /// was one.
  pub fn cancel(&mut self) -> bool {
    match self.pending.take() {
      Some(form) => {
        tracing::debug!(
          handle = %form.target,
          action = %form.action,
          "form cancelled"
        );
        self.forms.dismiss();
        true
      }
      None => false,
    }
  }
}

/// The control's immediacy flag disagrees with what the action needs.
fn unsupported(kind: Kind, action: Action, mode: &str) -> Error {
  discuss_core::Error::UnsupportedAction {
    kind,
    action: format!("{mode} {action}"),
  }
  .into()
}
