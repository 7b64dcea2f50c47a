//! End-to-end session tests: gestures on page controls through to the
//! re-rendered page.

use discuss_core::{Action, DiscussionTree, FieldName, FieldValues, Handle, Kind, NewChild};
use discuss_markup::{NodePath, render};

use crate::{
  Error, FormCollaborator, FormRequest, Outcome, Session,
  command::{Command, Response},
};

/// Remembers every form it was asked to show.
#[derive(Default)]
struct RecordingForms {
  presented: Vec<FormRequest>,
  dismissed: usize,
}

impl FormCollaborator for RecordingForms {
  fn present(&mut self, form: &FormRequest) {
    self.presented.push(form.clone());
  }

  fn dismiss(&mut self) { self.dismissed += 1; }
}

struct Fixture {
  session: Session<RecordingForms>,
  rich:    Handle,
  doc:     Handle,
}

fn fixture() -> Fixture {
  let mut tree = DiscussionTree::new();
  let rich = tree.add_child(tree.root(), NewChild::student("Rich")).unwrap();
  tree.add_child(tree.root(), NewChild::student("Mary")).unwrap();
  let doc = tree.add_child(rich, NewChild::document("T", "U")).unwrap();
  Fixture {
    session: Session::new(tree, RecordingForms::default()).unwrap(),
    rich,
    doc,
  }
}

fn control(session: &Session<RecordingForms>, handle: Handle, action: Action) -> NodePath {
  session.page().find_control(handle, action).unwrap()
}

fn values(pairs: &[(&str, &str)]) -> FieldValues {
  pairs.iter().copied().collect()
}

// ─── Immediate path ──────────────────────────────────────────────────────────

#[test]
fn up_vote_click_mutates_and_replaces_once() {
  let mut f = fixture();
  let wrapper = f.session.page().find(f.doc).unwrap();
  let button = control(&f.session, f.doc, Action::UpVote);

  let outcome = f.session.click(&button).unwrap();
  assert_eq!(outcome, Outcome::Replaced {
    target: f.doc,
    path:   wrapper.clone(),
  });
  assert_eq!(f.session.tree().resolve(f.doc).unwrap().votes(), Some(1));
  assert!(f.session.forms().presented.is_empty());

  assert_eq!(f.session.page().tagged(f.doc), vec![wrapper.clone()]);
  let shown = f.session.page().element(&wrapper).unwrap();
  assert_eq!(*shown, render(f.session.tree().get(f.doc).unwrap()));
  assert!(shown.text_content().contains("(1 votes)"));
}

#[test]
fn down_vote_click_at_zero_still_rerenders() {
  let mut f = fixture();
  let button = control(&f.session, f.doc, Action::DownVote);
  let outcome = f.session.click(&button).unwrap();
  assert!(matches!(outcome, Outcome::Replaced { target, .. } if target == f.doc));
  assert_eq!(f.session.tree().resolve(f.doc).unwrap().votes(), Some(0));
}

#[test]
fn label_toggle_labels_containers() {
  let mut f = fixture();
  let root = f.session.tree().root();
  let toggle = control(&f.session, root, Action::AddContainerLabels);
  assert_eq!(f.session.click(&toggle).unwrap(), Outcome::Labelled);
  assert!(f.session.page().labels_enabled());
  assert!(
    f.session
      .page()
      .to_markup()
      .unwrap()
      .contains("aria-label=\"students\"")
  );
}

// ─── Non-actions ─────────────────────────────────────────────────────────────

#[test]
fn clicks_on_plain_elements_are_ignored() {
  let mut f = fixture();
  let before = f.session.page().clone();

  let wrapper = f.session.page().find(f.doc).unwrap();
  let header = wrapper.child(0);
  assert_eq!(f.session.click(&header).unwrap(), Outcome::Ignored);
  assert_eq!(f.session.click(&wrapper).unwrap(), Outcome::Ignored);
  assert_eq!(
    f.session.click(&NodePath::new([9, 9, 9])).unwrap(),
    Outcome::Ignored
  );
  assert_eq!(*f.session.page(), before);
}

#[test]
fn action_controls_without_an_action_name_are_ignored() {
  let mut f = fixture();
  let button = control(&f.session, f.doc, Action::UpVote);

  let el = f.session.page_mut().element_mut(&button).unwrap();
  el.set_attr("data-action", "");
  let before = f.session.page().clone();
  assert_eq!(f.session.click(&button).unwrap(), Outcome::Ignored);
  assert_eq!(*f.session.page(), before);

  let el = f.session.page_mut().element_mut(&button).unwrap();
  assert!(el.remove_attr("data-action").is_some());
  assert!(el.has_class("action"));
  let before = f.session.page().clone();
  assert_eq!(f.session.click(&button).unwrap(), Outcome::Ignored);
  assert_eq!(*f.session.page(), before);

  assert_eq!(f.session.tree().resolve(f.doc).unwrap().votes(), Some(0));
  assert!(f.session.forms().presented.is_empty());
}

#[test]
fn unknown_handle_is_not_swallowed() {
  let mut f = fixture();
  let stray: Handle = "actor42".parse().unwrap();
  let err = f
    .session
    .perform("upVote", stray, true, NodePath::default())
    .unwrap_err();
  assert!(matches!(
    err,
    Error::Core(discuss_core::Error::NotFound(h)) if h == stray
  ));
}

#[test]
fn immediacy_flag_must_fit_the_action() {
  let mut f = fixture();
  let err = f
    .session
    .perform("addComment", f.doc, true, NodePath::default())
    .unwrap_err();
  assert!(matches!(
    err,
    Error::Core(discuss_core::Error::UnsupportedAction { kind: Kind::Document, .. })
  ));

  let err = f
    .session
    .perform("upVote", f.doc, false, NodePath::default())
    .unwrap_err();
  assert!(matches!(err, Error::Core(discuss_core::Error::UnsupportedAction { .. })));
  assert!(f.session.pending().is_none());
}

// ─── Deferred path ───────────────────────────────────────────────────────────

#[test]
fn add_comment_opens_form_and_changes_nothing_until_submit() {
  let mut f = fixture();
  let before = f.session.page().clone();
  let button = control(&f.session, f.doc, Action::AddComment);

  let outcome = f.session.click(&button).unwrap();
  assert_eq!(outcome, Outcome::FormOpened {
    target: f.doc,
    action: Action::AddComment,
  });
  assert_eq!(*f.session.page(), before);

  let presented = &f.session.forms().presented;
  assert_eq!(presented.len(), 1);
  assert_eq!(presented[0].control, button);
  let names: Vec<FieldName> = presented[0].fields.iter().map(|p| p.name).collect();
  assert_eq!(names, [FieldName::Author, FieldName::Text]);
  assert_eq!(presented[0].fields[0].choices, ["Rich", "Mary"]);

  let submitted = f
    .session
    .submit(values(&[("author", "Mary"), ("text", "hi")]))
    .unwrap();
  assert_eq!(submitted.target, f.doc);
  assert_eq!(Some(submitted.path.clone()), f.session.page().find(f.doc));
  assert!(f.session.pending().is_none());
  assert_eq!(f.session.forms().dismissed, 1);

  let doc = f.session.tree().get(f.doc).unwrap();
  assert_eq!(doc.child_count(), 1);
  let note = doc.children().next().unwrap();
  assert_eq!(note.author(), Some("Mary"));
  assert_eq!(note.text(), Some("hi"));
  assert_eq!(f.session.page().tagged(note.handle()).len(), 1);
}

#[test]
fn submit_returns_focus_to_the_fresh_rendering() {
  let mut f = fixture();
  f.session.click_action(f.rich, "addDocument").unwrap();
  let submitted = f
    .session
    .submit(values(&[("title", "T2"), ("url", "U2")]))
    .unwrap();

  let page = f.session.page();
  let focus = submitted.focus.unwrap();
  assert_eq!(page.find(f.rich), Some(submitted.path.clone()));
  assert!(submitted.path.is_ancestor_of(&focus));
  assert_eq!(page.closest_actor(&focus), Some(submitted.path));
  let el = page.element(&focus).unwrap();
  assert!(el.has_class("action"));
  assert_eq!(el.attr("data-action"), Some("addDocument"));
}

#[test]
fn deep_reply_threads_stay_interactive() {
  let mut f = fixture();
  let mut parent = f.doc;
  for level in 0..2_000 {
    let action = if parent == f.doc { "addComment" } else { "addReply" };
    f.session.click_action(parent, action).unwrap();
    let text = format!("level {level}");
    f.session
      .submit(values(&[("author", "Mary"), ("text", text.as_str())]))
      .unwrap();
    parent = *f.session.tree().resolve(parent).unwrap().children().last().unwrap();
  }

  f.session.click_action(parent, "upVote").unwrap();
  let out = f.session.page().to_markup().unwrap();
  assert!(out.contains("From Mary (1 votes):<br/>level 1999<"));
  assert_eq!(out.matches("no replies").count(), 1);
  assert_eq!(f.session.page().tagged(parent).len(), 1);
}

#[test]
fn form_is_consumed_exactly_once() {
  let mut f = fixture();
  f.session.click_action(f.rich, "addDocument").unwrap();
  f.session
    .submit(values(&[("title", "T2"), ("url", "U2")]))
    .unwrap();

  let err = f
    .session
    .submit(values(&[("title", "T3"), ("url", "U3")]))
    .unwrap_err();
  assert!(matches!(err, Error::NoPendingForm));
  assert_eq!(f.session.tree().resolve(f.rich).unwrap().children().len(), 2);
}

#[test]
fn cancel_discards_form_without_mutation() {
  let mut f = fixture();
  let before = f.session.page().clone();
  let entities = f.session.tree().registry().len();

  f.session.click_action(f.doc, "addComment").unwrap();
  assert!(f.session.cancel());
  assert!(!f.session.cancel());

  assert_eq!(*f.session.page(), before);
  assert_eq!(f.session.tree().registry().len(), entities);
  assert!(matches!(
    f.session.submit(values(&[("author", "Mary"), ("text", "hi")])),
    Err(Error::NoPendingForm)
  ));
}

#[test]
fn rejected_submission_keeps_form_armed() {
  let mut f = fixture();
  let root = f.session.tree().root();
  f.session.click_action(root, "addStudent").unwrap();

  let err = f.session.submit(values(&[("name", "  ")])).unwrap_err();
  assert!(matches!(err, Error::EmptyField(FieldName::Name)));
  let err = f.session.submit(values(&[("title", "Ana")])).unwrap_err();
  assert!(matches!(
    err,
    Error::Core(discuss_core::Error::SchemaMismatch { kind: Kind::Student, .. })
  ));
  assert_eq!(f.session.tree().root_ref().unwrap().child_count(), 2);

  f.session.submit(values(&[("name", "Ana")])).unwrap();
  let names: Vec<String> = f
    .session
    .tree()
    .root_ref()
    .unwrap()
    .children()
    .filter_map(|s| s.name().map(str::to_string))
    .collect();
  assert_eq!(names, ["Rich", "Mary", "Ana"]);
}

#[test]
fn new_deferred_action_rearms_the_form() {
  let mut f = fixture();
  f.session.click_action(f.doc, "addComment").unwrap();
  f.session.click_action(f.rich, "addDocument").unwrap();

  let pending = f.session.pending().unwrap();
  assert_eq!(pending.target, f.rich);
  assert_eq!(pending.action, Action::AddDocument);

  f.session
    .submit(values(&[("title", "T2"), ("url", "U2")]))
    .unwrap();
  assert_eq!(f.session.tree().resolve(f.doc).unwrap().children().len(), 0);
}

#[test]
fn reply_thread_through_gestures() {
  let mut f = fixture();
  f.session.click_action(f.doc, "addComment").unwrap();
  f.session
    .submit(values(&[("author", "Mary"), ("text", "hi")]))
    .unwrap();
  let note = f.session.tree().resolve(f.doc).unwrap().children()[0];

  f.session.click_action(note, "addReply").unwrap();
  f.session
    .submit(values(&[("author", "Rich"), ("text", "re: hi")]))
    .unwrap();

  f.session.click_action(note, "upVote").unwrap();
  let shown = f
    .session
    .page()
    .element(&f.session.page().find(note).unwrap())
    .unwrap()
    .to_markup()
    .unwrap();
  assert!(shown.contains("From Mary (1 votes):<br/>hi"), "got:\n{shown}");
  assert!(shown.contains("<ol><li><div class=\"comment actor\""));
  assert!(shown.contains("From Rich (0 votes):<br/>re: hi"));
}

#[test]
fn sibling_state_survives_parent_rerender() {
  let mut f = fixture();
  f.session.page_mut().add_container_labels();
  f.session.click_action(f.doc, "upVote").unwrap();

  f.session.click_action(f.rich, "addDocument").unwrap();
  f.session
    .submit(values(&[("title", "T2"), ("url", "U2")]))
    .unwrap();

  let out = f.session.page().to_markup().unwrap();
  assert!(out.contains("(1 votes)"));
  assert!(out.contains("Rich: 2 documents"));
  assert!(out.contains("aria-label=\"documents\""));
  for handle in [f.rich, f.doc] {
    assert_eq!(f.session.page().tagged(handle).len(), 1);
  }
}

// ─── Commands ────────────────────────────────────────────────────────────────

#[test]
fn commands_drive_a_session() {
  let mut f = fixture();
  let run = |session: &mut Session<RecordingForms>, line: &str| {
    line.parse::<Command>().unwrap().execute(session).unwrap()
  };

  let Response::Text(text) = run(&mut f.session, &format!("click {} upVote", f.doc))
  else {
    panic!("expected text")
  };
  assert!(text.starts_with(&format!("updated {}", f.doc)));

  run(&mut f.session, &format!("click {} addComment", f.doc));
  run(&mut f.session, r#"submit {"author": "Mary", "text": "hi"}"#);

  let Response::Text(shown) = run(&mut f.session, &format!("show {}", f.doc)) else {
    panic!("expected text")
  };
  assert!(shown.contains("From Mary (0 votes):"));
  assert!(shown.contains("(1 votes)"));

  assert_eq!(run(&mut f.session, "quit"), Response::Quit);
}
