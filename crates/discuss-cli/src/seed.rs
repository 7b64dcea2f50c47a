//! Sample discussion used when `seed_demo` is on.

use discuss_core::{DiscussionTree, NewChild, Result};

/// Two students, two documents, and a short comment thread.
pub fn demo() -> Result<DiscussionTree> {
  let mut tree = DiscussionTree::new();
  let root = tree.root();

  let rich = tree.add_child(root, NewChild::student("Rich"))?;
  tree.add_child(root, NewChild::student("Mary"))?;

  tree.add_child(
    rich,
    NewChild::document(
      "Numbering nested lists via CSS",
      "https://example.com/nested.html",
    ),
  )?;
  let trees = tree.add_child(
    rich,
    NewChild::document(
      "Navigation of deeply nested structures using HTML trees",
      "https://example.com/trees.html",
    ),
  )?;

  let comment = tree.add_child(
    trees,
    NewChild::comment("Mary", "HTML trees are cool, but a pain to construct."),
  )?;
  tree.add_child(
    comment,
    NewChild::comment(
      "Rich",
      "but in the right circumstance they can afford better UX for screen \
       reader users",
    ),
  )?;

  Ok(tree)
}
