//! Markup for the discussion tree.
//!
//! Entities render to a small element tree ([`Node`]), which is serialised to
//! text with `quick-xml`. The [`Page`] holds the currently displayed tree and
//! implements in-place replacement of a re-rendered entity.
//!
//! # Quick start
//!
//! ```
//! use discuss_core::{DiscussionTree, NewChild};
//! use discuss_markup::Page;
//!
//! let mut tree = DiscussionTree::new();
//! let rich = tree.add_child(tree.root(), NewChild::student("Rich")).unwrap();
//! let mut page = Page::mount(&tree).unwrap();
//!
//! tree.add_child(rich, NewChild::document("T", "https://example.com")).unwrap();
//! page.replace_rendering(&tree, rich).unwrap();
//! assert!(page.to_markup().unwrap().contains("Rich: 1 documents"));
//! ```

pub mod error;
mod node;
mod page;
mod render;

pub use error::{Error, Result};
pub use node::{Element, Node, NodePath};
pub use page::Page;
pub use render::{ListKind, render, render_list};
