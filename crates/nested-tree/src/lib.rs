//! Sparse hierarchical index keyed by path segments.
//!
//! # Example
//!
//! ```
//! use nested_tree::HierarchyTree;
//!
//! let path = |s: &str| nested_path::segments_from_path(s, ".");
//!
//! let mut tree = HierarchyTree::new();
//! tree.set_value(&path("a"), "a");
//! tree.set_value(&path("a.b"), "a.b");
//! tree.set_value(&path("a.b.c"), "a.b.c");
//!
//! // Below first, deepest first; then above, nearest first.
//! let family: Vec<_> = tree.family_values(&path("a.b")).copied().collect();
//! assert_eq!(family, vec!["a.b.c", "a.b", "a"]);
//!
//! tree.delete_value(&path("a.b.c"));
//! assert!(tree.node(&path("a.b.c")).is_none());
//! ```

pub mod tree;
pub use tree::{
    hierarchy_path, Ancestors, Descendants, HierarchyTree, TreeNode, CHILDREN_KEY, VALUE_KEY,
};
