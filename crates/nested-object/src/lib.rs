//! Path-addressed access to nested maps and sequences.
//!
//! Documents are trees of [`Node`]s. Every operation takes a path, either a
//! joined string or a segment list (see [`nested_path::PathLike`]), and
//! walks the tree one segment at a time. Writes create missing containers on
//! the way down; deletes leave everything else untouched.
//!
//! # Example
//!
//! ```
//! use nested_object::{NestedObject, Node, Options};
//! use serde_json::json;
//!
//! let mut doc = NestedObject::with_options(Node::object(), Options::new().array(true));
//! doc.set("users.0.name", "Ann");
//! assert_eq!(doc.root().to_json(), json!({"users": [{"name": "Ann"}]}));
//!
//! assert!(doc.has("users.0"));
//! assert_eq!(doc.delete("users.0.name"), Some(Node::from("Ann")));
//! assert_eq!(doc.get("users.0"), Some(&Node::object()));
//! ```

pub mod accessor;
pub use accessor::{delete, get, get_mut, has, set};

pub mod error;
pub use error::ObjectError;

pub mod immutable;
pub use immutable::{delete_immutable, set_immutable};

pub mod node;
pub use node::{Children, Map, Node, MAX_PAD};

pub mod options;
pub use options::{Options, ResolvedOptions};

pub mod store;
pub use store::NestedObject;

pub mod traverse;
pub use traverse::{entries, Entries, EntryPath, TraverseOptions};

pub mod utils;
pub use utils::{
    deep_clone, deep_equal, diffs, filter_exclude, filter_include, flatten, flatten_paths, index_by,
};
