//! Path-addressable nested data.
//!
//! This crate gathers the workspace into one dependency:
//!
//! - [`path`]: turning `"a.b.c"` into segments and back;
//! - [`object`]: the [`Node`] value model and path-addressed reads and writes;
//! - [`tree`]: the sparse hierarchy used to dispatch notifications;
//! - [`reactive`]: [`ReactiveStore`], subscriptions and derived values.
//!
//! # Example
//!
//! ```
//! use nested::{Node, ReactiveStore};
//!
//! let store = ReactiveStore::new();
//! let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
//! let log = seen.clone();
//! let subscription = store.subscribe("user", move |value, _| log.borrow_mut().push(value));
//!
//! store.set("user.name", "Ann");
//! assert_eq!(seen.borrow().len(), 2);
//! assert_eq!(store.get("user.name"), Some(Node::from("Ann")));
//! subscription.unsubscribe().unwrap();
//! ```

pub use nested_object as object;
pub use nested_path as path;
pub use nested_reactive as reactive;
pub use nested_tree as tree;

pub use nested_object::{NestedObject, Node, ObjectError, Options, TraverseOptions};
pub use nested_path::{path_from_segments, segments_from_path, PathError, PathLike, Segments};
pub use nested_reactive::{
    CalculateOptions, Calculated, Calculation, Mutation, MutationKind, ReactiveStore, ScopedStore, Sink,
    StoreError, SubscribeOptions, Subscription,
};
pub use nested_tree::HierarchyTree;

pub mod cli;
