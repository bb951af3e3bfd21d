//! Subscriptions and derived values over a nested document.
//!
//! A [`ReactiveStore`] wraps a [`nested_object::NestedObject`] and calls
//! listeners synchronously whenever a path changes. Listeners registered at
//! the changed path or below it fire first, deepest first; then listeners
//! above it, nearest first.
//!
//! # Example
//!
//! ```
//! use nested_reactive::ReactiveStore;
//! use nested_object::Node;
//!
//! let store = ReactiveStore::new();
//! store.set("a", 1);
//! store.set("b", 2);
//!
//! let sum = store.calculate(
//!     &["a", "b"],
//!     |args: &[Option<Node>]| {
//!         let total: i64 = args.iter().flatten().filter_map(Node::as_i64).sum();
//!         Node::from(total)
//!     },
//!     "sum",
//! );
//! assert_eq!(store.get("sum"), Some(Node::from(3)));
//!
//! store.set("a", 5);
//! assert_eq!(store.get("sum"), Some(Node::from(7)));
//!
//! sum.cancel().unwrap();
//! assert!(sum.cancel().is_err());
//! ```

pub mod calculate;
pub use calculate::{Calculated, Calculation, Sink};

pub mod debounce;
pub use debounce::Debounce;

pub mod error;
pub use error::StoreError;

pub mod mutation;
pub use mutation::{Mutation, MutationKind};

pub mod options;
pub use options::{CalculateOptions, SetOptions, SubscribeOptions};

pub mod scheduler;
pub use scheduler::{ManualScheduler, Scheduler, TokioScheduler};

pub mod scoped;
pub use scoped::ScopedStore;

pub mod store;
pub use store::ReactiveStore;

pub mod subscription;
pub use subscription::{ListenerId, Subscription, SubscriptionState};
