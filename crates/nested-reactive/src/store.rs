use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use nested_object::{EntryPath, NestedObject, Node, Options, TraverseOptions};
use nested_path::{PathLike, Segments};
use nested_tree::HierarchyTree;

use crate::mutation::{Mutation, MutationKind};
use crate::options::{SetOptions, SubscribeOptions};
use crate::scheduler::{ManualScheduler, Scheduler};
use crate::scoped::ScopedStore;
use crate::subscription::{ListenerId, Subscription};

pub(crate) type Listener = Rc<dyn Fn(Option<Node>, &Mutation)>;

#[derive(Clone)]
struct Registered {
    segments: Rc<Segments>,
    callback: Listener,
}

struct Inner {
    data: NestedObject,
    listeners: HierarchyTree<BTreeMap<ListenerId, Registered>>,
    next_listener_id: u64,
}

/// A nested document that notifies listeners about every change.
///
/// The handle is cheap to clone; clones share the document and the
/// listeners. Listeners run synchronously inside the mutating call, with no
/// internal borrow held, so they may read and write the store themselves.
/// Nothing guards against cycles: a listener that keeps writing to a path
/// it observes recurses without bound.
///
/// For a mutation at path `P`, listeners at `P` and below fire first,
/// deepest first, then listeners above `P`, nearest first. Listeners at one
/// path fire in registration order.
#[derive(Clone)]
pub struct ReactiveStore {
    inner: Rc<RefCell<Inner>>,
    scheduler: Rc<dyn Scheduler>,
}

impl fmt::Debug for ReactiveStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ReactiveStore")
            .field("root", inner.data.root())
            .field("options", inner.data.options())
            .finish_non_exhaustive()
    }
}

impl Default for ReactiveStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Non-owning handle held by subscriptions and calculators.
#[derive(Clone)]
pub(crate) struct WeakStore {
    inner: Weak<RefCell<Inner>>,
    scheduler: Weak<dyn Scheduler>,
}

impl WeakStore {
    pub(crate) fn upgrade(&self) -> Option<ReactiveStore> {
        Some(ReactiveStore {
            inner: self.inner.upgrade()?,
            scheduler: self.scheduler.upgrade()?,
        })
    }
}

impl ReactiveStore {
    /// An empty map document driven by a fresh [`ManualScheduler`].
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    pub fn with_options(options: Options) -> Self {
        Self::with_scheduler(options, Rc::new(ManualScheduler::new()))
    }

    pub fn with_scheduler(options: Options, scheduler: Rc<dyn Scheduler>) -> Self {
        Self::from_object(NestedObject::with_options(Node::object(), options), scheduler)
    }

    /// Wrap an existing document.
    pub fn from_object(data: NestedObject, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                data,
                listeners: HierarchyTree::new(),
                next_listener_id: 1,
            })),
            scheduler,
        }
    }

    pub(crate) fn downgrade(&self) -> WeakStore {
        WeakStore {
            inner: Rc::downgrade(&self.inner),
            scheduler: Rc::downgrade(&self.scheduler),
        }
    }

    pub fn scheduler(&self) -> Rc<dyn Scheduler> {
        self.scheduler.clone()
    }

    pub fn options(&self) -> Options {
        self.inner.borrow().data.options().clone()
    }

    /// The current root. Later writes never change the returned value.
    pub fn snapshot(&self) -> Node {
        self.inner.borrow().data.root().clone()
    }

    pub fn segments_from_path<P: PathLike + ?Sized>(&self, path: &P) -> Segments {
        self.inner.borrow().data.segments_from_path(path)
    }

    pub fn path_from_segments<P: PathLike + ?Sized>(&self, path: &P) -> String {
        self.inner.borrow().data.path_from_segments(path)
    }

    pub fn get<P: PathLike + ?Sized>(&self, path: &P) -> Option<Node> {
        self.inner.borrow().data.get(path).cloned()
    }

    pub fn has<P: PathLike + ?Sized>(&self, path: &P) -> bool {
        self.inner.borrow().data.has(path)
    }

    /// `(path, value)` pairs of the current document, collected up front.
    pub fn entries(&self, options: TraverseOptions) -> Vec<(EntryPath, Node)> {
        let inner = self.inner.borrow();
        inner
            .data
            .entries(options)
            .map(|(path, node)| (path, node.clone()))
            .collect()
    }

    /// Write `value` at `path` and notify listeners.
    ///
    /// Returns `false`, without notifying anyone, when the path already
    /// holds this exact value: an equal scalar or the same container.
    pub fn set<P, V>(&self, path: &P, value: V) -> bool
    where
        P: PathLike + ?Sized,
        V: Into<Node>,
    {
        self.set_with(path, value, SetOptions::default())
    }

    pub fn set_with<P, V>(&self, path: &P, value: V, options: SetOptions) -> bool
    where
        P: PathLike + ?Sized,
        V: Into<Node>,
    {
        let value = value.into();
        let mutation = {
            let mut inner = self.inner.borrow_mut();
            let resolved = inner.data.options().merge(&options.object).resolve();
            let segments = path.to_segments(&resolved.separator);
            let previous = inner.data.get(&segments).cloned();
            if previous.as_ref().is_some_and(|previous| previous.same(&value)) {
                tracing::trace!(path = %segments.join(&resolved.separator), "set skipped, value unchanged");
                return false;
            }
            inner.data.set_with(&segments, value.clone(), &options.object);
            Mutation {
                kind: MutationKind::Set,
                path: segments.join(&resolved.separator),
                segments,
                value: Some(value),
                previous,
                tag: options.tag,
            }
        };
        self.emit(&mutation);
        true
    }

    /// Remove the value at `path` and notify listeners. Returns `false`
    /// when the path does not exist.
    pub fn delete<P: PathLike + ?Sized>(&self, path: &P) -> bool {
        self.delete_with(path, SetOptions::default())
    }

    pub fn delete_with<P: PathLike + ?Sized>(&self, path: &P, options: SetOptions) -> bool {
        let mutation = {
            let mut inner = self.inner.borrow_mut();
            let resolved = inner.data.options().merge(&options.object).resolve();
            let segments = path.to_segments(&resolved.separator);
            let Some(previous) = inner.data.get(&segments).cloned() else {
                return false;
            };
            inner.data.delete_with(&segments, &options.object);
            Mutation {
                kind: MutationKind::Delete,
                path: segments.join(&resolved.separator),
                segments,
                value: None,
                previous: Some(previous),
                tag: options.tag,
            }
        };
        self.emit(&mutation);
        true
    }

    /// Register `callback` for changes at, below or above `path`.
    ///
    /// The callback receives the value currently at `path` and the
    /// mutation that triggered it. Unless disabled in `options`, it is
    /// first called once with a [`MutationKind::Fetch`] before this
    /// returns.
    pub fn subscribe<P, F>(&self, path: &P, callback: F) -> Subscription
    where
        P: PathLike + ?Sized,
        F: Fn(Option<Node>, &Mutation) + 'static,
    {
        self.subscribe_with(path, callback, SubscribeOptions::default())
    }

    pub fn subscribe_with<P, F>(&self, path: &P, callback: F, options: SubscribeOptions) -> Subscription
    where
        P: PathLike + ?Sized,
        F: Fn(Option<Node>, &Mutation) + 'static,
    {
        let segments = self.segments_from_path(path);
        let callback: Listener = Rc::new(callback);
        if options.fetch {
            let current = self.get(&segments);
            let fetch = Mutation::fetch(self.path_from_segments(&segments), segments.clone(), current.clone());
            callback(current, &fetch);
        }
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = ListenerId(inner.next_listener_id);
            inner.next_listener_id = inner.next_listener_id.saturating_add(1);
            let registered = Registered {
                segments: Rc::new(segments.clone()),
                callback,
            };
            inner
                .listeners
                .value_or_insert_with(&segments, BTreeMap::new)
                .insert(id, registered);
            id
        };
        tracing::debug!(path = ?segments, %id, "subscribed");
        Subscription::new(self.downgrade(), segments, id)
    }

    pub(crate) fn remove_listener(&self, segments: &[String], id: ListenerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let Some(set) = inner.listeners.get_value_mut(segments) else {
            return false;
        };
        let removed = set.remove(&id).is_some();
        if set.is_empty() {
            inner.listeners.delete_value(segments);
        }
        tracing::debug!(path = ?segments, %id, removed, "unsubscribed");
        removed
    }

    /// Number of listeners registered exactly at `path`.
    pub fn subscriber_count<P: PathLike + ?Sized>(&self, path: &P) -> usize {
        let segments = self.segments_from_path(path);
        self.inner
            .borrow()
            .listeners
            .get_value(&segments)
            .map_or(0, BTreeMap::len)
    }

    /// A view whose paths are relative to `path`.
    pub fn child<P: PathLike + ?Sized>(&self, path: &P) -> ScopedStore {
        ScopedStore::new(self.clone(), self.segments_from_path(path))
    }

    fn emit(&self, mutation: &Mutation) {
        let listeners: Vec<Registered> = {
            let inner = self.inner.borrow();
            inner
                .listeners
                .family_values(&mutation.segments)
                .flat_map(|set| set.values().cloned())
                .collect()
        };
        tracing::trace!(
            path = %mutation.path,
            kind = mutation.kind.as_str(),
            listeners = listeners.len(),
            "emitting mutation"
        );
        for listener in listeners {
            let current = self.get(listener.segments.as_slice());
            (listener.callback)(current, mutation);
        }
    }
}
