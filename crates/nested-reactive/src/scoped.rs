use nested_object::{entries, EntryPath, Node, TraverseOptions};
use nested_path::{concat, strip_prefix, OwnedPath, PathError, PathLike, Segments};

use crate::calculate::{Calculated, Calculation, Sink};
use crate::mutation::Mutation;
use crate::options::{CalculateOptions, SetOptions, SubscribeOptions};
use crate::store::ReactiveStore;
use crate::subscription::Subscription;

/// A view of a [`ReactiveStore`] rooted at a fixed prefix.
///
/// Every path given to the view is resolved below the prefix. Values and
/// notifications are the store's own: a [`Mutation`] delivered to a
/// listener registered through the view still carries absolute paths; use
/// [`relative`](Self::relative) to translate them.
#[derive(Debug, Clone)]
pub struct ScopedStore {
    store: ReactiveStore,
    prefix: Segments,
}

impl ScopedStore {
    pub(crate) fn new(store: ReactiveStore, prefix: Segments) -> Self {
        Self { store, prefix }
    }

    /// The underlying store.
    pub fn store(&self) -> &ReactiveStore {
        &self.store
    }

    pub fn prefix(&self) -> &[String] {
        &self.prefix
    }

    /// Absolute segments for a path relative to this view.
    pub fn absolute<P: PathLike + ?Sized>(&self, path: &P) -> Segments {
        concat(&self.prefix, &self.store.segments_from_path(path))
    }

    /// Segments of an absolute path relative to this view.
    pub fn relative<P: PathLike + ?Sized>(&self, path: &P) -> Result<Segments, PathError> {
        strip_prefix(&self.prefix, &self.store.segments_from_path(path))
    }

    pub fn get<P: PathLike + ?Sized>(&self, path: &P) -> Option<Node> {
        self.store.get(&self.absolute(path))
    }

    pub fn has<P: PathLike + ?Sized>(&self, path: &P) -> bool {
        self.store.has(&self.absolute(path))
    }

    pub fn set<P, V>(&self, path: &P, value: V) -> bool
    where
        P: PathLike + ?Sized,
        V: Into<Node>,
    {
        self.store.set(&self.absolute(path), value)
    }

    pub fn set_with<P, V>(&self, path: &P, value: V, options: SetOptions) -> bool
    where
        P: PathLike + ?Sized,
        V: Into<Node>,
    {
        self.store.set_with(&self.absolute(path), value, options)
    }

    pub fn delete<P: PathLike + ?Sized>(&self, path: &P) -> bool {
        self.store.delete(&self.absolute(path))
    }

    pub fn delete_with<P: PathLike + ?Sized>(&self, path: &P, options: SetOptions) -> bool {
        self.store.delete_with(&self.absolute(path), options)
    }

    pub fn subscribe<P, F>(&self, path: &P, callback: F) -> Subscription
    where
        P: PathLike + ?Sized,
        F: Fn(Option<Node>, &Mutation) + 'static,
    {
        self.store.subscribe(&self.absolute(path), callback)
    }

    pub fn subscribe_with<P, F>(&self, path: &P, callback: F, options: SubscribeOptions) -> Subscription
    where
        P: PathLike + ?Sized,
        F: Fn(Option<Node>, &Mutation) + 'static,
    {
        self.store.subscribe_with(&self.absolute(path), callback, options)
    }

    /// `calculate` with argument paths and any sink path relative to this
    /// view.
    pub fn calculate<P, F, R, S>(&self, args: &[P], calculator: F, sink: S) -> Calculation
    where
        P: PathLike,
        F: Fn(&[Option<Node>]) -> R + 'static,
        R: Into<Calculated>,
        S: Into<Sink>,
    {
        self.calculate_with(args, calculator, sink, CalculateOptions::default())
    }

    pub fn calculate_with<P, F, R, S>(
        &self,
        args: &[P],
        calculator: F,
        sink: S,
        options: CalculateOptions,
    ) -> Calculation
    where
        P: PathLike,
        F: Fn(&[Option<Node>]) -> R + 'static,
        R: Into<Calculated>,
        S: Into<Sink>,
    {
        let args: Vec<Segments> = args.iter().map(|arg| self.absolute(arg)).collect();
        let sink = sink
            .into()
            .map_path(|path| OwnedPath::Segments(self.absolute(&path)));
        self.store.calculate_with(&args, calculator, sink, options)
    }

    /// A view nested below this one.
    pub fn child<P: PathLike + ?Sized>(&self, path: &P) -> ScopedStore {
        ScopedStore::new(self.store.clone(), self.absolute(path))
    }

    /// Entries below the prefix, with paths relative to it.
    pub fn entries(&self, options: TraverseOptions) -> Vec<(EntryPath, Node)> {
        let Some(root) = self.store.get(&self.prefix) else {
            return Vec::new();
        };
        let separator = self.store.options().resolve().separator;
        entries(&root, options, &separator)
            .map(|(path, node)| (path, node.clone()))
            .collect()
    }
}
