//! Derived values: recompute from argument paths whenever one changes.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use nested_object::Node;
use nested_path::{OwnedPath, PathLike, Segments};

use crate::debounce::Debounce;
use crate::error::StoreError;
use crate::options::{CalculateOptions, SetOptions, SubscribeOptions};
use crate::store::ReactiveStore;
use crate::subscription::{Subscription, SubscriptionState};

/// Result of one calculator run.
pub enum Calculated {
    Ready(Node),
    /// Delivered to the sink once it resolves.
    Pending(LocalBoxFuture<'static, Node>),
}

impl Calculated {
    pub fn pending(future: impl std::future::Future<Output = Node> + 'static) -> Self {
        Calculated::Pending(Box::pin(future))
    }
}

impl From<Node> for Calculated {
    fn from(value: Node) -> Self {
        Calculated::Ready(value)
    }
}

impl fmt::Debug for Calculated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Calculated::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
            Calculated::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

/// Where derived values go: a path written with `set`, a callback, or both
/// (path first).
#[derive(Clone)]
pub enum Sink {
    Path(OwnedPath),
    Callback(Rc<dyn Fn(Node)>),
    Both(OwnedPath, Rc<dyn Fn(Node)>),
}

impl Sink {
    pub fn path(path: impl Into<OwnedPath>) -> Self {
        Sink::Path(path.into())
    }

    pub fn callback(callback: impl Fn(Node) + 'static) -> Self {
        Sink::Callback(Rc::new(callback))
    }

    /// Add a callback that runs after the path is written.
    pub fn and_callback(self, callback: impl Fn(Node) + 'static) -> Self {
        let callback: Rc<dyn Fn(Node)> = Rc::new(callback);
        match self {
            Sink::Path(path) | Sink::Both(path, _) => Sink::Both(path, callback),
            Sink::Callback(_) => Sink::Callback(callback),
        }
    }

    pub fn target(&self) -> Option<&OwnedPath> {
        match self {
            Sink::Path(path) | Sink::Both(path, _) => Some(path),
            Sink::Callback(_) => None,
        }
    }

    pub(crate) fn map_path(self, f: impl FnOnce(OwnedPath) -> OwnedPath) -> Self {
        match self {
            Sink::Path(path) => Sink::Path(f(path)),
            Sink::Both(path, callback) => Sink::Both(f(path), callback),
            callback => callback,
        }
    }

    fn deliver(&self, store: &ReactiveStore, value: Node, tag: Option<Node>) {
        let callback = match self {
            Sink::Path(path) => {
                store.set_with(path, value, SetOptions { tag, ..SetOptions::default() });
                return;
            }
            Sink::Callback(callback) => callback,
            Sink::Both(path, callback) => {
                store.set_with(path, value.clone(), SetOptions { tag, ..SetOptions::default() });
                callback
            }
        };
        callback(value);
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sink::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Sink::Callback(_) => f.write_str("Callback(..)"),
            Sink::Both(path, _) => f.debug_tuple("Both").field(path).finish_non_exhaustive(),
        }
    }
}

impl From<&str> for Sink {
    fn from(path: &str) -> Self {
        Sink::Path(path.into())
    }
}

impl From<String> for Sink {
    fn from(path: String) -> Self {
        Sink::Path(path.into())
    }
}

impl From<Segments> for Sink {
    fn from(path: Segments) -> Self {
        Sink::Path(path.into())
    }
}

impl From<OwnedPath> for Sink {
    fn from(path: OwnedPath) -> Self {
        Sink::Path(path)
    }
}

struct Run {
    active: Cell<bool>,
    generation: Cell<u64>,
}

/// Handle returned by `calculate`.
pub struct Calculation {
    subscriptions: Vec<Subscription>,
    run: Rc<Run>,
    debounce: Option<Debounce<()>>,
    state: Cell<SubscriptionState>,
}

impl fmt::Debug for Calculation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Calculation")
            .field("subscriptions", &self.subscriptions)
            .field("state", &self.state.get())
            .finish()
    }
}

impl Calculation {
    pub fn state(&self) -> SubscriptionState {
        self.state.get()
    }

    pub fn is_active(&self) -> bool {
        self.state.get() == SubscriptionState::Active
    }

    /// Number of recomputations started so far.
    pub fn runs(&self) -> u64 {
        self.run.generation.get()
    }

    /// Stop recomputing. Pending debounced runs and unresolved asynchronous
    /// results are dropped. A second call fails with
    /// [`StoreError::AlreadyUnsubscribed`].
    pub fn cancel(&self) -> Result<(), StoreError> {
        if self.state.replace(SubscriptionState::Cancelled) == SubscriptionState::Cancelled {
            return Err(StoreError::AlreadyUnsubscribed);
        }
        self.run.active.set(false);
        if let Some(debounce) = &self.debounce {
            debounce.cancel();
        }
        for subscription in &self.subscriptions {
            subscription.unsubscribe()?;
        }
        tracing::debug!(args = self.subscriptions.len(), "calculation cancelled");
        Ok(())
    }
}

impl ReactiveStore {
    /// Keep `sink` up to date with `calculator` applied to the values at
    /// `args`.
    ///
    /// The calculator receives the argument values current at the time it
    /// runs, in `args` order.
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
        let arg_segments: Vec<Segments> = args.iter().map(|arg| self.segments_from_path(arg)).collect();
        let run = Rc::new(Run {
            active: Cell::new(true),
            generation: Cell::new(0),
        });
        let recompute = recompute_fn(self, arg_segments.clone(), calculator, sink.into(), &options, run.clone());

        let debounce = options.debounce.map(|delay| {
            let recompute = recompute.clone();
            Debounce::new(self.scheduler(), delay, options.immediate, move |()| recompute())
        });
        let trigger: Rc<dyn Fn()> = match &debounce {
            Some(debounce) => {
                let debounce = debounce.clone();
                Rc::new(move || debounce.call(()))
            }
            None => recompute.clone(),
        };

        let subscriptions = arg_segments
            .iter()
            .map(|segments| {
                let trigger = trigger.clone();
                self.subscribe_with(segments, move |_, _| trigger(), SubscribeOptions::default().fetch(false))
            })
            .collect();
        tracing::debug!(args = ?arg_segments, debounce = ?options.debounce, "calculation registered");

        if options.fetch {
            recompute();
        }
        Calculation {
            subscriptions,
            run,
            debounce,
            state: Cell::new(SubscriptionState::Active),
        }
    }
}

fn recompute_fn<F, R>(
    store: &ReactiveStore,
    arg_segments: Vec<Segments>,
    calculator: F,
    sink: Sink,
    options: &CalculateOptions,
    run: Rc<Run>,
) -> Rc<dyn Fn()>
where
    F: Fn(&[Option<Node>]) -> R + 'static,
    R: Into<Calculated>,
{
    let weak = store.downgrade();
    let latest_only = options.latest_only;
    let tag = options.tag.clone();
    Rc::new(move || {
        if !run.active.get() {
            return;
        }
        let Some(store) = weak.upgrade() else {
            return;
        };
        let generation = run.generation.get() + 1;
        run.generation.set(generation);
        let values: Vec<Option<Node>> = arg_segments.iter().map(|segments| store.get(segments)).collect();
        match calculator(values.as_slice()).into() {
            Calculated::Ready(value) => sink.deliver(&store, value, tag.clone()),
            Calculated::Pending(future) => {
                let weak = weak.clone();
                let sink = sink.clone();
                let tag = tag.clone();
                let run = run.clone();
                store.scheduler().spawn(Box::pin(async move {
                    let value = future.await;
                    if !run.active.get() {
                        return;
                    }
                    if latest_only && run.generation.get() != generation {
                        tracing::trace!(generation, "dropping superseded result");
                        return;
                    }
                    if let Some(store) = weak.upgrade() {
                        sink.deliver(&store, value, tag);
                    }
                }));
            }
        }
    })
}
