use std::cell::Cell;
use std::fmt;

use nested_path::Segments;

use crate::error::StoreError;
use crate::store::WeakStore;

/// Identifies one registered listener within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub(crate) u64);

impl ListenerId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionState {
    Active,
    Cancelled,
}

/// Handle returned by `subscribe`.
///
/// Dropping the handle leaves the listener registered; call
/// [`unsubscribe`](Self::unsubscribe) to remove it.
pub struct Subscription {
    store: WeakStore,
    segments: Segments,
    id: ListenerId,
    state: Cell<SubscriptionState>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("segments", &self.segments)
            .field("id", &self.id)
            .field("state", &self.state.get())
            .finish()
    }
}

impl Subscription {
    pub(crate) fn new(store: WeakStore, segments: Segments, id: ListenerId) -> Self {
        Self {
            store,
            segments,
            id,
            state: Cell::new(SubscriptionState::Active),
        }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Absolute path of the subscription.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn state(&self) -> SubscriptionState {
        self.state.get()
    }

    pub fn is_active(&self) -> bool {
        self.state.get() == SubscriptionState::Active
    }

    /// Remove the listener. A second call fails with
    /// [`StoreError::AlreadyUnsubscribed`].
    pub fn unsubscribe(&self) -> Result<(), StoreError> {
        if self.state.replace(SubscriptionState::Cancelled) == SubscriptionState::Cancelled {
            return Err(StoreError::AlreadyUnsubscribed);
        }
        if let Some(store) = self.store.upgrade() {
            store.remove_listener(&self.segments, self.id);
        }
        Ok(())
    }
}
