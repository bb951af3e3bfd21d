use std::time::Duration;

use nested_object::{Node, Options};

/// Options for [`ReactiveStore::subscribe_with`](crate::ReactiveStore::subscribe_with).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscribeOptions {
    /// Call the listener once with the current value before returning.
    pub fetch: bool,
}

impl Default for SubscribeOptions {
    fn default() -> Self {
        Self { fetch: true }
    }
}

impl SubscribeOptions {
    pub fn fetch(mut self, fetch: bool) -> Self {
        self.fetch = fetch;
        self
    }
}

/// Options for `set_with` / `delete_with`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetOptions {
    pub tag: Option<Node>,
    /// Per-call overrides of the store's object options.
    pub object: Options,
}

impl SetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(mut self, tag: impl Into<Node>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn object(mut self, object: Options) -> Self {
        self.object = object;
        self
    }
}

/// Options for [`ReactiveStore::calculate_with`](crate::ReactiveStore::calculate_with).
#[derive(Debug, Clone, PartialEq)]
pub struct CalculateOptions {
    /// Run the calculator once on registration.
    pub fetch: bool,
    /// Coalesce recomputations within this window.
    pub debounce: Option<Duration>,
    /// With `debounce`, run the first call of a quiet window right away.
    pub immediate: bool,
    /// Drop asynchronous results that a later run has superseded.
    pub latest_only: bool,
    /// Tag attached to the writes made into a sink path.
    pub tag: Option<Node>,
}

impl Default for CalculateOptions {
    fn default() -> Self {
        Self {
            fetch: true,
            debounce: None,
            immediate: true,
            latest_only: false,
            tag: None,
        }
    }
}

impl CalculateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fetch(mut self, fetch: bool) -> Self {
        self.fetch = fetch;
        self
    }

    pub fn debounce(mut self, delay: Duration) -> Self {
        self.debounce = Some(delay);
        self
    }

    pub fn immediate(mut self, immediate: bool) -> Self {
        self.immediate = immediate;
        self
    }

    /// Trailing-edge debounce: runs are never immediate and wait out the rest
    /// of `delay` since the previous run.
    pub fn defer(mut self, delay: Duration) -> Self {
        self.debounce = Some(delay);
        self.immediate = false;
        self
    }

    pub fn latest_only(mut self, latest_only: bool) -> Self {
        self.latest_only = latest_only;
        self
    }

    pub fn tag(mut self, tag: impl Into<Node>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert!(SubscribeOptions::default().fetch);
        let calc = CalculateOptions::default();
        assert!(calc.fetch && calc.immediate && !calc.latest_only);
        assert_eq!(calc.debounce, None);
    }

    #[test]
    fn test_defer_forces_trailing_edge() {
        let calc = CalculateOptions::new().immediate(true).defer(Duration::from_millis(5));
        assert_eq!(calc.debounce, Some(Duration::from_millis(5)));
        assert!(!calc.immediate);
    }
}
