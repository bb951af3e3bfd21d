//! A single in-memory document addressed by paths.

use nested_path::{PathLike, Segments};

use crate::accessor;
use crate::error::ObjectError;
use crate::immutable::{delete_immutable, set_immutable};
use crate::node::Node;
use crate::options::{Options, ResolvedOptions};
use crate::traverse::{entries, Entries, TraverseOptions};

/// A root [`Node`] plus the options used to address it.
///
/// In mutable mode (the default) writes change the root in place; in
/// immutable mode every write replaces the root with a copy that shares all
/// untouched subtrees with the previous one, so a previously taken
/// [`root`](Self::root) clone keeps observing the old document.
#[derive(Debug, Clone)]
pub struct NestedObject {
    root: Node,
    options: Options,
}

impl Default for NestedObject {
    fn default() -> Self {
        Self::new()
    }
}

impl NestedObject {
    /// An empty map document with default options.
    pub fn new() -> Self {
        Self::with_options(Node::object(), Options::default())
    }

    pub fn with_root(root: impl Into<Node>) -> Self {
        Self::with_options(root, Options::default())
    }

    pub fn with_options(root: impl Into<Node>, options: Options) -> Self {
        Self {
            root: root.into(),
            options,
        }
    }

    /// Parse a JSON document.
    pub fn from_json_str(json: &str, options: Options) -> Result<Self, ObjectError> {
        let root: Node = serde_json::from_str(json)?;
        Ok(Self::with_options(root, options))
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn into_root(self) -> Node {
        self.root
    }

    fn resolve(&self, over: &Options) -> ResolvedOptions {
        self.options.merge(over).resolve()
    }

    fn separator(&self) -> String {
        self.options.resolve().separator
    }

    pub fn segments_from_path<P: PathLike + ?Sized>(&self, path: &P) -> Segments {
        path.to_segments(&self.separator())
    }

    pub fn path_from_segments<P: PathLike + ?Sized>(&self, path: &P) -> String {
        path.to_path(&self.separator())
    }

    pub fn has<P: PathLike + ?Sized>(&self, path: &P) -> bool {
        accessor::has(&self.root, &self.segments_from_path(path))
    }

    pub fn get<P: PathLike + ?Sized>(&self, path: &P) -> Option<&Node> {
        accessor::get(&self.root, &self.segments_from_path(path))
    }

    /// Write `value` at `path` and return the resulting root.
    pub fn set<P, V>(&mut self, path: &P, value: V) -> &Node
    where
        P: PathLike + ?Sized,
        V: Into<Node>,
    {
        self.set_with(path, value, &Options::default())
    }

    /// [`set`](Self::set) with per-call options layered over the store's.
    ///
    /// The empty path replaces the root wholesale.
    pub fn set_with<P, V>(&mut self, path: &P, value: V, options: &Options) -> &Node
    where
        P: PathLike + ?Sized,
        V: Into<Node>,
    {
        let resolved = self.resolve(options);
        let segments = path.to_segments(&resolved.separator);
        let value = value.into();
        if segments.is_empty() {
            self.root = value;
        } else if resolved.immutable {
            self.root = set_immutable(&self.root, &segments, value, &resolved);
        } else {
            accessor::set(&mut self.root, &segments, value, &resolved);
        }
        &self.root
    }

    /// Remove the value at `path`, returning it.
    ///
    /// The empty path empties the root container (keeping its kind) and
    /// returns the previous root.
    pub fn delete<P: PathLike + ?Sized>(&mut self, path: &P) -> Option<Node> {
        self.delete_with(path, &Options::default())
    }

    pub fn delete_with<P: PathLike + ?Sized>(&mut self, path: &P, options: &Options) -> Option<Node> {
        let resolved = self.resolve(options);
        let segments = path.to_segments(&resolved.separator);
        if !resolved.immutable {
            return accessor::delete(&mut self.root, &segments);
        }
        let removed = if segments.is_empty() {
            self.root.is_container().then(|| self.root.clone())
        } else {
            accessor::get(&self.root, &segments).cloned()
        };
        self.root = delete_immutable(&self.root, &segments, &resolved);
        removed
    }

    /// Lazily enumerate `(path, value)` pairs; each call starts over.
    pub fn entries(&self, options: TraverseOptions) -> Entries<'_> {
        entries(&self.root, options, &self.separator())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_then_get() {
        let mut store = NestedObject::new();
        store.set("user.name", "Ann");
        assert_eq!(store.get("user.name"), Some(&Node::from("Ann")));
        assert!(store.has("user.name"));
        assert_eq!(store.get("user").unwrap().to_json(), json!({"name": "Ann"}));
    }

    #[test]
    fn test_custom_separator() {
        let mut store = NestedObject::with_options(Node::object(), Options::new().separator("/"));
        store.set("a/b", 1);
        assert_eq!(store.root().to_json(), json!({"a": {"b": 1}}));
        assert_eq!(store.path_from_segments(&["a", "b"]), "a/b");
    }

    #[test]
    fn test_per_call_separator_wins() {
        let mut store = NestedObject::with_options(Node::object(), Options::new().separator("/"));
        store.set_with("a.b", 1, &Options::new().separator("."));
        assert_eq!(store.root().to_json(), json!({"a": {"b": 1}}));
    }

    #[test]
    fn test_set_root() {
        let mut store = NestedObject::new();
        store.set("", Node::from(json!([1, 2])));
        assert_eq!(store.root().to_json(), json!([1, 2]));
    }

    #[test]
    fn test_immutable_mode_keeps_old_roots() {
        let mut store =
            NestedObject::with_options(Node::from(json!({"a": {"b": 1}, "c": {}})), Options::new().immutable(true));
        let before = store.root().clone();
        store.set("a.b", 2);
        assert_eq!(before.to_json(), json!({"a": {"b": 1}, "c": {}}));
        assert_eq!(store.root().to_json(), json!({"a": {"b": 2}, "c": {}}));
        assert!(store.root().child("c").unwrap().same(before.child("c").unwrap()));

        assert_eq!(store.delete("a"), Some(Node::from(json!({"b": 2}))));
        assert_eq!(store.root().to_json(), json!({"c": {}}));
        assert_eq!(before.to_json(), json!({"a": {"b": 1}, "c": {}}));
    }

    #[test]
    fn test_delete_root_keeps_kind() {
        let mut store = NestedObject::with_root(Node::from(json!({"a": 1})));
        store.delete("");
        assert_eq!(store.root().to_json(), json!({}));
        assert!(!store.has("a"));
    }

    #[test]
    fn test_from_json_str() {
        let store = NestedObject::from_json_str(r#"{"a": [1]}"#, Options::default()).unwrap();
        assert_eq!(store.get("a.0"), Some(&Node::from(1)));
        assert!(matches!(
            NestedObject::from_json_str("{", Options::default()),
            Err(ObjectError::Json(_))
        ));
    }
}
