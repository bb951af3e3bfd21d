//! Copy-on-write writers.
//!
//! Every write returns a new root. Only the spine from the root to the
//! written slot is copied; every other subtree is shared with the input,
//! which is never changed.

use crate::accessor::{empty_like, get, has, remove_child, sequence_to_map};
use crate::node::{padded_index, Map, Node};
use crate::options::ResolvedOptions;

/// Return a copy of `root` with `value` written at `segments`.
///
/// The empty path returns `value` itself.
pub fn set_immutable(
    root: &Node,
    segments: &[String],
    value: Node,
    options: &ResolvedOptions,
) -> Node {
    let Some((segment, rest)) = segments.split_first() else {
        return value;
    };
    let index = match root {
        Node::Array(items) => padded_index(items.len(), segment),
        _ => None,
    };
    match (root, index) {
        (Node::Array(items), Some(index)) => {
            let mut copy = Vec::clone(items);
            let child = copy.get(index).cloned().unwrap_or_default();
            if index >= copy.len() {
                copy.resize(index + 1, Node::Null);
            }
            copy[index] = set_immutable(&child, rest, value, options);
            Node::from_vec(copy)
        }
        (Node::Array(items), None) => {
            let mut copy = sequence_to_map(items);
            let child = Node::Null;
            copy.insert(segment.clone(), set_immutable(&child, rest, value, options));
            Node::from_map(copy)
        }
        (Node::Object(map), _) => {
            let mut copy = Map::clone(map);
            let child = copy.get(segment).cloned().unwrap_or_default();
            copy.insert(segment.clone(), set_immutable(&child, rest, value, options));
            Node::from_map(copy)
        }
        _ => {
            let fresh = Node::container_for(segment, options.array);
            set_immutable(&fresh, segments, value, options)
        }
    }
}

/// Return a copy of `root` without the value at `segments`.
///
/// A missing path returns `root` unchanged (sharing it). The empty path
/// returns an empty container of the root's kind.
pub fn delete_immutable(root: &Node, segments: &[String], options: &ResolvedOptions) -> Node {
    let Some((last, parent_path)) = segments.split_last() else {
        return empty_like(root);
    };
    if !has(root, segments) {
        return root.clone();
    }
    let Some(parent) = get(root, parent_path) else {
        return root.clone();
    };
    // The clone shares the parent's container; removing from it copies it.
    let mut parent = parent.clone();
    remove_child(&mut parent, last);
    set_immutable(root, parent_path, parent, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(steps: &[&str]) -> Vec<String> {
        steps.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_set_immutable_shares_untouched_subtrees() {
        let root = Node::from(json!({"a": {"x": 1}, "b": {"y": 2}}));
        let next = set_immutable(&root, &path(&["a", "x"]), Node::from(9), &Default::default());

        assert_eq!(root.to_json(), json!({"a": {"x": 1}, "b": {"y": 2}}));
        assert_eq!(next.to_json(), json!({"a": {"x": 9}, "b": {"y": 2}}));
        assert!(!next.same(&root));
        assert!(!next.child("a").unwrap().same(root.child("a").unwrap()));
        assert!(next.child("b").unwrap().same(root.child("b").unwrap()));
    }

    #[test]
    fn test_set_immutable_empty_path_replaces_root() {
        let root = Node::from(json!({"a": 1}));
        let next = set_immutable(&root, &[], Node::from(5), &Default::default());
        assert_eq!(next, Node::from(5));
    }

    #[test]
    fn test_set_immutable_synthesises_containers() {
        let root = Node::from(json!({"a": 1}));
        let options = ResolvedOptions {
            array: true,
            ..Default::default()
        };
        let next = set_immutable(&root, &path(&["a", "0", "b"]), Node::from(true), &options);
        assert_eq!(next.to_json(), json!({"a": [{"b": true}]}));
        assert_eq!(root.to_json(), json!({"a": 1}));
    }

    #[test]
    fn test_set_immutable_into_sequence() {
        let root = Node::from(json!([1, 2, 3]));
        let next = set_immutable(&root, &path(&["1"]), Node::from(20), &Default::default());
        assert_eq!(next.to_json(), json!([1, 20, 3]));
        assert_eq!(root.to_json(), json!([1, 2, 3]));
    }

    #[test]
    fn test_delete_immutable() {
        let root = Node::from(json!({"a": {"b": 1, "c": 2}, "d": [1, 2]}));
        let next = delete_immutable(&root, &path(&["a", "b"]), &Default::default());
        assert_eq!(next.to_json(), json!({"a": {"c": 2}, "d": [1, 2]}));
        assert_eq!(root.to_json(), json!({"a": {"b": 1, "c": 2}, "d": [1, 2]}));
        assert!(next.child("d").unwrap().same(root.child("d").unwrap()));
    }

    #[test]
    fn test_delete_immutable_keeps_sequences() {
        let root = Node::from(json!({"d": [1, 2, 3]}));
        let next = delete_immutable(&root, &path(&["d", "1"]), &Default::default());
        assert_eq!(next.to_json(), json!({"d": [1, 3]}));
    }

    #[test]
    fn test_delete_immutable_missing_path_returns_root() {
        let root = Node::from(json!({"a": 1}));
        let next = delete_immutable(&root, &path(&["b"]), &Default::default());
        assert!(next.same(&root));
    }

    #[test]
    fn test_delete_immutable_root() {
        let root = Node::from(json!({"a": 1}));
        let next = delete_immutable(&root, &[], &Default::default());
        assert_eq!(next.to_json(), json!({}));
        assert_eq!(root.to_json(), json!({"a": 1}));
    }
}
