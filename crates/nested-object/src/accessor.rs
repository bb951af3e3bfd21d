//! Recursive get / has / set / delete over a [`Node`] tree.
//!
//! The functions here take already-normalised segments (see
//! [`nested_path::segments_from_path`]). Reads never fail: descending through
//! a scalar or a missing key yields `None` / `false`.
//!
//! The writers mutate `root` in place. A container that is shared with
//! another root is copied before being changed, so in-place writes stay
//! invisible to every other holder of the old tree.

use std::rc::Rc;

use crate::node::{index_of, padded_index, Map, Node};
use crate::options::ResolvedOptions;

/// Check whether `segments` resolve inside `root`. The empty path always
/// resolves to `root` itself.
pub fn has(root: &Node, segments: &[String]) -> bool {
    get(root, segments).is_some()
}

/// Get the value at `segments`.
pub fn get<'a>(root: &'a Node, segments: &[String]) -> Option<&'a Node> {
    let mut current = root;
    for segment in segments {
        current = current.child(segment)?;
    }
    Some(current)
}

/// Get a mutable reference to the value at `segments`.
///
/// Shared containers along the way are copied.
pub fn get_mut<'a>(root: &'a mut Node, segments: &[String]) -> Option<&'a mut Node> {
    let mut current = root;
    for segment in segments {
        current = current.child_mut(segment)?;
    }
    Some(current)
}

/// Write `value` at `segments`, creating intermediate containers as needed.
///
/// An intermediate slot that does not hold a container is replaced by a new
/// one: a sequence when `options.array` is set and the segment it will hold
/// is numeric, a map otherwise. The empty path is a no-op here; replacing
/// the whole root is the owner's business.
///
/// Returns `root` for chaining.
pub fn set<'a>(
    root: &'a mut Node,
    segments: &[String],
    value: Node,
    options: &ResolvedOptions,
) -> &'a mut Node {
    if !segments.is_empty() {
        set_in(root, segments, value, options.array);
    }
    root
}

fn set_in(node: &mut Node, segments: &[String], value: Node, array: bool) {
    let Some((segment, rest)) = segments.split_first() else {
        *node = value;
        return;
    };
    if !node.is_container() {
        *node = Node::container_for(segment, array);
    }
    let index = match node {
        Node::Array(items) => padded_index(items.len(), segment),
        _ => None,
    };
    if index.is_none() && matches!(node, Node::Array(_)) {
        promote_to_map(node, segment);
    }
    match (node, index) {
        (Node::Array(items), Some(index)) => {
            let items = Rc::make_mut(items);
            if index >= items.len() {
                items.resize(index + 1, Node::Null);
            }
            set_in(&mut items[index], rest, value, array);
        }
        (Node::Object(map), _) => {
            let slot = Rc::make_mut(map).entry(segment.clone()).or_default();
            set_in(slot, rest, value, array);
        }
        _ => {}
    }
}

/// Remove the value at `segments` and return it.
///
/// The empty path empties the root container, keeping its kind, and returns
/// the previous root. Missing paths are a no-op.
pub fn delete(root: &mut Node, segments: &[String]) -> Option<Node> {
    let Some((last, parent_path)) = segments.split_last() else {
        if !root.is_container() {
            return None;
        }
        let empty = empty_like(root);
        return Some(std::mem::replace(root, empty));
    };
    // Checked up front so a missing key does not copy shared containers.
    if !has(root, segments) {
        return None;
    }
    let parent = get_mut(root, parent_path)?;
    remove_child(parent, last)
}

pub(crate) fn remove_child(parent: &mut Node, segment: &str) -> Option<Node> {
    match parent {
        Node::Object(map) => Rc::make_mut(map).shift_remove(segment),
        Node::Array(items) => {
            let index = index_of(segment)?;
            if index >= items.len() {
                return None;
            }
            Some(Rc::make_mut(items).remove(index))
        }
        _ => None,
    }
}

pub(crate) fn empty_like(node: &Node) -> Node {
    match node {
        Node::Array(_) => Node::array(),
        Node::Object(_) => Node::object(),
        scalar => scalar.clone(),
    }
}

/// Rebuild a sequence as a map keyed by stringified indices.
pub(crate) fn sequence_to_map(items: &[Node]) -> Map {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| (i.to_string(), item.clone()))
        .collect()
}

fn promote_to_map(node: &mut Node, segment: &str) {
    if let Node::Array(items) = node {
        tracing::warn!(
            segment,
            len = items.len(),
            "non-index segment written into a sequence; promoting it to a map"
        );
        let map = sequence_to_map(items);
        *node = Node::from_map(map);
    }
}
