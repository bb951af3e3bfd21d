//! Whole-document helpers built on the accessors.

use indexmap::IndexMap;
use nested_path::{PathLike, Segments};

use crate::accessor::{delete, get, set};
use crate::error::ObjectError;
use crate::node::{Map, Node};
use crate::options::ResolvedOptions;
use crate::traverse::{entries, TraverseOptions};

/// Deep copy of `root` with every listed path removed.
pub fn filter_exclude<P: PathLike>(root: &Node, paths: &[P], separator: &str) -> Node {
    let mut out = root.deep_clone();
    for path in paths {
        delete(&mut out, &path.to_segments(separator));
    }
    out
}

/// New map holding only the listed paths of `root`, at the same locations.
///
/// Paths missing from `root` are skipped.
pub fn filter_include<P: PathLike>(root: &Node, paths: &[P], separator: &str) -> Node {
    let mut out = Node::object();
    let options = ResolvedOptions::default();
    for path in paths {
        let segments = path.to_segments(separator);
        if let Some(value) = get(root, &segments) {
            set(&mut out, &segments, value.deep_clone(), &options);
        }
    }
    out
}

/// Copy of `root` that shares no containers with it.
pub fn deep_clone(root: &Node) -> Node {
    root.deep_clone()
}

/// Structural equality: same kinds, same keys, equal leaves.
pub fn deep_equal(a: &Node, b: &Node) -> bool {
    a == b
}

/// Leaf paths at which `a` and `b` differ.
///
/// A leaf differs when it is missing on the other side, holds a different
/// value there, or sits where the other side has a container. Each path is
/// reported once; `a`'s leaves come first.
pub fn diffs(a: &Node, b: &Node) -> Vec<Segments> {
    let mut out = Vec::new();
    collect_diffs(a, Some(b), &mut Vec::new(), &mut out, true);
    collect_diffs(b, Some(a), &mut Vec::new(), &mut out, false);
    out
}

fn collect_diffs(
    node: &Node,
    other: Option<&Node>,
    prefix: &mut Segments,
    out: &mut Vec<Segments>,
    compare: bool,
) {
    for (key, child) in node.children() {
        let counterpart = other.and_then(|other| other.child(&key));
        prefix.push(key);
        if child.is_container() {
            collect_diffs(child, counterpart, prefix, out, compare);
        } else {
            let differs = match counterpart {
                None => true,
                // Scalar mismatches are reported by the first pass only.
                Some(value) if compare => value != child,
                Some(value) => value.is_container(),
            };
            if differs {
                out.push(prefix.clone());
            }
        }
        prefix.pop();
    }
}

/// Index the containers of a sequence by the value found at `path` in each.
///
/// Keys are the string form of the found value. Items without a value at
/// `path` and non-container items are skipped; on duplicate keys the later
/// item wins.
pub fn index_by<P: PathLike + ?Sized>(items: &Node, path: &P, separator: &str) -> Result<Node, ObjectError> {
    let items = match items {
        Node::Array(items) => items,
        Node::Object(_) => return Err(ObjectError::NotASequence),
        _ => return Err(ObjectError::NotAContainer),
    };
    let segments = path.to_segments(separator);
    let mut indexed = Map::new();
    for item in items.iter().filter(|item| item.is_container()) {
        if let Some(key) = get(item, &segments) {
            indexed.insert(index_key(key), item.clone());
        }
    }
    Ok(Node::from_map(indexed))
}

fn index_key(key: &Node) -> String {
    match key {
        Node::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Map of joined leaf path to leaf value, in pre-order.
///
/// Empty containers have no leaves and vanish.
pub fn flatten(root: &Node, separator: &str) -> IndexMap<String, Node> {
    entries(root, TraverseOptions::leaves(), separator)
        .map(|(path, node)| (path.to_path(separator), node.clone()))
        .collect()
}

/// Every joined path below `root`, containers before their children.
pub fn flatten_paths(root: &Node, separator: &str) -> Vec<String> {
    entries(root, TraverseOptions::all(), separator)
        .map(|(path, _)| path.to_path(separator))
        .collect()
}
