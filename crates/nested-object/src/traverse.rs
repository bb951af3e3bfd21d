//! Lazy pre-order, depth-first enumeration of `(path, value)` pairs.

use nested_path::{PathLike, Segments};

use crate::node::{Children, Node};

/// What [`entries`] yields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraverseOptions {
    /// Also yield container nodes, before their children.
    pub branches: bool,
    /// Yield raw segments instead of joined paths.
    pub segments: bool,
}

impl TraverseOptions {
    pub fn leaves() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            branches: true,
            segments: false,
        }
    }

    pub fn branches(mut self, branches: bool) -> Self {
        self.branches = branches;
        self
    }

    pub fn segments(mut self, segments: bool) -> Self {
        self.segments = segments;
        self
    }
}

/// The path half of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryPath {
    Joined(String),
    Segments(Segments),
}

impl EntryPath {
    pub fn as_joined(&self) -> Option<&str> {
        match self {
            EntryPath::Joined(path) => Some(path.as_str()),
            EntryPath::Segments(_) => None,
        }
    }

    pub fn as_segments(&self) -> Option<&[String]> {
        match self {
            EntryPath::Joined(_) => None,
            EntryPath::Segments(segments) => Some(segments.as_slice()),
        }
    }
}

impl PathLike for EntryPath {
    fn to_segments(&self, separator: &str) -> Segments {
        match self {
            EntryPath::Joined(path) => path.to_segments(separator),
            EntryPath::Segments(segments) => segments.clone(),
        }
    }

    fn to_path(&self, separator: &str) -> String {
        match self {
            EntryPath::Joined(path) => path.clone(),
            EntryPath::Segments(segments) => segments.to_path(separator),
        }
    }
}

/// Iterator returned by [`entries`].
///
/// Children are visited in container order: insertion order for maps,
/// index order for sequences. Empty containers are branches, so they only
/// appear when branches are requested. The root itself is never yielded.
pub struct Entries<'a> {
    stack: Vec<Children<'a>>,
    prefix: Segments,
    options: TraverseOptions,
    separator: String,
}

/// Enumerate the entries below `root`.
pub fn entries<'a>(root: &'a Node, options: TraverseOptions, separator: &str) -> Entries<'a> {
    Entries {
        stack: vec![root.children()],
        prefix: Vec::new(),
        options,
        separator: separator.to_string(),
    }
}

impl<'a> Entries<'a> {
    fn entry(&self, segments: Segments, node: &'a Node) -> (EntryPath, &'a Node) {
        let path = if self.options.segments {
            EntryPath::Segments(segments)
        } else {
            EntryPath::Joined(segments.join(&self.separator))
        };
        (path, node)
    }
}

impl<'a> Iterator for Entries<'a> {
    type Item = (EntryPath, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let Some((key, node)) = frame.next() else {
                self.stack.pop();
                self.prefix.pop();
                continue;
            };
            let mut segments = self.prefix.clone();
            segments.push(key.clone());
            if node.is_container() {
                self.stack.push(node.children());
                self.prefix.push(key);
                if self.options.branches {
                    return Some(self.entry(segments, node));
                }
            } else {
                return Some(self.entry(segments, node));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn joined(root: &Node, options: TraverseOptions) -> Vec<(String, serde_json::Value)> {
        entries(root, options, ".")
            .map(|(path, node)| (path.as_joined().unwrap().to_string(), node.to_json()))
            .collect()
    }

    #[test]
    fn test_leaves_in_pre_order() {
        let doc = Node::from(json!({"a": {"b": 1, "c": [2, 3]}, "d": 4}));
        let out = joined(&doc, TraverseOptions::leaves());
        assert_eq!(
            out,
            vec![
                ("a.b".to_string(), json!(1)),
                ("a.c.0".to_string(), json!(2)),
                ("a.c.1".to_string(), json!(3)),
                ("d".to_string(), json!(4)),
            ]
        );
    }

    #[test]
    fn test_branches_before_children() {
        let doc = Node::from(json!({"a": {"b": 1}, "e": {}}));
        let paths: Vec<String> = joined(&doc, TraverseOptions::all())
            .into_iter()
            .map(|(path, _)| path)
            .collect();
        assert_eq!(paths, vec!["a", "a.b", "e"]);
    }

    #[test]
    fn test_segments_and_separator() {
        let doc = Node::from(json!({"a": {"b": 1}}));
        let out: Vec<EntryPath> = entries(&doc, TraverseOptions::leaves().segments(true), "/")
            .map(|(path, _)| path)
            .collect();
        assert_eq!(out, vec![EntryPath::Segments(vec!["a".into(), "b".into()])]);

        let out: Vec<EntryPath> = entries(&doc, TraverseOptions::leaves(), "/")
            .map(|(path, _)| path)
            .collect();
        assert_eq!(out, vec![EntryPath::Joined("a/b".into())]);
    }

    #[test]
    fn test_scalar_root_has_no_entries() {
        assert_eq!(entries(&Node::from(1), TraverseOptions::all(), ".").count(), 0);
    }

    #[test]
    fn test_restartable() {
        let doc = Node::from(json!({"a": 1, "b": 2}));
        let first: Vec<_> = entries(&doc, TraverseOptions::leaves(), ".").collect();
        let second: Vec<_> = entries(&doc, TraverseOptions::leaves(), ".").collect();
        assert_eq!(first, second);
    }
}
