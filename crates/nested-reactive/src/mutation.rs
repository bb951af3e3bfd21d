use nested_object::Node;
use nested_path::Segments;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Set,
    Delete,
    /// Initial delivery of the current value on subscribe.
    Fetch,
}

impl MutationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationKind::Set => "SET",
            MutationKind::Delete => "DELETE",
            MutationKind::Fetch => "FETCH",
        }
    }
}

/// What happened, passed to every listener alongside its current value.
///
/// `path` and `segments` are absolute and name the mutated location, which
/// may lie above or below the listener's own path. `value` is `None` after a
/// delete; `previous` is `None` when the location did not exist before.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation {
    pub kind: MutationKind,
    pub path: String,
    pub segments: Segments,
    pub value: Option<Node>,
    pub previous: Option<Node>,
    /// Caller-supplied marker, passed through untouched.
    pub tag: Option<Node>,
}

impl Mutation {
    pub(crate) fn fetch(path: String, segments: Segments, value: Option<Node>) -> Self {
        Self {
            kind: MutationKind::Fetch,
            path,
            segments,
            value,
            previous: None,
            tag: None,
        }
    }
}
