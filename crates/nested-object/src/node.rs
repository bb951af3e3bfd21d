//! The value model: scalars, sequences and maps.
//!
//! Containers are reference counted. Cloning a [`Node`] is cheap and shares
//! the containers; writes go through [`Rc::make_mut`], so a container that is
//! also reachable from another root is copied before it is changed.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Number, Value};

use nested_path::is_index;

/// Map container contents. Keys keep insertion order.
pub type Map = IndexMap<String, Node>;

/// A value inside a nested document.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Node {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Rc<Vec<Node>>),
    Object(Rc<Map>),
}

impl Node {
    /// An empty map container.
    pub fn object() -> Self {
        Node::Object(Rc::new(Map::new()))
    }

    /// An empty sequence container.
    pub fn array() -> Self {
        Node::Array(Rc::new(Vec::new()))
    }

    pub fn from_map(map: Map) -> Self {
        Node::Object(Rc::new(map))
    }

    pub fn from_vec(items: Vec<Node>) -> Self {
        Node::Array(Rc::new(items))
    }

    /// An empty container suitable for holding `segment`: a sequence when
    /// `array` is enabled and the segment is numeric, a map otherwise.
    pub fn container_for(segment: &str, array: bool) -> Self {
        if array && padded_index(0, segment).is_some() {
            Node::array()
        } else {
            Node::object()
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Node::Array(_) | Node::Object(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Node::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Node::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Node]> {
        match self {
            Node::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Node::Object(map) => Some(&**map),
            _ => None,
        }
    }

    /// Number of direct children; zero for scalars.
    pub fn len(&self) -> usize {
        match self {
            Node::Array(items) => items.len(),
            Node::Object(map) => map.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Strict equality: scalars by value, containers by identity.
    ///
    /// Two containers with equal contents but different allocations are not
    /// the same; use `==` for structural comparison.
    pub fn same(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Array(a), Node::Array(b)) => Rc::ptr_eq(a, b),
            (Node::Object(a), Node::Object(b)) => Rc::ptr_eq(a, b),
            (Node::Array(_) | Node::Object(_), _) | (_, Node::Array(_) | Node::Object(_)) => false,
            (a, b) => a == b,
        }
    }

    /// Direct child addressed by `segment`.
    pub fn child(&self, segment: &str) -> Option<&Node> {
        match self {
            Node::Object(map) => map.get(segment),
            Node::Array(items) => index_of(segment).and_then(|i| items.get(i)),
            _ => None,
        }
    }

    /// Mutable access to a direct child, copying this container first if it
    /// is shared.
    pub fn child_mut(&mut self, segment: &str) -> Option<&mut Node> {
        match self {
            Node::Object(map) => Rc::make_mut(map).get_mut(segment),
            Node::Array(items) => {
                let index = index_of(segment)?;
                Rc::make_mut(items).get_mut(index)
            }
            _ => None,
        }
    }

    /// Iterate `(segment, child)` pairs of a container; empty for scalars.
    pub fn children(&self) -> Children<'_> {
        match self {
            Node::Object(map) => Children::Object(map.iter()),
            Node::Array(items) => Children::Array(items.iter().enumerate()),
            _ => Children::None,
        }
    }

    /// A structurally equal tree that shares no container with `self`.
    pub fn deep_clone(&self) -> Node {
        match self {
            Node::Array(items) => Node::from_vec(items.iter().map(Node::deep_clone).collect()),
            Node::Object(map) => Node::from_map(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.deep_clone()))
                    .collect(),
            ),
            scalar => scalar.clone(),
        }
    }

    pub fn to_json(&self) -> Value {
        Value::from(self)
    }
}

pub(crate) fn index_of(segment: &str) -> Option<usize> {
    if is_index(segment) {
        segment.parse().ok()
    } else {
        None
    }
}

/// Largest run of `null` padding a write past the end of a sequence may add.
pub const MAX_PAD: usize = 1024;

/// `segment` as a writable index into a sequence of length `len`.
///
/// Indices further than [`MAX_PAD`] past the end are treated as map keys.
pub(crate) fn padded_index(len: usize, segment: &str) -> Option<usize> {
    let index = index_of(segment)?;
    index.checked_add(1)?;
    (index < len || index - len <= MAX_PAD).then_some(index)
}

/// Iterator over the direct children of a [`Node`].
pub enum Children<'a> {
    None,
    Array(std::iter::Enumerate<std::slice::Iter<'a, Node>>),
    Object(indexmap::map::Iter<'a, String, Node>),
}

impl<'a> Iterator for Children<'a> {
    type Item = (String, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Children::None => None,
            Children::Array(iter) => iter.next().map(|(i, node)| (i.to_string(), node)),
            Children::Object(iter) => iter.next().map(|(key, node)| (key.clone(), node)),
        }
    }
}

// ── Conversions ───────────────────────────────────────────────────────────

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => Node::Number(n),
            Value::String(s) => Node::String(s),
            Value::Array(items) => Node::from_vec(items.into_iter().map(Node::from).collect()),
            Value::Object(map) => Node::from_map(
                map.into_iter()
                    .map(|(key, value)| (key, Node::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&Node> for Value {
    fn from(node: &Node) -> Self {
        match node {
            Node::Null => Value::Null,
            Node::Bool(b) => Value::Bool(*b),
            Node::Number(n) => Value::Number(n.clone()),
            Node::String(s) => Value::String(s.clone()),
            Node::Array(items) => Value::Array(items.iter().map(Value::from).collect()),
            Node::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Value::from(&node)
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Bool(b)
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Node {
                fn from(n: $t) -> Self {
                    Node::Number(Number::from(n))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for Node {
    /// Non-finite floats have no JSON representation and become `Null`.
    fn from(n: f64) -> Self {
        Number::from_f64(n).map(Node::Number).unwrap_or(Node::Null)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::String(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::String(s)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::from_vec(items)
    }
}

impl From<Map> for Node {
    fn from(map: Map) -> Self {
        Node::from_map(map)
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Null => serializer.serialize_unit(),
            Node::Bool(b) => serializer.serialize_bool(*b),
            Node::Number(n) => n.serialize(serializer),
            Node::String(s) => serializer.serialize_str(s),
            Node::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Node::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map.iter() {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Node::from)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::from(self))
    }
}
