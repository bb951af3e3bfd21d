use indexmap::map::Values;
use indexmap::IndexMap;
use nested_path::Segments;

/// Key under which the physical encoding stores a node's children.
pub const CHILDREN_KEY: &str = "children";

/// Key under which the physical encoding stores a node's payload.
pub const VALUE_KEY: &str = "value";

/// One node of a [`HierarchyTree`].
///
/// A node other than the root always carries a value, children, or both;
/// nodes that lose both are pruned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode<V> {
    children: Option<IndexMap<String, TreeNode<V>>>,
    value: Option<V>,
}

impl<V> Default for TreeNode<V> {
    fn default() -> Self {
        Self {
            children: None,
            value: None,
        }
    }
}

impl<V> TreeNode<V> {
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    pub fn has_children(&self) -> bool {
        self.children.is_some()
    }

    pub fn child(&self, segment: &str) -> Option<&TreeNode<V>> {
        self.children.as_ref()?.get(segment)
    }

    /// Children in insertion order.
    pub fn children(&self) -> impl Iterator<Item = (&String, &TreeNode<V>)> {
        self.children.iter().flat_map(|children| children.iter())
    }

    fn child_values(&self) -> Option<Values<'_, String, TreeNode<V>>> {
        self.children.as_ref().map(|children| children.values())
    }

    fn is_dead(&self) -> bool {
        self.value.is_none() && self.children.is_none()
    }
}

/// Sparse tree of values keyed by path segments.
///
/// Only paths that hold a value, or lie above one, have nodes. The tree is
/// the hierarchy behind subscription dispatch: [`family_nodes`] of a path
/// lists the nodes below it deepest first, then the nodes above it nearest
/// first, ending with the root.
///
/// [`family_nodes`]: HierarchyTree::family_nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyTree<V> {
    root: TreeNode<V>,
}

impl<V> Default for HierarchyTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> HierarchyTree<V> {
    pub fn new() -> Self {
        Self {
            root: TreeNode::default(),
        }
    }

    pub fn root(&self) -> &TreeNode<V> {
        &self.root
    }

    /// True when no path holds a value.
    pub fn is_empty(&self) -> bool {
        self.root.is_dead()
    }

    /// Number of nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.descendant_nodes(&[]).count()
    }

    pub fn node(&self, path: &[String]) -> Option<&TreeNode<V>> {
        path.iter()
            .try_fold(&self.root, |node, segment| node.child(segment))
    }

    fn node_mut(&mut self, path: &[String]) -> Option<&mut TreeNode<V>> {
        let mut node = &mut self.root;
        for segment in path {
            node = node.children.as_mut()?.get_mut(segment.as_str())?;
        }
        Some(node)
    }

    pub fn has_value(&self, path: &[String]) -> bool {
        self.get_value(path).is_some()
    }

    pub fn get_value(&self, path: &[String]) -> Option<&V> {
        self.node(path)?.value.as_ref()
    }

    pub fn get_value_mut(&mut self, path: &[String]) -> Option<&mut V> {
        self.node_mut(path)?.value.as_mut()
    }

    /// Store `value` at `path`, creating the nodes above it. Returns the
    /// value it replaces.
    pub fn set_value(&mut self, path: &[String], value: V) -> Option<V> {
        let mut node = &mut self.root;
        for segment in path {
            node = node
                .children
                .get_or_insert_with(IndexMap::new)
                .entry(segment.clone())
                .or_default();
        }
        node.value.replace(value)
    }

    /// Value at `path`, inserting one built by `init` if there is none.
    pub fn value_or_insert_with(&mut self, path: &[String], init: impl FnOnce() -> V) -> &mut V {
        let mut node = &mut self.root;
        for segment in path {
            node = node
                .children
                .get_or_insert_with(IndexMap::new)
                .entry(segment.clone())
                .or_default();
        }
        node.value.get_or_insert_with(init)
    }

    /// Remove and return the value at `path`, then prune every node on the
    /// way back up that no longer holds a value or children.
    pub fn delete_value(&mut self, path: &[String]) -> Option<V> {
        remove_and_prune(&mut self.root, path)
    }

    /// Nodes at and below `path`, children before their parent.
    pub fn descendant_nodes(&self, path: &[String]) -> Descendants<'_, V> {
        let stack = self
            .node(path)
            .map(|node| vec![(node, node.child_values())])
            .unwrap_or_default();
        Descendants { stack }
    }

    /// Values at and below `path`, in [`descendant_nodes`](Self::descendant_nodes) order.
    pub fn depth_first_values(&self, path: &[String]) -> impl Iterator<Item = &V> {
        self.descendant_nodes(path).filter_map(TreeNode::value)
    }

    /// Existing nodes strictly above `path`, nearest first, ending with the
    /// root. The root path has no ancestors.
    pub fn ancestor_nodes(&self, path: &[String]) -> Ancestors<'_, V> {
        let mut nodes = Vec::with_capacity(path.len());
        if let Some((_, above)) = path.split_last() {
            let mut node = &self.root;
            nodes.push(node);
            for segment in above {
                match node.child(segment) {
                    Some(child) => {
                        node = child;
                        nodes.push(node);
                    }
                    None => break,
                }
            }
        }
        Ancestors { nodes }
    }

    pub fn ancestor_values(&self, path: &[String]) -> impl Iterator<Item = &V> {
        self.ancestor_nodes(path).filter_map(TreeNode::value)
    }

    /// [`descendant_nodes`](Self::descendant_nodes) followed by
    /// [`ancestor_nodes`](Self::ancestor_nodes).
    pub fn family_nodes(&self, path: &[String]) -> impl Iterator<Item = &TreeNode<V>> {
        self.descendant_nodes(path).chain(self.ancestor_nodes(path))
    }

    pub fn family_values(&self, path: &[String]) -> impl Iterator<Item = &V> {
        self.family_nodes(path).filter_map(TreeNode::value)
    }
}

fn remove_and_prune<V>(node: &mut TreeNode<V>, path: &[String]) -> Option<V> {
    let Some((segment, rest)) = path.split_first() else {
        return node.value.take();
    };
    let children = node.children.as_mut()?;
    let child = children.get_mut(segment.as_str())?;
    let removed = remove_and_prune(child, rest);
    if child.is_dead() {
        children.shift_remove(segment.as_str());
        tracing::trace!(segment = segment.as_str(), "pruned empty hierarchy node");
    }
    if children.is_empty() {
        node.children = None;
    }
    removed
}

/// Physical location of the value stored at `segments`, in the
/// `children`/`value` encoding: `[a, b]` becomes
/// `[children, a, children, b, value]`.
pub fn hierarchy_path(segments: &[String]) -> Segments {
    let mut out = Vec::with_capacity(segments.len() * 2 + 1);
    for segment in segments {
        out.push(CHILDREN_KEY.to_string());
        out.push(segment.clone());
    }
    out.push(VALUE_KEY.to_string());
    out
}

/// Post-order iterator returned by [`HierarchyTree::descendant_nodes`].
pub struct Descendants<'a, V> {
    stack: Vec<(&'a TreeNode<V>, Option<Values<'a, String, TreeNode<V>>>)>,
}

impl<'a, V> Iterator for Descendants<'a, V> {
    type Item = &'a TreeNode<V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (_, children) = self.stack.last_mut()?;
            match children.as_mut().and_then(Iterator::next) {
                Some(child) => self.stack.push((child, child.child_values())),
                None => return self.stack.pop().map(|(node, _)| node),
            }
        }
    }
}

/// Iterator returned by [`HierarchyTree::ancestor_nodes`].
pub struct Ancestors<'a, V> {
    nodes: Vec<&'a TreeNode<V>>,
}

impl<'a, V> Iterator for Ancestors<'a, V> {
    type Item = &'a TreeNode<V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.nodes.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.nodes.len(), Some(self.nodes.len()))
    }
}
