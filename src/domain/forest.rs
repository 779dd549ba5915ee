use std::collections::HashSet;
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::record::{Record, RecordKey};

/// Tree node in the arena-based forest.
#[derive(Debug)]
pub struct TreeNode<R> {
    /// The record this node wraps
    pub data: R,
    /// Identifier of the record
    pub key: RecordKey,
    /// Indices of child nodes in the arena, in input order
    pub children: Vec<Index>,
}

/// Arena-based forest built from a flat record list.
///
/// All nodes live in one generational arena and refer to their children by
/// index, so linking a child never copies its subtree. Nodes that could not
/// be reached from a root (dangling parent, pre-existing cycle) stay in the
/// arena and are reported by [`Forest::dropped`].
pub struct Forest<R> {
    /// Arena storage for all nodes, reachable or not
    arena: Arena<TreeNode<R>>,
    /// Root nodes in input order
    roots: Vec<Index>,
    /// Every node in input order
    order: Vec<Index>,
}

impl<R> Default for Forest<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for Forest<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Forest")
            .field("roots", &self.roots().collect::<Vec<_>>())
            .finish()
    }
}

impl<R> Forest<R> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            roots: Vec::new(),
            order: Vec::new(),
        }
    }

    pub(crate) fn from_parts(
        arena: Arena<TreeNode<R>>,
        roots: Vec<Index>,
        order: Vec<Index>,
    ) -> Self {
        Self {
            arena,
            roots,
            order,
        }
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode<R>> {
        self.arena.get(idx)
    }

    /// Root nodes in input order.
    pub fn roots(&self) -> impl Iterator<Item = NodeRef<'_, R>> + '_ {
        self.refs(&self.roots)
    }

    fn refs<'a>(
        &'a self,
        indices: &'a [Index],
    ) -> impl Iterator<Item = NodeRef<'a, R>> + 'a {
        indices
            .iter()
            .filter(move |idx| self.arena.contains(**idx))
            .map(move |&idx| NodeRef { forest: self, idx })
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Number of nodes reachable from the roots.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Pre-order, left-to-right traversal of all reachable nodes.
    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> ForestIterator<'_, R> {
        ForestIterator::new(self)
    }

    /// Number of levels, 0 for an empty forest.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.roots
            .iter()
            .map(|&root| self.calculate_depth(root))
            .max()
            .unwrap_or(0)
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Identifiers of all leaf nodes, in traversal order.
    pub fn leaves(&self) -> Vec<RecordKey> {
        self.iter()
            .filter(|node| node.is_leaf())
            .map(|node| node.id().clone())
            .collect()
    }

    /// Nodes that were built but are not reachable from any root, in input order.
    pub fn dropped(&self) -> Vec<NodeRef<'_, R>> {
        let reachable: HashSet<Index> = self.iter().map(|node| node.idx).collect();
        self.order
            .iter()
            .filter(|idx| !reachable.contains(*idx))
            .map(|&idx| NodeRef { forest: self, idx })
            .collect()
    }
}

impl<R: Record> Forest<R> {
    /// Looks up a reachable node by identifier.
    pub fn find(&self, key: &RecordKey) -> Option<NodeRef<'_, R>> {
        self.iter().find(|node| node.id() == key)
    }
}

/// Borrowed view of one node in a [`Forest`].
pub struct NodeRef<'a, R> {
    forest: &'a Forest<R>,
    idx: Index,
}

impl<R> Clone for NodeRef<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for NodeRef<'_, R> {}

impl<R> fmt::Debug for NodeRef<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut t = f.debug_tuple("Node");
        t.field(&self.id());
        let children: Vec<_> = self.children().collect();
        if !children.is_empty() {
            t.field(&children);
        }
        t.finish()
    }
}

impl<'a, R> NodeRef<'a, R> {
    fn node(&self) -> &'a TreeNode<R> {
        // NodeRefs are only handed out for live indices and the arena is never
        // mutated after build.
        &self.forest.arena[self.idx]
    }

    pub fn index(&self) -> Index {
        self.idx
    }

    pub fn record(&self) -> &'a R {
        &self.node().data
    }

    pub fn id(&self) -> &'a RecordKey {
        &self.node().key
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a, R>> + 'a {
        self.forest.refs(&self.node().children)
    }

    pub fn child_count(&self) -> usize {
        self.node().children.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.node().children.is_empty()
    }
}

pub struct ForestIterator<'a, R> {
    forest: &'a Forest<R>,
    stack: Vec<Index>,
}

impl<'a, R> ForestIterator<'a, R> {
    fn new(forest: &'a Forest<R>) -> Self {
        let stack = forest.roots.iter().rev().copied().collect();
        Self { forest, stack }
    }
}

impl<'a, R> Iterator for ForestIterator<'a, R> {
    type Item = NodeRef<'a, R>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.forest.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some(NodeRef {
                    forest: self.forest,
                    idx: current_idx,
                });
            }
        }
        None
    }
}
