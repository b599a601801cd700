//! Navigation and traversal over materialized nodes

use std::collections::VecDeque;

use crate::tree::{NodeId, NodeKind, TreeNode};

/// A tree of materialized value nodes
///
/// Implementations provide the basic navigation; the derived methods build
/// on them. Only nodes that exist (children of nodes that have been expanded
/// at least once) are visible through this trait.
pub trait Tree {
    /// Get the root node ID (always exists)
    fn root(&self) -> NodeId;

    /// Get a node by its ID
    ///
    /// Returns `None` if the ID is invalid.
    fn get(&self, id: NodeId) -> Option<&TreeNode>;

    /// Get the parent of a node
    ///
    /// Returns `None` for the root node.
    fn parent(&self, id: NodeId) -> Option<NodeId>;

    /// Iterate over the materialized children of a node
    ///
    /// Empty for leaves, for containers that were never expanded, and for
    /// invalid IDs.
    fn children(&self, id: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_>;

    /// Count materialized nodes in the tree
    fn node_count(&self) -> usize;

    fn is_leaf(&self, id: NodeId) -> bool {
        self.get(id).map(|n| n.kind().is_leaf()).unwrap_or(false)
    }

    fn is_container(&self, id: NodeId) -> bool {
        self.get(id)
            .map(|n| n.kind() == NodeKind::Container)
            .unwrap_or(false)
    }

    fn is_expanded(&self, id: NodeId) -> bool {
        self.get(id).map(|n| n.is_expanded()).unwrap_or(false)
    }

    fn key(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(|n| n.key())
    }

    fn label(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(|n| n.label())
    }

    /// Keys leading from the root to this node, root excluded
    fn key_path(&self, id: NodeId) -> Vec<String> {
        let mut keys = Vec::new();
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            if let Some(key) = self.key(current) {
                keys.push(key.to_string());
            }
            current = parent;
        }
        keys.reverse();
        keys
    }

    /// `/`-joined path starting with the root key, for messages
    fn path_string(&self, id: NodeId) -> String {
        let mut path = self.key(self.root()).unwrap_or_default().to_string();
        for key in self.key_path(id) {
            path.push('/');
            path.push_str(&key);
        }
        path
    }

    /// Get the depth of a node (root = 0)
    fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).len()
    }

    fn child_count(&self, id: NodeId) -> usize {
        self.children(id).count()
    }

    /// Get all ancestors of a node, from parent to root
    fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut ancestors = Vec::new();
        let mut current = self.parent(id);
        while let Some(parent_id) = current {
            ancestors.push(parent_id);
            current = self.parent(parent_id);
        }
        ancestors
    }

    fn is_ancestor_of(&self, ancestor: NodeId, descendant: NodeId) -> bool {
        self.ancestors(descendant).contains(&ancestor)
    }
}

/// Traversal order for walking the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    /// Visit parent before children (top-down)
    PreOrder,
    /// Visit children before parent (bottom-up)
    PostOrder,
    /// Visit level by level
    BreadthFirst,
}

/// Walking and searching, implemented for every `Tree`
pub trait TreeTraversal: Tree {
    /// Walk all materialized nodes from the root
    fn walk(&self, order: TraversalOrder) -> TreeWalker<'_, Self>
    where
        Self: Sized,
    {
        TreeWalker::new(self, self.root(), order)
    }

    fn walk_from(&self, start: NodeId, order: TraversalOrder) -> TreeWalker<'_, Self>
    where
        Self: Sized,
    {
        TreeWalker::new(self, start, order)
    }

    /// Walk the nodes a user currently sees, with their depth
    ///
    /// Children of collapsed containers are skipped even if they exist.
    fn visible(&self) -> VisibleNodes<'_, Self>
    where
        Self: Sized,
    {
        VisibleNodes {
            tree: self,
            stack: vec![(self.root(), 0)],
        }
    }

    fn leaves(&self) -> Vec<NodeId>
    where
        Self: Sized,
    {
        self.walk(TraversalOrder::PreOrder)
            .filter(|&id| self.is_leaf(id))
            .collect()
    }

    fn containers(&self) -> Vec<NodeId>
    where
        Self: Sized,
    {
        self.walk(TraversalOrder::PreOrder)
            .filter(|&id| self.is_container(id))
            .collect()
    }

    fn find<F>(&self, predicate: F) -> Vec<NodeId>
    where
        F: Fn(&TreeNode) -> bool,
        Self: Sized,
    {
        self.walk(TraversalOrder::PreOrder)
            .filter(|&id| self.get(id).map(&predicate).unwrap_or(false))
            .collect()
    }

    /// Find a materialized node by the keys leading to it from the root
    ///
    /// An empty path is the root.
    fn find_by_key_path<S: AsRef<str>>(&self, keys: &[S]) -> Option<NodeId> {
        let mut current = self.root();
        for key in keys {
            let key = key.as_ref();
            current = self
                .children(current)
                .find(|&id| self.key(id) == Some(key))?;
        }
        Some(current)
    }

    /// Find the first node with the given display label
    fn find_by_label(&self, label: &str) -> Option<NodeId>
    where
        Self: Sized,
    {
        self.walk(TraversalOrder::PreOrder)
            .find(|&id| self.label(id) == Some(label))
    }
}

impl<T: Tree> TreeTraversal for T {}

/// Iterator for traversing a tree in different orders
pub struct TreeWalker<'a, T: Tree + ?Sized> {
    tree: &'a T,
    order: TraversalOrder,
    pending: VecDeque<NodeId>,
    /// Post-order: nodes whose children were already scheduled
    opened: Vec<bool>,
}

impl<'a, T: Tree + ?Sized> TreeWalker<'a, T> {
    pub fn new(tree: &'a T, start: NodeId, order: TraversalOrder) -> Self {
        Self {
            tree,
            order,
            pending: VecDeque::from([start]),
            opened: Vec::new(),
        }
    }

    fn next_preorder(&mut self) -> Option<NodeId> {
        let current = self.pending.pop_back()?;
        let children: Vec<_> = self.tree.children(current).collect();
        self.pending.extend(children.into_iter().rev());
        Some(current)
    }

    fn next_postorder(&mut self) -> Option<NodeId> {
        while let Some(&current) = self.pending.back() {
            let index = current.get();
            if self.opened.len() <= index {
                self.opened.resize(index + 1, false);
            }
            if self.opened[index] {
                self.pending.pop_back();
                return Some(current);
            }
            self.opened[index] = true;
            let children: Vec<_> = self.tree.children(current).collect();
            self.pending.extend(children.into_iter().rev());
        }
        None
    }

    fn next_breadthfirst(&mut self) -> Option<NodeId> {
        let current = self.pending.pop_front()?;
        self.pending.extend(self.tree.children(current));
        Some(current)
    }
}

impl<'a, T: Tree + ?Sized> Iterator for TreeWalker<'a, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        match self.order {
            TraversalOrder::PreOrder => self.next_preorder(),
            TraversalOrder::PostOrder => self.next_postorder(),
            TraversalOrder::BreadthFirst => self.next_breadthfirst(),
        }
    }
}

/// Pre-order walk over visible nodes, yielding `(id, depth)`
pub struct VisibleNodes<'a, T: Tree + ?Sized> {
    tree: &'a T,
    stack: Vec<(NodeId, usize)>,
}

impl<'a, T: Tree + ?Sized> Iterator for VisibleNodes<'a, T> {
    type Item = (NodeId, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (current, depth) = self.stack.pop()?;
        if self.tree.is_expanded(current) {
            let children: Vec<_> = self.tree.children(current).collect();
            self.stack
                .extend(children.into_iter().rev().map(|child| (child, depth + 1)));
        }
        Some((current, depth))
    }
}
