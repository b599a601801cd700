//! Node types for the value tree

use std::fmt;

use crate::tree::classify::Classification;
use crate::tree::value::Value;

/// Unique identifier for a node within a tree
///
/// Internally an index into the tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root node always has ID 0
    pub const ROOT: NodeId = NodeId(0);

    pub const fn new(id: usize) -> Self {
        NodeId(id)
    }

    /// Get the arena index
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<usize> for NodeId {
    fn from(id: usize) -> Self {
        NodeId(id)
    }
}

/// Rendering category of a value, decided once when its node is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Array or object with at least one enumerable member
    Container,
    /// Array or object with nothing to enumerate; shown like a leaf
    EmptyContainer,
    /// Scalar, null or undefined
    Leaf,
}

impl NodeKind {
    /// Returns true if the node can be toggled open
    pub const fn is_container(self) -> bool {
        matches!(self, NodeKind::Container)
    }

    /// Returns true if the node is displayed as a single value
    pub const fn is_leaf(self) -> bool {
        matches!(self, NodeKind::Leaf | NodeKind::EmptyContainer)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Container => write!(f, "Container"),
            NodeKind::EmptyContainer => write!(f, "EmptyContainer"),
            NodeKind::Leaf => write!(f, "Leaf"),
        }
    }
}

/// Expansion state of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeState {
    /// Leaves and empty containers never change state
    Leaf,
    CollapsedContainer,
    ExpandedContainer,
}

/// A single node of the tree: one `(key, value)` pair of its parent
#[derive(Debug, Clone)]
pub struct TreeNode {
    key: String,
    label: String,
    value: Value,
    kind: NodeKind,
    display: Option<String>,
    expanded: bool,
    ever_expanded: bool,
}

impl TreeNode {
    pub(crate) fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        value: Value,
        classification: Classification,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            value,
            kind: classification.kind,
            display: classification.display,
            expanded: false,
            ever_expanded: false,
        }
    }

    /// Raw key: property name, array index, or the root label
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Display-formatted key
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The value this node was created for
    ///
    /// Containers are shared handles; mutations made through them after the
    /// node was created do not change `kind` or `display`.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Text shown for leaves and empty containers, `None` for containers
    pub fn display(&self) -> Option<&str> {
        self.display.as_deref()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Whether the node has been expanded at least once
    pub fn ever_expanded(&self) -> bool {
        self.ever_expanded
    }

    pub fn state(&self) -> NodeState {
        match (self.kind, self.expanded) {
            (NodeKind::Container, true) => NodeState::ExpandedContainer,
            (NodeKind::Container, false) => NodeState::CollapsedContainer,
            _ => NodeState::Leaf,
        }
    }

    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    pub fn is_leaf(&self) -> bool {
        self.kind.is_leaf()
    }

    /// Open the node and latch `ever_expanded`
    pub(crate) fn open(&mut self) {
        self.expanded = true;
        self.ever_expanded = true;
    }

    /// Hide the node's children; the latch stays set
    pub(crate) fn close(&mut self) {
        self.expanded = false;
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.display {
            Some(display) => write!(f, "{}: {}", self.label, display),
            None => write!(f, "{} ({})", self.label, self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container(key: &str) -> TreeNode {
        TreeNode::new(
            key,
            key,
            Value::array([Value::from(1)]),
            Classification {
                kind: NodeKind::Container,
                display: None,
            },
        )
    }

    #[test]
    fn test_node_id() {
        assert_eq!(NodeId::ROOT, NodeId::new(0));
        assert_eq!(NodeId::new(5).get(), 5);
        assert_eq!(NodeId::from(10), NodeId::new(10));
        assert_eq!(NodeId::new(7).to_string(), "#7");
    }

    #[test]
    fn test_node_kind() {
        assert!(NodeKind::Container.is_container());
        assert!(!NodeKind::Container.is_leaf());
        assert!(NodeKind::Leaf.is_leaf());
        assert!(NodeKind::EmptyContainer.is_leaf());
        assert!(!NodeKind::EmptyContainer.is_container());
    }

    #[test]
    fn test_open_close_latch() {
        let mut node = container("items");
        assert_eq!(node.state(), NodeState::CollapsedContainer);
        assert!(!node.ever_expanded());

        node.open();
        assert_eq!(node.state(), NodeState::ExpandedContainer);
        node.close();
        assert_eq!(node.state(), NodeState::CollapsedContainer);
        assert!(node.ever_expanded());
    }

    #[test]
    fn test_node_display() {
        let leaf = TreeNode::new(
            "test",
            "Test",
            Value::from("hello"),
            Classification {
                kind: NodeKind::Leaf,
                display: Some("hello".to_string()),
            },
        );
        assert_eq!(leaf.to_string(), "Test: hello");
        assert_eq!(leaf.state(), NodeState::Leaf);
        assert_eq!(container("items").to_string(), "items (Container)");
    }
}
