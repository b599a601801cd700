//! Value tree with lazy child materialization

use log::{debug, trace, warn};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::tree::classify::Classifier;
use crate::tree::config::{RenderOptions, TreeConfig};
use crate::tree::error::{Result, TreeError};
use crate::tree::label::format_label;
use crate::tree::value::{ContainerId, Value};
use crate::tree::{NodeId, Tree, TreeNode};

/// State of a node's children
#[derive(Debug, Clone)]
enum ChildrenState {
    /// Not classified yet; the node was never expanded
    NotLoaded,
    /// Classified on first expansion and kept from then on
    Loaded(Vec<NodeId>),
}

/// Arena slot with navigation state
#[derive(Debug, Clone)]
struct Slot {
    node: TreeNode,
    parent: Option<NodeId>,
    depth: usize,
    children: ChildrenState,
}

/// A tree over a single value whose nodes are created on demand
///
/// Only the root exists after construction. The children of a container are
/// classified the first time it is expanded and stay in the arena when it is
/// collapsed again, so re-expanding never recomputes them.
///
/// # Example
///
/// ```
/// use value_tree::prelude::*;
///
/// let value = Value::object([("items", Value::array([Value::from(1), Value::from(2)]))]);
/// let mut tree = ValueTree::new(value, RenderOptions::default()).unwrap();
/// assert_eq!(tree.node_count(), 1);
///
/// assert!(tree.toggle(tree.root()).unwrap());
/// let items = tree.find_by_key_path(&["items"]).unwrap();
/// assert_eq!(tree.child_count(items), 0);
/// ```
#[derive(Debug)]
pub struct ValueTree {
    /// Arena storage for nodes
    slots: Vec<Slot>,
    /// Shared by every node
    config: Rc<TreeConfig>,
    classifier: Classifier,
}

impl ValueTree {
    /// Build the root node for `value`
    ///
    /// The root is labelled with `options.root_label` as given. With
    /// `start_expanded` a container root is opened right away, which
    /// classifies its direct children.
    ///
    /// # Errors
    ///
    /// Opening the root fails if it directly contains itself or the depth
    /// limit is 0.
    pub fn new(value: Value, options: RenderOptions) -> Result<Self> {
        let RenderOptions {
            root_label,
            start_expanded,
            config,
        } = options;
        let config = Rc::new(config.normalized());
        let mut classifier = Classifier::new(Rc::clone(&config));

        let classification = classifier.classify(&root_label, &value);
        let root = TreeNode::new(root_label.clone(), root_label, value, classification);
        debug!("Created tree with {} root '{}'", root.kind(), root.label());

        let mut tree = Self {
            slots: vec![Slot {
                node: root,
                parent: None,
                depth: 0,
                children: ChildrenState::NotLoaded,
            }],
            config,
            classifier,
        };
        if start_expanded {
            tree.expand(NodeId::ROOT)?;
        }
        Ok(tree)
    }

    /// The configuration shared by every node
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Number of values classified so far, root included
    pub fn classifications(&self) -> usize {
        self.classifier.calls()
    }

    /// Get a node, failing for IDs outside this tree
    pub fn node(&self, id: NodeId) -> Result<&TreeNode> {
        self.slot(id).map(|slot| &slot.node)
    }

    /// Children of a node together with their IDs
    pub fn child_nodes(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &TreeNode)> + '_ {
        self.children(id)
            .filter_map(move |child| self.get(child).map(|node| (child, node)))
    }

    /// Check if a node's children have been materialized
    pub fn is_loaded(&self, id: NodeId) -> bool {
        self.slots
            .get(id.get())
            .map(|slot| matches!(slot.children, ChildrenState::Loaded(_)))
            .unwrap_or(false)
    }

    /// Flip a container between collapsed and expanded
    ///
    /// Returns the new expanded flag. Leaves and empty containers are left
    /// alone and report `false`. The first expansion classifies the
    /// children; if that fails the node keeps its previous state.
    pub fn toggle(&mut self, id: NodeId) -> Result<bool> {
        if self.node(id)?.is_expanded() {
            self.collapse(id)
        } else {
            self.expand(id)
        }
    }

    /// Open a container, materializing its children on first expansion
    ///
    /// Returns the new expanded flag (`false` for non-containers).
    pub fn expand(&mut self, id: NodeId) -> Result<bool> {
        if !self.node(id)?.is_container() {
            trace!("Ignoring expand of non-container {}", id);
            return Ok(false);
        }
        self.ensure_loaded(id)?;
        self.slots[id.get()].node.open();
        debug!("Expanded '{}'", self.path_string(id));
        Ok(true)
    }

    /// Close a container; its children are kept
    ///
    /// Returns the new expanded flag, which is always `false`.
    pub fn collapse(&mut self, id: NodeId) -> Result<bool> {
        let slot = self.slot_mut(id)?;
        if slot.node.is_container() {
            slot.node.close();
            debug!("Collapsed {}", id);
        }
        Ok(false)
    }

    /// Expand every container along a key path, starting at the root
    ///
    /// Returns the node the path ends at. The final node is expanded too if
    /// it is a container.
    pub fn expand_path<S: AsRef<str>>(&mut self, keys: &[S]) -> Result<NodeId> {
        let mut current = self.root();
        self.expand(current)?;
        for key in keys {
            let key = key.as_ref();
            let next = self
                .children(current)
                .find(|&child| self.key(child) == Some(key))
                .ok_or_else(|| TreeError::NoSuchKey {
                    path: self.path_string(current),
                    key: key.to_string(),
                })?;
            self.expand(next)?;
            current = next;
        }
        Ok(current)
    }

    /// Expand all containers down to `max_level` (root = 0, `None` = all)
    ///
    /// Works through the tree level by level without recursion. Containers
    /// whose children would exceed the configured `max_depth` stay closed.
    /// Returns the number of containers expanded.
    pub fn expand_all(&mut self, max_level: Option<usize>) -> Result<usize> {
        let mut expanded = 0;
        let mut queue = VecDeque::from([self.root()]);
        while let Some(id) = queue.pop_front() {
            let slot = self.slot(id)?;
            if !slot.node.is_container() {
                continue;
            }
            if max_level.is_some_and(|level| slot.depth > level) {
                continue;
            }
            if self.config.max_depth.is_some_and(|limit| slot.depth >= limit) {
                continue;
            }
            if self.expand(id)? {
                expanded += 1;
            }
            queue.extend(self.children(id));
        }
        debug!("Expanded {} containers", expanded);
        Ok(expanded)
    }

    /// Classify the children of a container once
    fn ensure_loaded(&mut self, id: NodeId) -> Result<()> {
        let slot = self.slot(id)?;
        if matches!(slot.children, ChildrenState::Loaded(_)) || !slot.node.is_container() {
            return Ok(());
        }

        let depth = slot.depth + 1;
        if let Some(limit) = self.config.max_depth {
            if depth > limit {
                return Err(TreeError::DepthLimitExceeded {
                    path: self.path_string(id),
                    limit,
                });
            }
        }

        let members = slot.node.value().members();
        let lineage = self.lineage(id);
        if let Some((key, _)) = members.iter().find(|(_, value)| {
            value
                .container_id()
                .is_some_and(|container| lineage.contains(&container))
        }) {
            let path = format!("{}/{}", self.path_string(id), key);
            warn!("Refusing to expand cyclic structure at '{}'", path);
            return Err(TreeError::CyclicStructure { path });
        }

        let mut child_ids = Vec::with_capacity(members.len());
        for (key, value) in members {
            let label = format_label(&key);
            let classification = self.classifier.classify(&label, &value);
            let child_id = NodeId::new(self.slots.len());
            self.slots.push(Slot {
                node: TreeNode::new(key, label, value, classification),
                parent: Some(id),
                depth,
                children: ChildrenState::NotLoaded,
            });
            child_ids.push(child_id);
        }

        trace!("Materialized {} children of {}", child_ids.len(), id);
        self.slots[id.get()].children = ChildrenState::Loaded(child_ids);
        Ok(())
    }

    /// Container identities of a node and all its ancestors
    fn lineage(&self, id: NodeId) -> Vec<ContainerId> {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .filter_map(|node| self.get(node)?.value().container_id())
            .collect()
    }

    fn slot(&self, id: NodeId) -> Result<&Slot> {
        self.slots.get(id.get()).ok_or(TreeError::InvalidNode { id })
    }

    fn slot_mut(&mut self, id: NodeId) -> Result<&mut Slot> {
        self.slots.get_mut(id.get()).ok_or(TreeError::InvalidNode { id })
    }
}

impl Tree for ValueTree {
    fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    fn get(&self, id: NodeId) -> Option<&TreeNode> {
        self.slots.get(id.get()).map(|slot| &slot.node)
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slots.get(id.get())?.parent
    }

    fn children(&self, id: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_> {
        if let Some(slot) = self.slots.get(id.get()) {
            if let ChildrenState::Loaded(ref children) = slot.children {
                return Box::new(children.iter().copied());
            }
        }
        Box::new(std::iter::empty())
    }

    fn node_count(&self) -> usize {
        self.slots.len()
    }

    fn depth(&self, id: NodeId) -> usize {
        self.slots.get(id.get()).map(|slot| slot.depth).unwrap_or(0)
    }
}
