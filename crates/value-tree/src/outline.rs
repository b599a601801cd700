//! Plain-text outline of the visible part of a tree
//!
//! Each visible node becomes one line, indented two spaces per level:
//!
//! ```text
//! - Object
//!     Test: hello
//!   + Sub Obj: click to expand
//!     Empty Val: none
//! ```
//!
//! `+` marks a collapsed container followed by the toggle label, `-` an
//! expanded one. Leaves and empty containers show their display text.

use crate::tree::{NodeState, Tree, TreeNode, TreeTraversal, ValueTree};

const COLLAPSED_MARKER: &str = "+ ";
const EXPANDED_MARKER: &str = "- ";
const LEAF_MARKER: &str = "  ";

/// Render every visible node, one per line
pub fn render_outline(tree: &ValueTree) -> String {
    outline_lines(tree).join("\n")
}

/// The outline as separate lines
pub fn outline_lines(tree: &ValueTree) -> Vec<String> {
    let toggle_label = &tree.config().toggle_label;
    tree.visible()
        .filter_map(|(id, depth)| {
            let node = tree.get(id)?;
            Some(format!("{}{}", "  ".repeat(depth), node_line(node, toggle_label)))
        })
        .collect()
}

fn node_line(node: &TreeNode, toggle_label: &str) -> String {
    match node.state() {
        NodeState::CollapsedContainer => {
            format!("{}{}: {}", COLLAPSED_MARKER, node.label(), toggle_label)
        }
        NodeState::ExpandedContainer => format!("{}{}", EXPANDED_MARKER, node.label()),
        NodeState::Leaf => format!(
            "{}{}: {}",
            LEAF_MARKER,
            node.label(),
            node.display().unwrap_or_default()
        ),
    }
}
