//! Lazily expanding tree over a dynamic value
//!
//! A [`ValueTree`] starts out with only its root. Values are classified into
//! [`NodeKind`]s when their node is created, and a container's children are
//! created the first time it is expanded.

pub mod classify;
pub mod config;
pub mod date;
mod error;
pub mod label;
mod node;
mod traits;
pub mod value;
mod value_tree;

pub use classify::{classify, is_blank_leaf, is_empty_container, Classification, Classifier};
pub use config::{RenderOptions, TreeConfig};
pub use date::DatePattern;
pub use error::{Result, TreeError};
pub use label::{format_label, mentions_date};
pub use node::{NodeId, NodeKind, NodeState, TreeNode};
pub use traits::{TraversalOrder, Tree, TreeTraversal, TreeWalker, VisibleNodes};
pub use value::{ContainerId, Value};
pub use value_tree::ValueTree;

/// Re-export common types for convenience
pub mod prelude {
    pub use super::{
        NodeId, NodeKind, NodeState, RenderOptions, TraversalOrder, Tree, TreeConfig, TreeError,
        TreeNode, TreeTraversal, Value, ValueTree,
    };
}
