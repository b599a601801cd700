//! Value Tree Library
//!
//! Displays an arbitrary nested value (objects, arrays, scalars) as a tree
//! that is expanded on demand. Sub-trees are only built when a user opens
//! them, so very large values stay cheap to show.
//!
//! # Core Concepts
//!
//! - **Value**: dynamic data with shared arrays and objects
//! - **Classification**: each value is a container, an empty container or a
//!   leaf, with display text and a formatted key label
//! - **ValueTree**: arena of nodes with expansion state; children are
//!   classified on first expansion and kept after collapsing
//! - **Outline**: plain-text rendering of what is currently visible
//!
//! # Example
//!
//! ```
//! use value_tree::prelude::*;
//! use value_tree::{outline, render};
//!
//! let value = Value::from(serde_json::json!({
//!     "test": "hello",
//!     "subObj": {"subTest": "hi"},
//!     "emptyVal": ""
//! }));
//!
//! let mut tree = render(value, RenderOptions::new().start_expanded(true)).unwrap();
//! let sub = tree.find_by_key_path(&["subObj"]).unwrap();
//! tree.toggle(sub).unwrap();
//!
//! for (id, depth) in tree.visible() {
//!     let node = tree.get(id).unwrap();
//!     println!("{:indent$}{}", "", node, indent = depth * 2);
//! }
//! println!("{}", outline::render_outline(&tree));
//! ```

pub mod outline;
pub mod tree;

pub use tree::{RenderOptions, TreeConfig, TreeError, Value, ValueTree};

/// Build the tree for `value`; the root is labelled `options.root_label`
///
/// Equivalent to [`ValueTree::new`].
pub fn render(value: impl Into<Value>, options: RenderOptions) -> tree::Result<ValueTree> {
    ValueTree::new(value.into(), options)
}

/// Re-export commonly used types
pub mod prelude {
    pub use crate::tree::prelude::*;
}
