//! Display configuration shared by every node of a tree

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_TOGGLE_LABEL: &str = "click to expand";
pub const DEFAULT_EMPTY_LABEL: &str = "none";
pub const DEFAULT_DATE_FORMAT: &str = "yyyy-MM-dd HH:mm:ss";
pub const DEFAULT_ROOT_LABEL: &str = "Object";

/// Labels and formats used when displaying nodes
///
/// Built once per tree and shared read-only by all of its nodes. Missing
/// fields deserialize to their defaults; the legacy option names
/// (`toggleBranchText`, `emptyValueText`) are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TreeConfig {
    /// Preview text shown next to a collapsed container
    #[serde(alias = "toggleBranchText")]
    pub toggle_label: String,
    /// Text shown for blank leaves and empty containers
    #[serde(alias = "emptyValueText")]
    pub empty_label: String,
    /// Pattern for values under labels containing "Date"
    pub date_format: String,
    /// Offset from UTC used when formatting dates
    pub utc_offset_minutes: i32,
    /// Deepest level at which children may be materialized (root = 0)
    pub max_depth: Option<usize>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            toggle_label: DEFAULT_TOGGLE_LABEL.to_string(),
            empty_label: DEFAULT_EMPTY_LABEL.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            utc_offset_minutes: 0,
            max_depth: None,
        }
    }
}

impl TreeConfig {
    /// Parse a configuration from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Failed to parse tree config")?;
        Ok(config.normalized())
    }

    /// Load a configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Replace empty labels and formats with their defaults
    pub fn normalized(mut self) -> Self {
        let defaults = Self::default();
        if self.toggle_label.is_empty() {
            self.toggle_label = defaults.toggle_label;
        }
        if self.empty_label.is_empty() {
            self.empty_label = defaults.empty_label;
        }
        if self.date_format.is_empty() {
            self.date_format = defaults.date_format;
        }
        self
    }

    pub fn with_toggle_label(mut self, label: impl Into<String>) -> Self {
        self.toggle_label = label.into();
        self
    }

    pub fn with_empty_label(mut self, label: impl Into<String>) -> Self {
        self.empty_label = label.into();
        self
    }

    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    pub fn with_utc_offset_minutes(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = minutes;
        self
    }

    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }
}

/// Options for building a tree from a root value
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Label of the root node, used verbatim
    pub root_label: String,
    /// Open the root immediately
    pub start_expanded: bool,
    pub config: TreeConfig,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            root_label: DEFAULT_ROOT_LABEL.to_string(),
            start_expanded: false,
            config: TreeConfig::default(),
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root_label(mut self, label: impl Into<String>) -> Self {
        self.root_label = label.into();
        self
    }

    pub fn start_expanded(mut self, expanded: bool) -> Self {
        self.start_expanded = expanded;
        self
    }

    pub fn config(mut self, config: TreeConfig) -> Self {
        self.config = config;
        self
    }
}
