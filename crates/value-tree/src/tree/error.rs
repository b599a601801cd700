//! Errors raised while expanding a tree

use derive_more::Display;

use crate::tree::NodeId;

/// Errors produced by tree operations
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum TreeError {
    /// A container appears again below itself
    #[display(fmt = "cyclic structure: '{}' refers back to one of its ancestors", path)]
    CyclicStructure { path: String },

    /// Materializing children would go deeper than `max_depth`
    #[display(fmt = "depth limit of {} exceeded below '{}'", limit, path)]
    DepthLimitExceeded { path: String, limit: usize },

    /// The id does not belong to this tree
    #[display(fmt = "invalid node id {}", id)]
    InvalidNode { id: NodeId },

    /// A key path names a member that does not exist
    #[display(fmt = "no member '{}' under '{}'", key, path)]
    NoSuchKey { path: String, key: String },
}

impl std::error::Error for TreeError {}

pub type Result<T, E = TreeError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TreeError::CyclicStructure {
            path: "Object/self".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cyclic structure: 'Object/self' refers back to one of its ancestors"
        );

        let err = TreeError::DepthLimitExceeded {
            path: "Object/a".to_string(),
            limit: 1,
        };
        assert_eq!(err.to_string(), "depth limit of 1 exceeded below 'Object/a'");

        let err = TreeError::InvalidNode { id: NodeId::new(9) };
        assert_eq!(err.to_string(), "invalid node id #9");
    }

    #[test]
    fn test_converts_into_anyhow() {
        let err: anyhow::Error = TreeError::NoSuchKey {
            path: "Object".to_string(),
            key: "missing".to_string(),
        }
        .into();
        assert!(err.downcast_ref::<TreeError>().is_some());
    }
}
