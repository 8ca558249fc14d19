//! Error types for the JSON crate.

use vdiff_types::{ChangeKind, NodeKind};

/// Errors raised while applying a change set to a tree.
///
/// Diffing itself never fails; these only occur when a change set is
/// replayed against a tree it was not computed from.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum JsonError {
    /// A path segment did not resolve to an existing node.
    #[error("path not found: {0}")]
    PathNotFound(String),

    /// An array index past the end of the array.
    #[error("index {index} out of bounds at {path} (len {len})")]
    IndexOutOfBounds {
        path: String,
        index: usize,
        len: usize,
    },

    /// A key or index was applied to a node that cannot hold it.
    #[error("cannot descend into {kind} at {path}")]
    NotAContainer { path: String, kind: NodeKind },

    /// The record's values do not match its kind.
    #[error("inconsistent {kind} record at {path}")]
    InconsistentRecord { path: String, kind: ChangeKind },
}

/// Convenience alias for JSON change-set results.
pub type JsonResult<T> = Result<T, JsonError>;
