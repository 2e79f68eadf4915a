//! Error types
//!
//! Navigation never fails: running off the end of an axis yields `None`.
//! Errors are reserved for caller contract violations and for trees that
//! could not be built or do not hold together structurally.

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, TreeError>;

/// Top-level error
#[derive(Debug, Error)]
pub enum TreeError {
    /// A handle from a different tree was passed where a node of this tree is required
    #[error("node belongs to a different tree")]
    ForeignNode,

    /// Any other precondition the caller failed to meet
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The builder rejected its event stream
    #[error(transparent)]
    Build(#[from] BuildError),

    /// A finished tree failed structural validation
    #[error("malformed tree at node {node}: {reason}")]
    MalformedTree { node: u32, reason: &'static str },
}

/// Errors raised while a tree is being built
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("attribute or namespace event outside a start tag")]
    NotInStartTag,

    #[error("end_element without a matching start_element")]
    UnbalancedEnd,

    #[error("{0} element(s) still open when the tree was finished")]
    UnclosedElements(usize),

    #[error("content received after the document was closed")]
    DocumentClosed,

    #[error("a second top-level node was started")]
    MultipleRoots,

    #[error("start_document received after content")]
    LateDocumentStart,

    #[error("the tree is empty")]
    Empty,

    #[error("too many nodes for 32-bit node numbers")]
    TooManyNodes,

    #[error("element nesting exceeds {0} levels")]
    TooDeep(usize),
}

impl TreeError {
    /// Shorthand for an `InvalidArgument` error
    pub fn invalid(msg: impl Into<String>) -> Self {
        TreeError::InvalidArgument(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_error_converts() {
        let err: TreeError = BuildError::UnbalancedEnd.into();
        assert!(matches!(err, TreeError::Build(BuildError::UnbalancedEnd)));
        assert_eq!(
            err.to_string(),
            "end_element without a matching start_element"
        );
    }

    #[test]
    fn test_malformed_message() {
        let err = TreeError::MalformedTree {
            node: 7,
            reason: "next pointer out of range",
        };
        assert_eq!(
            err.to_string(),
            "malformed tree at node 7: next pointer out of range"
        );
    }
}
