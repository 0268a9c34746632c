//! Layout error types.

use thiserror::Error;

use crate::node::NodeId;

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("unknown layout node: {0}")]
    UnknownNode(NodeId),

    #[error("{0} is not a row or column")]
    NotAContainer(NodeId),

    #[error("invalid flex weight {0}: must be finite and non-negative")]
    InvalidFlex(f32),

    #[error("{0} appears more than once in the tree")]
    DuplicateNode(NodeId),

    #[error("layout is already attached to a host")]
    AlreadyAttached,
}
