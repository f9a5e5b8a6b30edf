//! Graph-subsystem error type.

use thiserror::Error;

/// Errors produced by `traffic-graph`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("a different node named {0:?} already exists")]
    ExistingNode(String),

    #[error("node {0:?} does not exist")]
    MissingNode(String),

    #[error("no connection from {from:?} to {to:?}")]
    Disconnected { from: String, to: String },
}

pub type GraphResult<T> = Result<T, GraphError>;
