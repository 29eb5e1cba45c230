//! Graph collaborator errors.

use super::error_code::{self, DocalcErrorCode};

/// Errors raised by DAG primitives. Propagated unchanged by the causal layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("node not found: {0}")]
    NodeNotFound(String),

    #[error("arc not found: {from} -> {to}")]
    ArcNotFound { from: String, to: String },

    #[error("duplicate node name: {0}")]
    DuplicateNode(String),

    #[error("arc {from} -> {to} would create a cycle")]
    CycleDetected { from: String, to: String },
}

impl DocalcErrorCode for GraphError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NodeNotFound(_) | Self::ArcNotFound { .. } => error_code::NOT_FOUND,
            Self::CycleDetected { .. } => error_code::CYCLE_DETECTED,
            Self::DuplicateNode(_) => error_code::GRAPH_ERROR,
        }
    }
}
