//! Exact inference errors.

use super::error_code::{self, DocalcErrorCode};
use super::{GraphError, PotentialError};

/// Errors raised by the exact-inference collaborator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InferenceError {
    #[error("unknown variable: {0}")]
    UnknownVariable(String),

    #[error("evidence has zero probability: {evidence}")]
    ImpossibleEvidence { evidence: String },

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Potential(#[from] PotentialError),
}

impl DocalcErrorCode for InferenceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ImpossibleEvidence { .. } => error_code::IMPOSSIBLE_EVIDENCE,
            Self::Graph(e) => e.error_code(),
            Self::Potential(e) => e.error_code(),
            Self::UnknownVariable(_) => error_code::INFERENCE_ERROR,
        }
    }
}
