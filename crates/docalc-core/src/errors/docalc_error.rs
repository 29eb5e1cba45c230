//! Top-level error aggregating every subsystem error.

use super::error_code::DocalcErrorCode;
use super::{
    ConfigError, GraphError, IdentificationError, InferenceError, PotentialError,
    ValidationError,
};

/// Any error surfaced by the public API.
#[derive(Debug, thiserror::Error)]
pub enum DocalcError {
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Potential error: {0}")]
    Potential(#[from] PotentialError),

    #[error("Inference error: {0}")]
    Inference(#[from] InferenceError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Identification error: {0}")]
    Identification(#[from] IdentificationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl DocalcErrorCode for DocalcError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Graph(e) => e.error_code(),
            Self::Potential(e) => e.error_code(),
            Self::Inference(e) => e.error_code(),
            Self::Validation(e) => e.error_code(),
            Self::Identification(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}

/// Convenience alias used across the workspace.
pub type DocalcResult<T> = Result<T, DocalcError>;
