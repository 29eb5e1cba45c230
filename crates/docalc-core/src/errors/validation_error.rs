//! Query validation errors, raised at the public boundary.

use super::error_code::{self, DocalcErrorCode};

/// A malformed causal query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("the query has no target variable")]
    EmptyTarget,

    #[error("{first} and {second} must be disjoint, both contain {name}")]
    Overlap {
        first: &'static str,
        second: &'static str,
        name: String,
    },

    #[error("unknown variable: {0}")]
    UnknownVariable(String),

    #[error("unknown label {label} for variable {variable}")]
    UnknownLabel { variable: String, label: String },

    #[error("latent variable {0} cannot appear in a query")]
    LatentInQuery(String),

    #[error("latent name {0} collides with an existing node")]
    LatentNameCollision(String),

    #[error("latent variable {latent} cannot have the latent {child} as a child")]
    LatentChild { latent: String, child: String },
}

impl DocalcErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        error_code::VALIDATION_ERROR
    }
}
