//! Probability table errors.

use super::error_code::{self, DocalcErrorCode};

/// Errors raised by `Potential` algebra and CPT manipulation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PotentialError {
    #[error("variable {name} has incompatible domains: {left} vs {right} labels")]
    IncompatibleDomains {
        name: String,
        left: usize,
        right: usize,
    },

    #[error("unknown variable in potential: {0}")]
    UnknownVariable(String),

    #[error("unknown label {label} for variable {variable}")]
    UnknownLabel { variable: String, label: String },

    #[error("shape mismatch: expected {expected} values, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("negative probability {value} at offset {offset}")]
    NegativeValue { offset: usize, value: f64 },

    #[error("variable {0} has an empty domain")]
    EmptyDomain(String),

    #[error("variable {0} appears twice in the same table")]
    DuplicateVariable(String),

    #[error("conditional distribution of {variable} sums to {sum}, expected 1")]
    NotNormalized { variable: String, sum: f64 },
}

impl DocalcErrorCode for PotentialError {
    fn error_code(&self) -> &'static str {
        error_code::POTENTIAL_ERROR
    }
}
