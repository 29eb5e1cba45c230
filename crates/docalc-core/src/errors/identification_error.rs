//! Non-identifiability and identification-engine errors.

use crate::types::names::{format_names, NameSet};

use super::error_code::{self, DocalcErrorCode};
use super::GraphError;

/// Failure of the identification recursion.
///
/// `Hedge` and `Unidentifiable` are expected outcomes: they propagate through
/// the recursion by early return and are turned into plain values by the
/// orchestration layer. `CaseAnalysisExhausted` means the case analysis of the
/// ID algorithm matched nothing, which the completeness proof rules out.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentificationError {
    #[error("hedge found: observed {} / component {}", format_names(.observed), format_names(.component))]
    Hedge {
        /// The c-component spanning every observed node (F).
        observed: NameSet,
        /// The c-component left after removing the intervention (F').
        component: NameSet,
    },

    #[error("not identifiable: {reason}")]
    Unidentifiable { reason: String },

    #[error("no identification case applies to component {} in {}", format_names(.component), format_names(.observed))]
    CaseAnalysisExhausted {
        observed: NameSet,
        component: NameSet,
    },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl IdentificationError {
    /// Whether this failure is a normal "cannot identify" outcome rather than
    /// a fault.
    pub fn is_non_identifiable(&self) -> bool {
        matches!(self, Self::Hedge { .. } | Self::Unidentifiable { .. })
    }
}

impl DocalcErrorCode for IdentificationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Hedge { .. } => error_code::HEDGE,
            Self::Unidentifiable { .. } => error_code::UNIDENTIFIABLE,
            Self::CaseAnalysisExhausted { .. } => error_code::INVARIANT_VIOLATION,
            Self::Graph(e) => e.error_code(),
        }
    }
}
