//! Exact probabilistic inference over the observational model.

mod variable_elimination;

use docalc_core::errors::InferenceError;
use docalc_core::{NameSet, Values};

use crate::potential::Potential;

pub use variable_elimination::VariableElimination;

/// Exact joint and posterior queries.
///
/// Every returned table is laid out over its variables in name order.
pub trait ExactInference {
    /// Marginal joint distribution of `targets`.
    fn joint(&self, targets: &NameSet) -> Result<Potential, InferenceError>;

    /// Conditional table of `targets` given `given`, over both sets.
    /// Columns whose conditioning assignment has probability 0 are 0.
    fn posterior(&self, targets: &NameSet, given: &NameSet) -> Result<Potential, InferenceError> {
        let all: NameSet = targets.union(given).cloned().collect();
        let joint = self.joint(&all)?;
        let marginal = joint.margin_onto(given);
        Ok((&joint / &marginal)?)
    }

    /// Distribution of `targets` under hard evidence, normalized.
    fn posterior_with_evidence(
        &self,
        targets: &NameSet,
        evidence: &Values,
    ) -> Result<Potential, InferenceError>;
}
