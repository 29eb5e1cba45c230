//! Exact inference configuration.

use serde::{Deserialize, Serialize};

/// Heuristic choosing the next variable to eliminate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EliminationHeuristic {
    /// Smallest resulting table (product of domain sizes).
    #[default]
    MinWeight,
    /// Fewest distinct neighbouring variables.
    MinNeighbors,
    /// Elimination in name order.
    Sequential,
}

/// Configuration for the variable-elimination engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InferenceConfig {
    /// Elimination ordering heuristic. Default: `min_weight`.
    pub elimination: Option<EliminationHeuristic>,
}

impl InferenceConfig {
    /// Returns the effective heuristic, defaulting to `MinWeight`.
    pub fn effective_elimination(&self) -> EliminationHeuristic {
        self.elimination.unwrap_or_default()
    }
}
