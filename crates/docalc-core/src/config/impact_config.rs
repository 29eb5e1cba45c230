//! Impact orchestration configuration.

use serde::{Deserialize, Serialize};

/// Configuration for `causal_impact`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ImpactConfig {
    /// Try the backdoor adjustment before general do-calculus. Default: true.
    pub use_backdoor: Option<bool>,
    /// Try the frontdoor adjustment before general do-calculus. Default: true.
    pub use_frontdoor: Option<bool>,
    /// Largest witness set the orchestrator will consume from the door
    /// generators. Default: unbounded.
    pub max_witness_size: Option<usize>,
}

impl ImpactConfig {
    /// Returns whether the backdoor shortcut is enabled, defaulting to true.
    pub fn effective_use_backdoor(&self) -> bool {
        self.use_backdoor.unwrap_or(true)
    }

    /// Returns whether the frontdoor shortcut is enabled, defaulting to true.
    pub fn effective_use_frontdoor(&self) -> bool {
        self.use_frontdoor.unwrap_or(true)
    }

    /// Returns the witness-size cap, `usize::MAX` when unbounded.
    pub fn effective_max_witness_size(&self) -> usize {
        self.max_witness_size.unwrap_or(usize::MAX)
    }
}
