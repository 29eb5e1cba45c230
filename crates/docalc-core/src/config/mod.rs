//! Configuration system for docalc.
//! TOML-based, 3-layer resolution: env > project > defaults.

pub mod docalc_config;
pub mod impact_config;
pub mod inference_config;

pub use docalc_config::DocalcConfig;
pub use impact_config::ImpactConfig;
pub use inference_config::{EliminationHeuristic, InferenceConfig};
