//! Top-level docalc configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{EliminationHeuristic, ImpactConfig, InferenceConfig};
use crate::constants::CONFIG_FILE_NAME;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`DOCALC_*`)
/// 2. Project config (`docalc.toml` in the given root)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DocalcConfig {
    pub impact: ImpactConfig,
    pub inference: InferenceConfig,
}

impl DocalcConfig {
    /// Load configuration with layered resolution.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(CONFIG_FILE_NAME);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &DocalcConfig) -> Result<(), ConfigError> {
        if config.impact.max_witness_size == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "impact.max_witness_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Keys present in the file override; absent keys keep their value.
    fn merge_toml_file(config: &mut DocalcConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let other: DocalcConfig = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::merge(config, &other);
        Ok(())
    }

    fn merge(base: &mut DocalcConfig, other: &DocalcConfig) {
        if other.impact.use_backdoor.is_some() {
            base.impact.use_backdoor = other.impact.use_backdoor;
        }
        if other.impact.use_frontdoor.is_some() {
            base.impact.use_frontdoor = other.impact.use_frontdoor;
        }
        if other.impact.max_witness_size.is_some() {
            base.impact.max_witness_size = other.impact.max_witness_size;
        }
        if other.inference.elimination.is_some() {
            base.inference.elimination = other.inference.elimination;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `DOCALC_IMPACT_USE_BACKDOOR`, `DOCALC_INFERENCE_ELIMINATION`, etc.
    fn apply_env_overrides(config: &mut DocalcConfig) {
        if let Ok(val) = std::env::var("DOCALC_IMPACT_USE_BACKDOOR") {
            if let Ok(v) = val.parse::<bool>() {
                config.impact.use_backdoor = Some(v);
            }
        }
        if let Ok(val) = std::env::var("DOCALC_IMPACT_USE_FRONTDOOR") {
            if let Ok(v) = val.parse::<bool>() {
                config.impact.use_frontdoor = Some(v);
            }
        }
        if let Ok(val) = std::env::var("DOCALC_IMPACT_MAX_WITNESS_SIZE") {
            if let Ok(v) = val.parse::<usize>() {
                config.impact.max_witness_size = Some(v);
            }
        }
        if let Ok(val) = std::env::var("DOCALC_INFERENCE_ELIMINATION") {
            let heuristic = match val.as_str() {
                "min_weight" => Some(EliminationHeuristic::MinWeight),
                "min_neighbors" => Some(EliminationHeuristic::MinNeighbors),
                "sequential" => Some(EliminationHeuristic::Sequential),
                _ => None,
            };
            if heuristic.is_some() {
                config.inference.elimination = heuristic;
            }
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
