//! Test fixture loader for the textbook causal models under `test-fixtures/`.
//!
//! Provides typed deserialization of the model files and helper functions
//! for loading them in tests and benchmarks across crates.

use std::path::PathBuf;

use docalc_graph::{BayesNet, BayesNetSpec};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A latent confounder as stored in a fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatentFixture {
    pub name: String,
    pub children: Vec<String>,
    /// Keep the direct arcs among `children` (a bow arc keeps `x → y`).
    #[serde(default)]
    pub keep_arcs: bool,
}

/// An observational network plus its latent confounders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFixture {
    #[serde(default)]
    pub description: String,
    pub network: BayesNetSpec,
    #[serde(default)]
    pub latents: Vec<LatentFixture>,
}

impl ModelFixture {
    /// Build the observational network.
    ///
    /// # Panics
    /// Panics if the fixture describes an invalid network.
    pub fn bayes_net(&self) -> BayesNet {
        BayesNet::from_spec(&self.network)
            .unwrap_or_else(|e| panic!("invalid fixture network: {e}"))
    }
}

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load `test-fixtures/models/<name>.json`.
pub fn load_model(name: &str) -> ModelFixture {
    load_fixture(&format!("models/{name}.json"))
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}
