/// docalc version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Domain size of every latent confounder node.
pub const LATENT_DOMAIN_SIZE: usize = 2;

/// Labels given to latent confounder states.
pub const LATENT_LABELS: [&str; LATENT_DOMAIN_SIZE] = ["0", "1"];

/// Tolerance used when comparing probabilities (normalization checks, tests).
pub const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// Name of the project-level configuration file.
pub const CONFIG_FILE_NAME: &str = "docalc.toml";

/// Environment variable read by `init_tracing`.
pub const LOG_ENV_VAR: &str = "DOCALC_LOG";
