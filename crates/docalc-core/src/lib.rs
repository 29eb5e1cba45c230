//! # docalc-core
//!
//! Foundation crate for the docalc causal identification engine.
//! Defines errors, configuration, tracing setup, constants, and the shared
//! name-set types. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::DocalcConfig;
pub use errors::{DocalcError, DocalcResult};
pub use types::names::{NameSet, Values};
