//! Error handling for docalc.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod docalc_error;
pub mod error_code;
pub mod graph_error;
pub mod identification_error;
pub mod inference_error;
pub mod potential_error;
pub mod validation_error;

pub use config_error::ConfigError;
pub use docalc_error::{DocalcError, DocalcResult};
pub use error_code::DocalcErrorCode;
pub use graph_error::GraphError;
pub use identification_error::IdentificationError;
pub use inference_error::InferenceError;
pub use potential_error::PotentialError;
pub use validation_error::ValidationError;
