//! DocalcErrorCode trait for host-facing error reporting.

/// Every error enum implements this to provide a stable, structured error
/// code string for callers embedding the engine behind another surface.
pub trait DocalcErrorCode {
    /// Returns the error code string (e.g., "HEDGE").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const GRAPH_ERROR: &str = "GRAPH_ERROR";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const CYCLE_DETECTED: &str = "CYCLE_DETECTED";
pub const POTENTIAL_ERROR: &str = "POTENTIAL_ERROR";
pub const INFERENCE_ERROR: &str = "INFERENCE_ERROR";
pub const IMPOSSIBLE_EVIDENCE: &str = "IMPOSSIBLE_EVIDENCE";
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const HEDGE: &str = "HEDGE";
pub const UNIDENTIFIABLE: &str = "UNIDENTIFIABLE";
pub const INVARIANT_VIOLATION: &str = "INVARIANT_VIOLATION";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
