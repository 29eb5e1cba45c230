//! Structured span field definitions.
//!
//! Consistent field names across the identification, door-criteria and
//! inference subsystems keep log queries simple.

/// Identification: the ID-algorithm case taken (1–7).
pub const ID_CASE: &str = "id_case";

/// Identification: recursion depth of the ID algorithm.
pub const ID_DEPTH: &str = "id_depth";

/// Door criteria: witness set found.
pub const WITNESS: &str = "witness";

/// Door criteria: candidate sets tested before a witness was found.
pub const CANDIDATES_TESTED: &str = "candidates_tested";

/// Inference: number of factors multiplied during elimination.
pub const FACTOR_COUNT: &str = "factor_count";

/// Orchestration: the identification method that produced the estimand.
pub const IMPACT_METHOD: &str = "impact_method";
