//! Public entry point answering causal queries.

mod adjustment;
mod causal_impact;
mod query;

pub use adjustment::{backdoor_expression, frontdoor_expression};
pub use causal_impact::{causal_impact, causal_impact_with_config, CausalImpact, ImpactMethod};
pub use query::CausalQuery;
