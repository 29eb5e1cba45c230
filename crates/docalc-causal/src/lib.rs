//! # docalc-causal
//!
//! Causal-effect identification over causal models with explicit latent
//! confounders.
//!
//! - [`CausalModel`]: observational Bayesian network plus latent nodes.
//! - [`door`]: backdoor and frontdoor criteria and witness generators.
//! - [`identification`]: the ID algorithm and do-calculus with observations.
//! - [`formula`]: symbolic estimands and their evaluation.
//! - [`impact`]: the `causal_impact` entry point.
//! - [`counterfactual`]: twin-network counterfactuals.

pub mod counterfactual;
pub mod door;
pub mod formula;
pub mod identification;
pub mod impact;
pub mod model;

pub use counterfactual::{counterfactual, counterfactual_model};
pub use formula::{CausalFormula, Expr};
pub use identification::{do_calculus, do_calculus_with_observation, identifying_intervention};
pub use impact::{
    backdoor_expression, causal_impact, causal_impact_with_config, frontdoor_expression,
    CausalImpact, CausalQuery, ImpactMethod,
};
pub use model::{induced_causal_sub_model, CausalModel, LatentDescriptor, NodeRef};
