//! The causal model: an observational Bayesian network together with a
//! causal graph carrying explicit latent confounders.

mod arc_mask;
mod c_components;
mod causal_model;
mod induced;
mod node_ref;

pub use arc_mask::ArcMask;
pub use causal_model::{CausalModel, LatentDescriptor};
pub use induced::induced_causal_sub_model;
pub use node_ref::NodeRef;
