//! Identification of interventional distributions.

mod do_calculus;
mod id_algorithm;

pub use do_calculus::{do_calculus, do_calculus_with_observation};
pub use id_algorithm::identifying_intervention;
