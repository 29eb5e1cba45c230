//! Backdoor and frontdoor adjustment criteria.
//!
//! Predicates test a candidate set; generators enumerate witnesses lazily by
//! increasing size. Both work on any [`docalc_graph::Dag`] and are usable
//! without a [`crate::CausalModel`].

mod criteria;
mod generators;

pub use criteria::{backdoor_reachable, is_backdoor, is_frontdoor, nodes_on_directed_paths};
pub use generators::{
    backdoor_generator, frontdoor_generator, BackdoorGenerator, FrontdoorGenerator,
};
