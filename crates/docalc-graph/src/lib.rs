//! # docalc-graph
//!
//! The collaborators the causal engine is built on: a named DAG over
//! `petgraph`, discrete variables and probability tables, the observational
//! Bayesian network, a d-separation oracle, and exact inference by variable
//! elimination.

pub mod bayesnet;
pub mod dag;
pub mod dsep;
pub mod inference;
pub mod potential;
pub mod variable;

pub use bayesnet::{BayesNet, BayesNetSpec};
pub use dag::{Dag, NodeId};
pub use dsep::{is_dsep, is_dsep_parents, DSeparation};
pub use inference::{ExactInference, VariableElimination};
pub use potential::Potential;
pub use variable::DiscreteVariable;
