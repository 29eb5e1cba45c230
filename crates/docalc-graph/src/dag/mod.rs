//! Named directed acyclic graph: `petgraph::StableGraph` plus a name index.

pub mod dag_enforcement;
pub mod stable_graph;
pub mod traversal;

pub use stable_graph::{Dag, DagNode, NodeId};
