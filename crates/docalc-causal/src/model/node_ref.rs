//! Node references by id or by name.

use docalc_core::errors::GraphError;
use docalc_graph::NodeId;

use super::CausalModel;

/// Anything naming a node of a [`CausalModel`].
pub trait NodeRef {
    fn resolve(&self, model: &CausalModel) -> Result<NodeId, GraphError>;
}

impl NodeRef for NodeId {
    fn resolve(&self, model: &CausalModel) -> Result<NodeId, GraphError> {
        if model.causal_dag().contains(*self) {
            Ok(*self)
        } else {
            Err(GraphError::NodeNotFound(format!("#{}", self.index())))
        }
    }
}

impl NodeRef for &str {
    fn resolve(&self, model: &CausalModel) -> Result<NodeId, GraphError> {
        model.id_from_name(self)
    }
}

impl NodeRef for String {
    fn resolve(&self, model: &CausalModel) -> Result<NodeId, GraphError> {
        model.id_from_name(self)
    }
}

impl NodeRef for &String {
    fn resolve(&self, model: &CausalModel) -> Result<NodeId, GraphError> {
        model.id_from_name(self)
    }
}
