//! petgraph::StableGraph wrapper with named nodes.
//!
//! `StableGraph` keeps node indices valid across removals, so a restricted
//! copy of a graph shares its node ids with the original.

use docalc_core::errors::GraphError;
use docalc_core::types::collections::{FxHashMap, FxHashSet};
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::{Directed, Direction};

use super::dag_enforcement;

/// Node identifier, stable for the lifetime of a graph and its restrictions.
pub type NodeId = NodeIndex;

/// A node of the DAG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DagNode {
    pub name: String,
}

/// The underlying directed graph type.
pub type DagGraph = StableGraph<DagNode, (), Directed>;

/// A directed acyclic graph with unique node names.
#[derive(Debug, Clone, Default)]
pub struct Dag {
    graph: DagGraph,
    /// Map from name → NodeId for O(1) lookup.
    node_index: FxHashMap<String, NodeId>,
}

impl Dag {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the petgraph structure.
    pub fn graph(&self) -> &DagGraph {
        &self.graph
    }

    /// Add a node. Fails if the name is already taken.
    pub fn add_node(&mut self, name: &str) -> Result<NodeId, GraphError> {
        if self.node_index.contains_key(name) {
            return Err(GraphError::DuplicateNode(name.to_string()));
        }
        let idx = self.graph.add_node(DagNode {
            name: name.to_string(),
        });
        self.node_index.insert(name.to_string(), idx);
        Ok(idx)
    }

    /// Look up a node by name.
    pub fn get_node(&self, name: &str) -> Option<NodeId> {
        self.node_index.get(name).copied()
    }

    /// Look up a node by name, failing with `NodeNotFound`.
    pub fn node_id(&self, name: &str) -> Result<NodeId, GraphError> {
        self.get_node(name)
            .ok_or_else(|| GraphError::NodeNotFound(name.to_string()))
    }

    /// Name of a node.
    pub fn name(&self, id: NodeId) -> Result<&str, GraphError> {
        self.graph
            .node_weight(id)
            .map(|n| n.name.as_str())
            .ok_or_else(|| GraphError::NodeNotFound(format!("#{}", id.index())))
    }

    /// Whether `id` is a node of this graph.
    pub fn contains(&self, id: NodeId) -> bool {
        self.graph.contains_node(id)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of arcs.
    pub fn arc_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All node ids, in ascending order.
    pub fn nodes(&self) -> Vec<NodeId> {
        self.graph.node_indices().collect()
    }

    /// All arcs as (tail, head), sorted.
    pub fn arcs(&self) -> Vec<(NodeId, NodeId)> {
        let mut arcs: Vec<(NodeId, NodeId)> = self
            .graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
            .collect();
        arcs.sort();
        arcs
    }

    /// Add the arc `from → to`. Adding an existing arc is a no-op; an arc
    /// closing a cycle is rejected.
    pub fn add_arc(&mut self, from: NodeId, to: NodeId) -> Result<(), GraphError> {
        self.check_node(from)?;
        self.check_node(to)?;
        if self.exists_arc(from, to) {
            return Ok(());
        }
        if dag_enforcement::would_create_cycle(&self.graph, from, to) {
            return Err(GraphError::CycleDetected {
                from: self.name(from)?.to_string(),
                to: self.name(to)?.to_string(),
            });
        }
        self.graph.add_edge(from, to, ());
        Ok(())
    }

    /// Erase the arc `from → to`. Fails if the arc is absent.
    pub fn erase_arc(&mut self, from: NodeId, to: NodeId) -> Result<(), GraphError> {
        match self.graph.find_edge(from, to) {
            Some(edge) => {
                self.graph.remove_edge(edge);
                Ok(())
            }
            None => Err(GraphError::ArcNotFound {
                from: self.name(from).unwrap_or("?").to_string(),
                to: self.name(to).unwrap_or("?").to_string(),
            }),
        }
    }

    /// Whether the arc `from → to` exists.
    pub fn exists_arc(&self, from: NodeId, to: NodeId) -> bool {
        self.graph.find_edge(from, to).is_some()
    }

    /// Parents of a node, in ascending id order.
    pub fn parents(&self, id: NodeId) -> Vec<NodeId> {
        self.sorted_neighbors(id, Direction::Incoming)
    }

    /// Children of a node, in ascending id order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.sorted_neighbors(id, Direction::Outgoing)
    }

    /// A node followed by its parents.
    pub fn family(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = vec![id];
        out.extend(self.parents(id));
        out
    }

    /// Remove a node and all its arcs.
    pub fn remove_node(&mut self, id: NodeId) -> Result<(), GraphError> {
        let name = self.name(id)?.to_string();
        self.graph.remove_node(id);
        self.node_index.remove(&name);
        Ok(())
    }

    /// Copy of this graph keeping only `keep` (and the arcs among them).
    /// Node ids are preserved.
    pub fn restricted_to(&self, keep: &FxHashSet<NodeId>) -> Dag {
        let mut graph = self.graph.clone();
        graph.retain_nodes(|_, n| keep.contains(&n));
        let node_index = graph
            .node_indices()
            .filter_map(|n| graph.node_weight(n).map(|w| (w.name.clone(), n)))
            .collect();
        Dag { graph, node_index }
    }

    fn sorted_neighbors(&self, id: NodeId, dir: Direction) -> Vec<NodeId> {
        let mut out: Vec<NodeId> = self.graph.neighbors_directed(id, dir).collect();
        out.sort();
        out.dedup();
        out
    }

    fn check_node(&self, id: NodeId) -> Result<(), GraphError> {
        if self.graph.contains_node(id) {
            Ok(())
        } else {
            Err(GraphError::NodeNotFound(format!("#{}", id.index())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_names_are_rejected() {
        let mut dag = Dag::new();
        dag.add_node("a").unwrap();
        assert_eq!(
            dag.add_node("a"),
            Err(GraphError::DuplicateNode("a".into()))
        );
    }

    #[test]
    fn cycles_are_rejected_and_existing_arcs_are_idempotent() {
        let mut dag = Dag::new();
        let a = dag.add_node("a").unwrap();
        let b = dag.add_node("b").unwrap();
        dag.add_arc(a, b).unwrap();
        dag.add_arc(a, b).unwrap();
        assert_eq!(dag.arc_count(), 1);
        assert!(matches!(
            dag.add_arc(b, a),
            Err(GraphError::CycleDetected { .. })
        ));
        assert!(matches!(
            dag.add_arc(a, a),
            Err(GraphError::CycleDetected { .. })
        ));
    }

    #[test]
    fn erase_missing_arc_fails() {
        let mut dag = Dag::new();
        let a = dag.add_node("a").unwrap();
        let b = dag.add_node("b").unwrap();
        assert!(matches!(
            dag.erase_arc(a, b),
            Err(GraphError::ArcNotFound { .. })
        ));
    }

    #[test]
    fn restriction_preserves_ids() {
        let mut dag = Dag::new();
        let a = dag.add_node("a").unwrap();
        let b = dag.add_node("b").unwrap();
        let c = dag.add_node("c").unwrap();
        dag.add_arc(a, b).unwrap();
        dag.add_arc(b, c).unwrap();
        let keep: FxHashSet<NodeId> = [b, c].into_iter().collect();
        let sub = dag.restricted_to(&keep);
        assert_eq!(sub.node_count(), 2);
        assert_eq!(sub.node_id("c").unwrap(), c);
        assert!(sub.exists_arc(b, c));
        assert!(sub.get_node("a").is_none());
    }
}
