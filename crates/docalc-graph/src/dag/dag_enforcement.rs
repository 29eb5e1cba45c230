//! Cycle detection before every arc insertion.
//! Rejects any arc that would create a cycle in the DAG.

use petgraph::visit::Dfs;

use super::stable_graph::{DagGraph, NodeId};

/// Check whether adding an arc from `source` to `target` would create a cycle.
///
/// Returns `true` if a cycle would be created (arc should be rejected).
pub fn would_create_cycle(graph: &DagGraph, source: NodeId, target: NodeId) -> bool {
    if source == target {
        return true;
    }
    // Adding source→target closes a cycle iff target already reaches source.
    has_path(graph, target, source)
}

/// DFS-based reachability check: can we reach `to` from `from`?
pub fn has_path(graph: &DagGraph, from: NodeId, to: NodeId) -> bool {
    let mut dfs = Dfs::new(graph, from);
    while let Some(node) = dfs.next(graph) {
        if node == to {
            return true;
        }
    }
    false
}
