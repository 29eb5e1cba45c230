//! Door-criterion predicates.

use docalc_core::types::collections::FxHashSet;
use docalc_graph::dsep::DSeparation;
use docalc_graph::{is_dsep_parents, Dag, NodeId};

/// Whether `z` satisfies the backdoor criterion for `x → y`: no node of `z`
/// descends from `x`, and `z` blocks every path leaving `x` through a parent.
pub fn is_backdoor(dag: &Dag, x: NodeId, y: NodeId, z: &FxHashSet<NodeId>) -> bool {
    let descendants = dag.descendants([x]);
    if z.iter().any(|n| descendants.contains(n)) {
        return false;
    }
    is_dsep_parents(dag, &single(x), &single(y), z)
}

/// Whether `z` satisfies the frontdoor criterion for `x → y`:
///
/// 1. every directed path from `x` to `y` meets `z`;
/// 2. no node of `z` is reachable from `x` by a backdoor path;
/// 3. every backdoor path from `z` to `y` is blocked by `x`.
pub fn is_frontdoor(dag: &Dag, x: NodeId, y: NodeId, z: &FxHashSet<NodeId>) -> bool {
    if dag.has_directed_path(x, y, z) {
        return false;
    }
    let reachable = backdoor_reachable(dag, x);
    if z.iter().any(|n| reachable.contains(n)) {
        return false;
    }
    let mut interest = z.clone();
    interest.insert(x);
    interest.insert(y);
    let reduced = dag.ancestral_reduction(&interest);
    DSeparation::new(&reduced)
        .cut_outgoing(z.iter().copied())
        .separated(z, &single(y), &single(x))
}

/// Nodes connected to `x` by a trail starting with an arc into `x`.
pub fn backdoor_reachable(dag: &Dag, x: NodeId) -> FxHashSet<NodeId> {
    DSeparation::new(dag)
        .cut_outgoing([x])
        .reachable(&single(x), &FxHashSet::default())
}

/// Nodes strictly inside some directed path from `x` to `y`.
pub fn nodes_on_directed_paths(dag: &Dag, x: NodeId, y: NodeId) -> FxHashSet<NodeId> {
    let below = dag.descendants([x]);
    let above = dag.ancestors([y]);
    below.intersection(&above).copied().collect()
}

pub(crate) fn single(n: NodeId) -> FxHashSet<NodeId> {
    std::iter::once(n).collect()
}
