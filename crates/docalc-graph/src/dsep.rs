//! D-separation by active-trail reachability.
//!
//! [`DSeparation`] runs the reachability ("Bayes-ball") search over a [`Dag`]
//! while ignoring the arcs into some nodes and out of others, so mutilated
//! graphs such as G with the arcs into X removed never need to be built.

use std::collections::VecDeque;

use docalc_core::types::collections::FxHashSet;
use petgraph::Direction;

use crate::dag::{Dag, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Travel {
    /// Entered from a child.
    Up,
    /// Entered from a parent.
    Down,
}

/// A d-separation query over a [`Dag`] with an arc filter.
#[derive(Debug, Clone)]
pub struct DSeparation<'a> {
    dag: &'a Dag,
    cut_incoming: FxHashSet<NodeId>,
    cut_outgoing: FxHashSet<NodeId>,
}

impl<'a> DSeparation<'a> {
    pub fn new(dag: &'a Dag) -> Self {
        Self {
            dag,
            cut_incoming: FxHashSet::default(),
            cut_outgoing: FxHashSet::default(),
        }
    }

    /// Ignore every arc entering one of `nodes`.
    pub fn cut_incoming<I: IntoIterator<Item = NodeId>>(mut self, nodes: I) -> Self {
        self.cut_incoming.extend(nodes);
        self
    }

    /// Ignore every arc leaving one of `nodes`.
    pub fn cut_outgoing<I: IntoIterator<Item = NodeId>>(mut self, nodes: I) -> Self {
        self.cut_outgoing.extend(nodes);
        self
    }

    /// Whether `x` and `y` are d-separated given `z`.
    pub fn separated(
        &self,
        x: &FxHashSet<NodeId>,
        y: &FxHashSet<NodeId>,
        z: &FxHashSet<NodeId>,
    ) -> bool {
        let reachable = self.reachable(x, z);
        y.iter().all(|n| !reachable.contains(n))
    }

    /// Nodes connected to `x` by an active trail given `z`, `x` excluded.
    pub fn reachable(&self, x: &FxHashSet<NodeId>, z: &FxHashSet<NodeId>) -> FxHashSet<NodeId> {
        let observed_ancestry = self.ancestry_of(z);

        let mut visited: FxHashSet<(NodeId, Travel)> = FxHashSet::default();
        let mut reachable: FxHashSet<NodeId> = FxHashSet::default();
        let mut queue: VecDeque<(NodeId, Travel)> = x
            .iter()
            .filter(|n| self.dag.contains(**n))
            .map(|&n| (n, Travel::Up))
            .collect();

        while let Some((node, travel)) = queue.pop_front() {
            if !visited.insert((node, travel)) {
                continue;
            }
            let observed = z.contains(&node);
            if !observed {
                reachable.insert(node);
            }
            match travel {
                Travel::Up if !observed => {
                    queue.extend(self.active_parents(node).map(|p| (p, Travel::Up)));
                    queue.extend(self.active_children(node).map(|c| (c, Travel::Down)));
                }
                Travel::Up => {}
                Travel::Down => {
                    if !observed {
                        queue.extend(self.active_children(node).map(|c| (c, Travel::Down)));
                    }
                    // v-structure opened by an observed descendant
                    if observed_ancestry.contains(&node) {
                        queue.extend(self.active_parents(node).map(|p| (p, Travel::Up)));
                    }
                }
            }
        }
        for n in x {
            reachable.remove(n);
        }
        reachable
    }

    /// `z` together with its ancestors through active arcs.
    fn ancestry_of(&self, z: &FxHashSet<NodeId>) -> FxHashSet<NodeId> {
        let mut out: FxHashSet<NodeId> = FxHashSet::default();
        let mut stack: Vec<NodeId> = z.iter().copied().filter(|n| self.dag.contains(*n)).collect();
        while let Some(node) = stack.pop() {
            if out.insert(node) {
                stack.extend(self.active_parents(node));
            }
        }
        out
    }

    fn active_parents(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let blocked = self.cut_incoming.contains(&node);
        self.dag
            .graph()
            .neighbors_directed(node, Direction::Incoming)
            .filter(move |p| !blocked && !self.cut_outgoing.contains(p))
    }

    fn active_children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let blocked = self.cut_outgoing.contains(&node);
        self.dag
            .graph()
            .neighbors_directed(node, Direction::Outgoing)
            .filter(move |c| !blocked && !self.cut_incoming.contains(c))
    }
}

/// Whether `x` and `y` are d-separated given `z` in `dag`.
pub fn is_dsep(
    dag: &Dag,
    x: &FxHashSet<NodeId>,
    y: &FxHashSet<NodeId>,
    z: &FxHashSet<NodeId>,
) -> bool {
    DSeparation::new(dag).separated(x, y, z)
}

/// Like [`is_dsep`], considering only the trails that leave `x` through a
/// parent (the graph with the arcs out of `x` removed).
pub fn is_dsep_parents(
    dag: &Dag,
    x: &FxHashSet<NodeId>,
    y: &FxHashSet<NodeId>,
    z: &FxHashSet<NodeId>,
) -> bool {
    DSeparation::new(dag)
        .cut_outgoing(x.iter().copied())
        .separated(x, y, z)
}

/// Nodes d-connected to `x` given `z`.
pub fn dconnected(dag: &Dag, x: &FxHashSet<NodeId>, z: &FxHashSet<NodeId>) -> FxHashSet<NodeId> {
    DSeparation::new(dag).reachable(x, z)
}
