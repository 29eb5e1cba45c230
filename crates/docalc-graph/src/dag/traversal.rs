//! Reachability queries over a [`Dag`]: ancestors, descendants, topological
//! order, undirected components, ancestral reduction.

use std::collections::{BTreeSet, VecDeque};

use docalc_core::types::collections::{FxHashMap, FxHashSet};
use petgraph::Direction;

use super::stable_graph::{Dag, NodeId};

impl Dag {
    /// Strict ancestors of `seeds`: every node reaching a seed by a directed
    /// path of length ≥ 1.
    pub fn ancestors<I>(&self, seeds: I) -> FxHashSet<NodeId>
    where
        I: IntoIterator<Item = NodeId>,
    {
        self.bfs_collect(seeds, Direction::Incoming)
    }

    /// Strict descendants of `seeds`.
    pub fn descendants<I>(&self, seeds: I) -> FxHashSet<NodeId>
    where
        I: IntoIterator<Item = NodeId>,
    {
        self.bfs_collect(seeds, Direction::Outgoing)
    }

    /// `seeds` together with all their ancestors.
    pub fn ancestral_closure<I>(&self, seeds: I) -> FxHashSet<NodeId>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let seeds: Vec<NodeId> = seeds.into_iter().filter(|&n| self.contains(n)).collect();
        let mut closure = self.ancestors(seeds.iter().copied());
        closure.extend(seeds);
        closure
    }

    /// Whether a directed path leads from `from` to `to` without entering any
    /// node of `avoiding`.
    pub fn has_directed_path(&self, from: NodeId, to: NodeId, avoiding: &FxHashSet<NodeId>) -> bool {
        let mut seen: FxHashSet<NodeId> = FxHashSet::default();
        let mut stack = vec![from];
        while let Some(node) = stack.pop() {
            for child in self.graph().neighbors_directed(node, Direction::Outgoing) {
                if child == to {
                    return true;
                }
                if !avoiding.contains(&child) && seen.insert(child) {
                    stack.push(child);
                }
            }
        }
        false
    }

    /// Topological order (Kahn), smallest id first among ready nodes.
    pub fn topological_order(&self) -> Vec<NodeId> {
        let mut in_degree: FxHashMap<NodeId, usize> = self
            .nodes()
            .into_iter()
            .map(|n| (n, self.parents(n).len()))
            .collect();
        let mut ready: BTreeSet<NodeId> = in_degree
            .iter()
            .filter(|(_, d)| **d == 0)
            .map(|(n, _)| *n)
            .collect();
        let mut order = Vec::with_capacity(in_degree.len());

        while let Some(node) = ready.pop_first() {
            order.push(node);
            for child in self.children(node) {
                if let Some(degree) = in_degree.get_mut(&child) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.insert(child);
                    }
                }
            }
        }
        order
    }

    /// Connected components of the underlying undirected graph, each sorted,
    /// ordered by their smallest member.
    pub fn connected_components(&self) -> Vec<BTreeSet<NodeId>> {
        let mut seen: FxHashSet<NodeId> = FxHashSet::default();
        let mut components = Vec::new();
        for start in self.nodes() {
            if !seen.insert(start) {
                continue;
            }
            let mut component = BTreeSet::new();
            let mut queue = VecDeque::from([start]);
            while let Some(node) = queue.pop_front() {
                component.insert(node);
                for next in self.graph().neighbors_undirected(node) {
                    if seen.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
            components.push(component);
        }
        components
    }

    /// The ancestral sub-graph of `interest`: `interest` plus its ancestors,
    /// with the arcs among them. Node ids are preserved.
    pub fn ancestral_reduction(&self, interest: &FxHashSet<NodeId>) -> Dag {
        let keep = self.ancestral_closure(interest.iter().copied());
        self.restricted_to(&keep)
    }

    fn bfs_collect<I>(&self, seeds: I, dir: Direction) -> FxHashSet<NodeId>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let mut visited: FxHashSet<NodeId> = FxHashSet::default();
        let mut queue: VecDeque<NodeId> = seeds
            .into_iter()
            .filter(|&n| self.contains(n))
            .collect();
        while let Some(node) = queue.pop_front() {
            for next in self.graph().neighbors_directed(node, dir) {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        visited
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// a → b → c, a → c, d isolated.
    fn sample() -> (Dag, [NodeId; 4]) {
        let mut dag = Dag::new();
        let a = dag.add_node("a").unwrap();
        let b = dag.add_node("b").unwrap();
        let c = dag.add_node("c").unwrap();
        let d = dag.add_node("d").unwrap();
        dag.add_arc(a, b).unwrap();
        dag.add_arc(b, c).unwrap();
        dag.add_arc(a, c).unwrap();
        (dag, [a, b, c, d])
    }

    #[test]
    fn ancestors_and_descendants_are_strict() {
        let (dag, [a, b, c, d]) = sample();
        let anc = dag.ancestors([c]);
        assert!(anc.contains(&a) && anc.contains(&b) && !anc.contains(&c));
        let desc = dag.descendants([a]);
        assert!(desc.contains(&b) && desc.contains(&c) && !desc.contains(&d));
        assert!(dag.ancestors([d]).is_empty());
    }

    #[test]
    fn topological_order_respects_arcs() {
        let (dag, [a, b, c, d]) = sample();
        let order = dag.topological_order();
        assert_eq!(order.len(), 4);
        let pos = |n| order.iter().position(|&x| x == n).unwrap();
        assert!(pos(a) < pos(b) && pos(b) < pos(c));
        assert!(order.contains(&d));
    }

    #[test]
    fn directed_path_can_be_blocked() {
        let (dag, [a, b, c, _]) = sample();
        let none = FxHashSet::default();
        assert!(dag.has_directed_path(a, c, &none));
        let block_b: FxHashSet<NodeId> = [b].into_iter().collect();
        // a → c is direct, so blocking b leaves a path.
        assert!(dag.has_directed_path(a, c, &block_b));
        assert!(!dag.has_directed_path(c, a, &none));
    }

    #[test]
    fn components_are_undirected() {
        let (dag, [a, _, _, d]) = sample();
        let comps = dag.connected_components();
        assert_eq!(comps.len(), 2);
        assert!(comps[0].contains(&a));
        assert_eq!(comps[1].iter().copied().collect::<Vec<_>>(), vec![d]);
    }

    #[test]
    fn ancestral_reduction_drops_descendants() {
        let (dag, [a, b, c, _]) = sample();
        let interest: FxHashSet<NodeId> = [b].into_iter().collect();
        let reduced = dag.ancestral_reduction(&interest);
        assert_eq!(reduced.node_count(), 2);
        assert!(reduced.contains(a) && reduced.contains(b) && !reduced.contains(c));
    }
}
