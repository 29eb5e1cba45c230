//! Lazy witness enumeration.
//!
//! Candidates are tried by increasing size. A candidate containing an
//! already yielded witness is skipped, so the yielded sets form an
//! antichain of minimal witnesses.

use std::collections::BTreeSet;

use docalc_core::types::collections::FxHashSet;
use docalc_graph::{Dag, NodeId};
use tracing::debug;

use super::criteria::{backdoor_reachable, is_backdoor, is_frontdoor, nodes_on_directed_paths};

/// Subsets of a pool by increasing size, lexicographic within a size.
#[derive(Debug, Clone)]
struct SubsetSearch {
    pool: Vec<NodeId>,
    size: usize,
    max_size: usize,
    indices: Option<Vec<usize>>,
}

impl SubsetSearch {
    fn new(pool: FxHashSet<NodeId>) -> Self {
        let mut pool: Vec<NodeId> = pool.into_iter().collect();
        pool.sort();
        Self {
            pool,
            size: 1,
            max_size: usize::MAX,
            indices: None,
        }
    }

    fn next_subset(&mut self) -> Option<BTreeSet<NodeId>> {
        let n = self.pool.len();
        loop {
            match self.indices.as_mut() {
                None => {
                    if self.size > n || self.size > self.max_size {
                        return None;
                    }
                    self.indices = Some((0..self.size).collect());
                }
                Some(idx) => {
                    let k = idx.len();
                    match (0..k).rev().find(|&i| idx[i] < n - k + i) {
                        Some(i) => {
                            idx[i] += 1;
                            for j in i + 1..k {
                                idx[j] = idx[j - 1] + 1;
                            }
                        }
                        None => {
                            self.size += 1;
                            self.indices = None;
                            continue;
                        }
                    }
                }
            }
            let idx = self.indices.as_ref()?;
            return Some(idx.iter().map(|&i| self.pool[i]).collect());
        }
    }
}

/// Witness bookkeeping shared by both generators.
#[derive(Debug, Clone)]
struct Antichain {
    search: SubsetSearch,
    found: Vec<BTreeSet<NodeId>>,
    tested: usize,
}

impl Antichain {
    fn new(pool: FxHashSet<NodeId>) -> Self {
        Self {
            search: SubsetSearch::new(pool),
            found: Vec::new(),
            tested: 0,
        }
    }

    fn empty() -> Self {
        Self::new(FxHashSet::default())
    }

    fn next_where(
        &mut self,
        mut accept: impl FnMut(&FxHashSet<NodeId>) -> bool,
    ) -> Option<BTreeSet<NodeId>> {
        while let Some(candidate) = self.search.next_subset() {
            if self.found.iter().any(|w| w.is_subset(&candidate)) {
                continue;
            }
            self.tested += 1;
            let as_set: FxHashSet<NodeId> = candidate.iter().copied().collect();
            if accept(&as_set) {
                self.found.push(candidate.clone());
                return Some(candidate);
            }
        }
        None
    }
}

/// Backdoor witnesses for `cause → effect`, smallest first.
#[derive(Debug, Clone)]
pub struct BackdoorGenerator {
    reduced: Dag,
    cause: NodeId,
    effect: NodeId,
    candidates: Antichain,
}

impl BackdoorGenerator {
    /// Only consider witnesses of at most `max_size` nodes.
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        let current = self.candidates.search.max_size;
        self.candidates.search.max_size = current.min(max_size);
        self
    }

    /// Candidate sets tested so far.
    pub fn tested(&self) -> usize {
        self.candidates.tested
    }
}

impl Iterator for BackdoorGenerator {
    type Item = BTreeSet<NodeId>;

    fn next(&mut self) -> Option<Self::Item> {
        let (reduced, cause, effect) = (&self.reduced, self.cause, self.effect);
        let witness = self
            .candidates
            .next_where(|z| is_backdoor(reduced, cause, effect, z))?;
        debug!(
            witness = witness.len(),
            candidates_tested = self.candidates.tested,
            "backdoor witness"
        );
        Some(witness)
    }
}

/// Backdoor witnesses for `cause → effect` in `dag`, never using nodes of
/// `excluded`. Empty when `cause` has no parents or `effect` is an ancestor
/// of `cause`.
pub fn backdoor_generator(
    dag: &Dag,
    cause: NodeId,
    effect: NodeId,
    excluded: &FxHashSet<NodeId>,
) -> BackdoorGenerator {
    let interest: FxHashSet<NodeId> = [cause, effect].into_iter().collect();
    let reduced = dag.ancestral_reduction(&interest);
    let blocked = dag.parents(cause).is_empty() || dag.ancestors([cause]).contains(&effect);
    let candidates = if blocked {
        Antichain::empty()
    } else {
        let descendants = dag.descendants([cause]);
        let pool = reduced
            .nodes()
            .into_iter()
            .filter(|n| {
                *n != cause && *n != effect && !descendants.contains(n) && !excluded.contains(n)
            })
            .collect();
        Antichain::new(pool)
    };
    BackdoorGenerator {
        reduced,
        cause,
        effect,
        candidates,
    }
}

/// Frontdoor witnesses for `cause → effect`, smallest first.
#[derive(Debug, Clone)]
pub struct FrontdoorGenerator<'g> {
    dag: &'g Dag,
    cause: NodeId,
    effect: NodeId,
    candidates: Antichain,
}

impl FrontdoorGenerator<'_> {
    /// Only consider witnesses of at most `max_size` nodes.
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        let current = self.candidates.search.max_size;
        self.candidates.search.max_size = current.min(max_size);
        self
    }

    /// Candidate sets tested so far.
    pub fn tested(&self) -> usize {
        self.candidates.tested
    }
}

impl Iterator for FrontdoorGenerator<'_> {
    type Item = BTreeSet<NodeId>;

    fn next(&mut self) -> Option<Self::Item> {
        let (dag, cause, effect) = (self.dag, self.cause, self.effect);
        let witness = self
            .candidates
            .next_where(|z| is_frontdoor(dag, cause, effect, z))?;
        debug!(
            witness = witness.len(),
            candidates_tested = self.candidates.tested,
            "frontdoor witness"
        );
        Some(witness)
    }
}

/// Frontdoor witnesses for `cause → effect` in `dag`, never using nodes of
/// `excluded` or nodes reachable from `cause` by a backdoor path.
///
/// Candidates lie on directed paths from `cause` to `effect`. Without such
/// a path, if both share an undirected component, each remaining node of
/// that component is tried as a singleton.
pub fn frontdoor_generator<'g>(
    dag: &'g Dag,
    cause: NodeId,
    effect: NodeId,
    excluded: &FxHashSet<NodeId>,
) -> FrontdoorGenerator<'g> {
    let reachable = backdoor_reachable(dag, cause);
    let usable = |n: &NodeId| {
        *n != cause && *n != effect && !excluded.contains(n) && !reachable.contains(n)
    };

    let on_paths = nodes_on_directed_paths(dag, cause, effect);
    let candidates = if dag.descendants([cause]).contains(&effect) {
        Antichain::new(on_paths.into_iter().filter(|n| usable(n)).collect())
    } else {
        let shared = dag
            .connected_components()
            .into_iter()
            .find(|c| c.contains(&cause) && c.contains(&effect));
        match shared {
            Some(component) => {
                let mut singletons =
                    Antichain::new(component.into_iter().filter(|n| usable(n)).collect());
                singletons.search.max_size = 1;
                singletons
            }
            None => Antichain::empty(),
        }
    };
    FrontdoorGenerator {
        dag,
        cause,
        effect,
        candidates,
    }
}
