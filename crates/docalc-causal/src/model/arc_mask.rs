//! Scoped arc removal on a shared causal graph.
//!
//! The identification engine probes mutilated graphs (arcs into or out of a
//! set removed) on the model it was handed instead of copying it. An
//! [`ArcMask`] records every arc it removes and puts them all back when it is
//! dropped, so the graph is restored on every exit path, errors included.

use std::cell::RefCell;

use docalc_core::errors::GraphError;
use docalc_graph::{Dag, NodeId};
use tracing::{trace, warn};

/// Guard over temporarily removed arcs.
#[derive(Debug)]
pub struct ArcMask<'a> {
    dag: &'a RefCell<Dag>,
    removed: Vec<(NodeId, NodeId)>,
}

impl<'a> ArcMask<'a> {
    pub fn new(dag: &'a RefCell<Dag>) -> Self {
        Self {
            dag,
            removed: Vec::new(),
        }
    }

    /// Remove every arc entering one of `nodes`.
    pub fn cut_incoming<I>(&mut self, nodes: I) -> Result<(), GraphError>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let mut dag = self.dag.borrow_mut();
        for node in nodes {
            for parent in dag.parents(node) {
                dag.erase_arc(parent, node)?;
                self.removed.push((parent, node));
            }
        }
        Ok(())
    }

    /// Remove every arc leaving one of `nodes`.
    pub fn cut_outgoing<I>(&mut self, nodes: I) -> Result<(), GraphError>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let mut dag = self.dag.borrow_mut();
        for node in nodes {
            for child in dag.children(node) {
                dag.erase_arc(node, child)?;
                self.removed.push((node, child));
            }
        }
        Ok(())
    }

    /// Arcs currently removed, in removal order.
    pub fn removed(&self) -> &[(NodeId, NodeId)] {
        &self.removed
    }
}

impl Drop for ArcMask<'_> {
    fn drop(&mut self) {
        if self.removed.is_empty() {
            return;
        }
        trace!(arcs = self.removed.len(), "restoring masked arcs");
        let mut dag = self.dag.borrow_mut();
        for (from, to) in self.removed.drain(..).rev() {
            if let Err(e) = dag.add_arc(from, to) {
                warn!(error = %e, "failed to restore masked arc");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> (RefCell<Dag>, [NodeId; 4]) {
        let mut dag = Dag::new();
        let a = dag.add_node("a").unwrap();
        let b = dag.add_node("b").unwrap();
        let c = dag.add_node("c").unwrap();
        let d = dag.add_node("d").unwrap();
        dag.add_arc(a, b).unwrap();
        dag.add_arc(a, c).unwrap();
        dag.add_arc(b, d).unwrap();
        dag.add_arc(c, d).unwrap();
        (RefCell::new(dag), [a, b, c, d])
    }

    #[test]
    fn arcs_come_back_on_drop() {
        let (cell, [a, b, _, d]) = diamond();
        let before = cell.borrow().arcs();
        {
            let mut mask = ArcMask::new(&cell);
            mask.cut_incoming([d]).unwrap();
            mask.cut_outgoing([a]).unwrap();
            assert_eq!(mask.removed().len(), 4);
            assert_eq!(cell.borrow().arc_count(), 0);
            assert!(!cell.borrow().exists_arc(b, d));
        }
        assert_eq!(cell.borrow().arcs(), before);
    }

    #[test]
    fn arcs_come_back_on_early_return() {
        fn probe(cell: &RefCell<Dag>, node: NodeId) -> Result<(), GraphError> {
            let mut mask = ArcMask::new(cell);
            mask.cut_outgoing([node])?;
            Err(GraphError::NodeNotFound("probe".into()))
        }
        let (cell, [a, ..]) = diamond();
        let before = cell.borrow().arcs();
        assert!(probe(&cell, a).is_err());
        assert_eq!(cell.borrow().arcs(), before);
    }
}
