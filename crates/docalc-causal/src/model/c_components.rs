//! Confounded components.

use docalc_core::errors::GraphError;
use docalc_core::NameSet;
use docalc_graph::NodeId;

use super::{ArcMask, CausalModel};

impl CausalModel {
    /// Maximal sets of observed nodes linked through shared latent parents,
    /// sorted. Every observed node belongs to exactly one component.
    ///
    /// Arcs leaving observed nodes are masked for the duration of the probe,
    /// leaving only latent → observed arcs to connect the undirected
    /// components.
    pub fn c_components(&self) -> Result<Vec<NameSet>, GraphError> {
        let observed: Vec<NodeId> = self
            .nodes()
            .into_iter()
            .filter(|n| !self.is_latent(*n))
            .collect();

        let components = {
            let mut mask = ArcMask::new(self.causal_cell());
            mask.cut_outgoing(observed.iter().copied())?;
            let components = self.causal_dag().connected_components();
            components
        };

        let mut out = Vec::with_capacity(components.len());
        for component in components {
            let names = self.names_of(component.into_iter().filter(|n| !self.is_latent(*n)))?;
            if !names.is_empty() {
                out.push(names);
            }
        }
        out.sort();
        Ok(out)
    }
}
