//! Projection of a causal model onto a subset of its nodes.

use std::sync::Arc;

use docalc_core::errors::GraphError;
use docalc_core::types::collections::{BTreeSet, FxHashSet};
use docalc_core::NameSet;
use docalc_graph::NodeId;
use tracing::trace;

use super::{CausalModel, LatentDescriptor};

/// The sub-model induced on `names`: its observed nodes (with their
/// tables, averaged over dropped parents), the causal arcs among them, and
/// every latent with at least one surviving child. Arcs among latent
/// children are kept as they are. `model` is left untouched.
pub fn induced_causal_sub_model(
    model: &CausalModel,
    names: &NameSet,
) -> Result<CausalModel, GraphError> {
    let mut observed: FxHashSet<NodeId> = FxHashSet::default();
    for name in names {
        let id = model.id_from_name(name)?;
        if !model.is_latent(id) {
            observed.insert(id);
        }
    }

    let dag = model.causal_dag();
    let mut keep = observed.clone();
    let mut latents = BTreeSet::new();
    let mut descriptors = Vec::new();
    for &latent in model.latent_ids() {
        let children: Vec<NodeId> = dag
            .children(latent)
            .into_iter()
            .filter(|c| observed.contains(c))
            .collect();
        if children.is_empty() {
            continue;
        }
        keep.insert(latent);
        latents.insert(latent);
        descriptors.push(LatentDescriptor {
            name: dag.name(latent)?.to_string(),
            children: children
                .iter()
                .map(|c| dag.name(*c).map(str::to_string))
                .collect::<Result<_, _>>()?,
        });
    }
    let causal = dag.restricted_to(&keep);
    drop(dag);

    let observational = model.observational_bn().restricted_to(&observed)?;
    trace!(
        kept = observed.len(),
        latents = latents.len(),
        "induced causal sub-model"
    );
    Ok(CausalModel::from_parts(
        Arc::new(observational),
        causal,
        latents,
        descriptors,
    ))
}

impl CausalModel {
    /// See [`induced_causal_sub_model`].
    pub fn induced(&self, names: &NameSet) -> Result<CausalModel, GraphError> {
        induced_causal_sub_model(self, names)
    }
}
