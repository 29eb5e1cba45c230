//! Counterfactuals through a twin network.
//!
//! The background factors of a model (its parentless observed nodes, other
//! than the ones being changed) are replaced by their posterior under the
//! observed profile. Intervening in that twin model answers "what would
//! have happened to this unit had `whatif` been different".

use docalc_core::errors::{GraphError, IdentificationError};
use docalc_core::types::names::name_set;
use docalc_core::{DocalcResult, NameSet, Values};
use docalc_graph::{ExactInference, NodeId, Potential, VariableElimination};
use tracing::{debug, instrument};

use crate::impact::{causal_impact, CausalQuery};
use crate::model::CausalModel;

/// The twin of `model` for the unit described by `profile`.
///
/// Only tables change: each idiosyncratic node keeps its structure and gets
/// its posterior given `profile` as its distribution.
#[instrument(level = "debug", skip(model))]
pub fn counterfactual_model(
    model: &CausalModel,
    profile: &Values,
    whatif: &NameSet,
) -> DocalcResult<CausalModel> {
    model.validate_values(profile)?;
    for name in whatif {
        model.check_observed(name)?;
    }

    let idiosyncratic = idiosyncratic_nodes(model, whatif)?;
    let engine = VariableElimination::new(model.observational_bn());
    let mut posteriors = Vec::with_capacity(idiosyncratic.len());
    for &id in &idiosyncratic {
        let name = model.name_of(id)?;
        let posterior = engine.posterior_with_evidence(&name_set([name.as_str()]), profile)?;
        posteriors.push((id, posterior));
    }

    let mut twin = model.clone();
    for (id, posterior) in posteriors {
        let family = twin.observational_bn().family_variables(id)?;
        let parents = Potential::filled(family.into_iter().skip(1).collect(), 1.0)?;
        let table = (&posterior * &parents)?;
        twin.observational_mut().set_cpt(id, &table)?;
    }
    debug!(replaced = idiosyncratic.len(), "twin model built");
    Ok(twin)
}

/// Distribution of `on` had `whatif` been forced, for the unit described by
/// `profile`, sliced at `values`. The result is expressed over the variables
/// of `model`.
#[instrument(level = "debug", skip(model))]
pub fn counterfactual(
    model: &CausalModel,
    profile: &Values,
    on: &NameSet,
    whatif: &NameSet,
    values: &Values,
) -> DocalcResult<Potential> {
    let twin = counterfactual_model(model, profile, whatif)?;
    let query = CausalQuery {
        on: on.clone(),
        doing: whatif.clone(),
        knowing: NameSet::new(),
        values: values.clone(),
    };
    let impact = causal_impact(&twin, &query)?;
    let Some(table) = impact.table else {
        return Err(IdentificationError::Unidentifiable {
            reason: impact.explanation,
        }
        .into());
    };

    let variables = table
        .variables()
        .iter()
        .map(|v| model.variable(v.name()))
        .collect::<Result<Vec<_>, GraphError>>()?;
    Ok(Potential::from_values(variables, table.values().to_vec())?)
}

/// Parentless observed nodes of the causal graph outside `whatif`.
fn idiosyncratic_nodes(model: &CausalModel, whatif: &NameSet) -> Result<Vec<NodeId>, GraphError> {
    let dag = model.causal_dag();
    let mut out = Vec::new();
    for id in dag.nodes() {
        if model.is_latent(id) || !dag.parents(id).is_empty() {
            continue;
        }
        if !whatif.contains(dag.name(id)?) {
            out.push(id);
        }
    }
    Ok(out)
}
