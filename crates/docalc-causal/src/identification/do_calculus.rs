//! Do-calculus entry points.

use docalc_core::errors::IdentificationError;
use docalc_core::types::collections::FxHashSet;
use docalc_core::NameSet;
use docalc_graph::dsep::DSeparation;
use docalc_graph::NodeId;
use tracing::{debug, instrument};

use super::identifying_intervention;
use crate::formula::{CausalFormula, Expr};
use crate::model::CausalModel;

/// Estimand of `P(on | do(doing))`.
#[instrument(level = "debug", skip(model))]
pub fn do_calculus<'a>(
    model: &'a CausalModel,
    on: &NameSet,
    doing: &NameSet,
) -> Result<CausalFormula<'a>, IdentificationError> {
    let root = identifying_intervention(model, on, doing, None)?;
    Ok(CausalFormula::new(
        model,
        root,
        on.clone(),
        doing.clone(),
        NameSet::new(),
    ))
}

/// Estimand of `P(on | do(doing), knowing)`.
///
/// An observation `k` independent of `on` given the rest once the arcs into
/// `doing` and out of `k` are removed can be turned into an intervention
/// (second rule of the do-calculus). Each such `k` is tried in turn; a hedge
/// in the reduced query moves on to the next one. Otherwise the result is
/// `P(on, knowing | do(doing)) / P(knowing | do(doing))`.
#[instrument(level = "debug", skip(model))]
pub fn do_calculus_with_observation<'a>(
    model: &'a CausalModel,
    on: &NameSet,
    doing: &NameSet,
    knowing: &NameSet,
) -> Result<CausalFormula<'a>, IdentificationError> {
    if knowing.is_empty() {
        return do_calculus(model, on, doing);
    }

    for k in knowing {
        let mut rest = knowing.clone();
        rest.remove(k);
        if !observation_is_action(model, on, doing, k, &rest)? {
            continue;
        }
        let mut extended = doing.clone();
        extended.insert(k.clone());
        debug!(observation = %k, "observation exchanged for an action");
        match do_calculus_with_observation(model, on, &extended, &rest) {
            Ok(formula) => return Ok(formula.with_query(doing.clone(), knowing.clone())),
            Err(IdentificationError::Hedge { .. }) => {
                debug!(observation = %k, "hedge after exchange, trying the next observation");
            }
            Err(e) => return Err(e),
        }
    }

    let joint_target: NameSet = on.union(knowing).cloned().collect();
    let numerator = do_calculus(model, &joint_target, doing)?;
    let denominator = do_calculus(model, knowing, doing)?;
    let root = Expr::div(numerator.into_root(), denominator.into_root());
    Ok(CausalFormula::new(
        model,
        root,
        on.clone(),
        doing.clone(),
        knowing.clone(),
    ))
}

/// Whether `on ⟂ k | doing ∪ rest` in the ancestral graph of the query with
/// the arcs into `doing` and out of `k` removed.
fn observation_is_action(
    model: &CausalModel,
    on: &NameSet,
    doing: &NameSet,
    k: &str,
    rest: &NameSet,
) -> Result<bool, IdentificationError> {
    let on_ids = model.ids_of(on)?;
    let doing_ids = model.ids_of(doing)?;
    let rest_ids = model.ids_of(rest)?;
    let k_id = model.id_from_name(k)?;

    let mut interest: FxHashSet<NodeId> = on_ids.clone();
    interest.extend(doing_ids.iter().copied());
    interest.extend(rest_ids.iter().copied());
    interest.insert(k_id);
    let reduced = model.causal_dag().ancestral_reduction(&interest);

    let mut given = doing_ids.clone();
    given.extend(rest_ids);
    let source: FxHashSet<NodeId> = std::iter::once(k_id).collect();
    Ok(DSeparation::new(&reduced)
        .cut_incoming(doing_ids)
        .cut_outgoing([k_id])
        .separated(&source, &on_ids, &given))
}
