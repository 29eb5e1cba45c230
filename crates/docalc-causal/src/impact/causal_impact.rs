//! Orchestration: d-separation short-circuit, door adjustments, then the
//! general do-calculus.

use std::fmt;

use docalc_core::config::{DocalcConfig, ImpactConfig};
use docalc_core::errors::GraphError;
use docalc_core::types::collections::FxHashSet;
use docalc_core::types::names::format_names;
use docalc_core::{DocalcResult, NameSet};
use docalc_graph::{is_dsep, NodeId, Potential};
use tracing::{debug, info, instrument};

use super::adjustment::{backdoor_expression, frontdoor_expression};
use super::query::CausalQuery;
use crate::formula::{CausalFormula, Expr};
use crate::identification::do_calculus_with_observation;
use crate::model::CausalModel;

/// How an answer was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImpactMethod {
    /// `doing` and `on` are d-separated: no causal effect.
    DSeparated,
    Backdoor(NameSet),
    Frontdoor(NameSet),
    DoCalculus,
    NotIdentifiable,
}

impl fmt::Display for ImpactMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DSeparated => write!(f, "d-separated"),
            Self::Backdoor(z) => write!(f, "backdoor {}", format_names(z)),
            Self::Frontdoor(z) => write!(f, "frontdoor {}", format_names(z)),
            Self::DoCalculus => write!(f, "do-calculus"),
            Self::NotIdentifiable => write!(f, "not identifiable"),
        }
    }
}

/// Answer to a causal query. A query that cannot be identified has neither
/// formula nor table; the explanation says why.
#[derive(Debug, Clone)]
pub struct CausalImpact<'a> {
    pub formula: Option<CausalFormula<'a>>,
    pub table: Option<Potential>,
    pub explanation: String,
    pub method: ImpactMethod,
}

impl CausalImpact<'_> {
    pub fn is_identified(&self) -> bool {
        self.formula.is_some()
    }
}

/// [`causal_impact_with_config`] with the default configuration.
pub fn causal_impact<'a>(
    model: &'a CausalModel,
    query: &CausalQuery,
) -> DocalcResult<CausalImpact<'a>> {
    causal_impact_with_config(model, query, &DocalcConfig::default())
}

/// Answer `P(on | do(doing), knowing)` in `model`.
///
/// Malformed queries fail with a validation error. A query that cannot be
/// identified is a normal answer with [`ImpactMethod::NotIdentifiable`].
#[instrument(level = "debug", skip(model, config))]
pub fn causal_impact_with_config<'a>(
    model: &'a CausalModel,
    query: &CausalQuery,
    config: &DocalcConfig,
) -> DocalcResult<CausalImpact<'a>> {
    model.validate_query(&query.on, &query.doing, &query.knowing, &query.values)?;
    let (on, doing, knowing) = (&query.on, &query.doing, &query.knowing);

    let (formula, method, explanation) = if no_causal_effect(model, on, doing, knowing)? {
        let root = Expr::posterior(on.clone(), knowing.clone());
        let formula = CausalFormula::new(model, root, on.clone(), doing.clone(), knowing.clone());
        let explanation = format!(
            "No causal effect of {} on {}, because they are d-separated \
             (conditioning on the observed variables if any).",
            format_names(doing),
            format_names(on)
        );
        (formula, ImpactMethod::DSeparated, explanation)
    } else if let Some((formula, method)) = door_adjustment(model, on, doing, knowing, &config.impact)? {
        let explanation = format!("{method} found.");
        (formula, method, explanation)
    } else {
        match do_calculus_with_observation(model, on, doing, knowing) {
            Ok(formula) => (
                formula,
                ImpactMethod::DoCalculus,
                "Do-calculus computations".to_string(),
            ),
            Err(e) if e.is_non_identifiable() => {
                info!(impact_method = %ImpactMethod::NotIdentifiable, reason = %e, "causal impact");
                return Ok(CausalImpact {
                    formula: None,
                    table: None,
                    explanation: capitalize(&e.to_string()),
                    method: ImpactMethod::NotIdentifiable,
                });
            }
            Err(e) => return Err(e.into()),
        }
    };

    let mut table = formula.eval_with(&config.inference)?;
    if !query.values.is_empty() {
        table = table.extract(&query.values)?;
    }
    let table = table.reorder(&query.axis_order());

    info!(impact_method = %method, formula = %formula, "causal impact");
    Ok(CausalImpact {
        formula: Some(formula),
        table: Some(table),
        explanation,
        method,
    })
}

/// Whether `doing` and `on` are d-separated given `knowing` and the latents.
fn no_causal_effect(
    model: &CausalModel,
    on: &NameSet,
    doing: &NameSet,
    knowing: &NameSet,
) -> Result<bool, GraphError> {
    let on_ids = model.ids_of(on)?;
    let doing_ids = model.ids_of(doing)?;
    let mut given: FxHashSet<NodeId> = model.ids_of(knowing)?;
    given.extend(model.latent_ids().iter().copied());
    let dag = model.causal_dag();
    Ok(is_dsep(&dag, &doing_ids, &on_ids, &given))
}

/// Backdoor then frontdoor adjustment for a single cause and effect without
/// observations.
fn door_adjustment<'a>(
    model: &'a CausalModel,
    on: &NameSet,
    doing: &NameSet,
    knowing: &NameSet,
    config: &ImpactConfig,
) -> Result<Option<(CausalFormula<'a>, ImpactMethod)>, GraphError> {
    if on.len() != 1 || doing.len() != 1 || !knowing.is_empty() {
        return Ok(None);
    }
    let (Some(y), Some(x)) = (on.first(), doing.first()) else {
        return Ok(None);
    };
    let cap = config.effective_max_witness_size();
    let formula = |root: Expr| {
        CausalFormula::new(model, root, on.clone(), doing.clone(), NameSet::new())
    };

    if config.effective_use_backdoor() {
        if let Some(z) = model.back_door_within(x, y, cap)? {
            debug!(witness = ?z, "using backdoor adjustment");
            let root = backdoor_expression(x, y, &z);
            return Ok(Some((formula(root), ImpactMethod::Backdoor(z))));
        }
    }
    if config.effective_use_frontdoor() {
        if let Some(z) = model.front_door_within(x, y, cap)? {
            debug!(witness = ?z, "using frontdoor adjustment");
            let root = frontdoor_expression(x, y, &z);
            return Ok(Some((formula(root), ImpactMethod::Frontdoor(z))));
        }
    }
    Ok(None)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
