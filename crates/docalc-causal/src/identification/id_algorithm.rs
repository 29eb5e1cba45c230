//! The Shpitser–Pearl ID algorithm.
//!
//! `identify(y, x, P, G)` returns an expression for `P(y | do(x))` in terms
//! of the observational distribution `P` over the observed nodes `V` of `G`,
//! or fails with a hedge. Each recursive call shrinks the set of active
//! nodes, so the depth is bounded by `|V|`.

use docalc_core::errors::IdentificationError;
use docalc_core::NameSet;
use tracing::{debug, instrument, trace};

use crate::formula::Expr;
use crate::model::{ArcMask, CausalModel};

/// Expression of `P(y | do(x))` in `model`, relative to `p` (the joint of
/// the observed nodes when `None`).
#[instrument(level = "debug", skip(model, p))]
pub fn identifying_intervention(
    model: &CausalModel,
    y: &NameSet,
    x: &NameSet,
    p: Option<Expr>,
) -> Result<Expr, IdentificationError> {
    let p = p.unwrap_or_else(|| Expr::joint(model.observed_names()));
    identify(model, y, x, p, 0)
}

fn identify(
    model: &CausalModel,
    y: &NameSet,
    x: &NameSet,
    p: Expr,
    depth: usize,
) -> Result<Expr, IdentificationError> {
    let v = model.observed_names();

    // 1. nothing to intervene on
    if x.is_empty() {
        trace!(id_case = 1, id_depth = depth, "no intervention");
        return Ok(Expr::sum(&difference(&v, y), p));
    }

    // 2. restrict to the ancestors of y
    let ancestors = model.observed_ancestral_closure(y)?;
    if ancestors != v {
        trace!(id_case = 2, id_depth = depth, kept = ancestors.len(), "ancestral restriction");
        let p = Expr::sum(&difference(&v, &ancestors), p);
        let sub = model.induced(&ancestors)?;
        return identify(&sub, y, &intersection(x, &ancestors), p, depth + 1);
    }

    // 3. intervene on the nodes that cannot reach y once x is fixed
    let w = {
        let mut mask = ArcMask::new(model.causal_cell());
        mask.cut_incoming(model.ids_of(x)?)?;
        let reaching = model.observed_ancestral_closure(y)?;
        difference(&difference(&v, x), &reaching)
    };
    if !w.is_empty() {
        trace!(id_case = 3, id_depth = depth, absorbed = ?w, "absorbing inert nodes");
        return identify(model, y, &union(x, &w), p, depth + 1);
    }

    // 4. split on the c-components of G \ x
    let rest = difference(&v, x);
    let components = model.induced(&rest)?.c_components()?;
    if components.len() > 1 {
        trace!(id_case = 4, id_depth = depth, components = components.len(), "c-component split");
        let mut factors = Vec::with_capacity(components.len());
        for s in &components {
            factors.push(identify(model, s, &difference(&v, s), p.clone(), depth + 1)?);
        }
        return Ok(Expr::sum(&difference(&v, &union(y, x)), Expr::product(factors)));
    }
    let s = match components.into_iter().next() {
        Some(s) => s,
        None => {
            return Err(IdentificationError::CaseAnalysisExhausted {
                observed: v,
                component: NameSet::new(),
            })
        }
    };

    let top = model.c_components()?;

    // 5. hedge
    if top.len() == 1 && top[0] == v {
        debug!(id_case = 5, id_depth = depth, observed = ?v, component = ?s, "hedge found");
        return Err(IdentificationError::Hedge {
            observed: v,
            component: s,
        });
    }

    let order = model.observed_topological_order()?;

    // 6. s is a c-component of G
    if top.contains(&s) {
        trace!(id_case = 6, id_depth = depth, "direct factorization");
        let product = factorization(&order, &s, &v, &p);
        return Ok(Expr::sum(&difference(&s, y), product));
    }

    // 7. s lies inside a larger c-component of G
    if let Some(s_prime) = top.iter().find(|c| s.is_subset(c)) {
        trace!(id_case = 7, id_depth = depth, component = ?s_prime, "superset recursion");
        let product = factorization(&order, s_prime, &v, &p);
        let sub = model.induced(s_prime)?;
        return identify(&sub, y, &intersection(x, s_prime), product, depth + 1);
    }

    Err(IdentificationError::CaseAnalysisExhausted {
        observed: v,
        component: s,
    })
}

/// `Π_{v ∈ s} P(v | predecessors of v)` following `order`.
fn factorization(order: &[String], s: &NameSet, v: &NameSet, p: &Expr) -> Expr {
    let mut predecessors = NameSet::new();
    let mut factors = Vec::with_capacity(s.len());
    for node in order {
        if s.contains(node) {
            factors.push(conditional(node, &predecessors, v, p));
        }
        predecessors.insert(node.clone());
    }
    Expr::product(factors)
}

/// `P(node | given)` derived from `p`, a distribution over `v`.
fn conditional(node: &str, given: &NameSet, v: &NameSet, p: &Expr) -> Expr {
    let mut family = given.clone();
    family.insert(node.to_string());
    if let Expr::Joint(vars) = p {
        if family.is_subset(vars) {
            return Expr::posterior(NameSet::from([node.to_string()]), given.clone());
        }
    }
    let numerator = Expr::sum(&difference(v, &family), p.clone());
    let denominator = Expr::sum(&difference(v, given), p.clone());
    Expr::div(numerator, denominator)
}

fn difference(a: &NameSet, b: &NameSet) -> NameSet {
    a.difference(b).cloned().collect()
}

fn intersection(a: &NameSet, b: &NameSet) -> NameSet {
    a.intersection(b).cloned().collect()
}

fn union(a: &NameSet, b: &NameSet) -> NameSet {
    a.union(b).cloned().collect()
}
