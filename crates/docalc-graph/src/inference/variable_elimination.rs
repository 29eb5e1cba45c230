//! Variable elimination with barren-node pruning.

use docalc_core::config::{EliminationHeuristic, InferenceConfig};
use docalc_core::errors::InferenceError;
use docalc_core::types::collections::FxHashSet;
use docalc_core::{NameSet, Values};
use tracing::trace;

use super::ExactInference;
use crate::bayesnet::BayesNet;
use crate::dag::NodeId;
use crate::potential::Potential;
use crate::variable::DiscreteVariable;

/// Exact inference by summing out variables one at a time.
#[derive(Debug, Clone, Copy)]
pub struct VariableElimination<'a> {
    bn: &'a BayesNet,
    heuristic: EliminationHeuristic,
}

impl<'a> VariableElimination<'a> {
    pub fn new(bn: &'a BayesNet) -> Self {
        Self {
            bn,
            heuristic: EliminationHeuristic::default(),
        }
    }

    pub fn with_config(bn: &'a BayesNet, config: &InferenceConfig) -> Self {
        Self {
            bn,
            heuristic: config.effective_elimination(),
        }
    }

    pub fn heuristic(&self) -> EliminationHeuristic {
        self.heuristic
    }

    /// Unnormalized table over `targets` (name order) with `evidence` applied
    /// as indicator factors.
    fn query(&self, targets: &NameSet, evidence: &Values) -> Result<Potential, InferenceError> {
        let mut seeds: Vec<NodeId> = Vec::with_capacity(targets.len() + evidence.len());
        for name in targets.iter().chain(evidence.keys()) {
            seeds.push(
                self.bn
                    .id_from_name(name)
                    .map_err(|_| InferenceError::UnknownVariable(name.clone()))?,
            );
        }
        // Nodes outside the ancestral set of the query are barren.
        let relevant: FxHashSet<NodeId> = self.bn.dag().ancestral_closure(seeds);
        let mut relevant: Vec<NodeId> = relevant.into_iter().collect();
        relevant.sort();

        let mut factors: Vec<Potential> = Vec::with_capacity(relevant.len() + evidence.len());
        let mut hidden = NameSet::new();
        for &id in &relevant {
            factors.push(self.bn.cpt(id)?.clone());
            let name = self.bn.name(id)?;
            if !targets.contains(name) {
                hidden.insert(name.to_string());
            }
        }
        for (name, label) in evidence {
            factors.push(indicator(self.bn.variable_by_name(name)?, label)?);
        }

        while let Some(var) = self.pick(&hidden, &factors) {
            hidden.remove(&var);
            let (touching, rest): (Vec<Potential>, Vec<Potential>) =
                factors.into_iter().partition(|f| f.contains(&var));
            trace!(variable = %var, factor_count = touching.len(), "eliminating");
            factors = rest;
            if touching.is_empty() {
                continue;
            }
            let product = product(&touching)?;
            factors.push(product.sum_out(&NameSet::from([var])));
        }

        let result = product(&factors)?.margin_onto(targets);
        let order: Vec<&str> = targets.iter().map(String::as_str).collect();
        Ok(result.reorder(&order))
    }

    fn pick(&self, hidden: &NameSet, factors: &[Potential]) -> Option<String> {
        if self.heuristic == EliminationHeuristic::Sequential {
            return hidden.iter().next().cloned();
        }
        let mut best: Option<(usize, &String)> = None;
        for var in hidden {
            let mut scope: Vec<&DiscreteVariable> = Vec::new();
            for f in factors.iter().filter(|f| f.contains(var)) {
                for v in f.variables() {
                    if !scope.iter().any(|s| s.name() == v.name()) {
                        scope.push(v);
                    }
                }
            }
            let cost = match self.heuristic {
                EliminationHeuristic::MinNeighbors => scope.len(),
                _ => scope
                    .iter()
                    .map(|v| v.domain_size())
                    .fold(1usize, usize::saturating_mul),
            };
            if best.map_or(true, |(c, _)| cost < c) {
                best = Some((cost, var));
            }
        }
        best.map(|(_, v)| v.clone())
    }
}

impl ExactInference for VariableElimination<'_> {
    fn joint(&self, targets: &NameSet) -> Result<Potential, InferenceError> {
        self.query(targets, &Values::new())
    }

    fn posterior_with_evidence(
        &self,
        targets: &NameSet,
        evidence: &Values,
    ) -> Result<Potential, InferenceError> {
        let unnormalized = self.query(targets, evidence)?;
        if !evidence.is_empty() && unnormalized.total() <= 0.0 {
            let rendered: Vec<String> = evidence.iter().map(|(k, v)| format!("{k}={v}")).collect();
            return Err(InferenceError::ImpossibleEvidence {
                evidence: rendered.join(", "),
            });
        }
        Ok(unnormalized.normalize())
    }
}

fn indicator(variable: &DiscreteVariable, label: &str) -> Result<Potential, InferenceError> {
    let hit = variable.index_of(label).ok_or_else(|| {
        InferenceError::Potential(docalc_core::errors::PotentialError::UnknownLabel {
            variable: variable.name().to_string(),
            label: label.to_string(),
        })
    })?;
    let values = (0..variable.domain_size())
        .map(|i| if i == hit { 1.0 } else { 0.0 })
        .collect();
    Ok(Potential::from_values(vec![variable.clone()], values)?)
}

fn product(factors: &[Potential]) -> Result<Potential, InferenceError> {
    let mut acc = Potential::scalar(1.0);
    for f in factors {
        acc = (&acc * f)?;
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bayesnet::BayesNetSpec;
    use crate::potential::approx_eq;
    use docalc_core::types::names::name_set;

    /// z → x → y, z → y
    fn confounded() -> BayesNet {
        let spec: BayesNetSpec = serde_json::from_str(
            r#"{
                "variables": [
                    {"name": "z", "labels": ["0", "1"]},
                    {"name": "x", "labels": ["0", "1"]},
                    {"name": "y", "labels": ["0", "1"]}
                ],
                "arcs": [["z", "x"], ["x", "y"], ["z", "y"]],
                "cpts": {
                    "z": [0.7, 0.3],
                    "x": [0.8, 0.2, 0.3, 0.7],
                    "y": [0.9, 0.1, 0.4, 0.6, 0.6, 0.4, 0.2, 0.8]
                }
            }"#,
        )
        .unwrap();
        BayesNet::from_spec(&spec).unwrap()
    }

    fn at(pairs: &[(&str, &str)]) -> Values {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn joint_matches_the_chain_rule() {
        let bn = confounded();
        let ve = VariableElimination::new(&bn);
        let joint = ve.joint(&name_set(["x", "y", "z"])).unwrap();
        assert_eq!(joint.names(), vec!["x", "y", "z"]);
        // P(z=1) P(x=1|z=1) P(y=1|x=1,z=1)
        let p = joint.get(&at(&[("x", "1"), ("y", "1"), ("z", "1")])).unwrap();
        assert!(approx_eq(p, 0.3 * 0.7 * 0.8));
        assert!(approx_eq(joint.total(), 1.0));
    }

    #[test]
    fn heuristics_agree() {
        let bn = confounded();
        let targets = name_set(["y"]);
        let reference = VariableElimination::new(&bn).joint(&targets).unwrap();
        for heuristic in [
            EliminationHeuristic::MinNeighbors,
            EliminationHeuristic::Sequential,
        ] {
            let config = InferenceConfig {
                elimination: Some(heuristic),
            };
            let other = VariableElimination::with_config(&bn, &config)
                .joint(&targets)
                .unwrap();
            assert!(reference.max_difference(&other).unwrap() < 1e-12);
        }
    }

    #[test]
    fn posterior_divides_by_the_conditioning_marginal() {
        let bn = confounded();
        let ve = VariableElimination::new(&bn);
        let post = ve.posterior(&name_set(["x"]), &name_set(["z"])).unwrap();
        let p = post.get(&at(&[("x", "1"), ("z", "0")])).unwrap();
        assert!(approx_eq(p, 0.2));
    }

    #[test]
    fn evidence_on_a_target_yields_an_indicator() {
        let bn = confounded();
        let ve = VariableElimination::new(&bn);
        let post = ve
            .posterior_with_evidence(&name_set(["z"]), &at(&[("z", "1")]))
            .unwrap();
        assert_eq!(post.values(), &[0.0, 1.0]);
    }

    #[test]
    fn impossible_evidence_is_reported() {
        let mut bn = confounded();
        let x = bn.id_from_name("x").unwrap();
        bn.fill_cpt(x, vec![1.0, 0.0, 1.0, 0.0]).unwrap();
        let ve = VariableElimination::new(&bn);
        let err = ve
            .posterior_with_evidence(&name_set(["z"]), &at(&[("x", "1")]))
            .unwrap_err();
        assert!(matches!(err, InferenceError::ImpossibleEvidence { .. }));
        assert!(matches!(
            ve.joint(&name_set(["ghost"])),
            Err(InferenceError::UnknownVariable(_))
        ));
    }
}
