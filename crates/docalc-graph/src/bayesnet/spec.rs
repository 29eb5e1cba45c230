//! Serializable description of a Bayesian network.

use std::collections::BTreeMap;

use docalc_core::DocalcResult;
use serde::{Deserialize, Serialize};

use super::BayesNet;
use crate::variable::DiscreteVariable;

/// A network as data: variables in declaration order, arcs by name, and
/// conditional tables keyed by node name.
///
/// Node ids follow declaration order, so the parents of a table appear in
/// the order their variables were declared.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BayesNetSpec {
    pub variables: Vec<DiscreteVariable>,
    #[serde(default)]
    pub arcs: Vec<(String, String)>,
    /// Missing tables stay uniform.
    #[serde(default)]
    pub cpts: BTreeMap<String, Vec<f64>>,
}

impl BayesNet {
    /// Build a network from its description.
    pub fn from_spec(spec: &BayesNetSpec) -> DocalcResult<BayesNet> {
        let mut bn = BayesNet::new();
        for variable in &spec.variables {
            bn.add(variable.clone())?;
        }
        for (from, to) in &spec.arcs {
            let from = bn.id_from_name(from)?;
            let to = bn.id_from_name(to)?;
            bn.add_arc(from, to)?;
        }
        for (name, values) in &spec.cpts {
            let id = bn.id_from_name(name)?;
            bn.fill_cpt(id, values.clone())?;
        }
        Ok(bn)
    }

    /// Description of this network.
    pub fn to_spec(&self) -> BayesNetSpec {
        let mut variables = Vec::new();
        let mut cpts = BTreeMap::new();
        for id in self.dag().nodes() {
            if let (Ok(v), Ok(cpt)) = (self.variable(id), self.cpt(id)) {
                variables.push(v.clone());
                cpts.insert(v.name().to_string(), cpt.values().to_vec());
            }
        }
        let arcs = self
            .dag()
            .arcs()
            .into_iter()
            .filter_map(|(a, b)| {
                let a = self.name(a).ok()?;
                let b = self.name(b).ok()?;
                Some((a.to_string(), b.to_string()))
            })
            .collect();
        BayesNetSpec {
            variables,
            arcs,
            cpts,
        }
    }
}
