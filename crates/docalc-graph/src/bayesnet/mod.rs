//! The observational model: a DAG of discrete variables with one conditional
//! probability table per node.
//!
//! The table of a node is laid out over its family, the node itself first
//! followed by its parents in ascending id order, first axis fastest. Each
//! column (one parent configuration) sums to 1.

mod spec;

use docalc_core::errors::{GraphError, PotentialError};
use docalc_core::types::collections::{FxHashMap, FxHashSet};
use docalc_core::{DocalcResult, NameSet};
use tracing::debug;

use crate::dag::{Dag, NodeId};
use crate::potential::Potential;
use crate::variable::DiscreteVariable;

pub use spec::BayesNetSpec;

/// A discrete Bayesian network.
#[derive(Debug, Clone, Default)]
pub struct BayesNet {
    dag: Dag,
    variables: FxHashMap<NodeId, DiscreteVariable>,
    cpts: FxHashMap<NodeId, Potential>,
}

impl BayesNet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable with a uniform marginal.
    pub fn add(&mut self, variable: DiscreteVariable) -> DocalcResult<NodeId> {
        let cpt = Potential::filled(vec![variable.clone()], uniform(&variable))?;
        let id = self.dag.add_node(variable.name())?;
        self.variables.insert(id, variable);
        self.cpts.insert(id, cpt);
        Ok(id)
    }

    /// Add the arc `from → to`. The child's table is reset to uniform over
    /// its new family.
    pub fn add_arc(&mut self, from: NodeId, to: NodeId) -> DocalcResult<()> {
        if self.dag.exists_arc(from, to) {
            return Ok(());
        }
        self.dag.add_arc(from, to)?;
        self.reset_cpt(to)
    }

    /// Erase the arc `from → to`, resetting the child's table.
    pub fn erase_arc(&mut self, from: NodeId, to: NodeId) -> DocalcResult<()> {
        self.dag.erase_arc(from, to)?;
        self.reset_cpt(to)
    }

    /// Fill the table of `id` from values in family order (node first,
    /// parents by ascending id, first axis fastest).
    pub fn fill_cpt(&mut self, id: NodeId, values: Vec<f64>) -> DocalcResult<()> {
        let family = self.family_variables(id)?;
        let cpt = Potential::from_values(family, values)?;
        self.install(id, cpt)
    }

    /// Replace the table of `id` by `cpt`, whose variables must be exactly
    /// the family of `id` (in any order).
    pub fn set_cpt(&mut self, id: NodeId, cpt: &Potential) -> DocalcResult<()> {
        let family = self.family_variables(id)?;
        let expected: NameSet = family.iter().map(|v| v.name().to_string()).collect();
        if let Some(extra) = cpt.name_set().symmetric_difference(&expected).next() {
            return Err(PotentialError::UnknownVariable(extra.clone()).into());
        }
        let names: Vec<&str> = family.iter().map(DiscreteVariable::name).collect();
        let aligned = cpt.reorder(&names);
        let cpt = Potential::from_values(family, aligned.values().to_vec())?;
        self.install(id, cpt)
    }

    /// Conditional table of `id`.
    pub fn cpt(&self, id: NodeId) -> Result<&Potential, GraphError> {
        self.cpts.get(&id).ok_or_else(|| not_found(id))
    }

    pub fn variable(&self, id: NodeId) -> Result<&DiscreteVariable, GraphError> {
        self.variables.get(&id).ok_or_else(|| not_found(id))
    }

    /// Variable named `name`.
    pub fn variable_by_name(&self, name: &str) -> Result<&DiscreteVariable, GraphError> {
        self.variable(self.dag.node_id(name)?)
    }

    pub fn id_from_name(&self, name: &str) -> Result<NodeId, GraphError> {
        self.dag.node_id(name)
    }

    pub fn name(&self, id: NodeId) -> Result<&str, GraphError> {
        self.dag.name(id)
    }

    /// Names of all variables.
    pub fn names(&self) -> NameSet {
        self.variables
            .values()
            .map(|v| v.name().to_string())
            .collect()
    }

    pub fn dag(&self) -> &Dag {
        &self.dag
    }

    pub fn size(&self) -> usize {
        self.dag.node_count()
    }

    /// Copy keeping only the nodes of `keep`, node ids preserved. A table
    /// that loses parents is averaged uniformly over the dropped ones.
    pub fn restricted_to(&self, keep: &FxHashSet<NodeId>) -> Result<BayesNet, GraphError> {
        let dag = self.dag.restricted_to(keep);
        let mut variables = FxHashMap::default();
        let mut cpts = FxHashMap::default();
        for id in dag.nodes() {
            let cpt = self.cpt(id)?;
            let dropped: NameSet = self
                .dag
                .parents(id)
                .into_iter()
                .filter(|p| !keep.contains(p))
                .map(|p| self.dag.name(p).map(str::to_string))
                .collect::<Result<_, _>>()?;
            let cpt = if dropped.is_empty() {
                cpt.clone()
            } else {
                let width: usize = cpt
                    .variables()
                    .iter()
                    .filter(|v| dropped.contains(v.name()))
                    .map(DiscreteVariable::domain_size)
                    .product();
                cpt.sum_out(&dropped).scaled(1.0 / width as f64)
            };
            variables.insert(id, self.variable(id)?.clone());
            cpts.insert(id, cpt);
        }
        debug!(kept = keep.len(), total = self.size(), "restricted bayes net");
        Ok(BayesNet {
            dag,
            variables,
            cpts,
        })
    }

    /// Variables of the family of `id`: the node, then its parents.
    pub fn family_variables(&self, id: NodeId) -> Result<Vec<DiscreteVariable>, GraphError> {
        self.dag
            .family(id)
            .into_iter()
            .map(|n| self.variable(n).cloned())
            .collect()
    }

    fn reset_cpt(&mut self, id: NodeId) -> DocalcResult<()> {
        let family = self.family_variables(id)?;
        let fill = family.first().map_or(1.0, uniform);
        self.cpts.insert(id, Potential::filled(family, fill)?);
        Ok(())
    }

    fn install(&mut self, id: NodeId, cpt: Potential) -> DocalcResult<()> {
        let variable = self.variable(id)?;
        let width = variable.domain_size();
        for (column, chunk) in cpt.values().chunks(width).enumerate() {
            let sum: f64 = chunk.iter().sum();
            if (sum - 1.0).abs() > 1e-6 {
                debug!(variable = variable.name(), column, sum, "non-normalized column");
                return Err(PotentialError::NotNormalized {
                    variable: variable.name().to_string(),
                    sum,
                }
                .into());
            }
        }
        self.cpts.insert(id, cpt);
        Ok(())
    }
}

fn uniform(variable: &DiscreteVariable) -> f64 {
    1.0 / variable.domain_size().max(1) as f64
}

fn not_found(id: NodeId) -> GraphError {
    GraphError::NodeNotFound(format!("#{}", id.index()))
}
