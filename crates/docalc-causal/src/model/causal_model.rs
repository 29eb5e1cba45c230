//! `CausalModel`: the observational network plus the causal graph.

use std::cell::{Ref, RefCell};
use std::sync::Arc;

use docalc_core::constants::LATENT_LABELS;
use docalc_core::errors::{GraphError, ValidationError};
use docalc_core::types::collections::{BTreeSet, FxHashSet};
use docalc_core::{DocalcResult, NameSet, Values};
use docalc_graph::{BayesNet, Dag, DiscreteVariable, NodeId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::node_ref::NodeRef;
use crate::door;

/// A latent confounder: its name and the observed nodes it causes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatentDescriptor {
    pub name: String,
    pub children: Vec<String>,
}

impl LatentDescriptor {
    pub fn new<S: AsRef<str>>(name: &str, children: &[S]) -> Self {
        Self {
            name: name.to_string(),
            children: children.iter().map(|c| c.as_ref().to_string()).collect(),
        }
    }
}

/// A causal model over the observed variables of a Bayesian network and a
/// set of exogenous latent confounders.
///
/// The causal graph shares node ids with the observational network; latent
/// nodes get the ids that follow. Restricted to observed nodes its arcs are
/// a subset of the observational arcs. The causal graph lives in a
/// `RefCell` so that identification can mask arcs through a shared
/// reference (see [`super::ArcMask`]).
#[derive(Debug, Clone)]
pub struct CausalModel {
    observational: Arc<BayesNet>,
    causal: RefCell<Dag>,
    latents: BTreeSet<NodeId>,
    latent_descriptors: Vec<LatentDescriptor>,
}

impl CausalModel {
    /// Build a model from an observational network and latent confounders.
    /// Direct arcs among the children of each latent are deleted.
    pub fn new(
        observational: impl Into<Arc<BayesNet>>,
        latents: &[LatentDescriptor],
    ) -> DocalcResult<Self> {
        Self::with_options(observational, latents, false)
    }

    /// Like [`CausalModel::new`], optionally keeping the arcs among latent
    /// children.
    pub fn with_options(
        observational: impl Into<Arc<BayesNet>>,
        latents: &[LatentDescriptor],
        keep_arcs: bool,
    ) -> DocalcResult<Self> {
        let observational = observational.into();
        let causal = RefCell::new(observational.dag().clone());
        let mut model = Self {
            observational,
            causal,
            latents: BTreeSet::new(),
            latent_descriptors: Vec::new(),
        };
        for latent in latents {
            model.add_latent_variable(&latent.name, latent.children.as_slice(), keep_arcs)?;
        }
        Ok(model)
    }

    /// Assemble a model from parts already consistent with each other.
    pub(crate) fn from_parts(
        observational: Arc<BayesNet>,
        causal: Dag,
        latents: BTreeSet<NodeId>,
        latent_descriptors: Vec<LatentDescriptor>,
    ) -> Self {
        Self {
            observational,
            causal: RefCell::new(causal),
            latents,
            latent_descriptors,
        }
    }

    /// Add an exogenous two-state node causing `children`. Unless
    /// `keep_arcs`, direct arcs among `children` are deleted.
    pub fn add_latent_variable<S: AsRef<str>>(
        &mut self,
        name: &str,
        children: &[S],
        keep_arcs: bool,
    ) -> DocalcResult<NodeId> {
        let dag = self.causal.get_mut();
        if dag.get_node(name).is_some() {
            return Err(ValidationError::LatentNameCollision(name.to_string()).into());
        }
        // latents are roots: children must be observed nodes
        let mut child_ids = Vec::with_capacity(children.len());
        for child in children {
            let child = child.as_ref();
            if dag.get_node(child).is_some_and(|id| self.latents.contains(&id)) {
                return Err(ValidationError::LatentChild {
                    latent: name.to_string(),
                    child: child.to_string(),
                }
                .into());
            }
            child_ids.push(self.observational.id_from_name(child)?);
        }

        let latent = dag.add_node(name)?;
        for &child in &child_ids {
            dag.add_arc(latent, child)?;
        }
        if !keep_arcs {
            for &a in &child_ids {
                for &b in &child_ids {
                    if dag.exists_arc(a, b) {
                        dag.erase_arc(a, b)?;
                    }
                }
            }
        }
        debug!(latent = name, children = child_ids.len(), keep_arcs, "added latent confounder");
        self.latents.insert(latent);
        self.latent_descriptors
            .push(LatentDescriptor::new(name, children));
        Ok(latent)
    }

    /// Add an arc to the causal graph.
    pub fn add_causal_arc(&mut self, from: impl NodeRef, to: impl NodeRef) -> Result<(), GraphError> {
        let from = from.resolve(self)?;
        let to = to.resolve(self)?;
        self.causal.get_mut().add_arc(from, to)
    }

    /// Erase an arc of the causal graph. Fails if it is absent.
    pub fn erase_causal_arc(
        &mut self,
        from: impl NodeRef,
        to: impl NodeRef,
    ) -> Result<(), GraphError> {
        let from = from.resolve(self)?;
        let to = to.resolve(self)?;
        self.causal.get_mut().erase_arc(from, to)
    }

    pub fn exists_arc(&self, from: impl NodeRef, to: impl NodeRef) -> Result<bool, GraphError> {
        let from = from.resolve(self)?;
        let to = to.resolve(self)?;
        Ok(self.causal.borrow().exists_arc(from, to))
    }

    /// Parents of a node in the causal graph.
    pub fn parents(&self, node: impl NodeRef) -> Result<NameSet, GraphError> {
        let id = node.resolve(self)?;
        let parents = self.causal.borrow().parents(id);
        self.names_of(parents)
    }

    /// Children of a node in the causal graph.
    pub fn children(&self, node: impl NodeRef) -> Result<NameSet, GraphError> {
        let id = node.resolve(self)?;
        let children = self.causal.borrow().children(id);
        self.names_of(children)
    }

    /// Every node id, observed and latent.
    pub fn nodes(&self) -> Vec<NodeId> {
        self.causal.borrow().nodes()
    }

    /// Every node name, observed and latent.
    pub fn names(&self) -> NameSet {
        let dag = self.causal.borrow();
        dag.nodes()
            .into_iter()
            .filter_map(|n| dag.name(n).ok().map(str::to_string))
            .collect()
    }

    /// Arcs of the causal graph by name, sorted by id.
    pub fn arcs(&self) -> Vec<(String, String)> {
        let dag = self.causal.borrow();
        dag.arcs()
            .into_iter()
            .filter_map(|(a, b)| Some((dag.name(a).ok()?.to_string(), dag.name(b).ok()?.to_string())))
            .collect()
    }

    pub fn id_from_name(&self, name: &str) -> Result<NodeId, GraphError> {
        self.causal.borrow().node_id(name)
    }

    pub fn name_of(&self, id: NodeId) -> Result<String, GraphError> {
        self.causal.borrow().name(id).map(str::to_string)
    }

    /// Names of the observed nodes.
    pub fn observed_names(&self) -> NameSet {
        let dag = self.causal.borrow();
        dag.nodes()
            .into_iter()
            .filter(|n| !self.latents.contains(n))
            .filter_map(|n| dag.name(n).ok().map(str::to_string))
            .collect()
    }

    /// Variable of a node. Latent nodes are two-state.
    pub fn variable(&self, node: impl NodeRef) -> Result<DiscreteVariable, GraphError> {
        let id = node.resolve(self)?;
        if self.is_latent(id) {
            return Ok(DiscreteVariable::new(&self.name_of(id)?, &LATENT_LABELS));
        }
        self.observational.variable(id).cloned()
    }

    pub fn latent_ids(&self) -> &BTreeSet<NodeId> {
        &self.latents
    }

    pub fn latent_names(&self) -> NameSet {
        self.latent_descriptors
            .iter()
            .map(|d| d.name.clone())
            .collect()
    }

    pub fn is_latent(&self, id: NodeId) -> bool {
        self.latents.contains(&id)
    }

    pub fn latent_descriptors(&self) -> &[LatentDescriptor] {
        &self.latent_descriptors
    }

    /// The observational network.
    pub fn observational_bn(&self) -> &BayesNet {
        &self.observational
    }

    /// Shared handle on the observational network.
    pub fn shared_observational(&self) -> Arc<BayesNet> {
        Arc::clone(&self.observational)
    }

    /// Mutable access to the observational network, unsharing it first.
    pub(crate) fn observational_mut(&mut self) -> &mut BayesNet {
        Arc::make_mut(&mut self.observational)
    }

    /// Read access to the causal graph.
    pub fn causal_dag(&self) -> Ref<'_, Dag> {
        self.causal.borrow()
    }

    pub(crate) fn causal_cell(&self) -> &RefCell<Dag> {
        &self.causal
    }

    /// Ids of the named nodes.
    pub fn ids_of(&self, names: &NameSet) -> Result<FxHashSet<NodeId>, GraphError> {
        let dag = self.causal.borrow();
        names.iter().map(|n| dag.node_id(n)).collect()
    }

    /// Names of the given nodes.
    pub fn names_of<I>(&self, ids: I) -> Result<NameSet, GraphError>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let dag = self.causal.borrow();
        ids.into_iter()
            .map(|id| dag.name(id).map(str::to_string))
            .collect()
    }

    /// `names` plus their observed ancestors in the causal graph.
    pub fn observed_ancestral_closure(&self, names: &NameSet) -> Result<NameSet, GraphError> {
        let ids = self.ids_of(names)?;
        let closure = self.causal.borrow().ancestral_closure(ids);
        self.names_of(closure.into_iter().filter(|n| !self.is_latent(*n)))
    }

    /// Observed node names in a topological order of the causal graph.
    pub fn observed_topological_order(&self) -> Result<Vec<String>, GraphError> {
        let dag = self.causal.borrow();
        dag.topological_order()
            .into_iter()
            .filter(|n| !self.is_latent(*n))
            .map(|n| dag.name(n).map(str::to_string))
            .collect()
    }

    /// First backdoor witness between `cause` and `effect`, if any.
    pub fn back_door(
        &self,
        cause: impl NodeRef,
        effect: impl NodeRef,
    ) -> Result<Option<NameSet>, GraphError> {
        self.back_door_within(cause, effect, usize::MAX)
    }

    /// First frontdoor witness between `cause` and `effect`, if any.
    pub fn front_door(
        &self,
        cause: impl NodeRef,
        effect: impl NodeRef,
    ) -> Result<Option<NameSet>, GraphError> {
        self.front_door_within(cause, effect, usize::MAX)
    }

    /// [`CausalModel::back_door`] considering witnesses of at most
    /// `max_size` nodes.
    pub fn back_door_within(
        &self,
        cause: impl NodeRef,
        effect: impl NodeRef,
        max_size: usize,
    ) -> Result<Option<NameSet>, GraphError> {
        let cause = cause.resolve(self)?;
        let effect = effect.resolve(self)?;
        let witness = {
            let dag = self.causal.borrow();
            let first = door::backdoor_generator(&dag, cause, effect, &self.excluded())
                .with_max_size(max_size)
                .next();
            first
        };
        witness.map(|w| self.names_of(w)).transpose()
    }

    /// [`CausalModel::front_door`] considering witnesses of at most
    /// `max_size` nodes.
    pub fn front_door_within(
        &self,
        cause: impl NodeRef,
        effect: impl NodeRef,
        max_size: usize,
    ) -> Result<Option<NameSet>, GraphError> {
        let cause = cause.resolve(self)?;
        let effect = effect.resolve(self)?;
        let witness = {
            let dag = self.causal.borrow();
            let first = door::frontdoor_generator(&dag, cause, effect, &self.excluded())
                .with_max_size(max_size)
                .next();
            first
        };
        witness.map(|w| self.names_of(w)).transpose()
    }

    /// Check that a query is well formed: a non-empty target, pairwise
    /// disjoint sets of known observed variables, and known labels in
    /// `values`.
    pub fn validate_query(
        &self,
        on: &NameSet,
        doing: &NameSet,
        knowing: &NameSet,
        values: &Values,
    ) -> Result<(), ValidationError> {
        if on.is_empty() {
            return Err(ValidationError::EmptyTarget);
        }
        for name in on.iter().chain(doing).chain(knowing) {
            self.check_observed(name)?;
        }
        let sets: [(&'static str, &NameSet); 3] =
            [("on", on), ("doing", doing), ("knowing", knowing)];
        for (i, &(first, a)) in sets.iter().enumerate() {
            for &(second, b) in &sets[i + 1..] {
                if let Some(name) = a.intersection(b).next() {
                    return Err(ValidationError::Overlap {
                        first,
                        second,
                        name: name.clone(),
                    });
                }
            }
        }
        self.validate_values(values)
    }

    /// Check that every entry of `values` names an observed variable and
    /// one of its labels.
    pub fn validate_values(&self, values: &Values) -> Result<(), ValidationError> {
        for (name, label) in values {
            self.check_observed(name)?;
            let variable = self
                .observational
                .variable_by_name(name)
                .map_err(|_| ValidationError::UnknownVariable(name.clone()))?;
            if variable.index_of(label).is_none() {
                return Err(ValidationError::UnknownLabel {
                    variable: name.clone(),
                    label: label.clone(),
                });
            }
        }
        Ok(())
    }

    pub(crate) fn check_observed(&self, name: &str) -> Result<(), ValidationError> {
        match self.causal.borrow().get_node(name) {
            None => Err(ValidationError::UnknownVariable(name.to_string())),
            Some(id) if self.is_latent(id) => Err(ValidationError::LatentInQuery(name.to_string())),
            Some(_) => Ok(()),
        }
    }

    /// Nodes the door criteria must never pick.
    fn excluded(&self) -> FxHashSet<NodeId> {
        self.latents.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// a → b → c, a → c
    fn observational() -> BayesNet {
        let mut bn = BayesNet::new();
        let a = bn.add(DiscreteVariable::binary("a")).unwrap();
        let b = bn.add(DiscreteVariable::binary("b")).unwrap();
        let c = bn.add(DiscreteVariable::binary("c")).unwrap();
        bn.add_arc(a, b).unwrap();
        bn.add_arc(b, c).unwrap();
        bn.add_arc(a, c).unwrap();
        bn
    }

    #[test]
    fn latent_children_lose_their_direct_arcs() {
        let cm = CausalModel::new(observational(), &[LatentDescriptor::new("u", &["a", "c"])])
            .unwrap();
        assert!(!cm.exists_arc("a", "c").unwrap());
        assert!(cm.exists_arc("a", "b").unwrap());
        assert_eq!(cm.parents("c").unwrap(), NameSet::from(["b".into(), "u".into()]));
        assert_eq!(cm.latent_names(), NameSet::from(["u".into()]));
        assert_eq!(cm.observed_names().len(), 3);
        assert!(cm.causal_dag().parents(cm.id_from_name("u").unwrap()).is_empty());
        assert_eq!(cm.variable("u").unwrap().domain_size(), 2);
    }

    #[test]
    fn keep_arcs_preserves_them() {
        let cm = CausalModel::with_options(
            observational(),
            &[LatentDescriptor::new("u", &["a", "c"])],
            true,
        )
        .unwrap();
        assert!(cm.exists_arc("a", "c").unwrap());
    }

    #[test]
    fn latent_names_must_be_fresh_and_children_known() {
        let err = CausalModel::new(observational(), &[LatentDescriptor::new("a", &["b"])])
            .unwrap_err();
        assert!(matches!(
            err,
            docalc_core::DocalcError::Validation(ValidationError::LatentNameCollision(_))
        ));
        let err = CausalModel::new(observational(), &[LatentDescriptor::new("u", &["ghost"])])
            .unwrap_err();
        assert!(matches!(
            err,
            docalc_core::DocalcError::Graph(GraphError::NodeNotFound(_))
        ));
    }

    #[test]
    fn latents_cannot_confound_other_latents() {
        let err = CausalModel::new(
            observational(),
            &[
                LatentDescriptor::new("u1", &["a", "c"]),
                LatentDescriptor::new("u2", &["u1"]),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: latent variable u2 cannot have the latent u1 as a child"
        );

        let mut cm = CausalModel::new(observational(), &[LatentDescriptor::new("u1", &["a", "c"])])
            .unwrap();
        assert!(cm.add_latent_variable("u2", &["b", "u1"], false).is_err());
        assert!(cm.parents("u1").unwrap().is_empty());
        assert!(cm.id_from_name("u2").is_err());
    }

    #[test]
    fn clones_are_independent() {
        let cm = CausalModel::new(observational(), &[]).unwrap();
        let mut other = cm.clone();
        other.erase_causal_arc("a", "b").unwrap();
        assert!(cm.exists_arc("a", "b").unwrap());
        assert!(!other.exists_arc("a", "b").unwrap());
        assert!(matches!(
            other.erase_causal_arc("a", "b"),
            Err(GraphError::ArcNotFound { .. })
        ));
    }

    #[test]
    fn queries_are_validated() {
        let cm = CausalModel::new(observational(), &[LatentDescriptor::new("u", &["a", "c"])])
            .unwrap();
        let set = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect::<NameSet>();
        let none = NameSet::new();
        let no_values = Values::new();
        assert_eq!(
            cm.validate_query(&none, &set(&["a"]), &none, &no_values),
            Err(ValidationError::EmptyTarget)
        );
        assert!(matches!(
            cm.validate_query(&set(&["c"]), &set(&["c"]), &none, &no_values),
            Err(ValidationError::Overlap { .. })
        ));
        assert_eq!(
            cm.validate_query(&set(&["c"]), &set(&["u"]), &none, &no_values),
            Err(ValidationError::LatentInQuery("u".into()))
        );
        let bad_label: Values = [("a".to_string(), "7".to_string())].into_iter().collect();
        assert!(matches!(
            cm.validate_query(&set(&["c"]), &set(&["a"]), &none, &bad_label),
            Err(ValidationError::UnknownLabel { .. })
        ));
        assert!(cm
            .validate_query(&set(&["c"]), &set(&["a"]), &set(&["b"]), &no_values)
            .is_ok());
    }
}
