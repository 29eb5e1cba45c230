//! Shared helpers for the integration tests.

#![allow(dead_code)]

use docalc_causal::CausalModel;
use docalc_core::Values;
use docalc_fixtures::load_model;
use docalc_graph::{BayesNet, DiscreteVariable};

/// Causal model of `test-fixtures/models/<name>.json`.
pub fn fixture_model(name: &str) -> CausalModel {
    let fixture = load_model(name);
    let mut model = CausalModel::new(fixture.bayes_net(), &[]).unwrap();
    for latent in &fixture.latents {
        model
            .add_latent_variable(&latent.name, latent.children.as_slice(), latent.keep_arcs)
            .unwrap();
    }
    model
}

/// Binary network from `(name, parents, table)` triples, in declaration order.
pub fn binary_net(nodes: &[(&str, &[&str], &[f64])]) -> BayesNet {
    let mut bn = BayesNet::new();
    for (name, _, _) in nodes {
        bn.add(DiscreteVariable::binary(name)).unwrap();
    }
    for (name, parents, _) in nodes {
        let child = bn.id_from_name(name).unwrap();
        for parent in *parents {
            let parent = bn.id_from_name(parent).unwrap();
            bn.add_arc(parent, child).unwrap();
        }
    }
    for (name, _, table) in nodes {
        let id = bn.id_from_name(name).unwrap();
        bn.fill_cpt(id, table.to_vec()).unwrap();
    }
    bn
}

pub fn values(pairs: &[(&str, &str)]) -> Values {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
