//! Twin-network counterfactuals on a deterministic mechanism `y = x xor n`.

mod common;

use common::{assert_close, binary_net, values};
use docalc_causal::{counterfactual, counterfactual_model, CausalModel};
use docalc_core::types::names::name_set;
use docalc_core::{DocalcError, Values};
use docalc_graph::{ExactInference, VariableElimination};

fn xor_model() -> CausalModel {
    let bn = binary_net(&[
        ("n", &[], &[0.5, 0.5]),
        ("x", &[], &[0.5, 0.5]),
        // family (y, n, x): columns (0,0) (1,0) (0,1) (1,1)
        ("y", &["n", "x"], &[1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0]),
    ]);
    CausalModel::new(bn, &[]).unwrap()
}

#[test]
fn unchanged_cause_reproduces_the_observation() {
    let model = xor_model();
    let profile = values(&[("x", "1"), ("y", "1")]);
    let table = counterfactual(
        &model,
        &profile,
        &name_set(["y"]),
        &name_set(["x"]),
        &values(&[("x", "1")]),
    )
    .unwrap();
    assert_eq!(table.names(), vec!["y"]);
    assert_close(table.get(&values(&[("y", "1")])).unwrap(), 1.0);
}

#[test]
fn flipped_cause_flips_the_effect() {
    let model = xor_model();
    let profile = values(&[("x", "1"), ("y", "1")]);
    let table = counterfactual(
        &model,
        &profile,
        &name_set(["y"]),
        &name_set(["x"]),
        &values(&[("x", "0")]),
    )
    .unwrap();
    assert_close(table.get(&values(&[("y", "0")])).unwrap(), 1.0);
    assert_close(table.get(&values(&[("y", "1")])).unwrap(), 0.0);
}

#[test]
fn uninformative_profile_matches_the_evidential_answer() {
    let model = xor_model();
    let table = counterfactual(
        &model,
        &values(&[("x", "1")]),
        &name_set(["y"]),
        &name_set(["x"]),
        &values(&[("x", "1")]),
    )
    .unwrap();
    let evidential = VariableElimination::new(model.observational_bn())
        .posterior_with_evidence(&name_set(["y"]), &values(&[("x", "1")]))
        .unwrap();
    assert!(table.max_difference(&evidential).unwrap() < 1e-9);
}

#[test]
fn twin_replaces_only_background_tables() {
    let model = xor_model();
    let twin = counterfactual_model(&model, &values(&[("x", "1"), ("y", "1")]), &name_set(["x"]))
        .unwrap();
    let id = |name: &str| twin.id_from_name(name).unwrap();
    let n = twin.observational_bn().cpt(id("n")).unwrap();
    assert_close(n.get(&values(&[("n", "0")])).unwrap(), 1.0);
    assert_eq!(
        twin.observational_bn().cpt(id("x")).unwrap(),
        model.observational_bn().cpt(id("x")).unwrap()
    );
    assert_eq!(
        twin.observational_bn().cpt(id("y")).unwrap(),
        model.observational_bn().cpt(id("y")).unwrap()
    );
    assert_eq!(twin.arcs(), model.arcs());
    // the source model keeps its prior
    let prior = model.observational_bn().cpt(id("n")).unwrap();
    assert_close(prior.get(&values(&[("n", "0")])).unwrap(), 0.5);
}

#[test]
fn impossible_profile_is_an_error() {
    let model = xor_model();
    // x = 1, n = 1 forces y = 0
    let profile = values(&[("n", "1"), ("x", "1"), ("y", "1")]);
    let err = counterfactual(
        &model,
        &profile,
        &name_set(["y"]),
        &name_set(["x"]),
        &Values::new(),
    )
    .unwrap_err();
    assert!(matches!(err, DocalcError::Inference(_)), "{err:?}");
}

#[test]
fn whatif_must_name_observed_variables() {
    let model = xor_model();
    let err = counterfactual_model(&model, &values(&[("x", "1")]), &name_set(["nope"])).unwrap_err();
    assert!(matches!(err, DocalcError::Validation(_)));
}
