//! End-to-end causal impact on the textbook models.

mod common;

use common::{assert_close, binary_net, fixture_model, values};
use docalc_causal::{
    causal_impact, causal_impact_with_config, do_calculus, CausalModel, CausalQuery, ImpactMethod,
};
use docalc_core::config::{DocalcConfig, ImpactConfig};
use docalc_core::types::names::name_set;
use docalc_core::DocalcError;

#[test]
fn backdoor_adjusts_for_the_observed_confounder() {
    let model = fixture_model("backdoor");
    assert_eq!(model.back_door("x", "y").unwrap(), Some(name_set(["z"])));

    let impact = causal_impact(&model, &CausalQuery::new(["y"]).doing(["x"])).unwrap();
    assert_eq!(impact.method, ImpactMethod::Backdoor(name_set(["z"])));
    assert_eq!(impact.explanation, "backdoor {z} found.");
    let formula = impact.formula.as_ref().unwrap();
    assert_eq!(formula.root().to_string(), "sum_{z}[P(y|x,z) * P(z)]");
    assert_eq!(formula.query_text(), "P(y | do(x))");

    let table = impact.table.unwrap();
    assert_eq!(table.names(), vec!["y", "x"]);
    // sum_z P(y=1 | x, z) P(z) with P(z=1) = 0.4
    assert_close(table.get(&values(&[("y", "1"), ("x", "1")])).unwrap(), 0.62);
    assert_close(table.get(&values(&[("y", "1"), ("x", "0")])).unwrap(), 0.22);
    assert_close(table.get(&values(&[("y", "0"), ("x", "0")])).unwrap(), 0.78);
}

#[test]
fn frontdoor_goes_through_the_mediator() {
    let model = fixture_model("frontdoor");
    assert_eq!(model.back_door("x", "y").unwrap(), None);
    assert_eq!(model.front_door("x", "y").unwrap(), Some(name_set(["m"])));

    let impact = causal_impact(&model, &CausalQuery::new(["y"]).doing(["x"])).unwrap();
    assert_eq!(impact.method, ImpactMethod::Frontdoor(name_set(["m"])));
    let table = impact.table.unwrap();
    assert_close(table.get(&values(&[("y", "1"), ("x", "0")])).unwrap(), 0.294);
    assert_close(table.get(&values(&[("y", "1"), ("x", "1")])).unwrap(), 0.672);
}

#[test]
fn smoking_causes_cancer_through_tar() {
    let model = fixture_model("smoking");
    let query = CausalQuery::new(["cancer"])
        .doing(["smoking"])
        .value("cancer", "yes");
    let impact = causal_impact(&model, &query).unwrap();
    assert_eq!(impact.method, ImpactMethod::Frontdoor(name_set(["tar"])));

    let table = impact.table.unwrap();
    assert_eq!(table.names(), vec!["smoking"]);
    assert_close(table.get(&values(&[("smoking", "yes")])).unwrap(), 0.4525);
    assert_close(table.get(&values(&[("smoking", "no")])).unwrap(), 0.4975);
}

#[test]
fn door_adjustments_agree_with_do_calculus() {
    for name in ["backdoor", "frontdoor", "smoking"] {
        let model = fixture_model(name);
        let (cause, effect) = match name {
            "smoking" => ("smoking", "cancer"),
            _ => ("x", "y"),
        };
        let query = CausalQuery::new([effect]).doing([cause]);
        let door = causal_impact(&model, &query).unwrap().table.unwrap();
        let general = do_calculus(&model, &query.on, &query.doing)
            .unwrap()
            .eval()
            .unwrap();
        assert!(door.max_difference(&general).unwrap() < 1e-9, "{name}");
    }
}

#[test]
fn disabling_the_doors_falls_back_to_do_calculus() {
    let model = fixture_model("backdoor");
    let query = CausalQuery::new(["y"]).doing(["x"]);
    let config = DocalcConfig {
        impact: ImpactConfig {
            use_backdoor: Some(false),
            use_frontdoor: Some(false),
            max_witness_size: None,
        },
        ..DocalcConfig::default()
    };
    let general = causal_impact_with_config(&model, &query, &config).unwrap();
    assert_eq!(general.method, ImpactMethod::DoCalculus);
    assert_eq!(general.explanation, "Do-calculus computations");

    let door = causal_impact(&model, &query).unwrap();
    let difference = door
        .table
        .unwrap()
        .max_difference(&general.table.unwrap())
        .unwrap();
    assert!(difference < 1e-9);
}

#[test]
fn witness_cap_skips_larger_adjustment_sets() {
    // z1 and z2 both confound x → y: the only backdoor set is {z1, z2}
    let bn = binary_net(&[
        ("z1", &[], &[0.7, 0.3]),
        ("z2", &[], &[0.4, 0.6]),
        ("x", &["z1", "z2"], &[0.8, 0.2, 0.5, 0.5, 0.4, 0.6, 0.1, 0.9]),
        (
            "y",
            &["z1", "z2", "x"],
            &[0.9, 0.1, 0.7, 0.3, 0.6, 0.4, 0.3, 0.7, 0.5, 0.5, 0.4, 0.6, 0.2, 0.8, 0.1, 0.9],
        ),
    ]);
    let model = CausalModel::new(bn, &[]).unwrap();
    let query = CausalQuery::new(["y"]).doing(["x"]);

    let door = causal_impact(&model, &query).unwrap();
    assert_eq!(door.method, ImpactMethod::Backdoor(name_set(["z1", "z2"])));

    let capped = DocalcConfig {
        impact: ImpactConfig {
            max_witness_size: Some(1),
            ..ImpactConfig::default()
        },
        ..DocalcConfig::default()
    };
    let general = causal_impact_with_config(&model, &query, &capped).unwrap();
    assert_eq!(general.method, ImpactMethod::DoCalculus);
    assert_eq!(general.explanation, "Do-calculus computations");
    let difference = door
        .table
        .unwrap()
        .max_difference(&general.table.unwrap())
        .unwrap();
    assert!(difference < 1e-9);
}

#[test]
fn bow_arc_is_not_identifiable() {
    let model = fixture_model("bow");
    assert!(model.exists_arc("x", "y").unwrap());
    let impact = causal_impact(&model, &CausalQuery::new(["y"]).doing(["x"])).unwrap();
    assert_eq!(impact.method, ImpactMethod::NotIdentifiable);
    assert!(!impact.is_identified());
    assert!(impact.formula.is_none());
    assert!(impact.table.is_none());
    assert!(impact.explanation.starts_with(char::is_uppercase));
}

#[test]
fn napkin_is_identified_by_do_calculus() {
    let model = fixture_model("napkin");
    let arcs_before = model.arcs();
    let impact = causal_impact(&model, &CausalQuery::new(["y"]).doing(["x"])).unwrap();
    assert_eq!(impact.method, ImpactMethod::DoCalculus);
    assert_eq!(model.arcs(), arcs_before);

    let table = impact.table.unwrap();
    assert_eq!(&table.names()[..2], &["y", "x"]);
    for x in ["0", "1"] {
        for z in ["0", "1"] {
            let total: f64 = ["0", "1"]
                .iter()
                .map(|y| table.get(&values(&[("y", y), ("x", x), ("z", z)])).unwrap())
                .sum();
            assert_close(total, 1.0);
        }
    }
}

#[test]
fn d_separated_cause_has_no_effect() {
    let bn = binary_net(&[
        ("a", &[], &[0.3, 0.7]),
        ("b", &[], &[0.6, 0.4]),
        ("c", &["a"], &[0.9, 0.1, 0.2, 0.8]),
    ]);
    let model = CausalModel::new(bn, &[]).unwrap();
    let impact = causal_impact(&model, &CausalQuery::new(["b"]).doing(["a"])).unwrap();
    assert_eq!(impact.method, ImpactMethod::DSeparated);
    assert_eq!(
        impact.explanation,
        "No causal effect of {a} on {b}, because they are d-separated \
         (conditioning on the observed variables if any)."
    );
    let table = impact.table.unwrap();
    assert_eq!(table.names(), vec!["b"]);
    assert_close(table.get(&values(&[("b", "1")])).unwrap(), 0.4);
}

#[test]
fn observations_are_folded_into_the_estimand() {
    let model = fixture_model("backdoor");
    let query = CausalQuery::new(["y"]).doing(["x"]).knowing(["z"]);
    let impact = causal_impact(&model, &query).unwrap();
    assert_eq!(impact.method, ImpactMethod::DoCalculus);
    let formula = impact.formula.unwrap();
    assert_eq!(formula.query_text(), "P(y | do(x), z)");
    assert_eq!(formula.root().to_string(), "P(y|x,z)");

    let table = impact.table.unwrap();
    assert_eq!(table.names(), vec!["y", "x", "z"]);
    assert_close(
        table.get(&values(&[("y", "1"), ("x", "1"), ("z", "1")])).unwrap(),
        0.8,
    );
}

#[test]
fn conditioning_on_the_mediator_blocks_the_effect() {
    let model = fixture_model("frontdoor");
    let query = CausalQuery::new(["y"]).doing(["x"]).knowing(["m"]);
    let impact = causal_impact(&model, &query).unwrap();
    assert_eq!(impact.method, ImpactMethod::DSeparated);
    let table = impact.table.unwrap();
    assert_eq!(table.names(), vec!["y", "m"]);
}

#[test]
fn repeated_queries_give_identical_answers() {
    let model = fixture_model("napkin");
    let query = CausalQuery::new(["y"]).doing(["x"]);
    let first = causal_impact(&model, &query).unwrap();
    let second = causal_impact(&model, &query).unwrap();
    assert_eq!(
        first.formula.as_ref().map(ToString::to_string),
        second.formula.as_ref().map(ToString::to_string)
    );
    assert_eq!(first.table, second.table);
}

#[test]
fn malformed_queries_are_rejected() {
    use docalc_core::errors::ValidationError;

    let model = fixture_model("frontdoor");
    let reject = |query: CausalQuery| match causal_impact(&model, &query) {
        Err(DocalcError::Validation(e)) => e,
        other => panic!("expected a validation error, got {other:?}"),
    };

    assert_eq!(reject(CausalQuery::default()), ValidationError::EmptyTarget);
    assert_eq!(
        reject(CausalQuery::new(["y"]).doing(["nope"])),
        ValidationError::UnknownVariable("nope".into())
    );
    assert_eq!(
        reject(CausalQuery::new(["y"]).doing(["u"])),
        ValidationError::LatentInQuery("u".into())
    );
    assert_eq!(
        reject(CausalQuery::new(["y", "x"]).doing(["x"])),
        ValidationError::Overlap {
            first: "on",
            second: "doing",
            name: "x".into()
        }
    );
    assert_eq!(
        reject(CausalQuery::new(["y"]).doing(["x"]).value("x", "2")),
        ValidationError::UnknownLabel {
            variable: "x".into(),
            label: "2".into()
        }
    );
}
