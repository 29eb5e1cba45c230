//! Tests for the docalc error handling system.

use docalc_core::errors::error_code::{self, DocalcErrorCode};
use docalc_core::errors::*;
use docalc_core::types::name_set;

#[test]
fn every_error_has_an_error_code() {
    let graph = GraphError::NodeNotFound("x".into());
    assert_eq!(graph.error_code(), error_code::NOT_FOUND);

    let cycle = GraphError::CycleDetected {
        from: "a".into(),
        to: "b".into(),
    };
    assert_eq!(cycle.error_code(), error_code::CYCLE_DETECTED);

    let potential = PotentialError::UnknownVariable("v".into());
    assert!(!potential.error_code().is_empty());

    let inference = InferenceError::ImpossibleEvidence {
        evidence: "x=1".into(),
    };
    assert_eq!(inference.error_code(), error_code::IMPOSSIBLE_EVIDENCE);

    let validation = ValidationError::EmptyTarget;
    assert_eq!(validation.error_code(), error_code::VALIDATION_ERROR);

    let config = ConfigError::FileNotFound {
        path: "/tmp".into(),
    };
    assert_eq!(config.error_code(), error_code::CONFIG_ERROR);
}

#[test]
fn hedge_carries_structural_diagnostics() {
    let hedge = IdentificationError::Hedge {
        observed: name_set(["X", "Y"]),
        component: name_set(["Y"]),
    };
    assert_eq!(hedge.error_code(), error_code::HEDGE);
    assert!(hedge.is_non_identifiable());
    let msg = hedge.to_string();
    assert!(msg.contains("{X, Y}"), "{msg}");
    assert!(msg.contains("{Y}"), "{msg}");
}

#[test]
fn exhausted_case_analysis_is_not_a_normal_outcome() {
    let err = IdentificationError::CaseAnalysisExhausted {
        observed: name_set(["A"]),
        component: name_set(["A"]),
    };
    assert!(!err.is_non_identifiable());
    assert_eq!(err.error_code(), error_code::INVARIANT_VIOLATION);
}

#[test]
fn from_conversions_into_top_level_error() {
    let err: DocalcError = GraphError::DuplicateNode("x".into()).into();
    assert!(matches!(err, DocalcError::Graph(_)));

    let err: DocalcError = ValidationError::EmptyTarget.into();
    assert!(matches!(err, DocalcError::Validation(_)));

    let err: DocalcError = IdentificationError::Unidentifiable {
        reason: "test".into(),
    }
    .into();
    assert!(matches!(err, DocalcError::Identification(_)));
    assert_eq!(err.error_code(), error_code::UNIDENTIFIABLE);
}

#[test]
fn graph_errors_pass_through_identification_unchanged() {
    let inner = GraphError::NodeNotFound("Z".into());
    let wrapped: IdentificationError = inner.clone().into();
    assert_eq!(wrapped.to_string(), inner.to_string());
    assert_eq!(wrapped.error_code(), error_code::NOT_FOUND);
}

#[test]
fn coded_string_format() {
    let err = ValidationError::UnknownVariable("Q".into());
    assert_eq!(err.coded_string(), "[VALIDATION_ERROR] unknown variable: Q");
}
