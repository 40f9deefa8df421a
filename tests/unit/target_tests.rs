//! Target requests, closure and ordering.

use ue4_docker_config::core::PlanError;
use ue4_docker_config::targets::{BuildTarget, BuildTargets, TargetRequest};

fn tokens(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

#[test]
fn test_closure_from_each_stage() {
    let cases = [
        ("build-prerequisites", [true, false, false, false]),
        ("source", [true, true, false, false]),
        ("minimal", [true, true, true, false]),
        ("full", [true, true, true, true]),
        ("all", [true, true, true, true]),
    ];

    for (token, expected) in cases {
        let targets = BuildTargets::resolve(&tokens(&[token])).unwrap();
        assert_eq!(
            [targets.build_prerequisites, targets.source, targets.minimal, targets.full],
            expected,
            "{token}"
        );
    }
}

#[test]
fn test_stage_order_is_dependency_first() {
    let targets = BuildTargets::resolve(&tokens(&["full"])).unwrap();
    assert_eq!(
        targets.stage_order().unwrap(),
        vec![
            BuildTarget::BuildPrerequisites,
            BuildTarget::Source,
            BuildTarget::Minimal,
            BuildTarget::Full,
        ]
    );
}

#[test]
fn test_engine_and_unknown_tokens_rejected() {
    for token in ["engine", "fulll", ""] {
        assert!(
            matches!(
                BuildTargets::resolve(&tokens(&[token])),
                Err(PlanError::UnknownTarget { .. })
            ),
            "{token:?}"
        );
    }
}

#[test]
fn test_request_surfaces() {
    let request = TargetRequest::from_flags(None, false, false).unwrap();
    assert_eq!(request.tokens(), tokens(&["minimal"]));

    let explicit = tokens(&["source,minimal", "full"]);
    let request = TargetRequest::from_flags(Some(explicit.as_slice()), false, false).unwrap();
    assert_eq!(request.tokens(), tokens(&["source", "minimal", "full"]));

    let request = TargetRequest::from_flags(None, true, false).unwrap();
    assert!(request.is_legacy());
    let targets = BuildTargets::resolve(&request.tokens()).unwrap();
    assert!(!targets.minimal && !targets.full && targets.source);

    assert!(TargetRequest::from_flags(Some(tokens(&["all"]).as_slice()), false, true).is_err());
}
