//! The `resolve` command run through the built binary.
//!
//! Every invocation passes `--linux` so the plan does not depend on the host OS.

use predicates::prelude::*;
use serde_json::Value;

use crate::common::TestEnv;

fn json_output(env: &TestEnv, args: &[&str]) -> Value {
    let output = env
        .cmd()
        .arg("resolve")
        .args(args)
        .args(["--linux", "--format", "json"])
        .assert()
        .success();
    serde_json::from_slice(&output.get_output().stdout).unwrap()
}

#[test]
fn test_text_output() {
    let env = TestEnv::new();
    env.cmd()
        .args(["resolve", "--ue-version", "5.3.0", "--linux"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Build plan (linux containers)"))
        .stdout(predicate::str::contains("build-prerequisites -> source -> minimal"))
        .stdout(predicate::str::contains("changelist 27405482"));
}

#[test]
fn test_json_output() {
    let env = TestEnv::new();
    let plan = json_output(&env, &["--ue-version", "5.2.3", "--target", "full", "--exclude", "debug"]);

    assert_eq!(plan["container_platform"], "linux");
    assert_eq!(plan["release"]["release"]["kind"], "numeric");
    assert!(plan["release"]["changelist"].is_null());
    assert_eq!(
        plan["stage_order"],
        serde_json::json!(["build-prerequisites", "source", "minimal", "full"])
    );
    assert_eq!(plan["excluded_components"], serde_json::json!(["debug"]));
}

#[test]
fn test_bare_cuda_flag_uses_default_version() {
    let env = TestEnv::new();
    let plan = json_output(&env, &["--target", "build-prerequisites", "--cuda"]);

    assert_eq!(plan["platform"]["cuda_version"], "12.2.0");
    assert_eq!(plan["platform"]["base_image"], "nvidia/cuda:12.2.0-devel-ubuntu22.04");
}

#[test]
fn test_context_output() {
    let env = TestEnv::new();
    let output = env
        .cmd()
        .args([
            "resolve",
            "--ue-version",
            "5.3.0",
            "--linux",
            "--opt",
            "credential_mode=endpoint",
            "--format",
            "context",
        ])
        .assert()
        .success();
    let context: Value = serde_json::from_slice(&output.get_output().stdout).unwrap();

    assert_eq!(context["credential_mode"], "endpoint");
    assert_eq!(context["source_mode"], "git");
    assert_eq!(
        context["gitdependencies_args"],
        "--exclude=Android --exclude=Mac --exclude=Win32 --exclude=Win64"
    );
}

#[test]
fn test_unknown_target_fails_with_suggestion() {
    let env = TestEnv::new();
    env.cmd()
        .args(["resolve", "--linux", "--target", "minmal"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown build target 'minmal'"))
        .stderr(predicate::str::contains("Did you mean 'minimal'?"));
}

#[test]
fn test_conflicting_release_specifiers_fail() {
    let env = TestEnv::new();
    env.cmd()
        .args(["resolve", "5.2.0", "--ue-version", "5.3.0", "--linux"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("suggestion"));
}

#[test]
fn test_missing_release_fails() {
    let env = TestEnv::new();
    env.cmd()
        .args(["resolve", "--linux"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--ue-version"));
}

#[test]
fn test_reserved_suffix_fails() {
    let env = TestEnv::new();
    env.cmd()
        .args(["resolve", "--linux", "--target", "build-prerequisites", "--suffix", "opengl-test"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_verbose_and_quiet_conflict() {
    let env = TestEnv::new();
    env.cmd()
        .args(["-v", "-q", "resolve", "--linux"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_legacy_flags_print_warning() {
    let env = TestEnv::new();
    env.cmd()
        .args(["resolve", "--ue-version", "5.3.0", "--linux", "--no-full"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Warnings:"))
        .stdout(predicate::str::contains("deprecated"));
}
