//! User config file discovery and its effect on resolution.

use predicates::prelude::*;
use serde_json::Value;
use ue4_docker_config::catalog::Catalog;
use ue4_docker_config::config::UserConfig;
use ue4_docker_config::resolver::ConfigurationResolver;
use ue4_docker_config::test_utils::{RawArgumentsBuilder, fixtures};

use crate::common::TestEnv;

#[tokio::test]
async fn test_loaded_defaults_reach_resolution() {
    let env = TestEnv::new();
    let path = env.write_config(
        r#"
[defaults]
linux_basetag = "ubuntu20.04"
cuda_version = "11.8.0"
"#,
    );

    let user_config = UserConfig::load(Some(path.as_path())).await.unwrap();
    let catalog = user_config.apply_to(Catalog::builtin()).unwrap();
    let resolver = ConfigurationResolver::new(catalog, fixtures::linux_host());

    let config = resolver
        .resolve(&RawArgumentsBuilder::new().target("build-prerequisites").cuda("").build())
        .unwrap();
    assert_eq!(config.base_image(), "nvidia/cuda:11.8.0-devel-ubuntu20.04");
}

#[test]
fn test_env_config_path_is_used() {
    let env = TestEnv::new();
    env.write_config("[defaults]\nlinux_basetag = \"ubuntu20.04\"\n");

    let output = env
        .cmd()
        .args(["resolve", "--linux", "--target", "build-prerequisites", "--format", "json"])
        .assert()
        .success();
    let plan: Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(plan["platform"]["base_tag"], "ubuntu20.04");
}

#[test]
fn test_explicit_config_path_wins() {
    let env = TestEnv::new();
    env.write_config("[defaults]\nlinux_basetag = \"ubuntu20.04\"\n");
    let explicit = env.path().join("explicit.toml");
    std::fs::write(&explicit, "[defaults]\nlinux_basetag = \"ubuntu24.04\"\n").unwrap();

    let output = env
        .cmd()
        .arg("--config")
        .arg(&explicit)
        .args(["resolve", "--linux", "--target", "build-prerequisites", "--format", "json"])
        .assert()
        .success();
    let plan: Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(plan["platform"]["base_tag"], "ubuntu24.04");
}

#[test]
fn test_missing_explicit_config_fails() {
    let env = TestEnv::new();
    env.cmd()
        .arg("--config")
        .arg(env.path().join("nope.toml"))
        .args(["resolve", "--linux", "--target", "build-prerequisites"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_unknown_config_key_fails() {
    let env = TestEnv::new();
    env.write_config("[defaults]\nlinux_base = \"ubuntu20.04\"\n");

    env.cmd()
        .args(["resolve", "--linux", "--target", "build-prerequisites"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_invalid_memory_default_fails() {
    let env = TestEnv::new();
    env.write_config("[defaults]\nmemory_limit_gb = 0.0\n");

    env.cmd()
        .args(["resolve", "--linux", "--target", "build-prerequisites"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("memory_limit_gb"));
}
