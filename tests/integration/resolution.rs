//! Build plan properties checked through the public API.

use ue4_docker_config::catalog::Catalog;
use ue4_docker_config::core::{ContainerPlatform, PlanError};
use ue4_docker_config::host::{HostFacts, HostPlatform};
use ue4_docker_config::platform::IsolationMode;
use ue4_docker_config::resolver::ConfigurationResolver;
use ue4_docker_config::targets::BuildTarget;
use ue4_docker_config::test_utils::{RawArgumentsBuilder, fixtures};

use crate::common::init_test_env;

#[test]
fn test_prerequisites_always_built() {
    init_test_env();
    let resolver = fixtures::linux_resolver();

    for request in [
        "build-prerequisites",
        "source",
        "minimal",
        "full",
        "all",
        "source,full",
    ] {
        let raw = RawArgumentsBuilder::new().ue_version("5.3.0").target(request).build();
        let config = resolver.resolve(&raw).unwrap();

        assert!(config.targets().build_prerequisites, "{request}");
        assert_eq!(config.targets().as_map().len(), 4, "{request}");
        assert_eq!(config.stage_order()[0], BuildTarget::BuildPrerequisites, "{request}");
    }
}

#[test]
fn test_all_is_full() {
    let resolver = fixtures::linux_resolver();
    let all = resolver
        .resolve(&RawArgumentsBuilder::new().ue_version("5.3.0").target("all").build())
        .unwrap();
    let full = resolver
        .resolve(&RawArgumentsBuilder::new().ue_version("5.3.0").target("full").build())
        .unwrap();

    assert_eq!(all.targets(), full.targets());
    assert_eq!(all.stage_order(), full.stage_order());
}

#[test]
fn test_legacy_and_target_list_always_conflict() {
    let resolver = fixtures::linux_resolver();

    for target in ["minimal", "full", "build-prerequisites"] {
        let no_minimal = RawArgumentsBuilder::new()
            .ue_version("5.3.0")
            .no_minimal()
            .target(target)
            .build();
        assert!(matches!(
            resolver.resolve(&no_minimal),
            Err(PlanError::ConflictingSpecifier { .. })
        ));

        let no_full = RawArgumentsBuilder::new().ue_version("5.3.0").no_full().target(target).build();
        assert!(matches!(
            resolver.resolve(&no_full),
            Err(PlanError::ConflictingSpecifier { .. })
        ));
    }
}

#[test]
fn test_windows_isolation_examples() {
    let resolver = fixtures::windows_resolver();
    let base = || RawArgumentsBuilder::new().ue_version("5.3.0").visual_studio("2022");

    let same_kernel = resolver.resolve(&base().basetag("ltsc2022").build()).unwrap();
    let windows = same_kernel.platform().as_windows().unwrap();
    assert_eq!(windows.isolation, IsolationMode::Process);
    assert_eq!(windows.memory_limit_gb, None);

    let older_tag = resolver.resolve(&base().basetag("1809").build()).unwrap();
    let windows = older_tag.platform().as_windows().unwrap();
    assert_eq!(windows.isolation, IsolationMode::HyperV);
    assert_eq!(windows.memory_limit_gb, Some(10.0));
    assert_eq!(windows.base_image, "mcr.microsoft.com/windows/servercore:1809");
}

#[test]
fn test_old_engine_forces_hyperv() {
    let resolver =
        ConfigurationResolver::new(Catalog::builtin(), fixtures::windows_host("ltsc2022", "17.06.2-ee"));
    let raw = RawArgumentsBuilder::new().ue_version("5.3.0").visual_studio("2022").build();

    let config = resolver.resolve(&raw).unwrap();
    assert_eq!(config.platform().as_windows().unwrap().isolation, IsolationMode::HyperV);
    assert!(config.platform_args().contains(&"--isolation=hyperv".to_string()));
}

#[test]
fn test_linux_cuda_selection() {
    let resolver = fixtures::linux_resolver();
    let base = || RawArgumentsBuilder::new().target("build-prerequisites");

    let opengl = resolver.resolve(&base().build()).unwrap();
    assert_eq!(opengl.base_image(), "nvidia/opengl:1.0-glvnd-devel-ubuntu22.04");

    let default_cuda = resolver.resolve(&base().cuda("").build()).unwrap();
    assert_eq!(default_cuda.base_image(), "nvidia/cuda:12.2.0-devel-ubuntu22.04");
    assert_eq!(default_cuda.prereqs_tag(), "cuda12.2.0-ubuntu22.04");

    let explicit = resolver.resolve(&base().cuda("11.8.0").build()).unwrap();
    assert_eq!(explicit.base_image(), "nvidia/cuda:11.8.0-devel-ubuntu22.04");
}

#[test]
fn test_reserved_suffixes() {
    let resolver = fixtures::linux_resolver();
    let with_suffix = |suffix: &str| {
        resolver.resolve(&RawArgumentsBuilder::new().target("build-prerequisites").suffix(suffix).build())
    };

    assert!(matches!(with_suffix("opengl-test"), Err(PlanError::ReservedSuffix { .. })));
    assert!(matches!(with_suffix("cuda2"), Err(PlanError::ReservedSuffix { .. })));
    assert_eq!(with_suffix("mybuild").unwrap().suffix(), "-mybuild");
}

#[test]
fn test_changelist_only_for_dot_zero() {
    let resolver = fixtures::linux_resolver();

    let pinned = resolver.resolve(&RawArgumentsBuilder::new().ue_version("5.2.0").build()).unwrap();
    assert_eq!(pinned.changelist(), Some(25_360_045));

    let hotfix = resolver.resolve(&RawArgumentsBuilder::new().ue_version("5.2.3").build()).unwrap();
    assert_eq!(hotfix.changelist(), None);

    let overridden = resolver
        .resolve(&RawArgumentsBuilder::new().ue_version("5.2.0").changelist(42).build())
        .unwrap();
    assert_eq!(overridden.changelist(), Some(42));
}

#[test]
fn test_toolchain_rejection_is_monotonic() {
    let resolver = fixtures::windows_resolver();
    let resolve = |version: &str| {
        resolver.resolve(&RawArgumentsBuilder::new().ue_version(version).visual_studio("2017").build())
    };

    assert!(resolve("4.27.0").is_ok());
    for version in ["5.0.0", "5.1.0", "5.3.2", "5.99.0"] {
        assert!(
            matches!(resolve(version), Err(PlanError::ToolchainTooNew { .. })),
            "{version}"
        );
    }
}

#[test]
fn test_unsupported_major_version_rejected_before_toolchain() {
    let resolver = fixtures::windows_resolver();
    let raw = RawArgumentsBuilder::new().ue_version("6.0.0").visual_studio("2017").build();
    assert!(matches!(resolver.resolve(&raw), Err(PlanError::InvalidVersion { .. })));
}

#[test]
fn test_linux_flag_on_windows_host() {
    let config = fixtures::windows_resolver()
        .resolve(&RawArgumentsBuilder::new().ue_version("5.3.0").linux().build())
        .unwrap();

    assert_eq!(config.container_platform(), ContainerPlatform::Linux);
    assert!(config.platform().as_linux().is_some());
    assert_eq!(config.options().get("credential_mode").and_then(|v| v.as_str()), Some("secrets"));
}

#[test]
fn test_macos_host_builds_linux_containers() {
    let resolver = ConfigurationResolver::new(Catalog::builtin(), HostFacts::new(HostPlatform::Macos));
    let config = resolver.resolve(&RawArgumentsBuilder::new().ue_version("5.3.0").build()).unwrap();

    assert_eq!(config.container_platform(), ContainerPlatform::Linux);
}
