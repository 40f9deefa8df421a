//! Versions, sizes and host output parsing.

use ue4_docker_config::catalog::Catalog;
use ue4_docker_config::core::PlanError;
use ue4_docker_config::host::{basetag_for_build, parse_windows_build};
use ue4_docker_config::platform::parse_size_gb;
use ue4_docker_config::version::{ProductVersion, lenient_version, release::resolve_release};

#[test]
fn test_product_versions() {
    assert_eq!(ProductVersion::parse("5.3.0").unwrap(), ProductVersion::new(5, 3, 0));
    assert!(ProductVersion::new(5, 3, 0).is_dot_zero());
    assert!(!ProductVersion::new(5, 3, 2).is_dot_zero());

    for bad in ["5.3", "five", "5.3.0.1"] {
        assert!(
            matches!(ProductVersion::parse(bad), Err(PlanError::InvalidVersion { .. })),
            "{bad}"
        );
    }
}

#[test]
fn test_engine_versions_are_lenient() {
    assert_eq!(lenient_version("24.0.7-rd"), Some(semver::Version::new(24, 0, 7)));
    assert_eq!(lenient_version("18.09"), Some(semver::Version::new(18, 9, 0)));
    assert_eq!(lenient_version("unknown"), None);
}

#[test]
fn test_release_names() {
    let catalog = Catalog::builtin();

    let release = resolve_release("5.3.0", None, None, None, &catalog).unwrap();
    assert_eq!(release.release.name(), "5.3.0");
    assert_eq!(release.release.branch(), "5.3.0-release");

    let custom =
        resolve_release("CUSTOM:Nightly", Some("https://x/ue.git"), Some("main"), None, &catalog).unwrap();
    assert_eq!(custom.release.name(), "nightly");
    assert!(custom.release.is_custom());

    assert!(matches!(
        resolve_release("custom", Some("https://x/ue.git"), None, None, &catalog),
        Err(PlanError::MissingCustomRepo)
    ));
}

#[test]
fn test_sizes() {
    let close = |value: &str, expected: f64| {
        let parsed = parse_size_gb(value).unwrap();
        assert!((parsed - expected).abs() < 1e-9, "{value}: {parsed}");
    };

    close("16GB", 16.0);
    close("16g", 16.0);
    close("1.5TB", 1500.0);
    close("512MB", 0.512);
    close("1GiB", 1.073_741_824);
    close("2000000000", 2.0);
    close("16 gigabytes", 16.0);
    close("16 Gigs", 16.0);
    close("8 gibibytes", 8.0 * 1.073_741_824);

    for bad in ["", "GB", "16 GB extra", "-1GB"] {
        assert!(matches!(parse_size_gb(bad), Err(PlanError::InvalidSize { .. })), "{bad:?}");
    }
}

#[test]
fn test_windows_build_mapping() {
    let build = parse_windows_build("Microsoft Windows [Version 10.0.20348.2227]").unwrap();
    assert_eq!(build, 20348);
    assert_eq!(basetag_for_build(build), Some("ltsc2022"));
    assert_eq!(basetag_for_build(12345), None);
}
