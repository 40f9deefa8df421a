//! Template options, excluded components and package overrides.

use serde_json::json;
use ue4_docker_config::core::PlanError;
use ue4_docker_config::options::{
    ExcludedComponent, TemplateOptions, TemplateValue, normalize_package_version,
};

#[test]
fn test_last_write_wins_across_spellings() {
    let parsed = TemplateOptions::parse(&["source-mode=git", "source_mode=copy"]).unwrap();

    assert_eq!(parsed.options.len(), 1);
    assert_eq!(parsed.options.get("source_mode"), Some(&TemplateValue::from("copy")));
}

#[test]
fn test_value_kinds() {
    let parsed = TemplateOptions::parse(&[
        "enable_ushell",
        "verbose_output=FALSE",
        "buildgraph_args=-set:HostPlatformOnly=true",
        r#"extra={"a": 1}"#,
        "broken=[1, 2",
    ])
    .unwrap();
    let map = parsed.options.to_json_map();

    assert_eq!(map["enable_ushell"], json!(true));
    assert_eq!(map["verbose_output"], json!(false));
    assert_eq!(map["buildgraph_args"], json!("-set:HostPlatformOnly=true"));
    assert_eq!(map["extra"], json!({"a": 1}));
    // Unbalanced brackets are not attempted as JSON
    assert_eq!(map["broken"], json!("[1, 2"));
    assert!(parsed.warnings.is_empty());
}

#[test]
fn test_malformed_json_warns() {
    let parsed = TemplateOptions::parse(&["extra=[1, 2,]"]).unwrap();

    assert_eq!(parsed.options.get("extra"), Some(&TemplateValue::from("[1, 2,]")));
    assert_eq!(parsed.warnings.len(), 1);
}

#[test]
fn test_empty_key_rejected() {
    assert!(matches!(
        TemplateOptions::parse(&["=value"]),
        Err(PlanError::Configuration { .. })
    ));
}

#[test]
fn test_excluded_component_names() {
    let parsed = ExcludedComponent::parse_all(&["templates", "ddc", "ddc"]).unwrap();
    assert_eq!(parsed.len(), 2);

    assert!("symbols".parse::<ExcludedComponent>().is_err());
    assert_eq!(ExcludedComponent::Ddc.description(), "Derived Data Cache (DDC)");
}

#[test]
fn test_package_version_normalization() {
    assert_eq!(normalize_package_version("foo", Some(">=1.2.3")).as_deref(), Some("foo>=1.2.3"));
    assert_eq!(normalize_package_version("foo", Some("1.2.3")).as_deref(), Some("foo==1.2.3"));
    assert_eq!(normalize_package_version("foo", Some("foo==1.2.3")).as_deref(), Some("foo==1.2.3"));
    assert_eq!(normalize_package_version("foo", Some("~=2.0")).as_deref(), Some("foo~=2.0"));
    assert_eq!(normalize_package_version("foo", None), None);
}

#[test]
fn test_package_url_passes_through() {
    let url = "git+https://github.com/adamrehn/ue4cli.git@master";
    assert_eq!(normalize_package_version("ue4cli", Some(url)).as_deref(), Some(url));
}
