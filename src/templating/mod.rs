//! Template context handed to the Dockerfile renderer.
//!
//! The renderer receives one flat map: every template option by normalized key,
//! with the standard values always present.
//!
//! | Key                    | Default when unset                     |
//! |------------------------|----------------------------------------|
//! | `source_mode`          | `"git"`                                |
//! | `credential_mode`      | platform default (source builds only)  |
//! | `buildgraph_args`      | `""`                                   |
//! | `gitdependencies_args` | platform default                       |
//! | `combine`              | `false`                                |
//! | `excluded_components`  | `{ddc, debug, templates}` flags        |
//!
//! Options set by the user override the defaults; nothing else is added.

use serde_json::{Map, Value};
use tera::Context as TeraContext;

use crate::resolver::ResolvedConfiguration;

fn standard_defaults() -> Map<String, Value> {
    let mut defaults = Map::new();
    defaults.insert("source_mode".to_string(), Value::String("git".to_string()));
    defaults.insert("buildgraph_args".to_string(), Value::String(String::new()));
    defaults.insert("combine".to_string(), Value::Bool(false));
    defaults
}

/// Build the flat template context as a JSON object.
#[must_use]
pub fn template_context(config: &ResolvedConfiguration) -> Map<String, Value> {
    let mut context = standard_defaults();
    context.extend(config.options().to_json_map());
    context
}

/// The same context as a [`tera::Context`].
#[must_use]
pub fn tera_context(config: &ResolvedConfiguration) -> TeraContext {
    let mut context = TeraContext::new();
    for (key, value) in template_context(config) {
        context.insert(key, &value);
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{RawArgumentsBuilder, fixtures};
    use serde_json::json;
    use tera::Tera;

    #[test]
    fn test_standard_keys_present() {
        let config = fixtures::linux_resolver()
            .resolve(&RawArgumentsBuilder::new().ue_version("5.3.0").build())
            .unwrap();
        let context = template_context(&config);

        assert_eq!(context["source_mode"], json!("git"));
        assert_eq!(context["credential_mode"], json!("secrets"));
        assert_eq!(context["buildgraph_args"], json!(""));
        assert_eq!(context["combine"], json!(false));
        assert_eq!(
            context["excluded_components"],
            json!({"ddc": false, "debug": false, "templates": false})
        );
        assert!(context.contains_key("gitdependencies_args"));
    }

    #[test]
    fn test_user_options_override_defaults() {
        let raw = RawArgumentsBuilder::new()
            .ue_version("5.3.0")
            .layout("/tmp/layout")
            .combine()
            .opt("source_mode=copy")
            .opt("enable-ushell")
            .opt(r#"extra_args=["-a", "-b"]"#)
            .build();
        let config = fixtures::linux_resolver().resolve(&raw).unwrap();
        let context = template_context(&config);

        assert_eq!(context["source_mode"], json!("copy"));
        assert_eq!(context["combine"], json!(true));
        assert_eq!(context["enable_ushell"], json!(true));
        assert_eq!(context["extra_args"], json!(["-a", "-b"]));
    }

    #[test]
    fn test_renders_with_tera() {
        let raw = RawArgumentsBuilder::new().ue_version("5.3.0").exclude("debug").build();
        let config = fixtures::linux_resolver().resolve(&raw).unwrap();

        let template = "{% if excluded_components.debug %}strip{% endif %} {{ credential_mode }} {{ source_mode }}";
        let rendered = Tera::one_off(template, &tera_context(&config), false).unwrap();
        assert_eq!(rendered, "strip secrets git");
    }
}
