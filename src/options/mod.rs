//! Advanced `--opt key[=value]` options and their coercion into template values.
//!
//! Options are the free-form knobs passed straight through to the Dockerfile
//! templates. Keys are normalized (hyphens become underscores) and values are
//! coerced into a small tagged union:
//!
//! | Input                     | Value                                  |
//! |---------------------------|----------------------------------------|
//! | `key`                     | `Bool(true)`                           |
//! | `key=true`, `key=1`       | `Bool(true)` (case-insensitive)        |
//! | `key=false`, `key=0`      | `Bool(false)` (case-insensitive)       |
//! | `key={...}`, `key=[...]`  | `Structured(json)`, or the raw string  |
//! | anything else             | `String(value)`                        |
//!
//! A bracketed value that fails to parse as JSON is not an error: it is kept as a
//! string and a warning is reported. Repeated keys overwrite earlier ones.

pub mod components;
pub mod package;

pub use components::ExcludedComponent;
pub use package::normalize_package_version;

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

use crate::core::PlanError;

/// A coerced option value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TemplateValue {
    /// Boolean flag
    Bool(bool),
    /// Plain string
    String(String),
    /// Parsed JSON object or array
    Structured(Value),
}

impl TemplateValue {
    /// The string payload, if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Convert to a JSON value for template contexts.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Bool(b) => Value::Bool(*b),
            Self::String(s) => Value::String(s.clone()),
            Self::Structured(v) => v.clone(),
        }
    }
}

impl From<bool> for TemplateValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for TemplateValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for TemplateValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// Normalize an option key: hyphens become underscores.
///
/// # Errors
///
/// Returns [`PlanError::Configuration`] for keys that are empty after trimming.
pub fn normalize_key(key: &str) -> Result<String, PlanError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(PlanError::configuration("advanced option keys must not be empty"));
    }
    Ok(key.replace('-', "_"))
}

/// Coerce a raw option value.
///
/// Returns the value plus a warning when bracketed text could not be parsed.
#[must_use]
pub fn coerce_value(raw: &str) -> (TemplateValue, Option<String>) {
    match raw.to_lowercase().as_str() {
        "true" | "1" => return (TemplateValue::Bool(true), None),
        "false" | "0" => return (TemplateValue::Bool(false), None),
        _ => {}
    }

    let bracketed = (raw.starts_with('{') && raw.ends_with('}'))
        || (raw.starts_with('[') && raw.ends_with(']'));
    if bracketed {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => return (TemplateValue::Structured(value), None),
            Err(e) => {
                let warning = format!(
                    "could not parse option value \"{raw}\" as JSON, treating value as a string ({e})"
                );
                warn!("{}", warning);
                return (TemplateValue::String(raw.to_string()), Some(warning));
            }
        }
    }

    (TemplateValue::String(raw.to_string()), None)
}

/// Template options keyed by normalized name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TemplateOptions {
    values: BTreeMap<String, TemplateValue>,
}

/// Result of parsing `--opt` entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedOptions {
    /// The parsed options
    pub options: TemplateOptions,
    /// Non-fatal coercion warnings
    pub warnings: Vec<String>,
}

impl TemplateOptions {
    /// Create an empty option set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `key[=value]` entries in order; later keys overwrite earlier ones.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Configuration`] for entries with an empty key.
    pub fn parse<S: AsRef<str>>(entries: &[S]) -> Result<ParsedOptions, PlanError> {
        let mut parsed = ParsedOptions::default();
        for entry in entries {
            let entry = entry.as_ref();
            match entry.split_once('=') {
                Some((key, raw)) => {
                    let (value, warning) = coerce_value(raw);
                    parsed.options.insert(normalize_key(key)?, value);
                    parsed.warnings.extend(warning);
                }
                None => {
                    parsed.options.insert(normalize_key(entry)?, TemplateValue::Bool(true));
                }
            }
        }
        Ok(parsed)
    }

    /// Insert or overwrite a value. The key is stored as given.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<TemplateValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Look up a value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TemplateValue> {
        self.values.get(key)
    }

    /// Whether `key` is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &TemplateValue)> {
        self.values.iter()
    }

    /// Number of options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no options are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Flatten into a JSON object.
    #[must_use]
    pub fn to_json_map(&self) -> serde_json::Map<String, Value> {
        self.values.iter().map(|(k, v)| (k.clone(), v.to_json())).collect()
    }
}
