//! Human-readable memory sizes such as `8GB`, `512 MiB`, `16g` or `16 gigabytes`.

use regex::Regex;
use std::sync::OnceLock;

use crate::core::PlanError;

const BYTES_PER_GB: f64 = 1_000_000_000.0;

fn size_regex() -> &'static Regex {
    static SIZE_REGEX: OnceLock<Regex> = OnceLock::new();
    SIZE_REGEX.get_or_init(|| {
        Regex::new(r"(?i)^\s*(\d+(?:\.\d+)?|\.\d+)\s*([a-z]+)?\s*$")
            .expect("static regex is valid")
    })
}

/// Disk size units as (symbol letter, decimal name, binary name).
const UNITS: [(char, &str, &str); 6] = [
    ('k', "kilobyte", "kibibyte"),
    ('m', "megabyte", "mebibyte"),
    ('g', "gigabyte", "gibibyte"),
    ('t', "terabyte", "tebibyte"),
    ('p', "petabyte", "pebibyte"),
    ('e', "exabyte", "exbibyte"),
];

/// Multiplier in bytes for a unit, matched by symbol or name first and then
/// by first letter against the decimal units.
fn unit_multiplier(unit: &str) -> Option<f64> {
    let unit = unit.to_ascii_lowercase();
    if matches!(unit.as_str(), "b" | "byte" | "bytes") {
        return Some(1.0);
    }
    let singular = unit.strip_suffix('s').unwrap_or(&unit);

    for (exponent, (letter, decimal, binary)) in (1..).zip(UNITS) {
        if unit == format!("{letter}ib") || singular == binary {
            return Some(1024f64.powi(exponent));
        }
        if unit == format!("{letter}b") || singular == decimal {
            return Some(1000f64.powi(exponent));
        }
    }

    let first = unit.chars().next()?;
    (1..)
        .zip(UNITS)
        .find(|(_, (letter, _, _))| *letter == first)
        .map(|(exponent, _)| 1000f64.powi(exponent))
}

/// Parse a size string into decimal gigabytes.
///
/// A bare number is a byte count.
///
/// # Errors
///
/// Returns [`PlanError::InvalidSize`] when the string is not a number with an
/// optional recognised unit.
pub fn parse_size_gb(value: &str) -> Result<f64, PlanError> {
    let invalid = || PlanError::InvalidSize {
        value: value.to_string(),
    };

    let captures = size_regex().captures(value).ok_or_else(invalid)?;
    let number: f64 = captures[1].parse().map_err(|_| invalid())?;
    let multiplier = match captures.get(2) {
        Some(unit) => unit_multiplier(unit.as_str()).ok_or_else(invalid)?,
        None => 1.0,
    };

    Ok(number * multiplier / BYTES_PER_GB)
}
