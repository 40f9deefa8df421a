//! Package version overrides for Python tooling installed in the `full` image.
//!
//! Overrides end up as pip requirement specifiers, so the user's operators must be
//! preserved exactly. Bare version numbers become strict pins.

/// Characters that mark a requirement comparison operator (`==`, `>=`, `~=`, `!=`, ...).
const OPERATOR_CHARS: [char; 5] = ['=', '<', '>', '~', '!'];

/// Turn a user override into a requirement specifier for `package`.
///
/// - `None` or empty input is returned unchanged
/// - input containing a path separator (a URL or local path) is returned unchanged
/// - input already starting with the package name (case-insensitive) is returned unchanged
/// - input containing a comparison operator is prefixed with the package name
/// - anything else becomes `package==input`
///
/// # Examples
///
/// ```rust
/// use ue4_docker_config::options::normalize_package_version;
///
/// assert_eq!(normalize_package_version("foo", Some(">=1.2.3")).as_deref(), Some("foo>=1.2.3"));
/// assert_eq!(normalize_package_version("foo", Some("1.2.3")).as_deref(), Some("foo==1.2.3"));
/// assert_eq!(normalize_package_version("foo", Some("foo==1.2.3")).as_deref(), Some("foo==1.2.3"));
/// ```
#[must_use]
pub fn normalize_package_version(package: &str, version: Option<&str>) -> Option<String> {
    let version = version?;

    if version.is_empty()
        || version.contains(['/', '\\'])
        || version.to_lowercase().starts_with(&package.to_lowercase())
    {
        return Some(version.to_string());
    }

    if version.contains(OPERATOR_CHARS) {
        return Some(format!("{package}{version}"));
    }

    Some(format!("{package}=={version}"))
}
