//! Canned host facts and resolvers.

use crate::catalog::Catalog;
use crate::host::{HostFacts, HostPlatform};
use crate::resolver::ConfigurationResolver;

/// A Linux host with a modern container engine.
#[must_use]
pub fn linux_host() -> HostFacts {
    HostFacts::new(HostPlatform::Linux).with_docker_version("24.0.7")
}

/// A Windows host running `host_basetag` with container engine `docker_version`.
#[must_use]
pub fn windows_host(host_basetag: &str, docker_version: &str) -> HostFacts {
    HostFacts::new(HostPlatform::Windows)
        .with_host_basetag(host_basetag)
        .with_docker_version(docker_version)
}

/// A Windows Server 2022 host with Docker 24.
#[must_use]
pub fn ltsc2022_host() -> HostFacts {
    windows_host("ltsc2022", "24.0.0")
}

/// Resolver for [`linux_host`] with the built-in catalog.
#[must_use]
pub fn linux_resolver() -> ConfigurationResolver {
    ConfigurationResolver::new(Catalog::builtin(), linux_host())
}

/// Resolver for [`ltsc2022_host`] with the built-in catalog.
#[must_use]
pub fn windows_resolver() -> ConfigurationResolver {
    ConfigurationResolver::new(Catalog::builtin(), ltsc2022_host())
}
