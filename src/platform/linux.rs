//! Linux container configuration: OpenGL or CUDA base images.

use serde::Serialize;
use tracing::debug;

use crate::catalog::{Catalog, ImageTemplates, fill_template};
use crate::core::PlanError;

/// User input consumed by the Linux branch.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinuxRequest<'a> {
    /// `--basetag`
    pub basetag: Option<&'a str>,
    /// `--cuda`: `None` when absent, `Some("")` for the default version
    pub cuda: Option<&'a str>,
    /// Raw `--suffix`, before dash prefixing
    pub suffix: &'a str,
}

/// Derived Linux settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinuxConfig {
    /// Ubuntu tag the images are built on
    pub base_tag: String,
    pub base_image: String,
    pub prereqs_tag: String,
    /// CUDA version for CUDA-enabled images
    pub cuda_version: Option<String>,
}

/// Generate the Linux configuration.
///
/// # Errors
///
/// Returns [`PlanError::ReservedSuffix`] when the tag suffix starts with `opengl`
/// or `cuda`, which would collide with the prerequisites image tags.
pub fn generate(request: &LinuxRequest<'_>, catalog: &Catalog) -> Result<LinuxConfig, PlanError> {
    if ImageTemplates::RESERVED_SUFFIX_PREFIXES
        .iter()
        .any(|prefix| request.suffix.starts_with(prefix))
    {
        return Err(PlanError::ReservedSuffix {
            suffix: request.suffix.to_string(),
        });
    }

    let base_tag = request.basetag.unwrap_or(&catalog.defaults.linux_basetag).to_string();
    let images = &catalog.images;

    let config = match request.cuda {
        Some(requested) => {
            let cuda = if requested.is_empty() {
                catalog.defaults.cuda_version.clone()
            } else {
                requested.to_string()
            };
            let vars = [("cuda", cuda.as_str()), ("ubuntu", base_tag.as_str())];
            LinuxConfig {
                base_image: fill_template(&images.linux_cuda_base, &vars),
                prereqs_tag: fill_template(&images.linux_cuda_prereqs_tag, &vars),
                cuda_version: Some(cuda),
                base_tag,
            }
        }
        None => {
            let vars = [("ubuntu", base_tag.as_str())];
            LinuxConfig {
                base_image: fill_template(&images.linux_opengl_base, &vars),
                prereqs_tag: fill_template(&images.linux_opengl_prereqs_tag, &vars),
                cuda_version: None,
                base_tag,
            }
        }
    };

    debug!("Linux config: base image {}, prereqs tag {}", config.base_image, config.prereqs_tag);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(request: LinuxRequest<'_>) -> Result<LinuxConfig, PlanError> {
        generate(&request, &Catalog::builtin())
    }

    #[test]
    fn test_opengl_without_cuda() {
        let config = run(LinuxRequest::default()).unwrap();
        assert_eq!(config.base_image, "nvidia/opengl:1.0-glvnd-devel-ubuntu22.04");
        assert_eq!(config.prereqs_tag, "opengl-ubuntu22.04");
        assert_eq!(config.cuda_version, None);
    }

    #[test]
    fn test_blank_cuda_uses_default() {
        let config = run(LinuxRequest {
            cuda: Some(""),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(config.base_image, "nvidia/cuda:12.2.0-devel-ubuntu22.04");
        assert_eq!(config.prereqs_tag, "cuda12.2.0-ubuntu22.04");
        assert_eq!(config.cuda_version.as_deref(), Some("12.2.0"));
    }

    #[test]
    fn test_explicit_cuda_and_basetag() {
        let config = run(LinuxRequest {
            cuda: Some("11.8.0"),
            basetag: Some("ubuntu20.04"),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(config.base_image, "nvidia/cuda:11.8.0-devel-ubuntu20.04");
        assert_eq!(config.prereqs_tag, "cuda11.8.0-ubuntu20.04");
    }

    #[test]
    fn test_reserved_suffixes() {
        for suffix in ["opengl-test", "cuda2", "cuda"] {
            assert_eq!(
                run(LinuxRequest {
                    suffix,
                    ..Default::default()
                }),
                Err(PlanError::ReservedSuffix {
                    suffix: suffix.to_string()
                })
            );
        }
        assert!(run(LinuxRequest {
            suffix: "mybuild",
            ..Default::default()
        })
        .is_ok());
        // Prefix matching is case-sensitive
        assert!(run(LinuxRequest {
            suffix: "CUDA",
            ..Default::default()
        })
        .is_ok());
    }
}
