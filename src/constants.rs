//! Built-in defaults used by the catalogs and the resolver.
//!
//! These values seed [`crate::catalog::Catalog::builtin`]; the user config file may
//! override the ones listed under `[defaults]`.

use std::time::Duration;

/// The default Unreal Engine git repository.
pub const DEFAULT_GIT_REPO: &str = "https://github.com/EpicGames/UnrealEngine.git";

/// Default Ubuntu base tag for Linux containers.
pub const DEFAULT_LINUX_BASETAG: &str = "ubuntu22.04";

/// CUDA version applied when `--cuda` is given without a value.
pub const DEFAULT_CUDA_VERSION: &str = "12.2.0";

/// Default memory limit (GB) for Hyper-V isolated Windows containers.
///
/// Hyper-V isolation otherwise caps containers at 1GB.
pub const DEFAULT_MEMORY_LIMIT_GB: f64 = 10.0;

/// Width (GB) of the window a randomized memory limit is drawn from.
pub const RANDOM_MEMORY_SPREAD_GB: f64 = 2.0;

/// Largest default memory limit (GB) accepted from the user config.
pub const MAX_MEMORY_LIMIT_GB: f64 = 4096.0;

/// First Docker release that supports process isolation on Windows.
pub const MIN_PROCESS_ISOLATION_DOCKER_VERSION: &str = "18.09.0";

/// Toolchain used when `--visual-studio` is not given.
pub const DEFAULT_VISUAL_STUDIO: &str = "2017";

/// Default sampling interval (seconds) for the resource monitor.
pub const DEFAULT_MONITOR_INTERVAL_SECS: f64 = 20.0;

/// Upper bound for a single host-inspection command.
pub const HOST_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable that overrides the user config file location.
pub const CONFIG_PATH_ENV: &str = "UE4DOCKER_CONFIG_PATH";
