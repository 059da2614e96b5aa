//! Host tool availability checks.

use anyhow::{bail, Result};
use std::path::PathBuf;

use crate::config::Config;

/// Resolve the configured container engine binary on PATH.
///
/// Runs before any extraction work so a missing engine fails fast with a
/// hint instead of erroring on the first launch.
pub fn check_engine(config: &Config) -> Result<PathBuf> {
    match which::which(&config.engine) {
        Ok(path) => Ok(path),
        Err(_) => bail!(
            "Container engine '{}' not found on PATH. \
             Install docker (or podman), or point CONTAINER_ENGINE at another engine.",
            config.engine
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_IMAGE_TAG, DEFAULT_SYSROOT_DIR};
    use std::path::PathBuf;

    fn config_with_engine(engine: &str) -> Config {
        Config {
            engine: engine.to_string(),
            image_tag: DEFAULT_IMAGE_TAG.to_string(),
            sysroot_dir: PathBuf::from(DEFAULT_SYSROOT_DIR),
        }
    }

    #[test]
    fn test_check_engine_finds_sh() {
        // `sh` exists on any Unix system
        let path = check_engine(&config_with_engine("sh")).unwrap();
        assert!(path.ends_with("sh"));
    }

    #[test]
    fn test_check_engine_missing_binary() {
        let err = check_engine(&config_with_engine("nonexistent_engine_12345")).unwrap_err();
        assert!(err.to_string().contains("nonexistent_engine_12345"));
        assert!(err.to_string().contains("CONTAINER_ENGINE"));
    }
}
