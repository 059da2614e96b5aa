//! Configuration management for crossroot.
//!
//! Reads configuration from a .env file and environment variables.
//! Environment variables take precedence over the .env file.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Default container engine binary. Any Docker-CLI-compatible engine works.
pub const DEFAULT_ENGINE: &str = "docker";

/// Default image tag pulled for every registry image.
pub const DEFAULT_IMAGE_TAG: &str = "latest";

/// Default root directory that sysroots are extracted into.
pub const DEFAULT_SYSROOT_DIR: &str = "sysroots";

/// Crossroot configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Container engine binary name (e.g. "docker", "podman")
    pub engine: String,
    /// Image tag used when launching containers (e.g. "latest")
    pub image_tag: String,
    /// Root directory sysroots are written under (default: sysroots)
    pub sysroot_dir: PathBuf,
}

impl Config {
    /// Load configuration from a .env file and the environment.
    ///
    /// The .env file is looked up in `base_dir`; real environment variables
    /// override anything it sets.
    pub fn load(base_dir: &Path) -> Self {
        let mut env_vars = HashMap::new();

        let env_path = base_dir.join(".env");
        if env_path.exists() {
            if let Ok(content) = fs::read_to_string(&env_path) {
                for line in content.lines() {
                    let line = line.trim();
                    // Skip comments and empty lines
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    // Parse KEY=value
                    if let Some((key, value)) = line.split_once('=') {
                        let key = key.trim();
                        let value = value.trim();
                        // Remove quotes if present
                        let value = value.trim_matches('"').trim_matches('\'');
                        env_vars.insert(key.to_string(), value.to_string());
                    }
                }
            }
        }

        // Environment variables override .env file
        for (key, value) in std::env::vars() {
            env_vars.insert(key, value);
        }

        let engine = env_vars
            .get("CONTAINER_ENGINE")
            .cloned()
            .unwrap_or_else(|| DEFAULT_ENGINE.to_string());

        let image_tag = env_vars
            .get("IMAGE_TAG")
            .cloned()
            .unwrap_or_else(|| DEFAULT_IMAGE_TAG.to_string());

        let sysroot_dir = env_vars
            .get("SYSROOT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SYSROOT_DIR));

        Self {
            engine,
            image_tag,
            sysroot_dir,
        }
    }

    /// Print configuration for debugging.
    pub fn print(&self) {
        println!("Configuration:");
        println!("  CONTAINER_ENGINE: {}", self.engine);
        println!("  IMAGE_TAG: {}", self.image_tag);
        println!("  SYSROOT_DIR: {}", self.sysroot_dir.display());
    }
}
