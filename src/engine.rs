//! Container engine abstraction.
//!
//! The extractor only needs four operations from the engine: launch a
//! detached container, exec a command in it, copy a path out of it, and stop
//! it. Putting them behind a trait keeps the extraction logic testable
//! without a real engine daemon.

use anyhow::{bail, Result};
use std::fmt;
use std::path::Path;

use crate::config::Config;
use crate::process::Cmd;

/// Identifier of a running container, as returned by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerId(pub String);

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Engines print long ids; the short prefix is enough for log lines.
        let short = self.0.get(..12).unwrap_or(&self.0);
        f.write_str(short)
    }
}

/// The four engine operations sysroot extraction needs.
pub trait ContainerEngine {
    /// Run a detached container for `platform` from `image`, returning its id.
    fn launch(&self, platform: &str, image: &str) -> Result<ContainerId>;

    /// Run a command inside a running container.
    fn exec(&self, id: &ContainerId, argv: &[&str]) -> Result<()>;

    /// Copy a path from inside a container to the host.
    fn copy_out(&self, id: &ContainerId, container_path: &str, host_path: &Path) -> Result<()>;

    /// Stop (but do not remove) a container.
    fn stop(&self, id: &ContainerId) -> Result<()>;
}

/// Docker-CLI-compatible engine. Works with docker, podman, or anything else
/// that speaks the same run/exec/cp/stop surface.
pub struct CliEngine {
    binary: String,
    image_tag: String,
}

impl CliEngine {
    pub fn new(config: &Config) -> Self {
        Self {
            binary: config.engine.clone(),
            image_tag: config.image_tag.clone(),
        }
    }
}

impl ContainerEngine for CliEngine {
    fn launch(&self, platform: &str, image: &str) -> Result<ContainerId> {
        let result = Cmd::new(&self.binary)
            .args(["run", "--rm", "-it", "-d"])
            .arg(format!("--platform={platform}"))
            .arg(format!("{image}:{}", self.image_tag))
            .error_msg(format!("Failed to launch {image} container for {platform}"))
            .run()?;

        let id = result.stdout_trimmed();
        if id.is_empty() {
            bail!("Engine returned no container id for {image} ({platform})");
        }
        Ok(ContainerId(id.to_string()))
    }

    fn exec(&self, id: &ContainerId, argv: &[&str]) -> Result<()> {
        Cmd::new(&self.binary)
            .arg("exec")
            .arg(&id.0)
            .args(argv.iter().copied())
            .error_msg(format!("'{}' failed in container {id}", argv.join(" ")))
            .run()?;
        Ok(())
    }

    fn copy_out(&self, id: &ContainerId, container_path: &str, host_path: &Path) -> Result<()> {
        Cmd::new(&self.binary)
            .arg("cp")
            .arg(format!("{}:{container_path}", id.0))
            .arg_path(host_path)
            .error_msg(format!("Failed to copy {container_path} out of container {id}"))
            .run()?;
        Ok(())
    }

    fn stop(&self, id: &ContainerId) -> Result<()> {
        Cmd::new(&self.binary).arg("stop").arg(&id.0).run()?;
        Ok(())
    }
}
