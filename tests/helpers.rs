//! Shared test utilities for crossroot tests.

use anyhow::{bail, Result};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crossroot::engine::{ContainerEngine, ContainerId};
use crossroot::registry::{self, ToolchainSpec};

/// Test environment with a temporary sysroot directory and a registry rooted
/// in it.
pub struct TestEnv {
    /// Temporary directory (kept alive for lifetime of TestEnv)
    pub _temp_dir: TempDir,
    /// Sysroot root directory inside the temp dir
    pub sysroot_dir: PathBuf,
    /// Registry rooted at `sysroot_dir`
    pub specs: Vec<ToolchainSpec>,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let sysroot_dir = temp_dir.path().join("sysroots");
        let specs = registry::builtin(&sysroot_dir);
        Self {
            _temp_dir: temp_dir,
            sysroot_dir,
            specs,
        }
    }

    /// Look up a registered spec by triple.
    pub fn spec(&self, triple: &str) -> &ToolchainSpec {
        registry::find(&self.specs, triple).expect("triple not registered")
    }

    /// Pre-create a destination directory, as a prior run would have.
    pub fn precreate_dest(&self, triple: &str) {
        fs::create_dir_all(self.spec(triple).dest_dir()).expect("Failed to pre-create dest");
    }
}

/// One recorded engine invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Launch {
        platform: String,
        image: String,
    },
    Exec {
        id: String,
        argv: Vec<String>,
    },
    CopyOut {
        id: String,
        container_path: String,
        host_path: PathBuf,
    },
    Stop {
        id: String,
    },
}

/// Fake engine that records every call instead of touching a daemon.
///
/// Successful copies create the host directory, mimicking `docker cp`.
pub struct RecordingEngine {
    calls: RefCell<Vec<EngineCall>>,
    next_id: RefCell<u32>,
    fail_launch: bool,
    fail_exec: bool,
    /// Container path whose copy should fail (e.g. "/lib").
    fail_copy: Option<String>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            next_id: RefCell::new(0),
            fail_launch: false,
            fail_exec: false,
            fail_copy: None,
        }
    }

    pub fn failing_launch() -> Self {
        Self {
            fail_launch: true,
            ..Self::new()
        }
    }

    pub fn failing_exec() -> Self {
        Self {
            fail_exec: true,
            ..Self::new()
        }
    }

    pub fn failing_copy(container_path: &str) -> Self {
        Self {
            fail_copy: Some(container_path.to_string()),
            ..Self::new()
        }
    }

    /// Snapshot of all recorded calls, in order.
    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn launches(&self) -> Vec<EngineCall> {
        self.filtered(|c| matches!(c, EngineCall::Launch { .. }))
    }

    pub fn execs(&self) -> Vec<EngineCall> {
        self.filtered(|c| matches!(c, EngineCall::Exec { .. }))
    }

    pub fn copies(&self) -> Vec<EngineCall> {
        self.filtered(|c| matches!(c, EngineCall::CopyOut { .. }))
    }

    pub fn stops(&self) -> Vec<EngineCall> {
        self.filtered(|c| matches!(c, EngineCall::Stop { .. }))
    }

    fn filtered(&self, pred: impl Fn(&EngineCall) -> bool) -> Vec<EngineCall> {
        self.calls.borrow().iter().filter(|c| pred(c)).cloned().collect()
    }

    fn record(&self, call: EngineCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl ContainerEngine for RecordingEngine {
    fn launch(&self, platform: &str, image: &str) -> Result<ContainerId> {
        self.record(EngineCall::Launch {
            platform: platform.to_string(),
            image: image.to_string(),
        });
        if self.fail_launch {
            bail!("image unavailable");
        }
        let mut next = self.next_id.borrow_mut();
        *next += 1;
        let id = *next;
        Ok(ContainerId(format!("container-{id}")))
    }

    fn exec(&self, id: &ContainerId, argv: &[&str]) -> Result<()> {
        self.record(EngineCall::Exec {
            id: id.0.clone(),
            argv: argv.iter().map(|s| s.to_string()).collect(),
        });
        if self.fail_exec {
            bail!("package manager exited with status 1");
        }
        Ok(())
    }

    fn copy_out(&self, id: &ContainerId, container_path: &str, host_path: &Path) -> Result<()> {
        self.record(EngineCall::CopyOut {
            id: id.0.clone(),
            container_path: container_path.to_string(),
            host_path: host_path.to_path_buf(),
        });
        if self.fail_copy.as_deref() == Some(container_path) {
            bail!("path does not exist in container");
        }
        fs::create_dir_all(host_path)?;
        fs::write(host_path.join(".copied"), container_path)?;
        Ok(())
    }

    fn stop(&self, id: &ContainerId) -> Result<()> {
        self.record(EngineCall::Stop { id: id.0.clone() });
        Ok(())
    }
}
