//! Sync command - extracts sysroots for requested triples.
//!
//! Every registered triple gets exactly one status line, in registry order.
//! A failed triple does not abort the run; the process exits non-zero at the
//! end if anything failed.

use anyhow::{bail, Result};
use std::fmt;

use crate::config::Config;
use crate::engine::{CliEngine, ContainerEngine};
use crate::extract::{self, ExtractError};
use crate::preflight;
use crate::registry::{self, ToolchainSpec};

/// Outcome for one registered triple.
#[derive(Debug)]
pub enum TripleStatus {
    /// Sysroot was extracted on this run.
    Created,
    /// Destination directory already present; nothing done.
    Exists,
    /// Triple was not in the requested set.
    Skipped,
    /// Extraction was attempted and failed.
    Failed(ExtractError),
}

impl TripleStatus {
    pub fn is_failure(&self) -> bool {
        matches!(self, TripleStatus::Failed(_))
    }
}

impl fmt::Display for TripleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripleStatus::Created => f.write_str("Created"),
            TripleStatus::Exists => f.write_str("Exists"),
            TripleStatus::Skipped => f.write_str("Skipped"),
            TripleStatus::Failed(err) => write!(f, "Failed: {err}"),
        }
    }
}

/// Process one registered triple.
///
/// `requested = None` means every triple is requested. The engine is only
/// touched when the triple is requested and its destination does not exist.
pub fn sync_one(
    spec: &ToolchainSpec,
    requested: Option<&[String]>,
    engine: &dyn ContainerEngine,
) -> TripleStatus {
    if let Some(requested) = requested {
        if !requested.iter().any(|t| t == &spec.triple) {
            return TripleStatus::Skipped;
        }
    }
    if spec.dest_dir().exists() {
        return TripleStatus::Exists;
    }
    match extract::extract(spec, engine) {
        Ok(()) => TripleStatus::Created,
        Err(err) => TripleStatus::Failed(err),
    }
}

/// Process every registered triple in order, collecting statuses.
pub fn sync_toolchains(
    specs: &[ToolchainSpec],
    requested: Option<&[String]>,
    engine: &dyn ContainerEngine,
) -> Vec<(String, TripleStatus)> {
    specs
        .iter()
        .map(|spec| (spec.triple.clone(), sync_one(spec, requested, engine)))
        .collect()
}

/// Requested triples that match no registry entry.
pub fn unknown_triples<'a>(specs: &[ToolchainSpec], requested: &'a [String]) -> Vec<&'a str> {
    requested
        .iter()
        .filter(|t| registry::find(specs, t).is_none())
        .map(|t| t.as_str())
        .collect()
}

/// Execute the sync command.
pub fn cmd_sync(
    specs: &[ToolchainSpec],
    requested: Option<&[String]>,
    config: &Config,
) -> Result<()> {
    preflight::check_engine(config)?;
    let engine = CliEngine::new(config);

    let mut failed = 0usize;
    for spec in specs {
        let status = sync_one(spec, requested, &engine);
        println!("[{}] {status}", spec.triple);
        if status.is_failure() {
            failed += 1;
        }
    }

    if let Some(requested) = requested {
        let unknown = unknown_triples(specs, requested);
        if !unknown.is_empty() {
            eprintln!(
                "[WARN] Unknown triple(s) requested: {} (see --list-triples)",
                unknown.join(", ")
            );
        }
    }

    if failed > 0 {
        bail!("{failed} sysroot(s) failed");
    }
    Ok(())
}
