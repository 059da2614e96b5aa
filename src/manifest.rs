//! Per-sysroot provenance manifest.
//!
//! Each completed sysroot gets a `manifest.json` recording which container
//! produced it and how much was copied out. Later runs and external tooling
//! can tell a finished sysroot from a directory that merely exists.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::registry::{PackageFamily, ToolchainSpec};

/// Filename written at the root of every completed sysroot.
pub const MANIFEST_FILE: &str = "manifest.json";

/// What produced a sysroot and what it contains.
#[derive(Debug, Serialize)]
pub struct SysrootManifest {
    pub triple: String,
    pub platform: String,
    pub image: String,
    pub family: PackageFamily,
    pub file_count: u64,
    pub total_bytes: u64,
}

impl SysrootManifest {
    /// Build a manifest for a freshly extracted sysroot by walking its tree.
    pub fn for_extracted(spec: &ToolchainSpec, dest: &Path) -> Self {
        let (file_count, total_bytes) = tree_stats(dest);
        Self {
            triple: spec.triple.clone(),
            platform: spec.container.platform.clone(),
            image: spec.container.image.clone(),
            family: spec.container.family,
            file_count,
            total_bytes,
        }
    }

    /// Write the manifest into `dest`.
    pub fn write(&self, dest: &Path) -> Result<()> {
        let path = dest.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

/// Count regular files and their total size under `root`.
///
/// Unreadable entries are skipped; docker cp can produce files the invoking
/// user cannot stat.
fn tree_stats(root: &Path) -> (u64, u64) {
    let mut files = 0u64;
    let mut bytes = 0u64;
    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        if entry.file_type().is_file() {
            files += 1;
            if let Ok(meta) = entry.metadata() {
                bytes += meta.len();
            }
        }
    }
    (files, bytes)
}
