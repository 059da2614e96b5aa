//! Sysroot extraction.
//!
//! One extraction = one container: launch it, install the runtime/dev
//! packages the sysroot needs, copy `/usr` and `/lib` out to the host, stop
//! the container. A fatal error rolls the partial destination back so the
//! next run retries instead of treating the leftovers as a finished sysroot.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::engine::{ContainerEngine, ContainerId};
use crate::manifest::SysrootManifest;
use crate::registry::{PackageFamily, ToolchainSpec};

/// Packages installed in Alpine images before extraction.
pub const APK_PACKAGES: &[&str] = &["libstdc++", "libatomic"];

/// Packages installed in Debian-family images before extraction.
pub const APT_PACKAGES: &[&str] = &["libstdc++6", "libatomic1", "build-essential"];

/// Container paths copied to the host, paired with their destination names.
const COPIED_TREES: &[(&str, &str)] = &[("/usr", "usr"), ("/lib", "lib")];

/// Why an extraction failed. Stop failures are not represented here: the
/// sysroot is already complete by then, so they are only logged.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to create {}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to launch {image} container for {platform}: {cause:#}")]
    Launch {
        platform: String,
        image: String,
        cause: anyhow::Error,
    },

    #[error("package install failed in {image} container: {cause:#}")]
    PackageInstall {
        image: String,
        cause: anyhow::Error,
    },

    #[error("failed to copy {path} out of the container: {cause:#}")]
    Copy {
        path: String,
        cause: anyhow::Error,
    },
}

/// Extract one sysroot to `<sysroot_path>/<triple>`.
///
/// The destination directory must not already exist; callers gate on that
/// before invoking extraction.
pub fn extract(spec: &ToolchainSpec, engine: &dyn ContainerEngine) -> Result<(), ExtractError> {
    let dest = spec.dest_dir();
    create_dest(&dest)?;

    let id = match engine.launch(&spec.container.platform, &spec.container.image) {
        Ok(id) => id,
        Err(cause) => {
            rollback(&dest);
            return Err(ExtractError::Launch {
                platform: spec.container.platform.clone(),
                image: spec.container.image.clone(),
                cause,
            });
        }
    };

    if let Err(cause) = install_packages(engine, &id, spec.container.family) {
        stop_container(engine, &id, &spec.triple);
        rollback(&dest);
        return Err(ExtractError::PackageInstall {
            image: spec.container.image.clone(),
            cause,
        });
    }

    for &(container_path, dest_name) in COPIED_TREES {
        if let Err(cause) = engine.copy_out(&id, container_path, &dest.join(dest_name)) {
            stop_container(engine, &id, &spec.triple);
            rollback(&dest);
            return Err(ExtractError::Copy {
                path: container_path.to_string(),
                cause,
            });
        }
    }

    stop_container(engine, &id, &spec.triple);

    warn_missing_includes(spec, &dest);
    if let Err(err) = SysrootManifest::for_extracted(spec, &dest).write(&dest) {
        eprintln!("[WARN] {}: could not write manifest: {err:#}", spec.triple);
    }

    Ok(())
}

/// Create the destination directory. Parents are created as needed, but the
/// final component must not already exist.
fn create_dest(dest: &Path) -> Result<(), ExtractError> {
    let mkdir = || -> std::io::Result<()> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::create_dir(dest)
    };
    mkdir().map_err(|source| ExtractError::Filesystem {
        path: dest.to_path_buf(),
        source,
    })
}

/// Install the packages the sysroot needs, per the image's package family.
fn install_packages(
    engine: &dyn ContainerEngine,
    id: &ContainerId,
    family: PackageFamily,
) -> anyhow::Result<()> {
    match family {
        PackageFamily::Apk => {
            let mut argv = vec!["apk", "add"];
            argv.extend_from_slice(APK_PACKAGES);
            engine.exec(id, &argv)
        }
        PackageFamily::Apt => {
            engine.exec(id, &["apt-get", "update"])?;
            let mut argv = vec!["apt-get", "install", "-y"];
            argv.extend_from_slice(APT_PACKAGES);
            engine.exec(id, &argv)
        }
    }
}

/// Stop the container. The sysroot copy is already on the host when this
/// runs, so a failure is logged rather than escalated.
fn stop_container(engine: &dyn ContainerEngine, id: &ContainerId, triple: &str) {
    if let Err(err) = engine.stop(id) {
        eprintln!("[WARN] {triple}: failed to stop container {id}: {err:#}");
    }
}

/// Remove a partially extracted destination.
fn rollback(dest: &Path) {
    if let Err(err) = fs::remove_dir_all(dest) {
        eprintln!(
            "[WARN] Failed to remove partial sysroot {}: {err}",
            dest.display()
        );
    }
}

/// Warn about documented include directories absent from the extracted tree.
/// Advisory only; image contents drift and the copy is still usable.
fn warn_missing_includes(spec: &ToolchainSpec, dest: &Path) {
    for &rel in spec.include_paths {
        if !dest.join(rel).is_dir() {
            eprintln!(
                "[WARN] {}: expected include path {rel} not present in sysroot",
                spec.triple
            );
        }
    }
}
