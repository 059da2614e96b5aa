//! Toolchain registry.
//!
//! A fixed, ordered table of target triples and the container each sysroot is
//! extracted from. Records are constructed once at startup and read-only
//! thereafter.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Package manager family of a container image.
///
/// Selecting the family happens once, when the registry is built, instead of
/// comparing image names at every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageFamily {
    /// Alpine's apk.
    Apk,
    /// Debian-family apt-get.
    Apt,
}

impl PackageFamily {
    /// Infer the family from an image name. Only the exact image name
    /// "alpine" is apk-based; every other image is treated as Debian-family.
    pub fn for_image(image: &str) -> Self {
        if image == "alpine" {
            PackageFamily::Apk
        } else {
            PackageFamily::Apt
        }
    }
}

/// Container needed to produce one sysroot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    /// Container engine platform identifier (e.g. "linux/arm64")
    pub platform: String,
    /// Base image name (e.g. "debian", "alpine")
    pub image: String,
    /// Package manager family, inferred from the image name.
    pub family: PackageFamily,
}

impl ContainerSpec {
    pub fn new(platform: &str, image: &str) -> Self {
        Self {
            platform: platform.to_string(),
            image: image.to_string(),
            family: PackageFamily::for_image(image),
        }
    }
}

/// One registered toolchain: a triple and how to obtain its sysroot.
#[derive(Debug, Clone)]
pub struct ToolchainSpec {
    /// Target triple (e.g. "x86_64-unknown-linux-gnu")
    pub triple: String,
    /// Root directory the sysroot is extracted under
    pub sysroot_path: PathBuf,
    /// Include directories the extracted tree is documented to provide.
    /// Advisory only; absence produces a warning, never a failure.
    pub include_paths: &'static [&'static str],
    /// Container the sysroot is copied out of
    pub container: ContainerSpec,
}

impl ToolchainSpec {
    /// Destination directory for this triple's sysroot.
    pub fn dest_dir(&self) -> PathBuf {
        self.sysroot_path.join(&self.triple)
    }
}

const GNU_ARM_INCLUDES: &[&str] = &[
    "usr/include",
    "usr/include/c++/12",
    "usr/include/arm-linux-gnueabihf/c++/12",
    "usr/include/arm-linux-gnueabihf",
];

const GNU_X86_64_INCLUDES: &[&str] = &[
    "usr/include",
    "usr/include/c++/12",
    "usr/include/x86_64-linux-gnu/c++/12",
    "usr/include/x86_64-linux-gnu",
];

const GNU_I686_INCLUDES: &[&str] = &[
    "usr/include",
    "usr/include/c++/12",
    "usr/include/i686-linux-gnu/c++/12",
    "usr/include/i686-linux-gnu",
];

/// Raw registry table: (triple, include paths, platform, image).
const TOOLCHAINS: &[(&str, &[&str], &str, &str)] = &[
    ("aarch64-unknown-linux-gnu", GNU_ARM_INCLUDES, "linux/arm64", "debian"),
    ("armv7-unknown-linux-gnueabihf", GNU_ARM_INCLUDES, "linux/arm/v7", "debian"),
    ("arm-unknown-linux-gnueabihf", GNU_ARM_INCLUDES, "linux/arm/v6", "debian"),
    ("x86_64-unknown-linux-gnu", GNU_X86_64_INCLUDES, "linux/amd64", "debian"),
    ("i686-unknown-linux-gnu", GNU_I686_INCLUDES, "linux/i386", "debian"),
    ("aarch64-unknown-linux-musl", GNU_ARM_INCLUDES, "linux/arm64", "alpine"),
    ("armv7-unknown-linux-musleabihf", GNU_ARM_INCLUDES, "linux/arm/v7", "alpine"),
    ("arm-unknown-linux-musleabihf", GNU_ARM_INCLUDES, "linux/arm/v6", "alpine"),
    ("x86_64-unknown-linux-musl", GNU_X86_64_INCLUDES, "linux/amd64", "alpine"),
    ("i686-unknown-linux-musl", GNU_I686_INCLUDES, "linux/i386", "alpine"),
];

/// Build the registered toolchains, rooted at `sysroot_dir`, in registry order.
pub fn builtin(sysroot_dir: &Path) -> Vec<ToolchainSpec> {
    TOOLCHAINS
        .iter()
        .map(|&(triple, includes, platform, image)| ToolchainSpec {
            triple: triple.to_string(),
            sysroot_path: sysroot_dir.to_path_buf(),
            include_paths: includes,
            container: ContainerSpec::new(platform, image),
        })
        .collect()
}

/// Look up a toolchain by triple.
pub fn find<'a>(specs: &'a [ToolchainSpec], triple: &str) -> Option<&'a ToolchainSpec> {
    specs.iter().find(|s| s.triple == triple)
}
