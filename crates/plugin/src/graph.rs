//! Read-only view of the package-dependency graph.
//!
//! The graph itself is built and owned by the embedding tool; the
//! provider only ever reads names, versions, roots, and file listings
//! through this trait.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One installed package as seen by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
    /// Root directory of the installed package.
    pub root: PathBuf,
    /// Statically bundled packages are excluded from dynamic
    /// provisioning.
    pub is_static: bool,
}

/// Read-only package graph seam.
pub trait PackageGraph: Send + Sync {
    /// Names of every known package.
    fn package_names(&self) -> Vec<String>;

    /// Look up one package by name.
    fn package(&self, name: &str) -> Option<PackageInfo>;

    fn contains(&self, name: &str) -> bool {
        self.package(name).is_some()
    }

    /// Files beneath `subdir` of the named package, as absolute paths.
    /// Streaming, directories excluded; empty for unknown packages or
    /// missing subdirectories. The iterator must not borrow `name` or
    /// `subdir`.
    fn list_files(
        &self,
        name: &str,
        subdir: &str,
    ) -> Box<dyn Iterator<Item = PathBuf> + Send + '_>;
}
