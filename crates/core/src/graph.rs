//! In-memory implementation of PackageGraph.
//!
//! The embedding tool builds the graph once, after dependency
//! resolution, and hands it to the provider behind an `Arc`. Lookups
//! never mutate, so no interior locking is needed.

use kiln_plugin::{PackageGraph, PackageInfo};
use std::collections::HashMap;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Package graph held fully in memory.
pub struct InMemoryPackageGraph {
    packages: HashMap<String, PackageInfo>,
}

impl InMemoryPackageGraph {
    pub fn new() -> Self {
        Self {
            packages: HashMap::new(),
        }
    }

    pub fn from_packages(packages: impl IntoIterator<Item = PackageInfo>) -> Self {
        Self {
            packages: packages.into_iter().map(|p| (p.name.clone(), p)).collect(),
        }
    }

    /// Register a package, replacing any previous entry with the same
    /// name.
    pub fn insert(&mut self, info: PackageInfo) {
        self.packages.insert(info.name.clone(), info);
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl Default for InMemoryPackageGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageGraph for InMemoryPackageGraph {
    fn package_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.packages.keys().cloned().collect();
        names.sort();
        names
    }

    fn package(&self, name: &str) -> Option<PackageInfo> {
        self.packages.get(name).cloned()
    }

    fn list_files(
        &self,
        name: &str,
        subdir: &str,
    ) -> Box<dyn Iterator<Item = PathBuf> + Send + '_> {
        let Some(info) = self.packages.get(name) else {
            return Box::new(std::iter::empty());
        };

        let root = info.root.join(subdir);
        if !root.is_dir() {
            return Box::new(std::iter::empty());
        }

        // WalkDir keeps the traversal lazy; directories are skipped
        Box::new(
            WalkDir::new(root)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file())
                .map(|entry| entry.path().to_path_buf()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn package(name: &str, root: PathBuf) -> PackageInfo {
        PackageInfo {
            name: name.to_string(),
            version: "1.0.0".to_string(),
            root,
            is_static: false,
        }
    }

    #[test]
    fn test_lookup_and_names() {
        let graph = InMemoryPackageGraph::from_packages([
            package("beta", PathBuf::from("/b")),
            package("alpha", PathBuf::from("/a")),
        ]);

        assert_eq!(graph.package_names(), vec!["alpha", "beta"]);
        assert!(graph.contains("alpha"));
        assert!(!graph.contains("gamma"));
        assert_eq!(graph.package("beta").unwrap().root, PathBuf::from("/b"));
    }

    #[test]
    fn test_list_files_walks_subdir_only() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().to_path_buf();
        fs::create_dir_all(root.join("lib/sub")).unwrap();
        fs::write(root.join("lib/a.kn"), "a").unwrap();
        fs::write(root.join("lib/sub/b.kn"), "b").unwrap();
        fs::write(root.join("manifest.toml"), "").unwrap();

        let mut graph = InMemoryPackageGraph::new();
        graph.insert(package("demo", root.clone()));

        let mut files: Vec<_> = graph.list_files("demo", "lib").collect();
        files.sort();
        assert_eq!(files, vec![root.join("lib/a.kn"), root.join("lib/sub/b.kn")]);
    }

    #[test]
    fn test_list_files_unknown_package_is_empty() {
        let graph = InMemoryPackageGraph::new();
        assert_eq!(graph.list_files("nope", "lib").count(), 0);
    }
}
