//! Resolver for the `tool` pseudo-namespace.
//!
//! Serves kiln's own support sources through the same protocol as real
//! packages, so a generic loader needs no special case. The leading
//! `lib` segment of every `tool` id stands in for the configured
//! source root. When the active graph depends on the asset-graph
//! engine, sources pass through the version templater before they are
//! handed out; otherwise no consumer will ever load transform code and
//! the raw file is returned as-is.

use super::{NamespaceResolver, slash_path, strip_segment};
use crate::error::{KilnError, Result};
use kiln_plugin::{
    Asset, AssetId, ENGINE_PACKAGE, PackageGraph, SOURCE_EXT, TOOL_NAMESPACE, VersionTemplater,
};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use walkdir::WalkDir;

pub struct ToolResolver {
    graph: Arc<dyn PackageGraph>,
    source_root: PathBuf,
    templater: Arc<dyn VersionTemplater>,
}

impl ToolResolver {
    pub fn new(
        graph: Arc<dyn PackageGraph>,
        source_root: PathBuf,
        templater: Arc<dyn VersionTemplater>,
    ) -> Self {
        Self {
            graph,
            source_root,
            templater,
        }
    }

    /// name → version for every package in the graph.
    fn versions(&self) -> BTreeMap<String, String> {
        self.graph
            .package_names()
            .into_iter()
            .filter_map(|name| {
                let version = self.graph.package(&name)?.version;
                Some((name, version))
            })
            .collect()
    }
}

impl NamespaceResolver for ToolResolver {
    fn fetch(&self, id: &AssetId) -> Result<Asset> {
        let rest = strip_segment(&id.path, "lib").ok_or_else(|| KilnError::InvalidId {
            id: id.clone(),
            reason: "tool asset paths must start with a single `lib` segment".to_string(),
        })?;

        let path = self.source_root.join(rest.split('/').collect::<PathBuf>());
        if !path.is_file() {
            debug!("Tool support source missing on disk: {}", id);
            return Err(KilnError::NotFound(id.clone()));
        }

        // Without the engine in the graph the templating pass is dead
        // weight; hand the file back untouched.
        if !self.graph.contains(ENGINE_PACKAGE) {
            return Ok(Asset::File {
                id: id.clone(),
                path,
            });
        }

        let text = std::fs::read_to_string(&path)?;
        let rendered = self.templater.render(&text, &self.versions(), &path);
        Ok(Asset::Text {
            id: id.clone(),
            contents: rendered,
        })
    }

    fn enumerate(
        &self,
        _namespace: &str,
    ) -> Result<Box<dyn Iterator<Item = AssetId> + Send + '_>> {
        let root = self.source_root.clone();
        Ok(Box::new(
            WalkDir::new(&root)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file())
                .filter(|entry| {
                    entry.path().extension().and_then(|ext| ext.to_str()) == Some(SOURCE_EXT)
                })
                .filter_map(move |entry| {
                    let rel = entry.path().strip_prefix(&root).ok()?;
                    let rel = slash_path(rel)?;
                    Some(AssetId::new(TOOL_NAMESPACE, format!("lib/{}", rel)))
                }),
        ))
    }
}
