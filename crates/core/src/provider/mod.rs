//! The asset provider: namespace dispatch over three resolvers.
//!
//! Every request carries a namespace that is either a real package
//! name or one of the two reserved pseudo-names; dispatch selects one
//! resolver per request and nothing else is shared between them:
//!
//! - [`PackageResolver`] — ordinary installed packages
//! - [`ToolResolver`] — the `tool` pseudo-namespace (kiln's own
//!   support sources, optionally version-templated)
//! - [`PlatformResolver`] — the `platform` pseudo-namespace (standard
//!   library, direct or archived layout)
//!
//! All state is immutable after construction, so `fetch` and
//! `enumerate` may run concurrently without coordination.

mod ordinary;
mod platform;
mod tool;

pub use ordinary::PackageResolver;
pub use platform::{PlatformLayout, PlatformResolver};
pub use tool::ToolResolver;

use crate::error::{KilnError, Result};
use kiln_plugin::{
    Asset, AssetId, DecompressionCodec, PLATFORM_NAMESPACE, PackageGraph, TOOL_NAMESPACE,
    VersionTemplater,
};
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// The two-operation capability shared by every namespace resolver.
pub trait NamespaceResolver: Send + Sync {
    /// Resolve a single asset id to content.
    fn fetch(&self, id: &AssetId) -> Result<Asset>;

    /// Enumerate every asset id served under `namespace`.
    ///
    /// The sequence is finite and single-pass; request a fresh one to
    /// iterate again. Order is unspecified.
    fn enumerate(
        &self,
        namespace: &str,
    ) -> Result<Box<dyn Iterator<Item = AssetId> + Send + '_>>;
}

/// Resolves logical asset references into physical byte content on
/// behalf of the asset-graph engine.
pub struct AssetProvider {
    graph: Arc<dyn PackageGraph>,
    ordinary: PackageResolver,
    tool: ToolResolver,
    platform: PlatformResolver,
}

impl AssetProvider {
    pub fn new(
        graph: Arc<dyn PackageGraph>,
        tool_root: PathBuf,
        layout: PlatformLayout,
        templater: Arc<dyn VersionTemplater>,
        codec: Arc<dyn DecompressionCodec>,
    ) -> Self {
        Self {
            ordinary: PackageResolver::new(Arc::clone(&graph)),
            tool: ToolResolver::new(Arc::clone(&graph), tool_root, templater),
            platform: PlatformResolver::new(layout, codec),
            graph,
        }
    }

    pub fn fetch(&self, id: &AssetId) -> Result<Asset> {
        self.resolver(&id.namespace)?.fetch(id)
    }

    pub fn enumerate(
        &self,
        namespace: &str,
    ) -> Result<Box<dyn Iterator<Item = AssetId> + Send + '_>> {
        self.resolver(namespace)?.enumerate(namespace)
    }

    /// Namespaces served by this provider: every non-static package
    /// plus the two pseudo-namespaces.
    pub fn namespaces(&self) -> BTreeSet<String> {
        let mut names: BTreeSet<String> = self
            .graph
            .package_names()
            .into_iter()
            .filter(|name| {
                self.graph
                    .package(name)
                    .is_some_and(|package| !package.is_static)
            })
            .collect();
        names.insert(TOOL_NAMESPACE.to_string());
        names.insert(PLATFORM_NAMESPACE.to_string());
        names
    }

    /// Select the resolver for a namespace. Pseudo-names win over the
    /// graph, so a package cannot shadow `tool` or `platform`.
    fn resolver(&self, namespace: &str) -> Result<&dyn NamespaceResolver> {
        match namespace {
            TOOL_NAMESPACE => Ok(&self.tool),
            PLATFORM_NAMESPACE => Ok(&self.platform),
            name if self.graph.contains(name) => Ok(&self.ordinary),
            name => {
                debug!("No resolver for namespace: {}", name);
                Err(KilnError::UnknownNamespace(name.to_string()))
            }
        }
    }
}

/// Strip one leading `segment` from a slash-separated path.
/// `strip_segment("lib/core/a.kn", "lib")` is `Some("core/a.kn")`.
pub(crate) fn strip_segment<'a>(path: &'a str, segment: &str) -> Option<&'a str> {
    path.strip_prefix(segment)
        .and_then(|rest| rest.strip_prefix('/'))
}

/// Render a relative native path in the slash-separated id form.
/// `None` for paths with non-UTF-8 or non-normal components.
pub(crate) fn slash_path(path: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            _ => return None,
        }
    }
    Some(parts.join("/"))
}
