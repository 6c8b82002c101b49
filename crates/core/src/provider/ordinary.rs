//! Resolver for ordinary installed packages.

use super::{NamespaceResolver, slash_path};
use crate::error::{KilnError, Result};
use kiln_plugin::{Asset, AssetId, PackageGraph};
use std::sync::Arc;
use tracing::debug;

/// Serves assets straight out of installed package roots. Public
/// assets live beneath each package's `lib` subtree; enumeration only
/// ever yields `lib/` ids.
pub struct PackageResolver {
    graph: Arc<dyn PackageGraph>,
}

impl PackageResolver {
    pub fn new(graph: Arc<dyn PackageGraph>) -> Self {
        Self { graph }
    }
}

impl NamespaceResolver for PackageResolver {
    fn fetch(&self, id: &AssetId) -> Result<Asset> {
        let package = self
            .graph
            .package(&id.namespace)
            .ok_or_else(|| KilnError::UnknownNamespace(id.namespace.clone()))?;

        let path = package.root.join(id.native_path());
        if !path.is_file() {
            debug!("Package asset missing on disk: {}", id);
            return Err(KilnError::NotFound(id.clone()));
        }

        Ok(Asset::File {
            id: id.clone(),
            path,
        })
    }

    fn enumerate(
        &self,
        namespace: &str,
    ) -> Result<Box<dyn Iterator<Item = AssetId> + Send + '_>> {
        let package = self
            .graph
            .package(namespace)
            .ok_or_else(|| KilnError::UnknownNamespace(namespace.to_string()))?;

        let lib_root = package.root.join("lib");
        let name = package.name;
        Ok(Box::new(
            self.graph
                .list_files(namespace, "lib")
                .filter_map(move |file| {
                    let rel = file.strip_prefix(&lib_root).ok()?;
                    let rel = slash_path(rel)?;
                    Some(AssetId::new(name.clone(), format!("lib/{}", rel)))
                }),
        ))
    }
}
