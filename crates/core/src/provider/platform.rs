//! Resolver for the `platform` pseudo-namespace.
//!
//! Platform standard-library sources come in two physical layouts:
//! directly on disk when kiln runs from an installed prefix, or
//! compressed inside the bundled support package when running from a
//! development checkout. The layout is selected exactly once at
//! initialization and never re-evaluated per request; requests never
//! fall back to the other layout.
//!
//! Platform ids carry a doubled `lib` prefix (`lib/lib/<tree>`), the
//! generic public-asset convention stacked on the platform tree's own.
//! Downstream consumers depend on that exact shape, so enumeration
//! reproduces it verbatim.

use super::{NamespaceResolver, slash_path, strip_segment};
use crate::error::{KilnError, Result};
use kiln_plugin::{
    Asset, AssetId, COMPRESSED_MARKER, DecompressionCodec, Environment, PLATFORM_NAMESPACE,
    SOURCE_EXT,
};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use walkdir::WalkDir;

/// Physical layout of the platform sources, fixed for the process
/// lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformLayout {
    /// Sources sit directly under the installed platform root.
    Direct { root: PathBuf },
    /// Sources are stored compressed inside the bundled support
    /// package, each file name carrying the trailing marker character.
    Archived { archive_root: PathBuf },
}

impl PlatformLayout {
    /// Select the layout from the environment. Called once, at process
    /// initialization.
    pub fn detect(env: &dyn Environment) -> Result<Self> {
        if env.running_from_install() {
            let root = env.platform_root().ok_or_else(|| {
                KilnError::Internal("installed layout reports no platform root".to_string())
            })?;
            debug!("Platform sources served directly from {:?}", root);
            Ok(PlatformLayout::Direct { root })
        } else {
            let bundle = env.bundled_support_root().ok_or_else(|| {
                KilnError::Internal(
                    "development checkout without the bundled support package".to_string(),
                )
            })?;
            let archive_root = bundle.join("lib").join(PLATFORM_NAMESPACE);
            debug!("Platform sources served from archive at {:?}", archive_root);
            Ok(PlatformLayout::Archived { archive_root })
        }
    }
}

pub struct PlatformResolver {
    layout: PlatformLayout,
    codec: Arc<dyn DecompressionCodec>,
}

impl PlatformResolver {
    pub fn new(layout: PlatformLayout, codec: Arc<dyn DecompressionCodec>) -> Self {
        Self { layout, codec }
    }

    /// Consume the doubled `lib` prefix, leaving the path inside the
    /// platform tree.
    fn tree_path<'a>(&self, id: &'a AssetId) -> Result<&'a str> {
        strip_segment(&id.path, "lib")
            .and_then(|rest| strip_segment(rest, "lib"))
            .ok_or_else(|| KilnError::InvalidId {
                id: id.clone(),
                reason: "platform asset paths must start with two `lib` segments".to_string(),
            })
    }
}

impl NamespaceResolver for PlatformResolver {
    fn fetch(&self, id: &AssetId) -> Result<Asset> {
        let rest = self.tree_path(id)?;
        let native: PathBuf = rest.split('/').collect();

        match &self.layout {
            PlatformLayout::Direct { root } => {
                let path = root.join(native);
                if !path.is_file() {
                    debug!("Platform source missing on disk: {}", id);
                    return Err(KilnError::NotFound(id.clone()));
                }
                Ok(Asset::File {
                    id: id.clone(),
                    path,
                })
            }
            PlatformLayout::Archived { archive_root } => {
                let mut path = archive_root.join(native);
                append_marker(&mut path);
                if !path.is_file() {
                    debug!("Archived platform source missing: {}", id);
                    return Err(KilnError::NotFound(id.clone()));
                }

                // The decoder owns the file handle; dropping the
                // stream closes it on every exit path.
                let source = File::open(&path)?;
                let reader = self.codec.decode(Box::new(source))?;
                Ok(Asset::Stream {
                    id: id.clone(),
                    reader,
                })
            }
        }
    }

    fn enumerate(
        &self,
        _namespace: &str,
    ) -> Result<Box<dyn Iterator<Item = AssetId> + Send + '_>> {
        let (root, archived) = match &self.layout {
            PlatformLayout::Direct { root } => (root.clone(), false),
            PlatformLayout::Archived { archive_root } => (archive_root.clone(), true),
        };
        let suffix = format!(".{}", SOURCE_EXT);

        Ok(Box::new(
            WalkDir::new(&root)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file())
                .filter_map(move |entry| {
                    let rel = entry.path().strip_prefix(&root).ok()?;
                    let mut rel = slash_path(rel)?;
                    if archived {
                        // Only marked files are part of the archive
                        rel = rel.strip_suffix(COMPRESSED_MARKER)?.to_string();
                    }
                    if !rel.ends_with(&suffix) {
                        return None;
                    }
                    Some(AssetId::new(PLATFORM_NAMESPACE, format!("lib/lib/{}", rel)))
                }),
        ))
    }
}

/// Append the compressed-file marker to the final path segment.
fn append_marker(path: &mut PathBuf) {
    if let Some(name) = path.file_name() {
        let mut name = name.to_os_string();
        name.push(COMPRESSED_MARKER.to_string());
        path.set_file_name(name);
    }
}
