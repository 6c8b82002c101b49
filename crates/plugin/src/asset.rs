//! Asset identifiers and resolved asset content.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Read};
use std::path::PathBuf;

/// Pseudo-namespace exposing the tool's own support sources.
pub const TOOL_NAMESPACE: &str = "tool";

/// Pseudo-namespace exposing the platform standard-library sources.
pub const PLATFORM_NAMESPACE: &str = "platform";

/// Package name of the asset-graph engine. A graph without this package
/// never loads transform code, which lets the tool resolver skip the
/// version-templating pass.
pub const ENGINE_PACKAGE: &str = "graphite";

/// Extension of kiln source files.
pub const SOURCE_EXT: &str = "kn";

/// Trailing character marking a compressed file in the archived
/// platform layout.
pub const COMPRESSED_MARKER: char = '_';

/// Logical reference to one asset: a namespace (a real package name or
/// one of the two reserved pseudo-names) plus a slash-separated relative
/// path, conventionally rooted at a `lib` segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId {
    pub namespace: String,
    pub path: String,
}

impl AssetId {
    pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            path: path.into(),
        }
    }

    /// Whether the namespace is one of the reserved pseudo-names.
    pub fn is_pseudo(&self) -> bool {
        self.namespace == TOOL_NAMESPACE || self.namespace == PLATFORM_NAMESPACE
    }

    /// The slash-separated path in the platform's native form.
    pub fn native_path(&self) -> PathBuf {
        self.path.split('/').collect()
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.namespace, self.path)
    }
}

/// Lazy, pull-based byte sequence. Dropping the stream releases the
/// underlying file handle and any codec state, on every exit path.
pub type ByteStream = Box<dyn Read + Send>;

/// Resolved asset content.
pub enum Asset {
    /// On-disk file; content is read lazily by the caller.
    File { id: AssetId, path: PathBuf },
    /// Content already materialized, e.g. after preprocessing.
    Text { id: AssetId, contents: String },
    /// Lazily decompressed content.
    Stream { id: AssetId, reader: ByteStream },
}

impl Asset {
    pub fn id(&self) -> &AssetId {
        match self {
            Asset::File { id, .. } | Asset::Text { id, .. } | Asset::Stream { id, .. } => id,
        }
    }

    /// Drain the asset into a byte buffer. Consumes the asset: a
    /// `Stream` variant is single-pass.
    pub fn read_bytes(self) -> io::Result<Vec<u8>> {
        match self {
            Asset::File { path, .. } => std::fs::read(path),
            Asset::Text { contents, .. } => Ok(contents.into_bytes()),
            Asset::Stream { mut reader, .. } => {
                let mut buf = Vec::new();
                reader.read_to_end(&mut buf)?;
                Ok(buf)
            }
        }
    }
}

impl fmt::Debug for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Asset::File { id, path } => f
                .debug_struct("Asset::File")
                .field("id", id)
                .field("path", path)
                .finish(),
            Asset::Text { id, contents } => f
                .debug_struct("Asset::Text")
                .field("id", id)
                .field("len", &contents.len())
                .finish(),
            Asset::Stream { id, .. } => f
                .debug_struct("Asset::Stream")
                .field("id", id)
                .finish_non_exhaustive(),
        }
    }
}
