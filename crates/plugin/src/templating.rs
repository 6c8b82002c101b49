//! Version-templating seam.

use std::collections::BTreeMap;
use std::path::Path;

/// Rewrites version placeholders in tool support sources.
///
/// Pure transform: the provider passes the file's text, a mapping of
/// every graph package name to its version string, and the file's
/// on-disk location (for diagnostics); the preprocessor's syntax and
/// semantics are its own business.
pub trait VersionTemplater: Send + Sync {
    fn render(&self, text: &str, versions: &BTreeMap<String, String>, source: &Path) -> String;
}
