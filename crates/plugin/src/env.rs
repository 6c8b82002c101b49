//! Environment introspection seam.

use std::path::PathBuf;

/// Answers the one-time questions asked at provider initialization:
/// which physical platform layout applies, and where its roots live.
pub trait Environment: Send + Sync {
    /// Whether the process runs from an installed/packaged layout
    /// rather than a development checkout.
    fn running_from_install(&self) -> bool;

    /// Directory directly containing the platform standard-library
    /// sources, when installed.
    fn platform_root(&self) -> Option<PathBuf>;

    /// Root of the bundled support package carrying the archived copy
    /// of the platform sources, when running from a checkout.
    fn bundled_support_root(&self) -> Option<PathBuf>;
}
