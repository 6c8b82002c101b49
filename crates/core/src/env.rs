//! Process-level environment introspection.
//!
//! Locates the installed platform sources the way `kiln` is laid out
//! on disk: `<prefix>/bin/kiln` next to `<prefix>/lib/platform`. A
//! checkout has no such prefix, which pushes the provider into the
//! archived platform layout.

use kiln_plugin::Environment;
use std::path::PathBuf;

/// Environment backed by the real process: executable location plus
/// `KILN_PLATFORM_ROOT` / `KILN_SUPPORT_ROOT` overrides.
pub struct ProcessEnvironment;

impl ProcessEnvironment {
    pub fn new() -> Self {
        Self
    }

    /// Install prefix: parent of the directory holding the executable.
    fn install_prefix() -> Option<PathBuf> {
        let exe = std::env::current_exe().ok()?;
        let bin = exe.parent()?;
        bin.parent().map(|p| p.to_path_buf())
    }

    fn platform_dir() -> Option<PathBuf> {
        if let Some(dir) = std::env::var_os("KILN_PLATFORM_ROOT") {
            return Some(PathBuf::from(dir));
        }

        let dir = Self::install_prefix()?.join("lib").join("platform");
        if dir.is_dir() { Some(dir) } else { None }
    }
}

impl Default for ProcessEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for ProcessEnvironment {
    fn running_from_install(&self) -> bool {
        Self::platform_dir().is_some()
    }

    fn platform_root(&self) -> Option<PathBuf> {
        Self::platform_dir()
    }

    fn bundled_support_root(&self) -> Option<PathBuf> {
        std::env::var_os("KILN_SUPPORT_ROOT").map(PathBuf::from)
    }
}
