//! Collaborator seams and shared data model for the kiln asset provider.
//!
//! The provider in `kiln-core` consumes everything through the traits
//! defined here; concrete implementations live with whoever owns the
//! data (the dependency graph, the process environment, the templating
//! preprocessor, the decompression codec).

pub mod asset;
pub mod codec;
pub mod env;
pub mod graph;
pub mod templating;

pub use asset::{
    Asset, AssetId, ByteStream, COMPRESSED_MARKER, ENGINE_PACKAGE, PLATFORM_NAMESPACE, SOURCE_EXT,
    TOOL_NAMESPACE,
};
pub use codec::DecompressionCodec;
pub use env::Environment;
pub use graph::{PackageGraph, PackageInfo};
pub use templating::VersionTemplater;
