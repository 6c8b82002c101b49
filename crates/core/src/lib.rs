pub mod error;
pub mod logging;

pub mod codec;
pub mod env;
pub mod graph;
pub mod provider;

pub use error::Result;
pub use provider::AssetProvider;
