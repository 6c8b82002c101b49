use kiln_plugin::AssetId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KilnError {
    /// The computed physical path does not exist. The only failure a
    /// caller should expect and handle; everything else is a fault.
    #[error("asset not found: {0}")]
    NotFound(AssetId),
    /// The id violates its namespace's path-shape contract.
    #[error("invalid asset id {id}: {reason}")]
    InvalidId { id: AssetId, reason: String },
    /// The namespace matches neither a known package nor a
    /// pseudo-namespace.
    #[error("unknown namespace: {0}")]
    UnknownNamespace(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl KilnError {
    /// True when the failure only means "asset absent".
    pub fn is_not_found(&self) -> bool {
        matches!(self, KilnError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, KilnError>;
