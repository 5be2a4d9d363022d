//! Error types for the similarity indices.

use data_loader::DataLoadError;
use thiserror::Error;

/// Errors raised while building, loading or querying a similarity index
#[derive(Error, Debug)]
pub enum IndexError {
    /// Title has no exact match in the index lookup table
    #[error("Title not found: {title}")]
    NotFound { title: String },

    /// Row (content) or column (collaborative) position outside the table
    #[error("Position {position} out of range for an index of {len} entries")]
    RowOutOfRange { position: usize, len: usize },

    /// Matrix shape doesn't agree with its lookup table
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Artifact couldn't be read or written
    #[error("Artifact error: {0}")]
    Load(#[from] DataLoadError),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, IndexError>;
