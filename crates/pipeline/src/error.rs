//! Error types for offline index building.

use sources::IndexError;
use thiserror::Error;

/// Errors raised while building a similarity index
#[derive(Error, Debug)]
pub enum BuildError {
    /// No movie survived corpus building (e.g., none had an overview)
    #[error("Content corpus is empty after cleaning")]
    EmptyCorpus,

    /// No rating survived the rating filters
    #[error("No ratings left after filtering")]
    EmptyRatings,

    /// A build parameter is out of its valid range
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// A rating filter stage failed
    #[error("Rating filter failed: {0}")]
    Filter(anyhow::Error),

    /// The built matrix didn't fit its lookup table
    #[error(transparent)]
    Index(#[from] IndexError),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, BuildError>;
