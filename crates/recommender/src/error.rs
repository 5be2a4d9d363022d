//! Error taxonomy of the recommendation core.

use sources::IndexError;
use thiserror::Error;

/// Errors surfaced to callers of the recommender
///
/// A query that resolves only in the content space is not an error; it
/// comes back as a content-only result.
#[derive(Error, Debug)]
pub enum RecommendError {
    /// The query title has no case-insensitive exact match in the content space
    #[error("Movie not found: {title}")]
    MovieNotFound { title: String },

    /// The weight pair is not finite, is negative, or does not sum to 1
    #[error("Invalid weights: content={content}, collaborative={collaborative} (must be non-negative and sum to 1.0)")]
    InvalidWeights { content: f32, collaborative: f32 },

    /// An index artifact failed to load at startup
    #[error("Failed to load {artifact} artifact: {source}")]
    ArtifactLoadFailure {
        artifact: String,
        #[source]
        source: IndexError,
    },

    /// The loaded indices disagree with their own lookup tables
    #[error(transparent)]
    Index(#[from] IndexError),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, RecommendError>;
