//! Core traits for the rating cleaning pipeline.
//!
//! The collaborative space is only as good as the ratings it is built
//! from; each `RatingFilter` removes one kind of low-signal input.

use anyhow::Result;
use data_loader::TitledRating;

/// One cleaning stage applied to the titled ratings.
///
/// ## Design Note
/// - `Send + Sync` so a pipeline can be shared across build threads
/// - Filters take ownership of the ratings and return the kept subset,
///   preserving input order
pub trait RatingFilter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of ratings.
    fn apply(&self, ratings: Vec<TitledRating>) -> Result<Vec<TitledRating>>;
}
