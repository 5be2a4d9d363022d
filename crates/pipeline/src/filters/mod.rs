//! Filter implementations for the rating cleaning pipeline.

pub mod minimum_rating_count;
pub mod rating_range;

// Re-export for convenience
pub use minimum_rating_count::MinimumRatingCountFilter;
pub use rating_range::RatingRangeFilter;
