//! The FilterPipeline chains rating filters.

use crate::traits::RatingFilter;
use anyhow::Result;
use data_loader::TitledRating;
use tracing;

/// Chains multiple rating filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(RatingRangeFilter::new(MIN_RATING, MAX_RATING))
///     .add_filter(MinimumRatingCountFilter::new(50));
///
/// let cleaned = pipeline.apply(ratings)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn RatingFilter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl RatingFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Names of the filters in application order
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Apply all filters in sequence, stopping at the first failure.
    pub fn apply(&self, ratings: Vec<TitledRating>) -> Result<Vec<TitledRating>> {
        let mut current = ratings;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current)?;
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        Ok(current)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{MinimumRatingCountFilter, RatingRangeFilter};

    fn rating(user_id: u32, title: &str, value: f32) -> TitledRating {
        TitledRating { user_id, title: title.to_string(), rating: value }
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline = FilterPipeline::new();
        let ratings = vec![rating(1, "Heat (1995)", 4.0), rating(2, "Heat (1995)", 3.0)];

        let filtered = pipeline.apply(ratings.clone()).unwrap();
        assert_eq!(filtered, ratings);
    }

    #[test]
    fn test_filters_run_in_order() {
        // The out-of-range rating must be removed before counting
        let pipeline = FilterPipeline::new()
            .add_filter(RatingRangeFilter::new(0.5, 5.0))
            .add_filter(MinimumRatingCountFilter::new(2));

        let ratings = vec![
            rating(1, "Heat (1995)", 4.0),
            rating(2, "Heat (1995)", 9.0),
            rating(1, "Casino (1995)", 4.0),
            rating(2, "Casino (1995)", 2.0),
        ];

        let filtered = pipeline.apply(ratings).unwrap();
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.title == "Casino (1995)"));
        assert_eq!(pipeline.filter_names(), vec!["RatingRangeFilter", "MinimumRatingCountFilter"]);
    }
}
