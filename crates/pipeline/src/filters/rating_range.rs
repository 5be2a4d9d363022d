//! Filter dropping ratings outside the rating scale.

use crate::traits::RatingFilter;
use anyhow::Result;
use data_loader::TitledRating;

/// Removes ratings that are not finite or fall outside `[min, max]`.
pub struct RatingRangeFilter {
    min: f32,
    max: f32,
}

impl RatingRangeFilter {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
}

impl RatingFilter for RatingRangeFilter {
    fn name(&self) -> &str {
        "RatingRangeFilter"
    }

    fn apply(&self, ratings: Vec<TitledRating>) -> Result<Vec<TitledRating>> {
        Ok(ratings
            .into_iter()
            .filter(|r| r.rating.is_finite() && r.rating >= self.min && r.rating <= self.max)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_range_filter() {
        let ratings: Vec<TitledRating> = [0.0, 0.5, 3.0, 5.0, 5.5, f32::NAN]
            .into_iter()
            .map(|rating| TitledRating { user_id: 1, title: "Heat (1995)".to_string(), rating })
            .collect();

        let filtered = RatingRangeFilter::new(0.5, 5.0).apply(ratings).unwrap();
        let values: Vec<f32> = filtered.iter().map(|r| r.rating).collect();

        assert_eq!(values, vec![0.5, 3.0, 5.0]);
    }
}
