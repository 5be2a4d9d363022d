//! Filter removing rarely rated titles.
//!
//! A title rated by only a handful of users produces a noisy item vector,
//! so titles are kept only once they reach a minimum number of ratings.

use crate::traits::RatingFilter;
use anyhow::Result;
use data_loader::TitledRating;
use std::collections::HashMap;

/// Keeps ratings whose title was rated at least `min_count` times.
///
/// ## Algorithm
/// 1. Count ratings per raw title (duplicate user ratings count too)
/// 2. Keep every rating whose title count is >= min_count
pub struct MinimumRatingCountFilter {
    min_count: usize,
}

impl MinimumRatingCountFilter {
    /// Create a new MinimumRatingCountFilter (typically 50)
    pub fn new(min_count: usize) -> Self {
        Self { min_count }
    }
}

impl RatingFilter for MinimumRatingCountFilter {
    fn name(&self) -> &str {
        "MinimumRatingCountFilter"
    }

    fn apply(&self, ratings: Vec<TitledRating>) -> Result<Vec<TitledRating>> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for rating in &ratings {
            *counts.entry(rating.title.as_str()).or_insert(0) += 1;
        }
        let keep: Vec<bool> = ratings
            .iter()
            .map(|r| counts.get(r.title.as_str()).copied().unwrap_or(0) >= self.min_count)
            .collect();

        Ok(ratings
            .into_iter()
            .zip(keep)
            .filter_map(|(rating, keep)| keep.then_some(rating))
            .collect())
    }
}
