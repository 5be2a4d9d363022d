//! Collaborative similarity build.
//!
//! ratings -> filters -> user×title pivot -> truncated SVD -> Pearson

use crate::config::CollaborativeBuildConfig;
use crate::correlation::pearson_correlation;
use crate::error::{BuildError, Result};
use crate::filter_pipeline::FilterPipeline;
use crate::filters::{MinimumRatingCountFilter, RatingRangeFilter};
use crate::rating_matrix::RatingMatrix;
use crate::svd::TruncatedSvd;
use data_loader::{MAX_RATING, MIN_RATING, RatingsIndex, TitledRating};
use sources::CollaborativeIndex;
use std::time::Instant;
use tracing::{info, instrument};

/// The rating filters applied before the pivot
pub fn rating_filters(config: &CollaborativeBuildConfig) -> FilterPipeline {
    FilterPipeline::new()
        .add_filter(RatingRangeFilter::new(MIN_RATING, MAX_RATING))
        .add_filter(MinimumRatingCountFilter::new(config.min_ratings_per_title))
}

/// Build the collaborative index from titled ratings
#[instrument(skip(ratings, config), fields(ratings = ratings.len()))]
pub fn build_collaborative_index(
    ratings: Vec<TitledRating>,
    config: &CollaborativeBuildConfig,
) -> Result<CollaborativeIndex> {
    config.validate()?;
    let start = Instant::now();

    let filtered = rating_filters(config).apply(ratings).map_err(BuildError::Filter)?;
    if filtered.is_empty() {
        return Err(BuildError::EmptyRatings);
    }

    let matrix = RatingMatrix::from_ratings(&filtered)?;
    info!(
        "Pivoted {} ratings into {} users x {} titles",
        filtered.len(),
        matrix.users().len(),
        matrix.titles().len()
    );

    let projections = TruncatedSvd::new(config).fit_transform(&matrix.item_user())?;
    let correlations = pearson_correlation(&projections)?;
    let index = CollaborativeIndex::new(matrix.into_titles(), correlations)?;

    info!("Built collaborative index for {} titles in {:.2?}", index.len(), start.elapsed());
    Ok(index)
}

/// Join a loaded ratings catalog to its titles and build from that
pub fn build_from_ratings_index(
    ratings: &RatingsIndex,
    config: &CollaborativeBuildConfig,
) -> Result<CollaborativeIndex> {
    build_collaborative_index(ratings.titled_ratings(), config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating(user_id: u32, title: &str, value: f32) -> TitledRating {
        TitledRating { user_id, title: title.to_string(), rating: value }
    }

    #[test]
    fn test_rarely_rated_titles_are_dropped() {
        let mut ratings = Vec::new();
        for user_id in 0..4 {
            ratings.push(rating(user_id, "Heat (1995)", 1.0 + user_id as f32));
            ratings.push(rating(user_id, "Casino (1995)", 4.0 - user_id as f32 * 0.5));
            ratings.push(rating(user_id, "Sabrina (1995)", 3.0));
        }
        ratings.push(rating(9, "Nixon (1995)", 5.0));

        let config = CollaborativeBuildConfig::default()
            .with_min_ratings_per_title(2)
            .with_components(2);
        let index = build_collaborative_index(ratings, &config).unwrap();

        assert_eq!(index.titles(), &["Casino (1995)", "Heat (1995)", "Sabrina (1995)"]);
        assert_eq!(index.lookup_by_normalized_title("nixon"), None);
    }

    #[test]
    fn test_everything_filtered_out() {
        let ratings = vec![rating(1, "Heat (1995)", 4.0)];
        let config = CollaborativeBuildConfig::default();

        assert!(matches!(
            build_collaborative_index(ratings, &config),
            Err(BuildError::EmptyRatings)
        ));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = CollaborativeBuildConfig::default().with_components(0);
        assert!(matches!(
            build_collaborative_index(vec![], &config),
            Err(BuildError::InvalidParameter { name: "n_components", .. })
        ));
    }
}
