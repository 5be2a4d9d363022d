//! RatingsIndex loading, validation and the rating→title join.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::info;

impl RatingsIndex {
    /// Load a MovieLens-style ratings catalog from a directory
    ///
    /// Steps:
    /// 1. Parse movies.dat and ratings.dat in parallel
    /// 2. Build the index
    /// 3. Validate references and rating range
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading ratings catalog from {:?}", data_dir);

        let movies_path = data_dir.join("movies.dat");
        let ratings_path = data_dir.join("ratings.dat");

        let (movies, ratings) = rayon::join(
            || parser::parse_movie_titles(&movies_path),
            || parser::parse_ratings(&ratings_path),
        );
        let movies = movies?;
        let ratings = ratings?;

        info!("Loaded {} movies, {} ratings", movies.len(), ratings.len());

        let mut index = RatingsIndex::new();
        for movie in movies {
            index.insert_movie(movie);
        }
        for rating in ratings {
            index.insert_rating(rating);
        }

        index.validate()?;

        info!("RatingsIndex successfully built and validated");
        Ok(index)
    }

    /// Validate data integrity
    ///
    /// Every rating must reference a known movie and lie on the
    /// `[MIN_RATING, MAX_RATING]` scale.
    pub fn validate(&self) -> Result<()> {
        for rating in &self.ratings {
            if !self.movies.contains_key(&rating.movie_id) {
                return Err(DataLoadError::MissingReference {
                    entity: "Movie".to_string(),
                    id: rating.movie_id,
                });
            }
            if !(MIN_RATING..=MAX_RATING).contains(&rating.rating) {
                return Err(DataLoadError::InvalidValue {
                    field: "rating".to_string(),
                    value: rating.rating.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Join every rating to the raw title of its movie
    ///
    /// Ratings for unknown movies are skipped (inner join). Output order
    /// follows rating order.
    pub fn titled_ratings(&self) -> Vec<TitledRating> {
        self.ratings
            .iter()
            .filter_map(|rating| {
                let movie = self.movies.get(&rating.movie_id)?;
                Some(TitledRating {
                    user_id: rating.user_id,
                    title: movie.title.clone(),
                    rating: rating.rating,
                })
            })
            .collect()
    }
}
