//! # Data Loader Crate
//!
//! Loads the raw catalogs the recommender is built from and persists the
//! precomputed artifacts it serves from.
//!
//! ## Main Components
//!
//! - **types**: Raw domain types (RawMovie, MovieEntry, Rating, TitledRating, RatingsIndex)
//! - **parser**: Parse MovieLens `.dat` files and the JSON content catalog
//! - **index**: Validate the ratings catalog and join ratings to titles
//! - **artifact**: bincode save/load for precomputed indices
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{RatingsIndex, parse_content_catalog};
//! use std::path::Path;
//!
//! let ratings = RatingsIndex::load_from_files(Path::new("data/ml-1m"))?;
//! let titled = ratings.titled_ratings();
//!
//! let movies = parse_content_catalog(Path::new("data/tmdb_movies.json"))?;
//! println!("{} ratings, {} content movies", titled.len(), movies.len());
//! ```

pub mod artifact;
pub mod error;
pub mod index;
pub mod parser;
pub mod types;

pub use artifact::{read_artifact, write_artifact};
pub use error::{DataLoadError, Result};
pub use parser::{parse_content_catalog, parse_movie_titles, parse_ratings};
pub use types::{
    // Type aliases
    MovieId,
    UserId,
    // Content catalog
    CastMember,
    CrewMember,
    NamedEntity,
    RawMovie,
    // Ratings catalog
    MovieEntry,
    Rating,
    RatingsIndex,
    TitledRating,
    MAX_RATING,
    MIN_RATING,
};
