//! Offline builds of the two similarity spaces.
//!
//! This crate provides:
//! - Content build: tag-soup corpus, count vectorizer, cosine similarity
//! - Collaborative build: rating filters, user×title pivot, truncated SVD,
//!   Pearson correlation
//! - RatingFilter trait and FilterPipeline for composing rating filters
//!
//! ## Architecture
//! Both builds are pure functions of their inputs and config. They run
//! once, offline, and their output indices are written as artifacts that
//! the recommender loads at startup.
//!
//! ```text
//! RawMovie[] ──corpus──▶ tag soups ──vectorize──▶ counts ──cosine──▶ ContentIndex
//!
//! TitledRating[] ──filters──▶ pivot ──SVD──▶ item vectors ──Pearson──▶ CollaborativeIndex
//! ```
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{build_collaborative_index, build_content_index};
//! use pipeline::{CollaborativeBuildConfig, ContentBuildConfig};
//!
//! let movies = data_loader::parse_content_catalog(Path::new("data/movies.json"))?;
//! let content = build_content_index(&movies, &ContentBuildConfig::default())?;
//! content.save(Path::new("artifacts/content.bin"))?;
//!
//! let ratings = RatingsIndex::load_from_files(Path::new("data/ml-1m"))?;
//! let collaborative = build_collaborative_index(ratings.titled_ratings(), &CollaborativeBuildConfig::default())?;
//! collaborative.save(Path::new("artifacts/collaborative.bin"))?;
//! ```

pub mod collaborative;
pub mod config;
pub mod content;
pub mod corpus;
pub mod correlation;
pub mod error;
pub mod filter_pipeline;
pub mod filters;
pub mod rating_matrix;
pub mod svd;
pub mod traits;
pub mod vectorizer;

// Re-export main types
pub use collaborative::{build_collaborative_index, build_from_ratings_index};
pub use config::{CollaborativeBuildConfig, ContentBuildConfig};
pub use content::build_content_index;
pub use corpus::build_corpus;
pub use error::{BuildError, Result};
pub use filter_pipeline::FilterPipeline;
pub use traits::RatingFilter;
pub use vectorizer::CountVectorizer;
