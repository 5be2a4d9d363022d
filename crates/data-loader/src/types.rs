//! Core domain types for the two raw catalogs.
//!
//! Two structurally different datasets feed the recommender:
//! - the **content catalog**: one record per movie with plot, genres,
//!   keywords, cast and crew, keyed by a numeric movie id
//! - the **ratings catalog**: MovieLens users rating movies, where movies are
//!   identified by free-text titles that embed a release year
//!
//! Nothing here knows how the two are reconciled; that happens in `sources`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a rating user
pub type UserId = u32;

/// Unique identifier for a movie within one catalog
///
/// The content catalog and the ratings catalog use unrelated id spaces,
/// so a `MovieId` from one must never be looked up in the other.
pub type MovieId = u32;

// =============================================================================
// Content Catalog
// =============================================================================

/// A named entry in a metadata list (genre, keyword)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedEntity {
    pub name: String,
}

/// A cast member, billed in `order` (lower means more prominent)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub name: String,
    #[serde(default)]
    pub order: Option<u32>,
}

/// A crew member with their job on the movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewMember {
    pub name: String,
    pub job: String,
}

/// One movie of the content catalog, as it comes out of the raw dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMovie {
    pub movie_id: MovieId,
    pub title: String,
    /// Plot summary. Movies without one are dropped from the corpus.
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub genres: Vec<NamedEntity>,
    #[serde(default)]
    pub keywords: Vec<NamedEntity>,
    /// Cast in billing order as listed in the dataset
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

impl RawMovie {
    /// Name of the first crew member credited as "Director", if any
    pub fn director(&self) -> Option<&str> {
        self.crew
            .iter()
            .find(|member| member.job == "Director")
            .map(|member| member.name.as_str())
    }
}

// =============================================================================
// Ratings Catalog
// =============================================================================

/// A movie of the ratings catalog (MovieLens `movies.dat`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieEntry {
    pub id: MovieId,
    /// Raw title, usually with the release year: "Toy Story (1995)"
    pub title: String,
}

/// A single rating from a user for a movie
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    /// Rating value on the MovieLens scale
    pub rating: f32,
}

/// A rating joined to the raw title of the movie it refers to
///
/// This is the record the collaborative space is built from: the
/// user×title matrix is keyed by title, not by movie id, so two MovieLens
/// ids sharing a title collapse into one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitledRating {
    pub user_id: UserId,
    pub title: String,
    pub rating: f32,
}

/// Lowest rating on the MovieLens scale
pub const MIN_RATING: f32 = 0.5;

/// Highest rating on the MovieLens scale
pub const MAX_RATING: f32 = 5.0;

// =============================================================================
// RatingsIndex - in-memory ratings catalog
// =============================================================================

/// Ratings catalog with the movie titles needed to join ratings to titles.
#[derive(Debug)]
pub struct RatingsIndex {
    pub(crate) movies: HashMap<MovieId, MovieEntry>,
    /// Ratings in file order
    pub(crate) ratings: Vec<Rating>,
}

impl RatingsIndex {
    /// Creates a new, empty RatingsIndex
    pub fn new() -> Self {
        Self {
            movies: HashMap::new(),
            ratings: Vec::new(),
        }
    }

    /// Get a movie by ID
    pub fn get_movie(&self, id: MovieId) -> Option<&MovieEntry> {
        self.movies.get(&id)
    }

    /// All ratings in insertion order
    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    /// Insert a movie into the index
    pub fn insert_movie(&mut self, movie: MovieEntry) {
        self.movies.insert(movie.id, movie);
    }

    /// Insert a rating
    pub fn insert_rating(&mut self, rating: Rating) {
        self.ratings.push(rating);
    }

    /// Get (movies, ratings) counts for logging/validation
    pub fn counts(&self) -> (usize, usize) {
        (self.movies.len(), self.ratings.len())
    }
}

impl Default for RatingsIndex {
    fn default() -> Self {
        Self::new()
    }
}
