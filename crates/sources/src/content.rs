//! Content Similarity Index
//!
//! Similarity derived from textual metadata (plot, cast, genre, crew).
//!
//! ## Layout
//! Row `i` of the matrix belongs to `movies[i]` for the lifetime of the
//! index. Rows are assigned once when the index is built and never move.
//!
//! ## Query contract
//! - `lookup_by_title`: exact title match, case-insensitive by default,
//!   first matching row wins; no fuzzy fallback
//! - `neighbors`: top-k rows by descending score, query row excluded, ties
//!   in ascending row order

use crate::error::{IndexError, Result};
use crate::matrix::SimilarityMatrix;
use crate::rank;
use data_loader::{MovieId, read_artifact, write_artifact};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// One movie of the content space
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub movie_id: MovieId,
    /// Display title, also the join key into the collaborative space
    pub title: String,
    /// Normalized "tag soup" the similarity was computed from
    pub tags: String,
}

/// Serialized form; deserialization goes through [`ContentIndex::new`]
#[derive(Deserialize)]
struct ContentParts {
    movies: Vec<MovieRecord>,
    matrix: SimilarityMatrix,
}

impl TryFrom<ContentParts> for ContentIndex {
    type Error = IndexError;

    fn try_from(parts: ContentParts) -> Result<Self> {
        parts.matrix.check_shape()?;
        ContentIndex::new(parts.movies, parts.matrix)
    }
}

/// Row-ordered movie table plus its movie×movie cosine similarity matrix
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ContentParts")]
pub struct ContentIndex {
    movies: Vec<MovieRecord>,
    matrix: SimilarityMatrix,
}

impl ContentIndex {
    /// Pair a movie table with its similarity matrix
    ///
    /// Fails with `DimensionMismatch` unless the matrix has one row per movie.
    pub fn new(movies: Vec<MovieRecord>, matrix: SimilarityMatrix) -> Result<Self> {
        if matrix.size() != movies.len() {
            return Err(IndexError::DimensionMismatch(format!(
                "content matrix is {}x{} but the movie table has {} rows",
                matrix.size(),
                matrix.size(),
                movies.len()
            )));
        }
        Ok(Self { movies, matrix })
    }

    /// Number of movies (rows)
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// The movie table in row order
    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    /// Movie stored at `row`
    pub fn movie(&self, row: usize) -> Option<&MovieRecord> {
        self.movies.get(row)
    }

    /// Resolve a display title to its row
    ///
    /// With `case_insensitive` the comparison lowercases both sides.
    /// Returns the first matching row.
    pub fn lookup_by_title(&self, title: &str, case_insensitive: bool) -> Option<usize> {
        if case_insensitive {
            let wanted = title.to_lowercase();
            self.movies
                .iter()
                .position(|movie| movie.title.to_lowercase() == wanted)
        } else {
            self.movies.iter().position(|movie| movie.title == title)
        }
    }

    /// Full similarity row for `row`, one score per movie in row order
    pub fn scores(&self, row: usize) -> Result<&[f32]> {
        self.matrix.row(row).ok_or(IndexError::RowOutOfRange {
            position: row,
            len: self.movies.len(),
        })
    }

    /// Top-`k` most similar rows to `row`, excluding `row` itself
    pub fn neighbors(&self, row: usize, k: usize) -> Result<Vec<(usize, f32)>> {
        let scores = self.scores(row)?;
        Ok(rank::top_k(scores, row, k))
    }

    /// Content-only recommendations for a display title
    pub fn neighbors_of_title(&self, title: &str, k: usize) -> Result<Vec<(usize, f32)>> {
        let row = self
            .lookup_by_title(title, true)
            .ok_or_else(|| IndexError::NotFound {
                title: title.to_string(),
            })?;
        debug!("Resolved '{}' to content row {}", title, row);
        self.neighbors(row, k)
    }

    /// Case-insensitive substring search over display titles
    ///
    /// Exact matches come first, then substring matches; each group keeps
    /// row order.
    pub fn search(&self, fragment: &str, limit: usize) -> Vec<usize> {
        let fragment = fragment.trim().to_lowercase();
        if fragment.is_empty() {
            return Vec::new();
        }

        let mut exact = Vec::new();
        let mut partial = Vec::new();
        for (row, movie) in self.movies.iter().enumerate() {
            let title = movie.title.to_lowercase();
            if title == fragment {
                exact.push(row);
            } else if title.contains(&fragment) {
                partial.push(row);
            }
        }

        exact.extend(partial);
        exact.truncate(limit);
        exact
    }

    /// Write the index as a binary artifact
    pub fn save(&self, path: &Path) -> Result<()> {
        write_artifact(path, self)?;
        info!("Saved content index ({} movies) to {:?}", self.len(), path);
        Ok(())
    }

    /// Load and validate a binary artifact written by [`ContentIndex::save`]
    pub fn load(path: &Path) -> Result<Self> {
        let index: Self = read_artifact(path)?;
        info!("Loaded content index ({} movies) from {:?}", index.len(), path);
        Ok(index)
    }
}
