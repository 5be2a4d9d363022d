//! Collaborative Similarity Index
//!
//! Similarity derived from patterns of user ratings: a title×title Pearson
//! correlation matrix over low-rank item vectors.
//!
//! ## Layout
//! Column `j` of the matrix belongs to `titles[j]`, a raw ratings-catalog
//! title such as "Toy Story (1995)". Raw titles may repeat.
//!
//! ## Query contract
//! - `lookup_by_normalized_title`: every raw title is normalized once when
//!   the index is built or loaded; the first column whose key equals the
//!   query wins. Duplicate keys are kept, not merged.
//! - `neighbors`: top-k columns by descending correlation, self excluded.
//!   `NaN` correlations mean "no signal": they rank below every real score,
//!   and a column whose candidates are all `NaN` has no neighbors.

use crate::error::{IndexError, Result};
use crate::matrix::SimilarityMatrix;
use crate::rank;
use crate::title::normalize_title;
use data_loader::{read_artifact, write_artifact};
use rayon::prelude::*;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Serialized form; normalized keys are rebuilt on load
#[derive(Deserialize)]
struct CollaborativeParts {
    titles: Vec<String>,
    matrix: SimilarityMatrix,
}

#[derive(Serialize)]
struct CollaborativePartsRef<'a> {
    titles: &'a [String],
    matrix: &'a SimilarityMatrix,
}

impl TryFrom<CollaborativeParts> for CollaborativeIndex {
    type Error = IndexError;

    fn try_from(parts: CollaborativeParts) -> Result<Self> {
        parts.matrix.check_shape()?;
        CollaborativeIndex::new(parts.titles, parts.matrix)
    }
}

/// Column-ordered title table plus its title×title correlation matrix
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "CollaborativeParts")]
pub struct CollaborativeIndex {
    titles: Vec<String>,
    /// `normalize_title(titles[j])`, same order as `titles`
    keys: Vec<String>,
    /// Normalized key -> first column carrying it
    first_column: HashMap<String, usize>,
    matrix: SimilarityMatrix,
}

impl Serialize for CollaborativeIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        CollaborativePartsRef {
            titles: &self.titles,
            matrix: &self.matrix,
        }
        .serialize(serializer)
    }
}

impl CollaborativeIndex {
    /// Pair a title table with its correlation matrix and build the key lookup
    pub fn new(titles: Vec<String>, matrix: SimilarityMatrix) -> Result<Self> {
        if matrix.size() != titles.len() {
            return Err(IndexError::DimensionMismatch(format!(
                "collaborative matrix is {}x{} but the title table has {} columns",
                matrix.size(),
                matrix.size(),
                titles.len()
            )));
        }

        let keys: Vec<String> = titles.par_iter().map(|t| normalize_title(t)).collect();

        let mut first_column = HashMap::with_capacity(keys.len());
        for (column, key) in keys.iter().enumerate() {
            first_column.entry(key.clone()).or_insert(column);
        }
        if first_column.len() < keys.len() {
            debug!(
                "{} collaborative titles share a normalized key with an earlier title",
                keys.len() - first_column.len()
            );
        }

        Ok(Self {
            titles,
            keys,
            first_column,
            matrix,
        })
    }

    /// Number of titles (columns)
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Raw titles in column order
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Raw title of `column`
    pub fn title(&self, column: usize) -> Option<&str> {
        self.titles.get(column).map(String::as_str)
    }

    /// Normalized keys in column order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Resolve an already-normalized key to its first column
    pub fn lookup_by_normalized_title(&self, key: &str) -> Option<usize> {
        self.first_column.get(key).copied()
    }

    /// Full correlation row for `column`; entries may be `NaN`
    pub fn scores(&self, column: usize) -> Result<&[f32]> {
        self.matrix.row(column).ok_or(IndexError::RowOutOfRange {
            position: column,
            len: self.titles.len(),
        })
    }

    /// Top-`k` most correlated titles to `column`, excluding `column` itself
    pub fn neighbors(&self, column: usize, k: usize) -> Result<Vec<(String, f32)>> {
        let scores = self.scores(column)?;

        let has_signal = scores
            .iter()
            .enumerate()
            .any(|(j, score)| j != column && !score.is_nan());
        if !has_signal {
            debug!("Column {} has no correlation signal", column);
            return Ok(Vec::new());
        }

        Ok(rank::top_k(scores, column, k)
            .into_iter()
            .map(|(j, score)| (self.titles[j].clone(), score))
            .collect())
    }

    /// Collaborative-only recommendations for a display title
    ///
    /// The title is normalized first, so "Toy Story" and "toy story (1995)"
    /// resolve to the same column.
    pub fn neighbors_of_title(&self, title: &str, k: usize) -> Result<Vec<(String, f32)>> {
        let column = self
            .lookup_by_normalized_title(&normalize_title(title))
            .ok_or_else(|| IndexError::NotFound {
                title: title.to_string(),
            })?;
        self.neighbors(column, k)
    }

    /// Write the index as a binary artifact
    pub fn save(&self, path: &Path) -> Result<()> {
        write_artifact(path, self)?;
        info!("Saved collaborative index ({} titles) to {:?}", self.len(), path);
        Ok(())
    }

    /// Load a binary artifact and rebuild the normalized key lookup
    pub fn load(path: &Path) -> Result<Self> {
        let index: Self = read_artifact(path)?;
        info!("Loaded collaborative index ({} titles) from {:?}", index.len(), path);
        Ok(index)
    }
}
