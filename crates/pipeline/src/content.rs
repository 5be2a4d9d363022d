//! Content similarity build: corpus -> count vectors -> cosine matrix.

use crate::config::ContentBuildConfig;
use crate::corpus::build_corpus;
use crate::error::{BuildError, Result};
use crate::vectorizer::{CountVectorizer, SparseVector};
use data_loader::RawMovie;
use rayon::prelude::*;
use sources::{ContentIndex, MovieRecord, SimilarityMatrix};
use std::time::Instant;
use tracing::{info, instrument};

/// Build the content index for a raw catalog
#[instrument(skip(movies, config), fields(movies = movies.len()))]
pub fn build_content_index(movies: &[RawMovie], config: &ContentBuildConfig) -> Result<ContentIndex> {
    config.validate()?;
    let start = Instant::now();

    let records = build_corpus(movies, config);
    if records.is_empty() {
        return Err(BuildError::EmptyCorpus);
    }
    let index = index_from_records(records, config)?;

    info!("Built content index for {} movies in {:.2?}", index.len(), start.elapsed());
    Ok(index)
}

/// Vectorize prepared records and pair them with their similarity matrix
pub fn index_from_records(records: Vec<MovieRecord>, config: &ContentBuildConfig) -> Result<ContentIndex> {
    let documents: Vec<&str> = records.iter().map(|r| r.tags.as_str()).collect();
    let vectorized = CountVectorizer::new(config).fit_transform(&documents);
    let matrix = cosine_similarity(&vectorized.vectors)?;
    Ok(ContentIndex::new(records, matrix)?)
}

/// Pairwise cosine similarity, one row computed per task
///
/// Zero vectors score 0 against everything; the diagonal is always 1.
pub fn cosine_similarity(vectors: &[SparseVector]) -> Result<SimilarityMatrix> {
    let norms: Vec<f32> = vectors.par_iter().map(SparseVector::norm).collect();

    let rows: Vec<Vec<f32>> = (0..vectors.len())
        .into_par_iter()
        .map(|i| {
            (0..vectors.len())
                .map(|j| {
                    if i == j {
                        1.0
                    } else if norms[i] == 0.0 || norms[j] == 0.0 {
                        0.0
                    } else {
                        (vectors[i].dot(&vectors[j]) / (norms[i] * norms[j])).clamp(-1.0, 1.0)
                    }
                })
                .collect()
        })
        .collect();

    Ok(SimilarityMatrix::from_rows(rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u32, title: &str, tags: &str) -> MovieRecord {
        MovieRecord { movie_id: id, title: title.to_string(), tags: tags.to_string() }
    }

    #[test]
    fn test_cosine_similarity() {
        let vectors = vec![
            SparseVector { indices: vec![0, 1], values: vec![1.0, 1.0] },
            SparseVector { indices: vec![0], values: vec![2.0] },
            SparseVector::default(),
        ];
        let matrix = cosine_similarity(&vectors).unwrap();

        assert!((matrix.get(0, 1).unwrap() - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6);
        assert_eq!(matrix.get(1, 0), matrix.get(0, 1));
        assert_eq!(matrix.get(2, 0), Some(0.0));
        assert_eq!(matrix.get(2, 2), Some(1.0));
    }

    #[test]
    fn test_index_from_records_keeps_row_order() {
        let records = vec![
            record(1, "Toy Story", "toys cowboy pixar"),
            record(2, "Toy Story 2", "toys cowboy pixar sequel"),
            record(3, "Heat", "heist detective losangeles"),
        ];
        let index = index_from_records(records, &ContentBuildConfig::default()).unwrap();

        assert_eq!(index.movie(2).unwrap().title, "Heat");
        let neighbors = index.neighbors(0, 2).unwrap();
        assert_eq!(neighbors[0].0, 1);
        assert_eq!(neighbors[1], (2, 0.0));
    }

    #[test]
    fn test_empty_corpus() {
        let movie = RawMovie {
            movie_id: 1,
            title: "Untitled".to_string(),
            overview: None,
            genres: vec![],
            keywords: vec![],
            cast: vec![],
            crew: vec![],
        };
        let err = build_content_index(&[movie], &ContentBuildConfig::default()).unwrap_err();
        assert!(matches!(err, BuildError::EmptyCorpus));
    }
}
