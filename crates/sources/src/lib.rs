//! # Sources Crate
//!
//! The two similarity spaces a recommendation is blended from, and the
//! title normalization that cross-references them.
//!
//! ## Components
//!
//! ### Content Index
//! Similarity from textual metadata (plot, cast, genre, director):
//! - keyed by row position, with a parallel movie table (numeric movie id + display title)
//! - case-insensitive exact title lookup
//!
//! ### Collaborative Index
//! Similarity from user rating patterns:
//! - keyed by column position, with a parallel table of raw titles
//!   ("Toy Story (1995)")
//! - lookup by normalized title key, first occurrence wins
//! - `NaN` correlations are "no signal" and always rank last
//!
//! ### Title Normalizer
//! [`normalize_title`] strips a trailing `(YYYY)`, trims and lowercases.
//! It is the only bridge between the two id systems.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{CollaborativeIndex, ContentIndex, normalize_title};
//! use std::path::Path;
//!
//! let content = ContentIndex::load(Path::new("artifacts/content.bin"))?;
//! let collaborative = CollaborativeIndex::load(Path::new("artifacts/collaborative.bin"))?;
//!
//! let row = content.lookup_by_title("Toy Story", true).unwrap();
//! let column = collaborative.lookup_by_normalized_title(&normalize_title("Toy Story"));
//! let similar = content.neighbors(row, 10)?;
//! ```
//!
//! Both indices are immutable after construction, so they can be shared
//! behind an `Arc` and queried from any number of threads without locking.

pub mod collaborative;
pub mod content;
pub mod error;
pub mod matrix;
pub mod rank;
pub mod title;

pub use collaborative::CollaborativeIndex;
pub use content::{ContentIndex, MovieRecord};
pub use error::{IndexError, Result};
pub use matrix::SimilarityMatrix;
pub use title::normalize_title;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_reference_between_spaces() {
        let content = ContentIndex::new(
            vec![
                MovieRecord { movie_id: 862, title: "Toy Story".to_string(), tags: "toys".to_string() },
                MovieRecord { movie_id: 949, title: "Heat".to_string(), tags: "heist".to_string() },
            ],
            SimilarityMatrix::from_rows(vec![vec![1.0, 0.1], vec![0.1, 1.0]]).unwrap(),
        )
        .unwrap();
        let collaborative = CollaborativeIndex::new(
            vec!["Heat (1995)".to_string(), "Toy Story (1995)".to_string()],
            SimilarityMatrix::from_rows(vec![vec![1.0, 0.3], vec![0.3, 1.0]]).unwrap(),
        )
        .unwrap();

        let row = content.lookup_by_title("toy story", true).unwrap();
        let key = normalize_title(&content.movies()[row].title);

        assert_eq!(collaborative.lookup_by_normalized_title(&key), Some(1));
    }

    #[test]
    fn test_indices_are_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ContentIndex>();
        assert_send_sync::<CollaborativeIndex>();
    }
}
