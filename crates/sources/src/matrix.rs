//! Dense square similarity matrix.

use crate::error::{IndexError, Result};
use serde::{Deserialize, Serialize};

/// Dense, row-major, square matrix of pairwise similarities.
///
/// Entry `[i][j]` is the similarity between item `i` and item `j` of the
/// lookup table that owns the matrix. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f32>,
}

impl SimilarityMatrix {
    /// Build from a flat row-major buffer of `size * size` values
    pub fn from_vec(size: usize, values: Vec<f32>) -> Result<Self> {
        let expected = size.checked_mul(size).ok_or_else(|| {
            IndexError::DimensionMismatch(format!("matrix size {} overflows", size))
        })?;
        if values.len() != expected {
            return Err(IndexError::DimensionMismatch(format!(
                "expected {} values for a {}x{} matrix, found {}",
                expected,
                size,
                size,
                values.len()
            )));
        }
        Ok(Self { size, values })
    }

    /// Build from one vector per row; every row must have `rows.len()` entries
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let size = rows.len();
        let mut values = Vec::with_capacity(size * size);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(IndexError::DimensionMismatch(format!(
                    "row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    size
                )));
            }
            values.extend(row);
        }
        Ok(Self { size, values })
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    /// Borrow row `i`
    pub fn row(&self, i: usize) -> Option<&[f32]> {
        if i >= self.size {
            return None;
        }
        let start = i * self.size;
        Some(&self.values[start..start + self.size])
    }

    /// Entry `[i][j]`
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        if j >= self.size {
            return None;
        }
        self.row(i).map(|row| row[j])
    }

    /// Check the flat buffer still matches the declared size.
    ///
    /// Deserialized matrices skip the constructors, so loaders call this.
    pub(crate) fn check_shape(&self) -> Result<()> {
        if self.size.checked_mul(self.size) != Some(self.values.len()) {
            return Err(IndexError::DimensionMismatch(format!(
                "declared size {} doesn't match {} stored values",
                self.size,
                self.values.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_and_access() {
        let matrix = SimilarityMatrix::from_rows(vec![
            vec![1.0, 0.8],
            vec![0.8, 1.0],
        ])
        .unwrap();

        assert_eq!(matrix.size(), 2);
        assert_eq!(matrix.row(1), Some(&[0.8, 1.0][..]));
        assert_eq!(matrix.get(0, 1), Some(0.8));
        assert_eq!(matrix.get(0, 2), None);
        assert!(matrix.row(2).is_none());
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let err = SimilarityMatrix::from_rows(vec![vec![1.0, 0.5], vec![0.5]]).unwrap_err();
        assert!(matches!(err, IndexError::DimensionMismatch(_)));
    }

    #[test]
    fn test_rejects_wrong_buffer_length() {
        assert!(SimilarityMatrix::from_vec(2, vec![1.0; 3]).is_err());
        assert!(SimilarityMatrix::from_vec(0, vec![]).is_ok());
    }
}
