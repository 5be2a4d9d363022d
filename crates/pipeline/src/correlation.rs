//! Pearson correlation between reduced item vectors.

use crate::error::Result;
use ndarray::{Array2, Axis};
use rayon::prelude::*;
use sources::SimilarityMatrix;

/// Title×title Pearson correlation over the rows of `projections`
///
/// Each row is centered over its own components. A row with no variance
/// has no defined correlation: its whole row and column are `NaN`,
/// diagonal included.
pub fn pearson_correlation(projections: &Array2<f64>) -> Result<SimilarityMatrix> {
    let centered: Vec<Vec<f64>> = projections
        .axis_iter(Axis(0))
        .map(|row| {
            let mean = row.mean().unwrap_or(0.0);
            row.iter().map(|v| v - mean).collect()
        })
        .collect();
    let norms: Vec<f64> = centered
        .iter()
        .map(|row| row.iter().map(|v| v * v).sum::<f64>().sqrt())
        .collect();
    let degenerate = |i: usize| !(norms[i] > f64::EPSILON);

    let rows: Vec<Vec<f32>> = (0..centered.len())
        .into_par_iter()
        .map(|i| {
            (0..centered.len())
                .map(|j| {
                    if degenerate(i) || degenerate(j) {
                        f32::NAN
                    } else if i == j {
                        1.0
                    } else {
                        let dot: f64 = centered[i].iter().zip(&centered[j]).map(|(a, b)| a * b).sum();
                        (dot / (norms[i] * norms[j])).clamp(-1.0, 1.0) as f32
                    }
                })
                .collect()
        })
        .collect();

    Ok(SimilarityMatrix::from_rows(rows)?)
}
