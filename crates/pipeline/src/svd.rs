//! Truncated SVD of the title×user matrix.
//!
//! ## Algorithm
//! Randomized subspace iteration on `X·Xᵀ` without ever forming it:
//! 1. Start from a seeded random `n×p` basis (`p = k + oversampling`)
//! 2. Repeat `Q <- orth(X·(Xᵀ·Q))` until the sum of Rayleigh quotients
//!    settles or the iteration budget runs out
//! 3. Rayleigh–Ritz: eigen-decompose the small `p×p` matrix `(XᵀQ)ᵀ(XᵀQ)`
//!    and rotate the basis onto its eigenvectors
//! 4. Keep the top `k` pairs: projections are `U·Σ`, where `Σ = √λ`
//!
//! Orthonormalization is a thin QR and the small eigenproblem goes through
//! `nalgebra::SymmetricEigen`. The result only depends on the input and the seed.

use crate::config::CollaborativeBuildConfig;
use crate::error::{BuildError, Result};
use nalgebra::{DMatrix, DVector, SymmetricEigen};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Extra basis vectors carried through the iteration
const OVERSAMPLING: usize = 8;

/// Seeded truncated SVD
#[derive(Debug, Clone)]
pub struct TruncatedSvd {
    n_components: usize,
    seed: u64,
    max_iterations: usize,
    tolerance: f64,
}

impl TruncatedSvd {
    pub fn new(config: &CollaborativeBuildConfig) -> Self {
        Self {
            n_components: config.n_components,
            seed: config.seed,
            max_iterations: config.power_iterations,
            tolerance: config.tolerance,
        }
    }

    /// Project each row of `x` (items×users) onto the top singular directions
    ///
    /// Returns an `n_items × k` matrix with `k = min(n_components, n_items, n_users)`,
    /// components ordered by descending singular value.
    pub fn fit_transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        let (rows, columns) = x.dim();
        if rows == 0 || columns == 0 {
            return Err(BuildError::EmptyRatings);
        }
        if self.n_components == 0 {
            return Err(BuildError::InvalidParameter {
                name: "n_components",
                reason: "must be at least 1".to_string(),
            });
        }

        let k = self.n_components.min(rows).min(columns);
        let p = (k + OVERSAMPLING).min(rows);
        if k < self.n_components {
            debug!("Clamped SVD components from {} to {}", self.n_components, k);
        }

        let x = DMatrix::from_fn(rows, columns, |i, j| x[[i, j]]);
        let xt = x.transpose();

        let mut rng = StdRng::seed_from_u64(self.seed);
        let start = DMatrix::from_fn(rows, p, |_, _| rng.random_range(-1.0..1.0));
        let mut basis = orthonormalize(start);

        let mut previous: Option<f64> = None;
        for iteration in 0..self.max_iterations {
            let projected = &x * (&xt * &basis);
            // Frobenius product: the sum of the per-column Rayleigh quotients
            let rayleigh = basis.dot(&projected);
            basis = orthonormalize(projected);

            if let Some(prev) = previous {
                let change = (rayleigh - prev).abs() / rayleigh.abs().max(f64::MIN_POSITIVE);
                if change <= self.tolerance {
                    debug!("Subspace iteration converged after {} iterations", iteration + 1);
                    break;
                }
            }
            previous = Some(rayleigh);
        }

        let reduced = &xt * &basis;
        let small = reduced.transpose() * &reduced;
        let eigen = SymmetricEigen::new(small);

        let mut order: Vec<usize> = (0..p).collect();
        order.sort_by(|&a, &b| eigen.eigenvalues[b].total_cmp(&eigen.eigenvalues[a]));

        let rotated = &basis * &eigen.eigenvectors;
        let mut projections = Array2::<f64>::zeros((rows, k));
        for (target, &source) in order.iter().take(k).enumerate() {
            let sigma = eigen.eigenvalues[source].max(0.0).sqrt();
            let mut column = rotated.column(source).into_owned();
            flip_sign(&mut column);
            for (row, value) in column.iter().enumerate() {
                projections[[row, target]] = value * sigma;
            }
        }

        info!("Reduced {}x{} rating matrix to {} components", rows, columns, k);
        Ok(projections)
    }
}

/// Orthonormal basis of the column space via a thin QR
fn orthonormalize(matrix: DMatrix<f64>) -> DMatrix<f64> {
    matrix.qr().q()
}

/// Make the largest-magnitude entry positive so signs are reproducible
fn flip_sign(column: &mut DVector<f64>) {
    let pivot = column
        .iter()
        .copied()
        .fold(0.0_f64, |best, v| if v.abs() > best.abs() { v } else { best });
    if pivot < 0.0 {
        *column *= -1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn svd(k: usize) -> TruncatedSvd {
        TruncatedSvd::new(&CollaborativeBuildConfig::default().with_components(k))
    }

    #[test]
    fn test_orthonormalize() {
        let basis = orthonormalize(DMatrix::from_row_slice(3, 2, &[1.0, 1.0, 0.0, 1.0, 1.0, 0.0]));
        let gram = basis.transpose() * &basis;

        assert_eq!(basis.shape(), (3, 2));
        assert!((gram - DMatrix::<f64>::identity(2, 2)).norm() < 1e-12);
    }

    #[test]
    fn test_flip_sign() {
        let mut column = DVector::from_vec(vec![0.5, -2.0, 1.0]);
        flip_sign(&mut column);
        assert_eq!(column.as_slice(), &[-0.5, 2.0, -1.0]);
    }

    #[test]
    fn test_rank_one_projection() {
        // Every row is a multiple of the same user vector
        let x = array![[1.0, 2.0, 2.0], [2.0, 4.0, 4.0], [0.0, 0.0, 0.0]];
        let projections = svd(1).fit_transform(&x).unwrap();

        assert_eq!(projections.dim(), (3, 1));
        assert!((projections[[0, 0]] - 3.0).abs() < 1e-8);
        assert!((projections[[1, 0]] - 6.0).abs() < 1e-8);
        assert!(projections[[2, 0]].abs() < 1e-8);
    }

    #[test]
    fn test_components_descending_and_clamped() {
        let x = array![[3.0, 0.0], [0.0, 1.0], [0.0, 0.0]];
        let projections = svd(5).fit_transform(&x).unwrap();

        assert_eq!(projections.dim(), (3, 2));
        assert!((projections[[0, 0]] - 3.0).abs() < 1e-8);
        assert!((projections[[1, 1]] - 1.0).abs() < 1e-8);
        assert!(projections[[0, 1]].abs() < 1e-8);
    }

    #[test]
    fn test_deterministic_for_seed() {
        let x = Array2::from_shape_fn((12, 9), |(i, j)| ((i * 7 + j * 3) % 5) as f64);
        let a = svd(3).fit_transform(&x).unwrap();
        let b = svd(3).fit_transform(&x).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_matches_full_svd() {
        // Sparse 0-5 ratings, mostly unrated
        let mut rng = StdRng::seed_from_u64(7);
        let x = Array2::from_shape_fn((300, 120), |_| {
            if rng.random_bool(0.2) { f64::from(rng.random_range(1..=5_u8)) } else { 0.0 }
        });
        let config = CollaborativeBuildConfig::default().with_components(12).with_tolerance(1e-12);
        let projections = TruncatedSvd::new(&config).fit_transform(&x).unwrap();

        let full = DMatrix::from_fn(300, 120, |i, j| x[[i, j]]).svd(true, false);
        let u = full.u.unwrap();
        let mut order: Vec<usize> = (0..full.singular_values.len()).collect();
        order.sort_by(|&a, &b| full.singular_values[b].total_cmp(&full.singular_values[a]));

        for (component, &source) in order.iter().take(12).enumerate() {
            let expected = full.singular_values[source];
            let column = projections.column(component);
            let sigma = column.dot(&column).sqrt();
            assert!((sigma - expected).abs() / expected < 1e-6, "component {component}");

            let dot: f64 = column.iter().zip(u.column(source).iter()).map(|(a, b)| a * b).sum();
            let cosine = dot / sigma;
            assert!((cosine.abs() - 1.0).abs() < 1e-6, "component {component}");
        }
    }
}
