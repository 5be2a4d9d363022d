//! Build parameters for both similarity spaces.
//!
//! Defaults reproduce the reference models: a 5000-term count vocabulary
//! with English stop words for content, and titles with at least 50
//! ratings reduced to 12 latent components for collaborative.

use crate::error::{BuildError, Result};

/// Parameters of the content space build
#[derive(Debug, Clone)]
pub struct ContentBuildConfig {
    /// Vocabulary size after keeping the most frequent terms
    pub max_features: usize,
    /// Number of leading cast members kept per movie
    pub top_cast: usize,
    /// Shortest token the vectorizer keeps, in characters
    pub min_token_len: usize,
    /// Drop English stop words before counting
    pub remove_stop_words: bool,
}

impl Default for ContentBuildConfig {
    fn default() -> Self {
        Self {
            max_features: 5000,
            top_cast: 3,
            min_token_len: 2,
            remove_stop_words: true,
        }
    }
}

impl ContentBuildConfig {
    /// Configure the vocabulary size (default: 5000)
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    /// Configure how many cast members are kept (default: 3)
    pub fn with_top_cast(mut self, top_cast: usize) -> Self {
        self.top_cast = top_cast;
        self
    }

    /// Configure the shortest kept token (default: 2)
    pub fn with_min_token_len(mut self, min_token_len: usize) -> Self {
        self.min_token_len = min_token_len;
        self
    }

    /// Keep or drop English stop words (default: drop)
    pub fn with_stop_words_removed(mut self, remove: bool) -> Self {
        self.remove_stop_words = remove;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.max_features == 0 {
            return Err(BuildError::InvalidParameter {
                name: "max_features",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.min_token_len == 0 {
            return Err(BuildError::InvalidParameter {
                name: "min_token_len",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Parameters of the collaborative space build
#[derive(Debug, Clone)]
pub struct CollaborativeBuildConfig {
    /// Titles with fewer ratings than this are dropped
    pub min_ratings_per_title: usize,
    /// Latent components kept by the truncated SVD
    pub n_components: usize,
    /// Seed of the SVD starting subspace
    pub seed: u64,
    /// Upper bound on subspace iterations
    pub power_iterations: usize,
    /// Relative eigenvalue change that counts as converged
    pub tolerance: f64,
}

impl Default for CollaborativeBuildConfig {
    fn default() -> Self {
        Self {
            min_ratings_per_title: 50,
            n_components: 12,
            seed: 42,
            power_iterations: 100,
            tolerance: 1e-9,
        }
    }
}

impl CollaborativeBuildConfig {
    /// Configure the minimum ratings per title (default: 50)
    pub fn with_min_ratings_per_title(mut self, min: usize) -> Self {
        self.min_ratings_per_title = min;
        self
    }

    /// Configure the number of latent components (default: 12)
    pub fn with_components(mut self, n_components: usize) -> Self {
        self.n_components = n_components;
        self
    }

    /// Configure the SVD seed (default: 42)
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Configure the iteration budget (default: 100)
    pub fn with_power_iterations(mut self, iterations: usize) -> Self {
        self.power_iterations = iterations;
        self
    }

    /// Configure the convergence tolerance (default: 1e-9)
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.n_components == 0 {
            return Err(BuildError::InvalidParameter {
                name: "n_components",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.power_iterations == 0 {
            return Err(BuildError::InvalidParameter {
                name: "power_iterations",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(BuildError::InvalidParameter {
                name: "tolerance",
                reason: format!("{} is not a finite, non-negative number", self.tolerance),
            });
        }
        Ok(())
    }
}
