//! # Recommendation Service
//!
//! The serving facade. It owns both loaded indices and answers queries
//! against them.
//!
//! ## Initialization barrier
//! `RecommendationService::load` is the only way to obtain a service from
//! artifacts, and it returns only after both indices are fully loaded and
//! validated. There is no half-loaded state to observe: a failed load
//! yields an error and no service at all.
//!
//! After that, every query is a pure read. Clones share the same indices,
//! so a service can be handed to any number of threads without locking.

use crate::config::ServiceConfig;
use crate::error::{RecommendError, Result};
use crate::hybrid::{HybridScorer, Recommendation, Weights};
use sources::{CollaborativeIndex, ContentIndex};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Shared, read-only recommendation service
#[derive(Debug, Clone)]
pub struct RecommendationService {
    scorer: HybridScorer,
    config: ServiceConfig,
}

impl RecommendationService {
    /// Load both artifacts in parallel and build the service
    ///
    /// Fails with `ArtifactLoadFailure` if either artifact is missing or
    /// malformed. The content error is reported first when both fail.
    pub fn load(config: ServiceConfig) -> Result<Self> {
        let start = Instant::now();
        info!(
            "Loading artifacts: content={:?}, collaborative={:?}",
            config.content_path, config.collaborative_path
        );

        let (content, collaborative) = rayon::join(
            || ContentIndex::load(&config.content_path),
            || CollaborativeIndex::load(&config.collaborative_path),
        );
        let content = content.map_err(|source| load_failure("content", &config.content_path, source))?;
        let collaborative = collaborative
            .map_err(|source| load_failure("collaborative", &config.collaborative_path, source))?;

        info!(
            "Loaded {} content movies and {} collaborative titles in {:.2?}",
            content.len(),
            collaborative.len(),
            start.elapsed()
        );
        Ok(Self::from_indices(content, collaborative, config))
    }

    /// Build a service from indices already in memory
    pub fn from_indices(content: ContentIndex, collaborative: CollaborativeIndex, config: ServiceConfig) -> Self {
        let scorer = HybridScorer::new(Arc::new(content), Arc::new(collaborative), config.merge_policy);
        Self { scorer, config }
    }

    /// Top `top_n` recommendations for `title` with the given blend
    pub fn recommend(&self, title: &str, top_n: usize, weights: Weights) -> Result<Vec<Recommendation>> {
        self.scorer.recommend(title, top_n, weights)
    }

    /// Recommendations with the configured defaults (10 results, 0.6 / 0.4)
    pub fn recommend_default(&self, title: &str) -> Result<Vec<Recommendation>> {
        self.scorer.recommend(title, self.config.default_top_n, self.config.weights)
    }

    pub fn content(&self) -> &ContentIndex {
        self.scorer.content()
    }

    pub fn collaborative(&self) -> &CollaborativeIndex {
        self.scorer.collaborative()
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

fn load_failure(artifact: &str, path: &Path, source: sources::IndexError) -> RecommendError {
    RecommendError::ArtifactLoadFailure {
        artifact: format!("{} ({})", artifact, path.display()),
        source,
    }
}
