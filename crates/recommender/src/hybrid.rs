//! # Hybrid Scorer
//!
//! Blends the content space and the collaborative space for one query:
//! 1. Resolve the query title in the content space (required)
//! 2. Take the full content similarity row, not just its top-k
//! 3. Resolve the normalized query title in the collaborative space
//! 4. Hybrid mode: join each content row to a collaborative score through
//!    its normalized title and blend; rows with no counterpart contribute 0.
//!    Content-only mode: the content score is the final score
//! 5. Drop every row whose title equals the query (case-insensitive)
//! 6. Stable sort by score descending, so ties keep content row order
//! 7. Keep the top N
//!
//! ## Many-to-one join
//! Several collaborative titles can normalize to the key of one content
//! row ("Hamlet (1990)", "Hamlet (1996)"). [`MergePolicy`] decides which
//! score that row receives. `NaN` correlations carry no signal and are
//! skipped by every policy.

use crate::error::{RecommendError, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sources::{CollaborativeIndex, ContentIndex, normalize_title, rank};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Allowed drift of `content + collaborative` away from 1.0
const WEIGHT_TOLERANCE: f32 = 1e-6;

/// Blend weights of the two spaces
///
/// Always valid once constructed: finite, non-negative, summing to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Weights {
    content: f32,
    collaborative: f32,
}

impl Weights {
    /// Validate a weight pair
    ///
    /// The sum may drift from 1.0 by at most `1e-6`. A negative or non-finite
    /// component makes the pair malformed, so `(1.5, -0.5)` is rejected even
    /// though it sums to 1.
    pub fn new(content: f32, collaborative: f32) -> Result<Self> {
        let valid = content.is_finite()
            && collaborative.is_finite()
            && content >= 0.0
            && collaborative >= 0.0
            && (content + collaborative - 1.0).abs() <= WEIGHT_TOLERANCE;
        if !valid {
            return Err(RecommendError::InvalidWeights { content, collaborative });
        }
        Ok(Self { content, collaborative })
    }

    pub fn content(&self) -> f32 {
        self.content
    }

    pub fn collaborative(&self) -> f32 {
        self.collaborative
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            content: 0.6,
            collaborative: 0.4,
        }
    }
}

/// How a content row picks its score when several collaborative titles share its key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// The last matching column in collaborative order wins
    #[default]
    LastWins,
    /// Mean over all matching columns
    Average,
}

/// Which spaces produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationMode {
    Hybrid,
    ContentOnly,
}

/// One ranked recommendation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub movie_id: u32,
    pub title: String,
    /// Blended score; equals `content_score` in content-only mode
    ///
    /// Not clamped: negative collaborative correlations can pull it below 0.
    pub score: f32,
    pub content_score: f32,
    /// `None` when the row has no collaborative counterpart or the query
    /// ran in content-only mode
    pub collaborative_score: Option<f32>,
    pub mode: RecommendationMode,
}

impl Recommendation {
    /// Human readable breakdown of the score
    pub fn explanation(&self) -> String {
        match (self.mode, self.collaborative_score) {
            (RecommendationMode::ContentOnly, _) => {
                format!("content {:.3} (no collaborative match for the query)", self.content_score)
            }
            (RecommendationMode::Hybrid, Some(collaborative)) => format!(
                "content {:.3}, collaborative {:.3}",
                self.content_score, collaborative
            ),
            (RecommendationMode::Hybrid, None) => format!(
                "content {:.3}, collaborative 0 (title not in ratings)",
                self.content_score
            ),
        }
    }
}

/// Scores queries against both loaded indices
///
/// Cloning shares the indices; nothing is ever mutated after construction.
#[derive(Debug, Clone)]
pub struct HybridScorer {
    content: Arc<ContentIndex>,
    collaborative: Arc<CollaborativeIndex>,
    /// `normalize_title` of every content row, in row order
    content_keys: Arc<Vec<String>>,
    merge_policy: MergePolicy,
}

impl HybridScorer {
    pub fn new(
        content: Arc<ContentIndex>,
        collaborative: Arc<CollaborativeIndex>,
        merge_policy: MergePolicy,
    ) -> Self {
        let content_keys: Vec<String> = content
            .movies()
            .par_iter()
            .map(|movie| normalize_title(&movie.title))
            .collect();

        Self {
            content,
            collaborative,
            content_keys: Arc::new(content_keys),
            merge_policy,
        }
    }

    pub fn content(&self) -> &ContentIndex {
        &self.content
    }

    pub fn collaborative(&self) -> &CollaborativeIndex {
        &self.collaborative
    }

    pub fn merge_policy(&self) -> MergePolicy {
        self.merge_policy
    }

    /// Top `top_n` recommendations for `title`
    ///
    /// Fails with `MovieNotFound` when the title has no case-insensitive
    /// exact match in the content space.
    #[instrument(skip(self, weights))]
    pub fn recommend(&self, title: &str, top_n: usize, weights: Weights) -> Result<Vec<Recommendation>> {
        let start = Instant::now();

        let row = self
            .content
            .lookup_by_title(title, true)
            .ok_or_else(|| RecommendError::MovieNotFound {
                title: title.to_string(),
            })?;
        let content_scores = self.content.scores(row)?;

        let collaborative = match self
            .collaborative
            .lookup_by_normalized_title(&normalize_title(title))
        {
            Some(column) => Some(self.collaborative_scores_by_key(column)?),
            None => None,
        };
        let mode = if collaborative.is_some() {
            RecommendationMode::Hybrid
        } else {
            RecommendationMode::ContentOnly
        };
        info!("Scoring '{}' in {:?} mode", title, mode);

        let query = title.to_lowercase();
        let movies = self.content.movies();
        let mut scored: Vec<(usize, f32, Option<f32>)> = (0..movies.len())
            .into_par_iter()
            .filter(|&candidate| movies[candidate].title.to_lowercase() != query)
            .map(|candidate| {
                let content_score = content_scores[candidate];
                match &collaborative {
                    Some(by_key) => {
                        let collaborative_score = by_key.get(self.content_keys[candidate].as_str()).copied();
                        let blended = content_score * weights.content
                            + collaborative_score.unwrap_or(0.0) * weights.collaborative;
                        (candidate, blended, collaborative_score)
                    }
                    None => (candidate, content_score, None),
                }
            })
            .collect();

        scored.sort_by(|a, b| rank::descending(a.1, b.1));
        scored.truncate(top_n);

        let recommendations: Vec<Recommendation> = scored
            .into_iter()
            .map(|(candidate, score, collaborative_score)| Recommendation {
                movie_id: movies[candidate].movie_id,
                title: movies[candidate].title.clone(),
                score,
                content_score: content_scores[candidate],
                collaborative_score,
                mode,
            })
            .collect();

        debug!(
            "Returned {} recommendations for '{}' in {:.2?}",
            recommendations.len(),
            title,
            start.elapsed()
        );
        Ok(recommendations)
    }

    /// Collaborative row of `column`, keyed by normalized title
    fn collaborative_scores_by_key(&self, column: usize) -> Result<HashMap<&str, f32>> {
        let row = self.collaborative.scores(column)?;
        let pairs = self
            .collaborative
            .keys()
            .iter()
            .zip(row)
            .filter(|(_, score)| !score.is_nan());

        let merged: HashMap<&str, f32> = match self.merge_policy {
            MergePolicy::LastWins => pairs.map(|(key, &score)| (key.as_str(), score)).collect(),
            MergePolicy::Average => {
                let mut sums: HashMap<&str, (f32, u32)> = HashMap::new();
                for (key, &score) in pairs {
                    let entry = sums.entry(key.as_str()).or_insert((0.0, 0));
                    entry.0 += score;
                    entry.1 += 1;
                }
                sums.into_iter()
                    .map(|(key, (sum, count))| (key, sum / count as f32))
                    .collect()
            }
        };
        Ok(merged)
    }
}
