//! Serving configuration.

use crate::hybrid::{MergePolicy, Weights};
use std::path::{Path, PathBuf};

/// Artifact file written by the content build
pub const CONTENT_ARTIFACT: &str = "content.bin";
/// Artifact file written by the collaborative build
pub const COLLABORATIVE_ARTIFACT: &str = "collaborative.bin";

/// Where the artifacts live and how queries are answered by default
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub content_path: PathBuf,
    pub collaborative_path: PathBuf,
    /// Results returned by `recommend_default` (default: 10)
    pub default_top_n: usize,
    /// Blend used by `recommend_default` (default: 0.6 / 0.4)
    pub weights: Weights,
    pub merge_policy: MergePolicy,
}

impl ServiceConfig {
    /// Both artifacts under one directory, with their standard file names
    pub fn from_artifacts_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            content_path: dir.join(CONTENT_ARTIFACT),
            collaborative_path: dir.join(COLLABORATIVE_ARTIFACT),
            default_top_n: 10,
            weights: Weights::default(),
            merge_policy: MergePolicy::default(),
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.default_top_n = top_n;
        self
    }

    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_merge_policy(mut self, policy: MergePolicy) -> Self {
        self.merge_policy = policy;
        self
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::from_artifacts_dir("artifacts")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_paths() {
        let config = ServiceConfig::from_artifacts_dir("/srv/models").with_top_n(5);

        assert_eq!(config.content_path, PathBuf::from("/srv/models/content.bin"));
        assert_eq!(config.collaborative_path, PathBuf::from("/srv/models/collaborative.bin"));
        assert_eq!(config.default_top_n, 5);
        assert_eq!(config.merge_policy, MergePolicy::LastWins);
    }
}
