//! Hybrid recommendation core.
//!
//! This crate blends the two similarity spaces from `sources` into one
//! ranked list and exposes them through a shared, read-only service.
//!
//! ## Example Usage
//! ```ignore
//! use recommender::{RecommendationService, ServiceConfig, Weights};
//!
//! let service = RecommendationService::load(ServiceConfig::from_artifacts_dir("artifacts"))?;
//! for rec in service.recommend("Toy Story", 10, Weights::new(0.6, 0.4)?)? {
//!     println!("{} {:.3} {:?}", rec.title, rec.score, rec.mode);
//! }
//! ```

pub mod config;
pub mod error;
pub mod hybrid;
pub mod service;

pub use config::{COLLABORATIVE_ARTIFACT, CONTENT_ARTIFACT, ServiceConfig};
pub use error::{RecommendError, Result};
pub use hybrid::{HybridScorer, MergePolicy, Recommendation, RecommendationMode, Weights};
pub use service::RecommendationService;
