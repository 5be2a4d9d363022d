//! Feature Corpus Builder
//!
//! Turns raw per-movie attribute lists into one lowercase "tag soup" per
//! movie. The output order is the input order, and that order becomes the
//! row order of the content similarity matrix.
//!
//! ## Tag soup
//! overview words + genres + keywords + top cast + director, where every
//! multi-word name is collapsed ("Sam Worthington" -> "samworthington")
//! so the vectorizer sees one token per person or concept.

use crate::config::ContentBuildConfig;
use data_loader::RawMovie;
use rayon::prelude::*;
use sources::MovieRecord;
use tracing::{debug, info};

/// Build the tag soup corpus for a content catalog.
///
/// Movies whose overview is missing or blank are dropped.
pub fn build_corpus(movies: &[RawMovie], config: &ContentBuildConfig) -> Vec<MovieRecord> {
    let records: Vec<MovieRecord> = movies
        .par_iter()
        .filter_map(|movie| build_record(movie, config))
        .collect();

    let dropped = movies.len() - records.len();
    if dropped > 0 {
        debug!("Dropped {} movies without an overview", dropped);
    }
    info!("Built tag corpus for {} movies", records.len());
    records
}

/// Build a single movie's record, or `None` if it has no overview
fn build_record(movie: &RawMovie, config: &ContentBuildConfig) -> Option<MovieRecord> {
    let overview = movie.overview.as_deref()?.trim();
    if overview.is_empty() {
        return None;
    }

    let mut tags: Vec<String> = overview.split_whitespace().map(str::to_string).collect();
    tags.extend(movie.genres.iter().map(|g| collapse(&g.name)));
    tags.extend(movie.keywords.iter().map(|k| collapse(&k.name)));
    tags.extend(
        movie
            .cast
            .iter()
            .take(config.top_cast)
            .map(|member| collapse(&member.name)),
    );
    tags.extend(movie.director().map(collapse));

    Some(MovieRecord {
        movie_id: movie.movie_id,
        title: movie.title.clone(),
        tags: tags.join(" ").to_lowercase(),
    })
}

/// Remove spaces so a multi-word name becomes a single token
fn collapse(name: &str) -> String {
    name.replace(' ', "")
}
