//! Benchmarks for hybrid scoring
//!
//! Run with: cargo bench --package recommender
//!
//! Scores queries against a synthetic index of 2,000 content movies and
//! 1,500 collaborative titles, so no dataset files are needed.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use recommender::{HybridScorer, MergePolicy, Weights};
use sources::{CollaborativeIndex, ContentIndex, MovieRecord, SimilarityMatrix};
use std::sync::Arc;

const CONTENT_MOVIES: usize = 2_000;
const COLLABORATIVE_TITLES: usize = 1_500;

/// Cheap deterministic pseudo-similarity in [-1, 1]
fn similarity(i: usize, j: usize) -> f32 {
    if i == j {
        return 1.0;
    }
    let (a, b) = if i < j { (i, j) } else { (j, i) };
    let hash = (a * 2_654_435_761 + b * 40_503) % 2_001;
    hash as f32 / 1_000.0 - 1.0
}

fn build_scorer(policy: MergePolicy) -> HybridScorer {
    let movies = (0..CONTENT_MOVIES)
        .map(|i| MovieRecord {
            movie_id: i as u32,
            title: format!("Movie {}", i),
            tags: String::new(),
        })
        .collect();
    let content_rows = (0..CONTENT_MOVIES)
        .map(|i| (0..CONTENT_MOVIES).map(|j| similarity(i, j).abs()).collect())
        .collect();
    let content = ContentIndex::new(movies, SimilarityMatrix::from_rows(content_rows).expect("content matrix"))
        .expect("content index");

    let titles = (0..COLLABORATIVE_TITLES)
        .map(|i| format!("Movie {} ({})", i % 1_200, 1950 + i % 50))
        .collect();
    let collaborative_rows = (0..COLLABORATIVE_TITLES)
        .map(|i| (0..COLLABORATIVE_TITLES).map(|j| similarity(i, j)).collect())
        .collect();
    let collaborative = CollaborativeIndex::new(
        titles,
        SimilarityMatrix::from_rows(collaborative_rows).expect("collaborative matrix"),
    )
    .expect("collaborative index");

    HybridScorer::new(Arc::new(content), Arc::new(collaborative), policy)
}

fn bench_hybrid_recommend(c: &mut Criterion) {
    let scorer = build_scorer(MergePolicy::LastWins);

    c.bench_function("recommend_hybrid", |b| {
        b.iter(|| {
            let results = scorer
                .recommend(black_box("Movie 42"), black_box(10), Weights::default())
                .unwrap();
            black_box(results)
        })
    });
}

fn bench_average_merge(c: &mut Criterion) {
    let scorer = build_scorer(MergePolicy::Average);

    c.bench_function("recommend_hybrid_average", |b| {
        b.iter(|| {
            let results = scorer
                .recommend(black_box("Movie 42"), black_box(10), Weights::default())
                .unwrap();
            black_box(results)
        })
    });
}

fn bench_content_only(c: &mut Criterion) {
    let scorer = build_scorer(MergePolicy::LastWins);

    // Titles past 1,200 never appear in the collaborative table
    c.bench_function("recommend_content_only", |b| {
        b.iter(|| {
            let results = scorer
                .recommend(black_box("Movie 1999"), black_box(10), Weights::default())
                .unwrap();
            black_box(results)
        })
    });
}

criterion_group!(benches, bench_hybrid_recommend, bench_average_merge, bench_content_only);
criterion_main!(benches);
