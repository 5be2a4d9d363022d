//! Integration tests for the pipeline.
//!
//! These tests build both similarity spaces from small catalogs on disk
//! and check that the saved artifacts load back into working indices.

use data_loader::{CastMember, CrewMember, NamedEntity, RatingsIndex, RawMovie};
use pipeline::{
    CollaborativeBuildConfig, ContentBuildConfig, build_collaborative_index, build_content_index,
    build_from_ratings_index,
};
use sources::{CollaborativeIndex, ContentIndex};
use std::fs;
use std::path::Path;

fn movie(id: u32, title: &str, overview: Option<&str>, keywords: &[&str], director: &str) -> RawMovie {
    RawMovie {
        movie_id: id,
        title: title.to_string(),
        overview: overview.map(str::to_string),
        genres: vec![NamedEntity { name: "Animation".to_string() }],
        keywords: keywords.iter().map(|k| NamedEntity { name: k.to_string() }).collect(),
        cast: vec![CastMember { name: "Tom Hanks".to_string(), order: Some(0) }],
        crew: vec![CrewMember { name: director.to_string(), job: "Director".to_string() }],
    }
}

fn content_catalog() -> Vec<RawMovie> {
    vec![
        movie(862, "Toy Story", Some("Woody the cowboy toy is jealous of a space ranger toy"), &["toy", "friendship"], "John Lasseter"),
        movie(949, "Heat", Some("A detective hunts a master thief across Los Angeles"), &["heist", "robbery"], "Michael Mann"),
        movie(863, "Toy Story 2", Some("Woody the cowboy toy is stolen by a toy collector"), &["toy", "collector"], "John Lasseter"),
        movie(1, "Lost Reel", None, &["toy"], "Nobody"),
    ]
}

/// Write a MovieLens-style ratings catalog
///
/// Toy Story and Toy Story 2 share the exact same raters and ratings.
fn write_ratings_catalog(dir: &Path) {
    let movies = "1::Toy Story (1995)::Animation|Children's|Comedy\n\
                  2::Toy Story 2 (1999)::Animation|Children's|Comedy\n\
                  3::Heat (1995)::Action|Crime|Thriller\n\
                  4::Casino (1995)::Drama|Thriller\n\
                  5::Sabrina (1995)::Comedy|Romance\n\
                  6::GoldenEye (1995)::Action|Adventure|Thriller\n\
                  7::Obscure Short (1999)::Documentary\n";
    let patterns: [(u32, [f32; 8]); 6] = [
        (1, [5.0, 4.0, 5.0, 4.0, 1.0, 2.0, 1.0, 3.0]),
        (2, [5.0, 4.0, 5.0, 4.0, 1.0, 2.0, 1.0, 3.0]),
        (3, [1.0, 2.0, 1.0, 2.0, 5.0, 4.0, 5.0, 3.0]),
        (4, [2.0, 1.0, 2.0, 1.0, 4.0, 5.0, 4.0, 2.0]),
        (5, [3.0, 5.0, 1.0, 4.0, 2.0, 3.0, 5.0, 1.0]),
        (6, [4.0, 1.0, 3.0, 5.0, 2.0, 5.0, 1.0, 4.0]),
    ];

    let mut ratings = String::new();
    for (movie_id, values) in patterns {
        for (user, value) in values.iter().enumerate() {
            ratings.push_str(&format!("{}::{}::{}::978300760\n", user + 1, movie_id, value));
        }
    }
    ratings.push_str("1::7::5::978300760\n");

    fs::write(dir.join("movies.dat"), movies).unwrap();
    fs::write(dir.join("ratings.dat"), ratings).unwrap();
}

#[test]
fn test_content_build_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("content.bin");

    let index = build_content_index(&content_catalog(), &ContentBuildConfig::default()).unwrap();
    index.save(&path).unwrap();
    let loaded = ContentIndex::load(&path).unwrap();

    // The movie without an overview never gets a row
    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded.lookup_by_title("lost reel", true), None);

    let neighbors = loaded.neighbors_of_title("Toy Story", 2).unwrap();
    assert_eq!(loaded.movie(neighbors[0].0).unwrap().title, "Toy Story 2");
    assert!(neighbors[0].1 > neighbors[1].1);
    assert_eq!(loaded.scores(0).unwrap(), index.scores(0).unwrap());
}

#[test]
fn test_collaborative_build_from_movielens_files() {
    let dir = tempfile::tempdir().unwrap();
    write_ratings_catalog(dir.path());

    let ratings = RatingsIndex::load_from_files(dir.path()).unwrap();
    let config = CollaborativeBuildConfig::default()
        .with_min_ratings_per_title(3)
        .with_components(4);
    let index = build_from_ratings_index(&ratings, &config).unwrap();

    assert_eq!(index.len(), 6);
    assert_eq!(index.lookup_by_normalized_title("obscure short"), None);

    let neighbors = index.neighbors_of_title("Toy Story", 5).unwrap();
    assert_eq!(neighbors.len(), 5);
    assert_eq!(neighbors[0].0, "Toy Story 2 (1999)");
    assert!(neighbors[0].1 > 0.99);
    assert!(neighbors.windows(2).all(|w| w[0].1 >= w[1].1));

    let path = dir.path().join("collaborative.bin");
    index.save(&path).unwrap();
    let loaded = CollaborativeIndex::load(&path).unwrap();
    assert_eq!(loaded.neighbors_of_title("toy story", 5).unwrap(), neighbors);
}

#[test]
fn test_collaborative_build_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    write_ratings_catalog(dir.path());
    let ratings = RatingsIndex::load_from_files(dir.path()).unwrap();
    let config = CollaborativeBuildConfig::default()
        .with_min_ratings_per_title(3)
        .with_components(3);

    let first = build_collaborative_index(ratings.titled_ratings(), &config).unwrap();
    let second = build_collaborative_index(ratings.titled_ratings(), &config).unwrap();

    for column in 0..first.len() {
        let a = first.scores(column).unwrap();
        let b = second.scores(column).unwrap();
        assert!(a.iter().zip(b).all(|(x, y)| x == y || (x.is_nan() && y.is_nan())));
    }
}
