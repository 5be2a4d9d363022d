//! Parsers for the raw catalogs.
//!
//! - movies.dat: movieId::title::genres
//! - ratings.dat: userId::movieId::rating::timestamp
//! - content catalog: JSON array of [`RawMovie`] records
//!
//! The MovieLens files are ISO-8859-1 encoded, so they are decoded byte by
//! byte instead of going through `read_to_string`.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Open a file, mapping a missing file to [`DataLoadError::FileNotFound`]
pub(crate) fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

/// Read a file with ISO-8859-1 encoding (Latin-1)
///
/// Each Latin-1 byte maps directly to the Unicode code point of the same value.
fn read_lines_latin1(path: &Path) -> Result<Vec<String>> {
    let mut file = open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    let content: String = bytes.iter().map(|&b| b as char).collect();

    Ok(content.lines().map(|s| s.to_string()).collect())
}

/// Splits a `::` separated line and hands out fields with line context.
struct Fields<'a> {
    file: &'static str,
    line: usize,
    parts: std::str::Split<'a, &'static str>,
}

impl<'a> Fields<'a> {
    fn new(file: &'static str, line: usize, text: &'a str) -> Self {
        Self {
            file,
            line,
            parts: text.split("::"),
        }
    }

    fn next(&mut self, name: &str) -> Result<&'a str> {
        self.parts.next().ok_or_else(|| DataLoadError::ParseError {
            file: self.file.to_string(),
            line: self.line,
            reason: format!("Missing {}", name),
        })
    }

    fn parse<T>(&mut self, name: &str) -> Result<T>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self.next(name)?;
        raw.trim().parse().map_err(|e| DataLoadError::ParseError {
            file: self.file.to_string(),
            line: self.line,
            reason: format!("Invalid {}: {}", name, e),
        })
    }
}

/// Parse the movies.dat file
///
/// The title is kept raw, year included: "Toy Story (1995)". The genres
/// column must be present but is not stored.
pub fn parse_movie_titles(path: &Path) -> Result<Vec<MovieEntry>> {
    let lines = read_lines_latin1(path)?;
    let mut movies = Vec::with_capacity(lines.len());

    for (idx, line) in lines.iter().enumerate() {
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }
        let mut fields = Fields::new("movies.dat", idx + 1, line_trimmed);

        let id = fields.parse("movieId")?;
        let title = fields.next("title")?;
        fields.next("genres")?;

        movies.push(MovieEntry {
            id,
            title: title.to_string(),
        });
    }
    Ok(movies)
}

/// Parse the ratings.dat file
///
/// The timestamp is validated and dropped.
pub fn parse_ratings(path: &Path) -> Result<Vec<Rating>> {
    let lines = read_lines_latin1(path)?;
    let mut ratings = Vec::with_capacity(lines.len());

    for (idx, line) in lines.iter().enumerate() {
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }
        let mut fields = Fields::new("ratings.dat", idx + 1, line_trimmed);

        let rating = Rating {
            user_id: fields.parse("userId")?,
            movie_id: fields.parse("movieId")?,
            rating: fields.parse("rating")?,
        };
        fields.parse::<i64>("timestamp")?;
        ratings.push(rating);
    }
    Ok(ratings)
}

/// Parse the content catalog, a JSON array of movie records
pub fn parse_content_catalog(path: &Path) -> Result<Vec<RawMovie>> {
    let reader = BufReader::new(open(path)?);
    serde_json::from_reader(reader).map_err(|source| DataLoadError::Json {
        file: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp");
        file.write_all(contents).expect("write");
        file
    }

    #[test]
    fn test_parse_movie_titles_latin1() {
        // "Café" with a Latin-1 encoded é (0xE9)
        let file = write_temp(b"1::Toy Story (1995)::Animation|Children's|Comedy\n\n2::Caf\xe9 (2001)::Drama\n");
        let movies = parse_movie_titles(file.path()).unwrap();

        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].title, "Toy Story (1995)");
        assert_eq!(movies[1].title, "Café (2001)");
    }

    #[test]
    fn test_parse_ratings_reports_line() {
        let file = write_temp(b"1::1::5::978300760\n1::2::abc::978300761\n");
        let err = parse_ratings(file.path()).unwrap_err();

        match err {
            DataLoadError::ParseError { file, line, reason } => {
                assert_eq!(file, "ratings.dat");
                assert_eq!(line, 2);
                assert!(reason.contains("rating"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_ratings_missing_field() {
        let file = write_temp(b"1::1::4.5\n");
        let err = parse_ratings(file.path()).unwrap_err();
        assert!(err.to_string().contains("Missing timestamp"));
    }

    #[test]
    fn test_parse_movie_titles_requires_genres() {
        let file = write_temp(b"1::Toy Story (1995)
");
        let err = parse_movie_titles(file.path()).unwrap_err();
        assert!(err.to_string().contains("Missing genres"));
    }

    #[test]
    fn test_parse_ratings_rejects_bad_timestamp() {
        let file = write_temp(b"1::1::4.5::yesterday
");
        let err = parse_ratings(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid timestamp"));
    }

    #[test]
    fn test_parse_content_catalog() {
        let file = write_temp(
            br#"[
                {"movie_id": 19995, "title": "Avatar", "overview": "In the 22nd century...",
                 "genres": [{"name": "Action"}], "keywords": [{"name": "space war"}],
                 "cast": [{"name": "Sam Worthington", "order": 0}],
                 "crew": [{"name": "James Cameron", "job": "Director"}]},
                {"movie_id": 1, "title": "No Overview"}
            ]"#,
        );
        let movies = parse_content_catalog(file.path()).unwrap();

        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].director(), Some("James Cameron"));
        assert!(movies[1].overview.is_none());
        assert!(movies[1].cast.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = parse_content_catalog(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }
}
