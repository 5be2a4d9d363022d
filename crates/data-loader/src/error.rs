//! Error types for the data-loader crate.
//!
//! Every failure while reading raw datasets or binary artifacts ends up
//! as a [`DataLoadError`]. Parse failures carry file and line context so a
//! broken dataset can be fixed without a debugger.

use thiserror::Error;

/// Errors that can occur while loading datasets and artifacts
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading or writing a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in a `::` separated data file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Referenced entity doesn't exist (e.g., rating for non-existent movie)
    #[error("Missing reference: {entity} with id {id}")]
    MissingReference { entity: String, id: u32 },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// Content catalog is not valid JSON or doesn't match the record layout
    #[error("Malformed JSON in {file}: {source}")]
    Json {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// Binary artifact couldn't be encoded or decoded
    #[error("Malformed artifact {path}: {source}")]
    Artifact {
        path: String,
        #[source]
        source: bincode::Error,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
