//! Error types for docscout

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal scan error. Anything recoverable is a [`crate::ScanWarning`] instead.
#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Spreadsheet error in {path}: {source}")]
    Spreadsheet {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("Number log {0} has no worksheet")]
    NoWorksheet(PathBuf),

    #[error("Invalid cell reference: '{0}'")]
    CellRef(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid {kind} pattern '{pattern}': {reason}")]
    Pattern {
        kind: &'static str,
        pattern: String,
        reason: String,
    },

    #[error("Cannot traverse root directory {path}: {reason}")]
    RootTraversal { path: PathBuf, reason: String },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Failure to extract a document number from a raw string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Document number is not formatted correctly: '{0}'")]
    InvalidFormat(String),
}
