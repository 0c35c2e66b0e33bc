// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

use crate::Split;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Source file not found: {}", .0.display())]
    MissingSourceFile(PathBuf),

    #[error(
        "Paired files for split '{split}' are out of step: {sentences} sentences vs {labels} labels"
    )]
    PairedFileMismatch {
        split: Split,
        sentences: usize,
        labels: usize,
    },

    #[error("Record {index} contains a line break and cannot be stored one per line")]
    EmbeddedLineBreak { index: usize },

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Params JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DataError {
    /// Attaches the path an IO operation was working on.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DataError::Io { path: path.into(), source }
    }
}
