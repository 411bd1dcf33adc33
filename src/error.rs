// File: src/error.rs
use std::path::PathBuf;

use crate::config::ConfigError;

pub type Result<T> = std::result::Result<T, DecipherError>;

#[derive(Debug, thiserror::Error)]
pub enum DecipherError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A frequency list line that is neither `word` nor `word count`.
    #[error("lexicon line {line}: {message}")]
    LexiconParse { line: usize, message: String },

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("lexicon snapshot: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The cheapest remaining token still has too many unresolved positions
    /// to enumerate.
    #[error("token {token:?} has {unresolved} unresolved symbols (limit {limit})")]
    EnumerationLimit {
        token: String,
        unresolved: usize,
        limit: usize,
    },
}

impl DecipherError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DecipherError::Io {
            path: path.into(),
            source,
        }
    }
}
