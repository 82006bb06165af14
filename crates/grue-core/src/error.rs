use std::path::PathBuf;

use crate::id::{ObjectId, VerbId};

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while loading or building a vocabulary.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A verb or object record has an empty canonical ID.
    #[error("{namespace} record has an empty id")]
    EmptyId {
        /// Which namespace the record belongs to ("verb" or "object").
        namespace: &'static str,
    },

    /// Two verb records share the same canonical ID.
    #[error("duplicate verb: \"{0}\"")]
    DuplicateVerb(VerbId),

    /// Two object records share the same canonical ID.
    #[error("duplicate object: \"{0}\"")]
    DuplicateObject(ObjectId),

    /// An abbreviation maps to an empty expansion.
    #[error("abbreviation \"{0}\" has an empty expansion")]
    EmptyAbbreviation(String),

    /// The vocabulary feed could not be read from disk.
    #[error("cannot read vocabulary feed {path}: {source}")]
    Io {
        /// The path that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The vocabulary feed is not valid JSON for the expected records.
    #[error("malformed vocabulary feed: {0}")]
    Json(#[from] serde_json::Error),
}
