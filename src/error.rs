use thiserror::Error;

/// Errors returned by the clustering engine and its data loader.
#[derive(Debug, Error)]
pub enum Error {
    /// Input slice is empty.
    #[error("empty input")]
    EmptyInput,

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Requested cluster count is incompatible with the dataset.
    #[error("invalid cluster count: requested {requested}, but dataset has {n_items} items")]
    InvalidClusterCount {
        /// Requested number of clusters.
        requested: usize,
        /// Number of items in the dataset.
        n_items: usize,
    },

    /// A count vector does not have one entry per vocabulary word.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Vocabulary size.
        expected: usize,
        /// Number of counts supplied.
        found: usize,
    },

    /// An entity was built over a different vocabulary than the one used for the run.
    #[error("vocabulary mismatch for entity {entity:?}")]
    VocabularyMismatch {
        /// Name of the offending entity (empty for unnamed ones).
        entity: String,
    },

    /// The same word appears twice in a vocabulary.
    #[error("duplicate word in vocabulary: {0}")]
    DuplicateWord(String),

    /// The same blog name appears twice in a dataset.
    #[error("duplicate blog name: {0}")]
    DuplicateName(String),

    /// Malformed line in a tab-separated dataset.
    #[error("parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// Human-readable explanation.
        message: String,
    },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Rendering could not be encoded.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
