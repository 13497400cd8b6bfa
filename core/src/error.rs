use crate::DocId;
use thiserror::Error;

/// Errors raised while validating configuration or assembling a corpus.
///
/// Empty corpora, empty vocabularies and unknown query terms are not errors;
/// see [`crate::IndexStatus`] and [`crate::TermLookup`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("no_above must be within [0, 1], got {0}")]
    NoAboveOutOfRange(f64),

    #[error("max_token_length ({max}) is smaller than min_token_length ({min})")]
    InvalidLengthBounds { min: usize, max: usize },

    #[error("invalid configuration: {0}")]
    ConfigParse(String),

    #[error("document id {0} appears more than once in the corpus")]
    DuplicateDocument(DocId),
}

pub type Result<T> = std::result::Result<T, Error>;
