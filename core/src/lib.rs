//! In-memory inverted index and TF-IDF weighting over a small, fully
//! materialized corpus.
//!
//! The pipeline runs one way: raw documents are tokenized, the vocabulary is
//! filtered by document frequency, and the inverted index and weight matrix
//! are derived together. Everything is read-only once [`TextIndex::build`]
//! returns.

pub mod cache;
pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod index;
pub mod query;
pub mod tfidf;
pub mod tokenizer;
pub mod vocab;

pub type TermId = u32;
pub type DocId = u32;

pub use cache::BuildCache;
pub use config::{EngineConfig, FilterOptions, TokenizerConfig};
pub use corpus::{Corpus, Document};
pub use engine::{IndexStatus, TextIndex};
pub use error::{Error, Result};
pub use index::InvertedIndex;
pub use query::{TermLookup, TermScores};
pub use tfidf::WeightMatrix;
pub use tokenizer::Tokenizer;
pub use vocab::Vocabulary;
