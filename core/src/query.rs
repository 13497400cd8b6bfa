use crate::tfidf::rank_desc;
use crate::{DocId, TermId};
use serde::Serialize;
use std::collections::BTreeMap;

/// Outcome of a single-term score query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TermLookup {
    Found(TermScores),
    /// The normalized term is not in the vocabulary.
    NotFound { term: String },
    /// Nothing was left of the query after normalization.
    EmptyQuery,
}

impl TermLookup {
    pub fn found(&self) -> Option<&TermScores> {
        match self {
            TermLookup::Found(scores) => Some(scores),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, TermLookup::Found(_))
    }
}

/// Non-zero weights of one vocabulary term, keyed by document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermScores {
    pub term: String,
    pub term_id: TermId,
    pub scores: BTreeMap<DocId, f64>,
}

impl TermScores {
    pub fn new(term: String, term_id: TermId, column: Vec<(DocId, f64)>) -> Self {
        Self { term, term_id, scores: column.into_iter().collect() }
    }

    pub fn get(&self, doc: DocId) -> Option<f64> {
        self.scores.get(&doc).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Documents by descending score; equal scores in ascending document order.
    pub fn ranked(&self) -> Vec<(DocId, f64)> {
        let mut ranked: Vec<(DocId, f64)> = self.scores.iter().map(|(&d, &w)| (d, w)).collect();
        ranked.sort_by(rank_desc);
        ranked
    }
}
