//! Raw-count TF times smoothed IDF, stored sparsely per document.
//!
//! `idf(t) = ln((1 + N) / (1 + df(t))) + 1`. No row normalization is applied
//! unless the caller asks for [`WeightMatrix::l2_normalized`].

use crate::tokenizer::TokenizedDocument;
use crate::vocab::{bags_of_words, BagOfWords, Vocabulary};
use crate::{DocId, TermId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Smoothed inverse document frequency.
pub fn smoothed_idf(num_docs: usize, df: u32) -> f64 {
    ((1.0 + num_docs as f64) / (1.0 + df as f64)).ln() + 1.0
}

/// Sparse document x term weight table. Rows are kept in corpus order and
/// each row is sorted by term id; absent entries are zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeightMatrix {
    doc_ids: Vec<DocId>,
    rows: Vec<Vec<(TermId, f64)>>,
    idf: Vec<f64>,
    #[serde(skip)]
    row_of: HashMap<DocId, usize>,
}

impl WeightMatrix {
    pub fn from_bags(bags: &[BagOfWords], vocab: &Vocabulary) -> Self {
        let idf: Vec<f64> = (0..vocab.len() as TermId)
            .map(|id| smoothed_idf(vocab.num_docs(), vocab.df(id).unwrap_or(0)))
            .collect();
        let rows: Vec<Vec<(TermId, f64)>> = bags
            .iter()
            .map(|bag| {
                bag.counts
                    .iter()
                    .map(|&(term_id, tf)| (term_id, tf as f64 * idf[term_id as usize]))
                    .collect()
            })
            .collect();
        let doc_ids: Vec<DocId> = bags.iter().map(|b| b.id).collect();
        Self::assemble(doc_ids, rows, idf)
    }

    fn assemble(doc_ids: Vec<DocId>, rows: Vec<Vec<(TermId, f64)>>, idf: Vec<f64>) -> Self {
        let row_of = doc_ids.iter().enumerate().map(|(i, &d)| (d, i)).collect();
        Self { doc_ids, rows, idf, row_of }
    }

    pub fn num_docs(&self) -> usize {
        self.doc_ids.len()
    }

    pub fn num_terms(&self) -> usize {
        self.idf.len()
    }

    /// True when there are no rows or no columns: nothing to score.
    pub fn is_empty(&self) -> bool {
        self.doc_ids.is_empty() || self.idf.is_empty()
    }

    pub fn idf(&self, term_id: TermId) -> Option<f64> {
        self.idf.get(term_id as usize).copied()
    }

    pub fn row(&self, doc: DocId) -> Option<&[(TermId, f64)]> {
        self.row_index(doc).map(|i| self.rows[i].as_slice())
    }

    /// Stored weight, or `None` when the document does not contain the term.
    pub fn get(&self, doc: DocId, term_id: TermId) -> Option<f64> {
        let row = self.row(doc)?;
        row.binary_search_by_key(&term_id, |&(t, _)| t).ok().map(|i| row[i].1)
    }

    pub fn weight(&self, doc: DocId, term_id: TermId) -> f64 {
        self.get(doc, term_id).unwrap_or(0.0)
    }

    pub fn rows(&self) -> impl Iterator<Item = (DocId, &[(TermId, f64)])> + '_ {
        self.doc_ids.iter().copied().zip(self.rows.iter().map(Vec::as_slice))
    }

    /// Non-zero weights of one term, ascending by document id.
    pub fn column(&self, term_id: TermId) -> Vec<(DocId, f64)> {
        let mut col: Vec<(DocId, f64)> = self
            .rows()
            .filter_map(|(doc, row)| {
                row.binary_search_by_key(&term_id, |&(t, _)| t).ok().map(|i| (doc, row[i].1))
            })
            .collect();
        col.sort_unstable_by_key(|&(doc, _)| doc);
        col
    }

    /// Highest-weighted terms of a document; ties go to the lower term id.
    pub fn top_terms(&self, doc: DocId, n: usize) -> Vec<(TermId, f64)> {
        let mut row = self.row(doc).map(<[_]>::to_vec).unwrap_or_default();
        row.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        row.truncate(n);
        row
    }

    /// Copy with every row scaled to unit Euclidean length. All-zero rows stay zero.
    pub fn l2_normalized(&self) -> Self {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let norm = row.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt();
                if norm == 0.0 {
                    row.clone()
                } else {
                    row.iter().map(|&(t, w)| (t, w / norm)).collect()
                }
            })
            .collect();
        Self::assemble(self.doc_ids.clone(), rows, self.idf.clone())
    }

    /// Dense rows in corpus order, columns in term-id order.
    pub fn to_dense(&self) -> Vec<Vec<f64>> {
        self.rows
            .iter()
            .map(|row| {
                let mut dense = vec![0.0; self.num_terms()];
                for &(t, w) in row {
                    dense[t as usize] = w;
                }
                dense
            })
            .collect()
    }

    fn row_index(&self, doc: DocId) -> Option<usize> {
        if self.row_of.len() == self.doc_ids.len() {
            self.row_of.get(&doc).copied()
        } else {
            // Deserialized matrices come without the lookup table.
            self.doc_ids.iter().position(|&d| d == doc)
        }
    }
}

// `row_of` is a lookup cache and is absent after deserialization.
impl PartialEq for WeightMatrix {
    fn eq(&self, other: &Self) -> bool {
        self.doc_ids == other.doc_ids && self.rows == other.rows && self.idf == other.idf
    }
}

pub fn compute_weights(docs: &[TokenizedDocument], vocab: &Vocabulary) -> WeightMatrix {
    WeightMatrix::from_bags(&bags_of_words(docs, vocab), vocab)
}

/// Descending score, ascending document id on ties.
pub(crate) fn rank_desc(a: &(DocId, f64), b: &(DocId, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}
