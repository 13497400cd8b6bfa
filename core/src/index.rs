use crate::tokenizer::TokenizedDocument;
use crate::vocab::{bags_of_words, BagOfWords, Vocabulary};
use crate::{DocId, TermId};
use serde::{Deserialize, Serialize};

/// Term id -> ascending, duplicate-free list of documents containing the term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvertedIndex {
    postings: Vec<Vec<DocId>>,
}

impl InvertedIndex {
    /// Build from per-document bags. Each bag contributes presence only.
    pub fn from_bags(bags: &[BagOfWords], num_terms: usize) -> Self {
        let mut postings: Vec<Vec<DocId>> = vec![Vec::new(); num_terms];
        for bag in bags {
            for &(term_id, _) in &bag.counts {
                if let Some(list) = postings.get_mut(term_id as usize) {
                    list.push(bag.id);
                }
            }
        }
        // Sorted and unique regardless of the order documents arrived in.
        for list in postings.iter_mut() {
            list.sort_unstable();
            list.dedup();
        }
        Self { postings }
    }

    /// Postings for a term id; empty for ids outside the vocabulary.
    pub fn get(&self, term_id: TermId) -> &[DocId] {
        self.postings.get(term_id as usize).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of terms with a posting list.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TermId, &[DocId])> + '_ {
        self.postings.iter().enumerate().map(|(i, p)| (i as TermId, p.as_slice()))
    }
}

pub fn build_index(docs: &[TokenizedDocument], vocab: &Vocabulary) -> InvertedIndex {
    InvertedIndex::from_bags(&bags_of_words(docs, vocab), vocab.len())
}
