use crate::config::FilterOptions;
use crate::tokenizer::TokenizedDocument;
use crate::{DocId, TermId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Terms that survived frequency filtering, bound to dense IDs.
///
/// IDs follow ascending term order, so two builds over the same corpus and
/// options always agree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    terms: Vec<String>,
    ids: HashMap<String, TermId>,
    dfs: Vec<u32>,
    num_docs: usize,
}

impl Vocabulary {
    pub fn id(&self, term: &str) -> Option<TermId> {
        self.ids.get(term).copied()
    }

    pub fn term(&self, id: TermId) -> Option<&str> {
        self.terms.get(id as usize).map(String::as_str)
    }

    /// Number of documents containing the term at least once.
    pub fn df(&self, id: TermId) -> Option<u32> {
        self.dfs.get(id as usize).copied()
    }

    /// Documents in the corpus the vocabulary was built from.
    pub fn num_docs(&self) -> usize {
        self.num_docs
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TermId, &str)> + '_ {
        self.terms.iter().enumerate().map(|(i, t)| (i as TermId, t.as_str()))
    }

    /// Bag-of-words for one token sequence: (term id, count) sorted by id.
    /// Tokens outside the vocabulary are ignored.
    pub fn doc2bow<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<(TermId, u32)> {
        let mut counts: BTreeMap<TermId, u32> = BTreeMap::new();
        for token in tokens {
            if let Some(id) = self.id(token.as_ref()) {
                *counts.entry(id).or_insert(0) += 1;
            }
        }
        counts.into_iter().collect()
    }
}

/// A document's term counts restricted to the vocabulary, sorted by term id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BagOfWords {
    pub id: DocId,
    pub counts: Vec<(TermId, u32)>,
}

/// Bag-of-words for every document, in input order.
pub fn bags_of_words(docs: &[TokenizedDocument], vocab: &Vocabulary) -> Vec<BagOfWords> {
    docs.iter().map(|d| BagOfWords { id: d.id, counts: vocab.doc2bow(&d.terms) }).collect()
}

/// Count document frequencies and apply the extremes filter.
pub fn build_vocabulary(docs: &[TokenizedDocument], options: &FilterOptions) -> Vocabulary {
    let num_docs = docs.len();
    let mut df: HashMap<&str, u32> = HashMap::new();
    for doc in docs {
        let distinct: HashSet<&str> = doc.terms.iter().map(String::as_str).collect();
        for term in distinct {
            *df.entry(term).or_insert(0) += 1;
        }
    }
    let seen = df.len();

    let mut kept: Vec<(&str, u32)> = df
        .into_iter()
        .filter(|&(_, count)| count >= options.no_below)
        .filter(|&(_, count)| count as f64 / num_docs as f64 <= options.no_above)
        .collect();

    if let Some(keep_n) = options.keep_n {
        if kept.len() > keep_n {
            kept.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            kept.truncate(keep_n);
        }
    }
    kept.sort_unstable_by(|a, b| a.0.cmp(b.0));

    let mut vocab = Vocabulary { num_docs, ..Vocabulary::default() };
    for (id, (term, count)) in kept.into_iter().enumerate() {
        vocab.ids.insert(term.to_string(), id as TermId);
        vocab.terms.push(term.to_string());
        vocab.dfs.push(count);
    }
    tracing::debug!(seen, kept = vocab.len(), num_docs, "vocabulary filtered");
    vocab
}
