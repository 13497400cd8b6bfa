use crate::config::EngineConfig;
use crate::corpus::{Corpus, Document};
use crate::error::Result;
use crate::index::InvertedIndex;
use crate::query::{TermLookup, TermScores};
use crate::tfidf::WeightMatrix;
use crate::tokenizer::{TokenizedDocument, Tokenizer};
use crate::vocab::{bags_of_words, build_vocabulary, BagOfWords, Vocabulary};
use crate::DocId;
use rayon::prelude::*;
use serde::Serialize;

/// Whether a built index has anything to answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexStatus {
    Ready,
    EmptyCorpus,
    /// Documents exist but every term was filtered out ("no features found").
    EmptyVocabulary,
}

/// Vocabulary, inverted index and weight matrix built together from one
/// corpus. Read-only after [`TextIndex::build`], so it can be shared across
/// threads freely.
#[derive(Debug, Clone)]
pub struct TextIndex {
    config: EngineConfig,
    tokenizer: Tokenizer,
    corpus: Corpus,
    vocabulary: Vocabulary,
    index: InvertedIndex,
    weights: WeightMatrix,
    bags: Vec<BagOfWords>,
}

impl TextIndex {
    /// Validate the configuration, then run the whole build pass.
    pub fn build(corpus: Corpus, config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let tokenizer = Tokenizer::new(&config.tokenizer);

        let tokenized = tokenize_corpus(&corpus, &tokenizer, config.parallel);
        let vocabulary = build_vocabulary(&tokenized, &config.filter);

        let bags: Vec<BagOfWords> = if config.parallel {
            tokenized
                .par_iter()
                .map(|d| BagOfWords { id: d.id, counts: vocabulary.doc2bow(&d.terms) })
                .collect()
        } else {
            bags_of_words(&tokenized, &vocabulary)
        };

        // Single-threaded reduce over the per-document results.
        let index = InvertedIndex::from_bags(&bags, vocabulary.len());
        let weights = WeightMatrix::from_bags(&bags, &vocabulary);

        tracing::info!(num_docs = corpus.len(), num_terms = vocabulary.len(), "index build complete");
        Ok(Self { config: config.clone(), tokenizer, corpus, vocabulary, index, weights, bags })
    }

    pub fn status(&self) -> IndexStatus {
        if self.corpus.is_empty() {
            IndexStatus::EmptyCorpus
        } else if self.vocabulary.is_empty() {
            IndexStatus::EmptyVocabulary
        } else {
            IndexStatus::Ready
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn inverted_index(&self) -> &InvertedIndex {
        &self.index
    }

    pub fn weights(&self) -> &WeightMatrix {
        &self.weights
    }

    /// Per-document term counts over the filtered vocabulary, for handing to
    /// a topic model.
    pub fn bag_of_words(&self) -> &[BagOfWords] {
        &self.bags
    }

    /// Documents containing the term, ascending. Empty when the term is unknown.
    pub fn postings(&self, term: &str) -> &[DocId] {
        self.tokenizer
            .normalize_term(term)
            .and_then(|t| self.vocabulary.id(&t))
            .map(|id| self.index.get(id))
            .unwrap_or(&[])
    }

    pub fn documents_containing(&self, term: &str) -> &[DocId] {
        self.postings(term)
    }

    /// Weight of `term` in `doc`; zero when either is unknown or the document
    /// does not contain the term.
    pub fn weight(&self, doc: DocId, term: &str) -> f64 {
        self.tokenizer
            .normalize_term(term)
            .and_then(|t| self.vocabulary.id(&t))
            .map(|id| self.weights.weight(doc, id))
            .unwrap_or(0.0)
    }

    /// Full non-zero column of a term.
    pub fn score(&self, term: &str) -> TermLookup {
        let Some(normalized) = self.tokenizer.normalize_term(term) else {
            return TermLookup::EmptyQuery;
        };
        match self.vocabulary.id(&normalized) {
            Some(id) => {
                let column = self.weights.column(id);
                TermLookup::Found(TermScores::new(normalized, id, column))
            }
            None => {
                tracing::debug!(term = %normalized, "term not in vocabulary");
                TermLookup::NotFound { term: normalized }
            }
        }
    }

    /// Documents by descending score for `term`, ties by ascending id,
    /// truncated to `k` when given. `None` when the term is not found.
    pub fn ranked(&self, term: &str, k: Option<usize>) -> Option<Vec<(DocId, f64)>> {
        let scores = match self.score(term) {
            TermLookup::Found(scores) => scores,
            _ => return None,
        };
        let mut ranked = scores.ranked();
        if let Some(k) = k {
            ranked.truncate(k);
        }
        Some(ranked)
    }
}

fn tokenize_corpus(corpus: &Corpus, tokenizer: &Tokenizer, parallel: bool) -> Vec<TokenizedDocument> {
    let tokenize = |d: &Document| TokenizedDocument { id: d.id, terms: tokenizer.tokenize(&d.text).to_vec() };
    if parallel {
        corpus.documents().par_iter().map(tokenize).collect()
    } else {
        corpus.documents().iter().map(tokenize).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FilterOptions, TokenizerConfig};
    use crate::error::Error;

    fn small_config() -> EngineConfig {
        EngineConfig::new(TokenizerConfig::Basic, FilterOptions::keep_all())
    }

    #[test]
    fn invalid_config_rejected_before_processing() {
        let mut cfg = small_config();
        cfg.filter.no_above = 2.0;
        let err = TextIndex::build(Corpus::from_texts(["a"]), &cfg).unwrap_err();
        assert_eq!(err, Error::NoAboveOutOfRange(2.0));
    }

    #[test]
    fn empty_corpus_is_a_status_not_an_error() {
        let idx = TextIndex::build(Corpus::new(), &small_config()).unwrap();
        assert_eq!(idx.status(), IndexStatus::EmptyCorpus);
        assert!(idx.weights().is_empty());
        assert!(matches!(idx.score("anything"), TermLookup::NotFound { .. }));
    }

    #[test]
    fn query_is_normalized_like_documents() {
        let idx = TextIndex::build(Corpus::from_texts(["Rust, rust and RUST!"]), &small_config()).unwrap();
        assert_eq!(idx.postings("RUST"), &[1]);
        let found = idx.score("Rust!");
        assert_eq!(found.found().map(|s| s.get(1)), Some(Some(3.0)));
        assert_eq!(idx.score("  ... "), TermLookup::EmptyQuery);
    }

    #[test]
    fn sequential_and_parallel_builds_agree() {
        let corpus = Corpus::from_texts(["alpha beta gamma", "beta gamma gamma", "delta alpha", "epsilon"]);
        let mut cfg = small_config();
        let par = TextIndex::build(corpus.clone(), &cfg).unwrap();
        cfg.parallel = false;
        let seq = TextIndex::build(corpus, &cfg).unwrap();
        assert_eq!(par.vocabulary(), seq.vocabulary());
        assert_eq!(par.inverted_index(), seq.inverted_index());
        assert_eq!(par.weights(), seq.weights());
    }

    #[test]
    fn ranked_truncates() {
        let idx = TextIndex::build(Corpus::from_texts(["x x y", "x y", "x x x"]), &small_config()).unwrap();
        let top = idx.ranked("x", Some(2)).unwrap();
        assert_eq!(top.iter().map(|&(d, _)| d).collect::<Vec<_>>(), vec![3, 1]);
        assert!(idx.ranked("zzz", None).is_none());
    }
}
