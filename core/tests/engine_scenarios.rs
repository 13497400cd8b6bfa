use tfindex_core::{
    BuildCache, Corpus, EngineConfig, FilterOptions, IndexStatus, TermLookup, TextIndex, TokenizerConfig,
};

fn keep_all() -> EngineConfig {
    EngineConfig::new(TokenizerConfig::Basic, FilterOptions::keep_all())
}

fn three_docs() -> Corpus {
    Corpus::from_pairs([
        (1, "machine learning is great"),
        (2, "deep learning is great"),
        (3, "natural language processing"),
    ])
    .unwrap()
}

#[test]
fn small_corpus_scenario() {
    let idx = TextIndex::build(three_docs(), &keep_all()).unwrap();
    assert_eq!(idx.status(), IndexStatus::Ready);

    let vocab = idx.vocabulary();
    for term in ["learning", "great", "machine", "deep", "natural", "language", "processing"] {
        assert!(vocab.id(term).is_some(), "missing {term}");
    }
    assert_eq!(idx.postings("learning"), &[1, 2]);
    assert_eq!(idx.postings("processing"), &[3]);
    assert!(idx.weight(1, "machine") > 0.0);
    assert_eq!(idx.weight(3, "machine"), 0.0);
    assert_eq!(idx.score("missingword"), TermLookup::NotFound { term: "missingword".into() });
    assert!(idx.documents_containing("missingword").is_empty());
}

#[test]
fn single_document_with_high_no_below_is_empty() {
    let cfg = EngineConfig::new(TokenizerConfig::Basic, FilterOptions { no_below: 2, no_above: 1.0, keep_n: None });
    let idx = TextIndex::build(Corpus::from_texts(["just one document here"]), &cfg).unwrap();
    assert_eq!(idx.status(), IndexStatus::EmptyVocabulary);
    assert!(idx.vocabulary().is_empty());
    assert!(idx.weights().is_empty());
    assert!(matches!(idx.score("document"), TermLookup::NotFound { .. }));
    assert!(matches!(idx.score("one"), TermLookup::NotFound { .. }));
}

#[test]
fn library_defaults_empty_small_corpora() {
    let idx = TextIndex::build(three_docs(), &EngineConfig::default()).unwrap();
    assert_eq!(idx.status(), IndexStatus::EmptyVocabulary);
}

#[test]
fn idf_is_exactly_one_for_terms_in_every_document() {
    let idx = TextIndex::build(Corpus::from_texts(["a b", "a c", "a"]), &keep_all()).unwrap();
    let a = idx.vocabulary().id("a").unwrap();
    assert_eq!(idx.weights().idf(a), Some(1.0));
}

#[test]
fn ties_rank_by_ascending_document_id() {
    let corpus = Corpus::from_pairs([(9, "foo bar"), (4, "foo baz"), (6, "qux")]).unwrap();
    let idx = TextIndex::build(corpus, &keep_all()).unwrap();
    let scores = idx.score("foo");
    let ranked = scores.found().unwrap().ranked();
    assert_eq!(ranked.iter().map(|&(d, _)| d).collect::<Vec<_>>(), vec![4, 9]);
    assert_eq!(ranked[0].1, ranked[1].1);
}

#[test]
fn filtered_profile_feeds_bag_of_words() {
    let corpus = Corpus::from_texts([
        "Topic models discover hidden topics",
        "Hidden structure in documents",
        "Models of documents and topics",
    ]);
    let cfg = EngineConfig::new(TokenizerConfig::filtered(), FilterOptions { no_below: 2, no_above: 1.0, keep_n: None });
    let idx = TextIndex::build(corpus, &cfg).unwrap();
    let terms: Vec<&str> = idx.vocabulary().iter().map(|(_, t)| t).collect();
    assert_eq!(terms, vec!["documents", "hidden", "models", "topics"]);

    let bows = idx.bag_of_words();
    assert_eq!(bows.len(), 3);
    let vocab = idx.vocabulary();
    assert_eq!(
        bows[0].counts,
        vec![(vocab.id("hidden").unwrap(), 1), (vocab.id("models").unwrap(), 1), (vocab.id("topics").unwrap(), 1)]
    );
}

#[test]
fn cache_reuses_builds_across_threads() {
    let cache = BuildCache::new();
    let cfg = keep_all();
    let corpus = three_docs();
    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                let idx = cache.get_or_build(&corpus, &cfg).unwrap();
                assert_eq!(idx.postings("great"), &[1, 2]);
            });
        }
    });
    assert_eq!(cache.len(), 1);
}

#[test]
fn lines_corpus_matches_line_numbers() {
    let idx = TextIndex::build(Corpus::from_lines("The quick fox\n\nthe lazy dog\n"), &keep_all()).unwrap();
    assert_eq!(idx.postings("the"), &[1, 3]);
    assert_eq!(idx.postings("fox"), &[1]);
}
