use tfindex_core::tokenizer::{tokenize, Tokenizer};
use tfindex_core::TokenizerConfig;

#[test]
fn it_case_folds_and_strips_punctuation() {
    let words = tokenize("Machine-Learning, MACHINE learning; machine_learning!");
    assert_eq!(words, vec!["machinelearning", "machine", "learning", "machine_learning"]);
}

#[test]
fn it_does_not_stem() {
    let words = tokenize("Running runners run");
    assert_eq!(words, vec!["running", "runners", "run"]);
}

#[test]
fn it_keeps_digits_and_unicode_letters() {
    let words = tokenize("Café 2024 naïve");
    assert_eq!(words, vec!["café", "2024", "naïve"]);
}

#[test]
fn it_filters_stopwords_and_short_tokens() {
    let tk = Tokenizer::new(&TokenizerConfig::filtered());
    let words = tk.tokenize("The quick brown fox and the lazy dog").to_vec();
    assert_eq!(words, vec!["quick", "brown", "lazy"]);
}

#[test]
fn it_drops_overlong_tokens_in_filtered_mode() {
    let tk = Tokenizer::new(&TokenizerConfig::filtered());
    let words = tk.tokenize("antidisestablishmentarianism topic").to_vec();
    assert_eq!(words, vec!["topic"]);
}

#[test]
fn basic_mode_never_strips_accents() {
    let tk = Tokenizer::basic();
    assert_eq!(tk.normalize_term("Crème"), Some("crème".to_string()));
    let filtered = Tokenizer::new(&TokenizerConfig::filtered());
    assert_eq!(filtered.normalize_term("Crème"), Some("creme".to_string()));
}

#[test]
fn it_drops_combining_marks_and_keeps_other_numerics() {
    assert_eq!(tokenize("cafe\u{301}"), vec!["cafe"]);
    assert_eq!(tokenize("x\u{bd} \u{2167}"), vec!["x\u{bd}", "\u{2177}"]);
}

#[test]
fn filtered_stopwords_cover_the_topic_model_set() {
    let tk = Tokenizer::new(&TokenizerConfig::filtered());
    let words = tk.tokenize("computer system found detail using really topics").to_vec();
    assert_eq!(words, vec!["topics"]);
}
