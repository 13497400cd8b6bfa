use criterion::{criterion_group, criterion_main, Criterion};
use tfindex_core::tokenizer::Tokenizer;
use tfindex_core::TokenizerConfig;

const TEXT: &str = "Natural language processing, or NLP, is a part of artificial intelligence. \
    TF-IDF is a common technique in natural language processing; deep learning is a subfield \
    of machine learning. Café owners' naïve résumés aren't indexed by stemming!";

fn bench_tokenize(c: &mut Criterion) {
    let text = TEXT.repeat(64);
    let basic = Tokenizer::basic();
    let filtered = Tokenizer::new(&TokenizerConfig::filtered());
    c.bench_function("tokenize_basic", |b| b.iter(|| basic.tokenize(&text).to_vec()));
    c.bench_function("tokenize_filtered", |b| b.iter(|| filtered.tokenize(&text).to_vec()));
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
