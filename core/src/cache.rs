use crate::config::EngineConfig;
use crate::corpus::Corpus;
use crate::engine::TextIndex;
use crate::error::Result;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    corpus_hash: String,
    config: String,
}

/// Caller-owned memo of built indexes, keyed by corpus content and
/// configuration. Nothing is cached unless the caller holds one of these.
#[derive(Debug, Default)]
pub struct BuildCache {
    entries: RwLock<HashMap<CacheKey, Arc<TextIndex>>>,
}

impl BuildCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached index for this corpus and configuration, building it
    /// on a miss. Configuration errors are never cached.
    pub fn get_or_build(&self, corpus: &Corpus, config: &EngineConfig) -> Result<Arc<TextIndex>> {
        config.validate()?;
        let key = CacheKey { corpus_hash: corpus.content_hash(), config: config.fingerprint() };
        if let Some(hit) = self.entries.read().get(&key) {
            tracing::debug!(corpus_hash = %key.corpus_hash, "build cache hit");
            return Ok(Arc::clone(hit));
        }
        tracing::debug!(corpus_hash = %key.corpus_hash, "build cache miss");
        let built = Arc::new(TextIndex::build(corpus.clone(), config)?);
        // Another caller may have raced us; keep whichever landed first.
        let mut entries = self.entries.write();
        let entry = entries.entry(key).or_insert(built);
        Ok(Arc::clone(entry))
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FilterOptions, TokenizerConfig};

    #[test]
    fn hits_share_the_same_build() {
        let cache = BuildCache::new();
        let cfg = EngineConfig::new(TokenizerConfig::Basic, FilterOptions::keep_all());
        let corpus = Corpus::from_texts(["one two", "two three"]);
        let a = cache.get_or_build(&corpus, &cfg).unwrap();
        let b = cache.get_or_build(&corpus.clone(), &cfg).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn different_config_or_corpus_misses() {
        let cache = BuildCache::new();
        let cfg = EngineConfig::new(TokenizerConfig::Basic, FilterOptions::keep_all());
        let corpus = Corpus::from_texts(["one two"]);
        cache.get_or_build(&corpus, &cfg).unwrap();
        cache.get_or_build(&corpus, &EngineConfig::new(TokenizerConfig::filtered(), FilterOptions::keep_all())).unwrap();
        cache.get_or_build(&Corpus::from_texts(["one three"]), &cfg).unwrap();
        assert_eq!(cache.len(), 3);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn invalid_config_not_cached() {
        let cache = BuildCache::new();
        let mut cfg = EngineConfig::default();
        cfg.filter.no_above = -1.0;
        assert!(cache.get_or_build(&Corpus::from_texts(["x"]), &cfg).is_err());
        assert!(cache.is_empty());
    }
}
