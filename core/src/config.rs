use crate::error::{Error, Result};
use crate::tokenizer::default_stopwords;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Build-time configuration. Validated before any corpus processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tokenizer: TokenizerConfig,
    pub filter: FilterOptions,
    /// Tokenize and extract per-document term sets on the rayon pool.
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { tokenizer: TokenizerConfig::Basic, filter: FilterOptions::default(), parallel: true }
    }
}

impl EngineConfig {
    pub fn new(tokenizer: TokenizerConfig, filter: FilterOptions) -> Self {
        Self { tokenizer, filter, ..Self::default() }
    }

    /// Parse a JSON configuration document and validate it.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(s).map_err(|e| Error::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.tokenizer.validate()?;
        self.filter.validate()
    }

    /// Stable textual identity of the configuration, used as half of the memoization key.
    /// `parallel` is excluded since it never changes the output.
    pub fn fingerprint(&self) -> String {
        let tokenizer = serde_json::to_string(&self.tokenizer).unwrap_or_default();
        let filter = serde_json::to_string(&self.filter).unwrap_or_default();
        format!("{tokenizer}|{filter}")
    }
}

/// Tokenizer profile, tagged by `mode` in serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum TokenizerConfig {
    /// Lower-case, strip punctuation, split on whitespace.
    Basic,
    /// Basic normalization plus accent stripping, length bounds and stop-word removal.
    Filtered {
        #[serde(default = "default_min_token_length")]
        min_token_length: usize,
        #[serde(default = "default_max_token_length")]
        max_token_length: Option<usize>,
        #[serde(default = "default_stopword_set")]
        stopwords: BTreeSet<String>,
        #[serde(default = "default_strip_accents")]
        strip_accents: bool,
    },
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        TokenizerConfig::Basic
    }
}

impl TokenizerConfig {
    /// The topic-extraction profile: tokens of at least 4 and at most 15
    /// characters, accents stripped, built-in English stop words removed.
    pub fn filtered() -> Self {
        TokenizerConfig::Filtered {
            min_token_length: default_min_token_length(),
            max_token_length: default_max_token_length(),
            stopwords: default_stopword_set(),
            strip_accents: default_strip_accents(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let TokenizerConfig::Filtered { min_token_length, max_token_length: Some(max), .. } = self {
            if max < min_token_length {
                return Err(Error::InvalidLengthBounds { min: *min_token_length, max: *max });
            }
        }
        Ok(())
    }
}

fn default_min_token_length() -> usize { 4 }
fn default_max_token_length() -> Option<usize> { Some(15) }
fn default_strip_accents() -> bool { true }
fn default_stopword_set() -> BTreeSet<String> {
    default_stopwords().iter().map(|w| w.to_string()).collect()
}

/// Document-frequency extremes filter applied when building the vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    /// Minimum number of documents a term must occur in.
    pub no_below: u32,
    /// Maximum fraction of documents a term may occur in.
    pub no_above: f64,
    /// Keep at most this many of the most frequent surviving terms. `None` is uncapped.
    pub keep_n: Option<usize>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self { no_below: 15, no_above: 0.5, keep_n: Some(100_000) }
    }
}

impl FilterOptions {
    /// Keep every term that occurs at least once. Suitable for small corpora.
    pub fn keep_all() -> Self {
        Self { no_below: 1, no_above: 1.0, keep_n: None }
    }

    pub fn validate(&self) -> Result<()> {
        if self.no_above.is_nan() || !(0.0..=1.0).contains(&self.no_above) {
            return Err(Error::NoAboveOutOfRange(self.no_above));
        }
        Ok(())
    }
}
