use crate::config::TokenizerConfig;
use crate::DocId;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref PUNCT: Regex = Regex::new(r"[^\p{Alphabetic}\p{N}_\s]").expect("valid regex");
    // Same membership as gensim's STOPWORDS.
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","across","after","afterwards","again","against","all","almost","alone","along","already","also","although","always","am","among","amongst","amoungst","amount","an","and","another","any","anyhow","anyone","anything","anyway","anywhere","are","around","as","at",
            "back","be","became","because","become","becomes","becoming","been","before","beforehand","behind","being","below","beside","besides","between","beyond","bill","both","bottom","but","by",
            "call","can","cannot","cant","co","computer","con","could","couldnt","cry",
            "de","describe","detail","did","didn","do","does","doesn","doing","don","done","down","due","during",
            "each","eg","eight","either","eleven","else","elsewhere","empty","enough","etc","even","ever","every","everyone","everything","everywhere","except",
            "few","fifteen","fifty","fill","find","fire","first","five","for","former","formerly","forty","found","four","from","front","full","further",
            "get","give","go",
            "had","has","hasnt","have","he","hence","her","here","hereafter","hereby","herein","hereupon","hers","herself","him","himself","his","how","however","hundred",
            "i","ie","if","in","inc","indeed","interest","into","is","it","its","itself",
            "just","keep","kg","km",
            "last","latter","latterly","least","less","ltd",
            "made","make","many","may","me","meanwhile","might","mill","mine","more","moreover","most","mostly","move","much","must","my","myself",
            "name","namely","neither","never","nevertheless","next","nine","no","nobody","none","noone","nor","not","nothing","now","nowhere",
            "of","off","often","on","once","one","only","onto","or","other","others","otherwise","our","ours","ourselves","out","over","own",
            "part","per","perhaps","please","put",
            "quite","rather","re","really","regarding",
            "same","say","see","seem","seemed","seeming","seems","serious","several","she","should","show","side","since","sincere","six","sixty","so","some","somehow","someone","something","sometime","sometimes","somewhere","still","such","system",
            "take","ten","than","that","the","their","them","themselves","then","thence","there","thereafter","thereby","therefore","therein","thereupon","these","they","thick","thin","third","this","those","though","three","through","throughout","thru","thus","to","together","too","top","toward","towards","twelve","twenty","two",
            "un","under","unless","until","up","upon","us","used","using",
            "various","very","via",
            "was","we","well","were","what","whatever","when","whence","whenever","where","whereafter","whereas","whereby","wherein","whereupon","wherever","whether","which","while","whither","who","whoever","whole","whom","whose","why","will","with","within","without","would",
            "yet","you","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

/// Built-in English stop-word set used by the filtered profile unless the
/// configuration supplies its own.
pub fn default_stopwords() -> &'static HashSet<&'static str> {
    &STOPWORDS
}

#[derive(Debug, Clone)]
enum Profile {
    Basic,
    Filtered {
        min_len: usize,
        max_len: Option<usize>,
        stopwords: HashSet<String>,
        strip_accents: bool,
    },
}

/// Turns raw text into normalized terms under one configured profile.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    profile: Profile,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::basic()
    }
}

impl Tokenizer {
    pub fn new(config: &TokenizerConfig) -> Self {
        let profile = match config {
            TokenizerConfig::Basic => Profile::Basic,
            TokenizerConfig::Filtered { min_token_length, max_token_length, stopwords, strip_accents } => Profile::Filtered {
                min_len: *min_token_length,
                max_len: *max_token_length,
                stopwords: stopwords.iter().cloned().collect(),
                strip_accents: *strip_accents,
            },
        };
        Self { profile }
    }

    pub fn basic() -> Self {
        Self { profile: Profile::Basic }
    }

    /// Character-level normalization shared by documents and query terms:
    /// lower-case, optional accent stripping, then every character that is
    /// neither alphanumeric, underscore nor whitespace removed outright.
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let lowered = match &self.profile {
            Profile::Filtered { strip_accents: true, .. } => {
                lowered.nfd().filter(|c| !is_combining_mark(*c)).collect::<String>()
            }
            _ => lowered,
        };
        PUNCT.replace_all(&lowered, "").into_owned()
    }

    /// Normalize a single query term. Returns `None` when nothing survives.
    pub fn normalize_term(&self, term: &str) -> Option<String> {
        let normalized = self.normalize(term);
        let trimmed = normalized.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Tokenize text. The returned [`Tokens`] can be iterated any number of times.
    pub fn tokenize(&self, text: &str) -> Tokens<'_> {
        Tokens { buffer: self.normalize(text), tokenizer: self }
    }

    fn keep(&self, token: &str) -> bool {
        match &self.profile {
            Profile::Basic => true,
            Profile::Filtered { min_len, max_len, stopwords, .. } => {
                let len = token.chars().count();
                len >= *min_len && max_len.map_or(true, |max| len <= max) && !stopwords.contains(token)
            }
        }
    }
}

/// Normalized text of one document; yields its terms lazily.
pub struct Tokens<'a> {
    buffer: String,
    tokenizer: &'a Tokenizer,
}

impl<'a> Tokens<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.buffer.split_whitespace().filter(move |t| self.tokenizer.keep(t))
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }
}

/// A document reduced to its filtered term sequence, in token order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedDocument {
    pub id: DocId,
    pub terms: Vec<String>,
}

/// Tokenize with the basic profile.
pub fn tokenize(text: &str) -> Vec<String> {
    Tokenizer::basic().tokenize(text).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tokenize() {
        let t = tokenize("Hello, World! TF-IDF is fun.");
        assert_eq!(t, vec!["hello", "world", "tfidf", "is", "fun"]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  ?!... ").is_empty());
    }

    #[test]
    fn tokens_are_restartable() {
        let tk = Tokenizer::basic();
        let tokens = tk.tokenize("one two three");
        assert_eq!(tokens.iter().count(), 3);
        assert_eq!(tokens.iter().collect::<Vec<_>>(), vec!["one", "two", "three"]);
    }

    #[test]
    fn filtered_profile_drops_short_and_stop_words() {
        let tk = Tokenizer::new(&TokenizerConfig::filtered());
        let t = tk.tokenize("The cat would rather analyse Café données").to_vec();
        assert_eq!(t, vec!["analyse", "cafe", "donnees"]);
    }

    #[test]
    fn normalize_term_trims_and_rejects_empty() {
        let tk = Tokenizer::basic();
        assert_eq!(tk.normalize_term("  Learning! "), Some("learning".to_string()));
        assert_eq!(tk.normalize_term("?!"), None);
    }
}
