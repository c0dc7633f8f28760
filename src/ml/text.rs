use once_cell::sync::Lazy;
use std::collections::HashSet;

/// English stopword list (NLTK set), matched against lowercased tokens.
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
        "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his",
        "himself", "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself",
        "they", "them", "their", "theirs", "themselves", "what", "which", "who", "whom", "this",
        "that", "that'll", "these", "those", "am", "is", "are", "was", "were", "be", "been",
        "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an", "the",
        "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by", "for",
        "with", "about", "against", "between", "into", "through", "during", "before", "after",
        "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
        "again", "further", "then", "once", "here", "there", "when", "where", "why", "how",
        "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
        "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can",
        "will", "just", "don", "don't", "should", "should've", "now", "d", "ll", "m", "o", "re",
        "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn", "didn't", "doesn",
        "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn", "isn't", "ma",
        "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
        "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
        "wouldn't",
    ]
    .into_iter()
    .collect()
});

/// Deterministic text-cleaning transform applied to raw ticket text before it
/// reaches any model.
///
/// Lowercases, splits on whitespace (punctuation is deliberately left
/// attached to tokens), drops stopwords, reduces surviving tokens to their
/// dictionary base form, and rejoins with single spaces. All linguistic
/// resources are embedded, so normalization cannot fail; the contract that a
/// preprocessing failure falls back to the raw input is satisfied vacuously.
#[derive(Debug, Clone, Default)]
pub struct TextNormalizer;

impl TextNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalize raw ticket text. Pure: identical input yields identical
    /// output. Empty input and stopword-only input both yield the empty
    /// string.
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();

        lowered
            .split_whitespace()
            .filter(|word| !STOPWORDS.contains(*word))
            .map(lemmatize)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Reduce an English token to its base form using morphy-style noun
/// detachment rules. Short tokens and non-plural shapes pass through
/// unchanged.
fn lemmatize(word: &str) -> String {
    if word.len() <= 2 {
        return word.to_string();
    }

    if let Some(stem) = word.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{}y", stem);
        }
    }

    if let Some(stem) = word.strip_suffix("sses") {
        return format!("{}ss", stem);
    }

    for suffix in ["ches", "shes", "xes", "zes"] {
        if let Some(stem) = word.strip_suffix(suffix) {
            // strip only the trailing "es"
            return format!("{}{}", stem, &suffix[..suffix.len() - 2]);
        }
    }

    if let Some(stem) = word.strip_suffix("men") {
        if !stem.is_empty() {
            return format!("{}man", stem);
        }
    }

    if word.ends_with('s') && !word.ends_with("ss") && !word.ends_with("us") && !word.ends_with("is")
    {
        return word[..word.len() - 1].to_string();
    }

    word.to_string()
}
