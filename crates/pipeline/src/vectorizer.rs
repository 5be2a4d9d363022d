//! Count vectorizer for tag soups.
//!
//! Tokens are runs of word characters at least `min_token_len` long.
//! The vocabulary keeps the `max_features` terms with the highest total
//! count across the corpus (ties broken alphabetically) and is then
//! indexed alphabetically.

use crate::config::ContentBuildConfig;
use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use tracing::info;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+\b").expect("Failed to compile word regex"));

/// English stop words removed before counting.
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
        "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
        "amongst", "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone",
        "anything", "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became",
        "because", "become", "becomes", "becoming", "been", "before", "beforehand", "behind",
        "being", "below", "beside", "besides", "between", "beyond", "bill", "both", "bottom",
        "but", "by", "call", "can", "cannot", "cant", "co", "con", "could", "couldnt", "cry",
        "de", "describe", "detail", "do", "done", "down", "due", "during", "each", "eg", "eight",
        "either", "eleven", "else", "elsewhere", "empty", "enough", "etc", "even", "ever",
        "every", "everyone", "everything", "everywhere", "except", "few", "fifteen", "fifty",
        "fill", "find", "fire", "first", "five", "for", "former", "formerly", "forty", "found",
        "four", "from", "front", "full", "further", "get", "give", "go", "had", "has", "hasnt",
        "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein", "hereupon",
        "hers", "herself", "him", "himself", "his", "how", "however", "hundred", "i", "ie", "if",
        "in", "inc", "indeed", "interest", "into", "is", "it", "its", "itself", "keep", "last",
        "latter", "latterly", "least", "less", "ltd", "made", "many", "may", "me", "meanwhile",
        "might", "mill", "mine", "more", "moreover", "most", "mostly", "move", "much", "must",
        "my", "myself", "name", "namely", "neither", "never", "nevertheless", "next", "nine",
        "no", "nobody", "none", "noone", "nor", "not", "nothing", "now", "nowhere", "of", "off",
        "often", "on", "once", "one", "only", "onto", "or", "other", "others", "otherwise",
        "our", "ours", "ourselves", "out", "over", "own", "part", "per", "perhaps", "please",
        "put", "rather", "re", "same", "see", "seem", "seemed", "seeming", "seems", "serious",
        "several", "she", "should", "show", "side", "since", "sincere", "six", "sixty", "so",
        "some", "somehow", "someone", "something", "sometime", "sometimes", "somewhere",
        "still", "such", "system", "take", "ten", "than", "that", "the", "their", "them",
        "themselves", "then", "thence", "there", "thereafter", "thereby", "therefore",
        "therein", "thereupon", "these", "they", "thick", "thin", "third", "this", "those",
        "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too",
        "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up",
        "upon", "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
        "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein",
        "whereupon", "wherever", "whether", "which", "while", "whither", "who", "whoever",
        "whole", "whom", "whose", "why", "will", "with", "within", "without", "would", "yet",
        "you", "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

/// Sparse term-count vector, indices ascending
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    pub indices: Vec<u32>,
    pub values: Vec<f32>,
}

impl SparseVector {
    /// Euclidean norm
    pub fn norm(&self) -> f32 {
        self.values.iter().map(|v| v * v).sum::<f32>().sqrt()
    }

    /// Dot product of two sparse vectors (merge over sorted indices)
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += self.values[i] * other.values[j];
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Fitted vocabulary plus one count vector per document
#[derive(Debug, Clone)]
pub struct Vectorized {
    pub vocabulary: Vec<String>,
    pub vectors: Vec<SparseVector>,
}

/// Bag-of-words count vectorizer
#[derive(Debug, Clone)]
pub struct CountVectorizer {
    max_features: usize,
    min_token_len: usize,
    remove_stop_words: bool,
}

impl CountVectorizer {
    pub fn new(config: &ContentBuildConfig) -> Self {
        Self {
            max_features: config.max_features,
            min_token_len: config.min_token_len,
            remove_stop_words: config.remove_stop_words,
        }
    }

    /// Split a document into lowercase tokens
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        WORD.find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|token| token.chars().count() >= self.min_token_len)
            .filter(|token| !(self.remove_stop_words && STOP_WORDS.contains(token)))
            .map(str::to_string)
            .collect()
    }

    /// Learn the vocabulary and count every document against it
    pub fn fit_transform(&self, documents: &[&str]) -> Vectorized {
        let tokenized: Vec<Vec<String>> = documents.par_iter().map(|d| self.tokenize(d)).collect();

        let mut totals: HashMap<&str, u64> = HashMap::new();
        for tokens in &tokenized {
            for token in tokens {
                *totals.entry(token.as_str()).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(&str, u64)> = totals.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.max_features);

        let mut vocabulary: Vec<String> = ranked.into_iter().map(|(t, _)| t.to_string()).collect();
        vocabulary.sort();
        let positions: HashMap<&str, u32> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, t)| (t.as_str(), i as u32))
            .collect();

        let vectors = tokenized
            .par_iter()
            .map(|tokens| {
                let mut counts: HashMap<u32, f32> = HashMap::new();
                for token in tokens {
                    if let Some(&index) = positions.get(token.as_str()) {
                        *counts.entry(index).or_insert(0.0) += 1.0;
                    }
                }
                let mut entries: Vec<(u32, f32)> = counts.into_iter().collect();
                entries.sort_by_key(|&(index, _)| index);
                let (indices, values) = entries.into_iter().unzip();
                SparseVector { indices, values }
            })
            .collect();

        info!("Vectorized {} documents over {} terms", documents.len(), vocabulary.len());
        Vectorized { vocabulary, vectors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectorizer(max_features: usize) -> CountVectorizer {
        CountVectorizer::new(&ContentBuildConfig::default().with_max_features(max_features))
    }

    #[test]
    fn test_tokenize_drops_short_and_stop_words() {
        let tokens = vectorizer(10).tokenize("The Marine is sent to Pandora, a moon!");
        assert_eq!(tokens, vec!["marine", "sent", "pandora", "moon"]);
    }

    #[test]
    fn test_vocabulary_truncation_ties_alphabetical() {
        let docs = ["space war space", "war ship", "alien ship"];
        let result = vectorizer(3).fit_transform(&docs);

        // space=2, war=2, ship=2, alien=1
        assert_eq!(result.vocabulary, vec!["ship", "space", "war"]);
        assert_eq!(result.vectors[0], SparseVector { indices: vec![1, 2], values: vec![2.0, 1.0] });
        assert_eq!(result.vectors[2], SparseVector { indices: vec![0], values: vec![1.0] });
    }

    #[test]
    fn test_sparse_dot_and_norm() {
        let a = SparseVector { indices: vec![0, 2, 5], values: vec![1.0, 2.0, 3.0] };
        let b = SparseVector { indices: vec![2, 3, 5], values: vec![4.0, 1.0, 1.0] };

        assert_eq!(a.dot(&b), 11.0);
        assert_eq!(SparseVector { indices: vec![0, 1], values: vec![3.0, 4.0] }.norm(), 5.0);
        assert_eq!(SparseVector::default().norm(), 0.0);
    }
}
