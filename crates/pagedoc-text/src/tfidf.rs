//! TF-IDF (Term Frequency-Inverse Document Frequency) scoring.
//!
//! This module provides:
//! - Whitespace tokenization with punctuation stripping and lowercasing
//! - Append-only corpus statistics for IDF computation
//! - A thread-safe [`CorpusIndex`] that scores arbitrary text against the
//!   accumulated corpus
//!
//! ## Formula
//!
//! - `tf(t)  = 1 + ln(count(t))` (sublinear; grows with every repetition)
//! - `idf(t) = ln((1 + N) / (1 + df(t))) + 1` (smoothed; finite for unseen terms)
//! - `score  = sum over distinct terms of tf(t) * idf(t)`
//!
//! Text without any alphanumeric token scores exactly `0.0`.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Errors raised by the TF-IDF scorer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TfIdfError {
    /// No text was supplied where a value is mandatory.
    #[error("text to score is missing")]
    MissingText,

    /// A writer panicked while holding the corpus lock.
    #[error("corpus lock poisoned")]
    LockPoisoned,
}

impl<T> From<PoisonError<T>> for TfIdfError {
    fn from(_: PoisonError<T>) -> Self {
        TfIdfError::LockPoisoned
    }
}

/// Tokenizes text into normalized terms.
///
/// Processing steps:
/// 1. Split on whitespace
/// 2. Remove every non-alphanumeric character
/// 3. Convert to lowercase
/// 4. Drop tokens that are now empty
///
/// Punctuation-only and empty text produce no terms.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(normalize_token)
        .filter(|token| !token.is_empty())
        .collect()
}

fn normalize_token(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

/// Counts occurrences of each term, keyed in term order.
///
/// The ordered map keeps float sums over the counts reproducible.
pub fn term_counts(tokens: &[String]) -> BTreeMap<&str, usize> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Sublinear term frequency: `1 + ln(count)`, or `0.0` for an absent term.
pub fn sublinear_tf(count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        1.0 + (count as f64).ln()
    }
}

/// Statistics about a corpus of documents for IDF computation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorpusStats {
    /// Number of documents in the corpus
    pub document_count: usize,
    /// Number of documents containing each term
    pub document_frequencies: HashMap<String, usize>,
}

impl CorpusStats {
    /// Creates a new empty corpus stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document's tokens to the corpus statistics.
    ///
    /// Each distinct term counts once per document.
    pub fn add_document(&mut self, tokens: &[String]) {
        self.document_count += 1;

        let unique_terms: HashSet<&String> = tokens.iter().collect();
        for term in unique_terms {
            *self.document_frequencies.entry(term.clone()).or_insert(0) += 1;
        }
    }

    /// Number of documents containing `term`.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.document_frequencies.get(term).copied().unwrap_or(0)
    }

    /// Smoothed inverse document frequency.
    ///
    /// `ln((1 + N) / (1 + df)) + 1`. Always finite and at least `1.0` since
    /// `df <= N`; strictly decreasing as `df` grows.
    pub fn idf(&self, term: &str) -> f64 {
        let n = self.document_count as f64;
        let df = self.document_frequency(term) as f64;
        ((1.0 + n) / (1.0 + df)).ln() + 1.0
    }

    /// Per-term TF-IDF contributions of `tokens` against these statistics.
    pub fn term_weights(&self, tokens: &[String]) -> BTreeMap<String, f64> {
        term_counts(tokens)
            .into_iter()
            .map(|(term, count)| (term.to_string(), sublinear_tf(count) * self.idf(term)))
            .collect()
    }

    /// Sums the TF-IDF contributions of `tokens`.
    pub fn score(&self, tokens: &[String]) -> f64 {
        if tokens.is_empty() {
            return 0.0;
        }
        term_counts(tokens)
            .into_iter()
            .map(|(term, count)| sublinear_tf(count) * self.idf(term))
            .sum()
    }
}

#[derive(Debug, Default)]
struct CorpusState {
    entries: Vec<String>,
    stats: CorpusStats,
}

/// Append-only corpus with TF-IDF scoring.
///
/// Cloning yields another handle to the same corpus. Any number of scorers
/// may read concurrently; an added entry becomes visible to scorers all at
/// once, together with its document frequencies.
#[derive(Debug, Clone, Default)]
pub struct CorpusIndex {
    state: Arc<RwLock<CorpusState>>,
}

impl CorpusIndex {
    /// Creates an empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one entry to the corpus.
    pub fn add_document_to_corpus(&self, text: &str) -> Result<(), TfIdfError> {
        let tokens = tokenize(text);

        let mut state = self.write()?;
        state.entries.push(text.to_string());
        state.stats.add_document(&tokens);

        debug!(
            corpus_size = state.stats.document_count,
            terms = tokens.len(),
            "added document to corpus"
        );
        Ok(())
    }

    /// Scores `text` against the corpus.
    ///
    /// `None` is a contract violation and fails with
    /// [`TfIdfError::MissingText`]; empty or punctuation-only text scores `0.0`.
    pub fn calculate_document_tfidf(&self, text: Option<&str>) -> Result<f64, TfIdfError> {
        let text = text.ok_or(TfIdfError::MissingText)?;
        self.score(text)
    }

    /// Scores `text` against the corpus without mutating it.
    pub fn score(&self, text: &str) -> Result<f64, TfIdfError> {
        let tokens = tokenize(text);
        let state = self.read()?;
        let score = state.stats.score(&tokens);

        debug!(
            corpus_size = state.stats.document_count,
            terms = tokens.len(),
            score,
            "scored text"
        );
        Ok(score)
    }

    /// Per-term contributions to the score of `text`.
    pub fn term_weights(&self, text: &str) -> Result<BTreeMap<String, f64>, TfIdfError> {
        let tokens = tokenize(text);
        Ok(self.read()?.stats.term_weights(&tokens))
    }

    /// Snapshot of the current corpus statistics.
    pub fn stats(&self) -> Result<CorpusStats, TfIdfError> {
        Ok(self.read()?.stats.clone())
    }

    /// The added texts in insertion order.
    pub fn entries(&self) -> Result<Vec<String>, TfIdfError> {
        Ok(self.read()?.entries.clone())
    }

    /// Number of entries added so far.
    pub fn len(&self) -> Result<usize, TfIdfError> {
        Ok(self.read()?.entries.len())
    }

    /// Returns true if nothing has been added yet.
    pub fn is_empty(&self) -> Result<bool, TfIdfError> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, CorpusState>, TfIdfError> {
        self.state.read().map_err(|e| {
            warn!("Failed to read corpus: lock poisoned: {}", e);
            TfIdfError::from(e)
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, CorpusState>, TfIdfError> {
        self.state.write().map_err(|e| {
            warn!("Failed to update corpus: lock poisoned: {}", e);
            TfIdfError::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(texts: &[&str]) -> CorpusIndex {
        let index = CorpusIndex::new();
        for text in texts {
            index.add_document_to_corpus(text).unwrap();
        }
        index
    }

    #[test]
    fn tokenize_basic() {
        let tokens = tokenize("Hello, world! This is a test.");
        assert_eq!(tokens, vec!["hello", "world", "this", "is", "a", "test"]);
    }

    #[test]
    fn tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t ").is_empty());
    }

    #[test]
    fn tokenize_only_punctuation() {
        assert!(tokenize("!@#$%^&*()").is_empty());
        assert!(tokenize("... ??? --- !!!").is_empty());
    }

    #[test]
    fn tokenize_unicode() {
        let tokens = tokenize("Café RÉSUMÉ naïve");
        assert_eq!(tokens, vec!["café", "résumé", "naïve"]);
    }

    #[test]
    fn term_counts_basic() {
        let tokens = tokenize("cat dog cat bird");
        let counts = term_counts(&tokens);

        assert_eq!(counts["cat"], 2);
        assert_eq!(counts["dog"], 1);
        assert_eq!(counts["bird"], 1);
    }

    #[test]
    fn sublinear_tf_grows_with_count() {
        assert_eq!(sublinear_tf(0), 0.0);
        assert_eq!(sublinear_tf(1), 1.0);
        assert!(sublinear_tf(3) > sublinear_tf(2));
    }

    #[test]
    fn corpus_stats_add_document() {
        let mut stats = CorpusStats::new();
        stats.add_document(&["cat".into(), "dog".into(), "cat".into()]);
        stats.add_document(&["cat".into(), "bird".into()]);

        assert_eq!(stats.document_count, 2);
        assert_eq!(stats.document_frequencies["cat"], 2);
        assert_eq!(stats.document_frequencies["dog"], 1);
        assert_eq!(stats.document_frequencies["bird"], 1);
    }

    #[test]
    fn idf_computation() {
        let mut stats = CorpusStats::new();
        stats.add_document(&["cat".into(), "dog".into()]);
        stats.add_document(&["cat".into(), "bird".into()]);
        stats.add_document(&["fish".into(), "bird".into()]);

        // cat in 2 of 3 docs: ln(4/3) + 1 ~ 1.288
        assert!((stats.idf("cat") - 1.288).abs() < 0.01);

        // dog in 1 of 3 docs: ln(4/2) + 1 ~ 1.693
        assert!((stats.idf("dog") - 1.693).abs() < 0.01);

        // unseen: ln(4/1) + 1 ~ 2.386
        assert!((stats.idf("unknown") - 2.386).abs() < 0.01);
    }

    #[test]
    fn idf_decreases_with_document_frequency() {
        let mut stats = CorpusStats::new();
        stats.add_document(&["common".into(), "rare".into()]);
        stats.add_document(&["common".into()]);
        stats.add_document(&["common".into()]);

        assert!(stats.idf("unseen") > stats.idf("rare"));
        assert!(stats.idf("rare") > stats.idf("common"));
    }

    #[test]
    fn idf_empty_corpus_is_finite() {
        let stats = CorpusStats::new();
        assert_eq!(stats.idf("anything"), 1.0);
    }

    #[test]
    fn score_known_corpus() {
        let index = corpus(&[
            "the cat sat on the mat",
            "the dog sat on the log",
            "cats and dogs are friends",
        ]);

        let score = index
            .calculate_document_tfidf(Some("the cat sat on the mat"))
            .unwrap();
        assert!(score > 0.0 && score < 10.0);
        assert!((score - 8.1419).abs() < 0.001);
    }

    #[test]
    fn score_missing_text() {
        let index = corpus(&["sample document"]);
        assert_eq!(
            index.calculate_document_tfidf(None),
            Err(TfIdfError::MissingText)
        );
    }

    #[test]
    fn score_empty_text_is_zero() {
        let index = corpus(&["sample document with some words"]);
        assert_eq!(index.calculate_document_tfidf(Some("")).unwrap(), 0.0);
        assert_eq!(CorpusIndex::new().score("").unwrap(), 0.0);
    }

    #[test]
    fn score_special_characters_is_zero() {
        let index = corpus(&["normal text document"]);
        assert_eq!(index.score("!@#$%^&*()").unwrap(), 0.0);
    }

    #[test]
    fn score_single_word() {
        let index = corpus(&["word", "another document here"]);
        assert!(index.score("word").unwrap() > 0.0);
    }

    #[test]
    fn score_repeated_words() {
        let index = corpus(&["cat dog bird", "cat cat cat"]);
        let mixed = index.score("cat dog bird").unwrap();
        let repeated = index.score("cat cat cat").unwrap();

        assert!(mixed > 0.0 && repeated > 0.0);
        assert!(repeated >= index.score("cat").unwrap());
    }

    #[test]
    fn repetition_never_lowers_score() {
        let index = corpus(&["alpha beta", "alpha gamma", "alpha delta"]);
        let once = index.score("alpha beta").unwrap();
        let twice = index.score("alpha alpha beta").unwrap();
        assert!(twice >= once);
    }

    #[test]
    fn scoring_does_not_mutate_corpus() {
        let index = corpus(&["one two", "three"]);
        let before = index.stats().unwrap();
        index.score("one four five").unwrap();
        assert_eq!(index.stats().unwrap(), before);
        assert_eq!(index.len().unwrap(), 2);
    }

    #[test]
    fn term_weights_sum_to_score() {
        let index = corpus(&["red green", "green blue"]);
        let weights = index.term_weights("red red green").unwrap();
        let total: f64 = weights.values().sum();
        assert!((total - index.score("red red green").unwrap()).abs() < 1e-9);
        assert!(weights["red"] > weights["green"]);
    }

    #[test]
    fn repeated_scoring_is_bit_identical() {
        let index = corpus(&["alpha beta gamma", "beta delta"]);
        let text: String = (0..400)
            .map(|i| format!("term{} ", i % 200))
            .collect();

        let first = index.score(&text).unwrap().to_bits();
        for _ in 0..200 {
            assert_eq!(index.score(&text).unwrap().to_bits(), first);
        }
    }

    #[test]
    fn term_weights_are_ordered_by_term() {
        let index = corpus(&["zebra apple"]);
        let weights = index.term_weights("zebra mango apple").unwrap();
        let terms: Vec<&str> = weights.keys().map(String::as_str).collect();
        assert_eq!(terms, vec!["apple", "mango", "zebra"]);
    }

    #[test]
    fn entries_kept_in_insertion_order() {
        let index = corpus(&["first", "second", "third"]);
        assert_eq!(index.entries().unwrap(), vec!["first", "second", "third"]);
        assert!(!index.is_empty().unwrap());
        assert!(CorpusIndex::new().is_empty().unwrap());
    }

    #[test]
    fn clones_share_corpus() {
        let index = CorpusIndex::new();
        let handle = index.clone();
        handle.add_document_to_corpus("shared text").unwrap();
        assert_eq!(index.len().unwrap(), 1);
    }

    #[test]
    fn corpus_stats_serialization() {
        let index = corpus(&["cat dog"]);
        let stats = index.stats().unwrap();

        let json = serde_json::to_string(&stats).unwrap();
        let parsed: CorpusStats = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, stats);
    }
}
