//! Word frequency lists
//!
//! The layout engine consumes words sorted by descending count. This module
//! builds that list from counted pairs, a JSON object or raw text.

pub mod lexer;

use std::collections::HashMap;

use thiserror::Error;

/// Errors building a frequency list
#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Failed to parse word counts JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A word and the number of times it occurs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCount {
    pub word: String,
    pub count: u32,
}

impl WordCount {
    pub fn new(word: impl Into<String>, count: u32) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// Words sorted by descending count.
///
/// Words are trimmed, blank words are dropped, and words that become equal
/// after trimming are merged by adding their counts. Equal counts are ordered
/// by word so the list is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyList {
    entries: Vec<WordCount>,
}

impl FrequencyList {
    /// Build the list from `(word, count)` pairs
    pub fn from_counts<I, S>(counts: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        let mut merged: HashMap<String, u32> = HashMap::new();
        for (word, count) in counts {
            let word = word.as_ref().trim();
            if word.is_empty() {
                continue;
            }
            let total = merged.entry(word.to_string()).or_insert(0);
            *total = total.saturating_add(count);
        }

        let mut entries: Vec<WordCount> = merged
            .into_iter()
            .map(|(word, count)| WordCount { word, count })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
        Self { entries }
    }

    /// Parse a JSON object mapping words to counts, e.g. `{"rust": 12}`
    pub fn from_json(json: &str) -> Result<Self, CorpusError> {
        let counts: HashMap<String, u32> = serde_json::from_str(json)?;
        Ok(Self::from_counts(counts))
    }

    /// Count the words of raw text
    pub fn from_text(text: &str) -> Self {
        Self::from_counts(lexer::words(text).map(|w| (w, 1)))
    }

    /// Largest count in the list (the first entry's)
    pub fn max_count(&self) -> u32 {
        self.entries.first().map_or(0, |e| e.count)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WordCount> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[WordCount] {
        &self.entries
    }

    /// Keep only the `len` most frequent words
    pub fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a FrequencyList {
    type Item = &'a WordCount;
    type IntoIter = std::slice::Iter<'a, WordCount>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
