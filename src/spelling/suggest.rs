//! Bounded single-word lookup against the deletion index.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::sync::LazyLock;

use ahash::{AHashMap, AHashSet};
use log::{debug, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::spelling::deletes::{DeletionIndex, deletions};
use crate::spelling::dictionary::FrequencyTable;
use crate::spelling::levenshtein::trimmed_distance;

/// Tokens containing a digit or a currency symbol are never corrected.
static PASS_THROUGH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{Sc}\d]").expect("pass-through pattern is valid"));

/// Check if a token bypasses correction (numbers, prices).
pub fn is_pass_through(token: &str) -> bool {
    PASS_THROUGH.is_match(token)
}

/// A spelling suggestion for one query word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// The suggested word.
    pub word: String,
    /// Edit distance from the query.
    pub distance: usize,
    /// Frequency of the suggested word in the dictionary.
    pub frequency: u64,
}

impl Suggestion {
    /// Create a new suggestion.
    pub fn new(word: String, distance: usize, frequency: u64) -> Self {
        Suggestion {
            word,
            distance,
            frequency,
        }
    }
}

impl Ord for Suggestion {
    fn cmp(&self, other: &Self) -> Ordering {
        // Closest first, then most frequent
        self.distance
            .cmp(&other.distance)
            .then_with(|| other.frequency.cmp(&self.frequency))
            .then_with(|| self.word.cmp(&other.word))
    }
}

impl PartialOrd for Suggestion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Ranked suggestions for one query, best first.
///
/// Never empty: a query with no dictionary match within range yields itself at
/// distance 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionSet {
    query: String,
    suggestions: Vec<Suggestion>,
}

impl SuggestionSet {
    fn unmatched(query: String, frequency: u64) -> Self {
        SuggestionSet {
            suggestions: vec![Suggestion::new(query.clone(), 0, frequency)],
            query,
        }
    }

    /// The normalized query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Suggestions ordered by distance, frequency (descending) and word.
    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    /// Take the ranked suggestions, best first.
    pub fn into_suggestions(self) -> Vec<Suggestion> {
        self.suggestions
    }

    /// The top-ranked suggestion.
    pub fn best(&self) -> &Suggestion {
        &self.suggestions[0]
    }

    /// Suggested words in rank order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.suggestions.iter().map(|s| s.word.as_str())
    }

    /// The suggestions sharing the smallest distance.
    pub fn nearest(&self) -> &[Suggestion] {
        let best = self.best().distance;
        let end = self
            .suggestions
            .iter()
            .position(|s| s.distance != best)
            .unwrap_or(self.suggestions.len());
        &self.suggestions[..end]
    }

    /// Distance recorded for a word, if it was suggested.
    pub fn distance_of(&self, word: &str) -> Option<usize> {
        self.suggestions
            .iter()
            .find(|s| s.word == word)
            .map(|s| s.distance)
    }

    /// Check if the set is the query echoed back, i.e. nothing matched.
    pub fn is_unmatched(&self) -> bool {
        self.suggestions.len() == 1
            && self.suggestions[0].word == self.query
            && self.suggestions[0].distance == 0
    }

    pub fn len(&self) -> usize {
        self.suggestions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Suggestion> {
        self.suggestions.iter()
    }
}

impl IntoIterator for SuggestionSet {
    type Item = Suggestion;
    type IntoIter = std::vec::IntoIter<Suggestion>;

    fn into_iter(self) -> Self::IntoIter {
        self.suggestions.into_iter()
    }
}

/// Searches a [`DeletionIndex`] for dictionary words near a query.
#[derive(Debug, Clone, Copy)]
pub struct LookupEngine<'a> {
    table: &'a FrequencyTable,
    index: &'a DeletionIndex,
}

impl<'a> LookupEngine<'a> {
    /// Create an engine over a table and the index built from it.
    pub fn new(table: &'a FrequencyTable, index: &'a DeletionIndex) -> Self {
        LookupEngine { table, index }
    }

    /// Find every dictionary word within `max_distance` edits of `query`.
    ///
    /// The query is lowercased first. Pass-through tokens, empty queries,
    /// queries too long to match anything and queries with no match all come
    /// back as themselves at distance 0. A `max_distance` above the index depth
    /// is clamped to it.
    pub fn lookup(&self, query: &str, max_distance: usize) -> SuggestionSet {
        let query = query.to_lowercase();

        let max_distance = if max_distance > self.index.max_distance() {
            warn!(
                "max_distance {} exceeds index depth {}, clamping",
                max_distance,
                self.index.max_distance()
            );
            self.index.max_distance()
        } else {
            max_distance
        };

        if query.is_empty() || is_pass_through(&query) {
            let frequency = self.table.frequency(&query);
            return SuggestionSet::unmatched(query, frequency);
        }

        let query_chars: Vec<char> = query.chars().collect();
        let query_len = query_chars.len();
        if query_len > self.index.max_word_length() + max_distance {
            debug!("'{query}' is longer than any dictionary word");
            return SuggestionSet::unmatched(query, 0);
        }

        let mut found: AHashMap<String, usize> = AHashMap::new();
        let mut visited: AHashSet<String> = AHashSet::new();
        let mut queue: VecDeque<String> = VecDeque::new();
        visited.insert(query.clone());
        queue.push_back(query.clone());

        while let Some(candidate) = queue.pop_front() {
            let candidate_chars: Vec<char> = candidate.chars().collect();
            let candidate_len = candidate_chars.len();
            let is_word = self.table.contains(&candidate);

            if is_word {
                found
                    .entry(candidate.clone())
                    .or_insert(query_len - candidate_len);
            }

            for (word, _) in self.index.words_for(&candidate) {
                if found.contains_key(word) {
                    continue;
                }

                let distance = if word == query {
                    0
                } else {
                    let word_chars: Vec<char> = word.chars().collect();
                    if word_chars.len() == candidate_len {
                        query_len - candidate_len
                    } else if query_len == candidate_len {
                        word_chars.len() - candidate_len
                    } else {
                        trimmed_distance(&query_chars, &word_chars)
                    }
                };

                if distance <= max_distance {
                    found.insert(word.to_string(), distance);
                }
            }

            if query_len - candidate_len < max_distance {
                for next in single_deletions(&candidate_chars, is_word) {
                    if visited.insert(next.clone()) {
                        queue.push_back(next);
                    }
                }
            }
        }

        if found.is_empty() {
            debug!("No suggestions for '{query}' within distance {max_distance}");
            return SuggestionSet::unmatched(query, 0);
        }

        let mut suggestions: Vec<Suggestion> = found
            .into_iter()
            .map(|(word, distance)| {
                let frequency = self.table.frequency(&word);
                Suggestion::new(word, distance, frequency)
            })
            .collect();
        suggestions.sort();

        debug!(
            "'{}': {} suggestions, best '{}'",
            query,
            suggestions.len(),
            suggestions[0].word
        );

        SuggestionSet { query, suggestions }
    }
}

/// Depth-1 deletions explored from a search candidate.
///
/// A single-letter dictionary word steps down to the empty string, which is
/// where single-letter words are indexed. Other one-letter strings stop.
fn single_deletions(candidate: &[char], is_word: bool) -> Vec<String> {
    match candidate.len() {
        0 => Vec::new(),
        1 if is_word => vec![String::new()],
        1 => Vec::new(),
        _ => deletions(candidate, 1),
    }
}
