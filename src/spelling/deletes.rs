//! Precomputed deletion index over a frequency table.
//!
//! Every dictionary word is registered under each string that can be produced
//! by deleting up to `max_distance` of its characters. At query time the same
//! deletions are applied to the misspelled word, so two strings within edit
//! distance `k` meet on at least one shared variant without enumerating
//! insertions, substitutions or transpositions.

use std::time::Instant;

use ahash::{AHashMap, AHashSet};
use log::info;

use crate::spelling::dictionary::FrequencyTable;

/// Position of a word in the index word list.
pub type WordId = u32;

/// One `variant -> word` registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    /// The dictionary word the variant was derived from.
    pub word: WordId,
    /// Number of characters deleted to reach the variant.
    pub depth: u8,
}

/// Multimap from deletion variants to the dictionary words that produce them.
#[derive(Debug, Clone, Default)]
pub struct DeletionIndex {
    words: Vec<String>,
    variants: AHashMap<String, Vec<IndexEntry>>,
    max_distance: usize,
    max_word_length: usize,
    entry_count: usize,
}

impl DeletionIndex {
    /// Build the index for every word in `table` down to `max_distance` deletions.
    ///
    /// Single-letter words are registered only under the empty string at depth 1.
    /// Variants are deduplicated per word and depth, so a word with repeated
    /// letters ("book") registers each distinct variant once.
    pub fn build(table: &FrequencyTable, max_distance: usize) -> Self {
        let start = Instant::now();

        // Sorted ids keep entry order stable across runs.
        let mut words: Vec<String> = table.iter().map(|(word, _)| word.to_string()).collect();
        words.sort_unstable();

        let mut index = DeletionIndex {
            words: Vec::with_capacity(words.len()),
            variants: AHashMap::new(),
            max_distance,
            max_word_length: 0,
            entry_count: 0,
        };

        for (id, word) in words.into_iter().enumerate() {
            let id = id as WordId;
            let chars: Vec<char> = word.chars().collect();
            index.max_word_length = index.max_word_length.max(chars.len());

            if chars.len() == 1 {
                if max_distance > 0 {
                    index.insert(String::new(), id, 1);
                }
            } else {
                for depth in 1..=max_distance {
                    for variant in deletions(&chars, depth) {
                        index.insert(variant, id, depth as u8);
                    }
                }
            }

            index.words.push(word);
        }

        info!(
            "Built deletion index: {} words, {} variants, {} entries (depth {}) in {:?}",
            index.words.len(),
            index.variants.len(),
            index.entry_count,
            max_distance,
            start.elapsed()
        );

        index
    }

    fn insert(&mut self, variant: String, word: WordId, depth: u8) {
        self.variants
            .entry(variant)
            .or_default()
            .push(IndexEntry { word, depth });
        self.entry_count += 1;
    }

    /// Entries registered under a variant, empty when the variant is unknown.
    pub fn get(&self, variant: &str) -> &[IndexEntry] {
        self.variants
            .get(variant)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The word behind an entry id.
    pub fn word(&self, id: WordId) -> &str {
        &self.words[id as usize]
    }

    /// Words registered under a variant, with their deletion depths.
    pub fn words_for(&self, variant: &str) -> impl Iterator<Item = (&str, usize)> {
        self.get(variant)
            .iter()
            .map(|entry| (self.word(entry.word), entry.depth as usize))
    }

    /// Deepest deletion level the index was built with.
    pub fn max_distance(&self) -> usize {
        self.max_distance
    }

    /// Length in chars of the longest indexed word.
    pub fn max_word_length(&self) -> usize {
        self.max_word_length
    }

    /// Number of indexed words.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Number of distinct variant keys.
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// Number of `variant -> word` registrations.
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }
}

/// All distinct strings formed by deleting exactly `depth` characters of `chars`.
///
/// Deleted positions are enumerated as combinations in lexicographic order, and
/// the result keeps the first occurrence of each variant. Inputs no longer than
/// `depth` produce nothing.
pub fn deletions(chars: &[char], depth: usize) -> Vec<String> {
    let len = chars.len();
    if depth == 0 {
        return vec![chars.iter().collect()];
    }
    if len <= depth {
        return Vec::new();
    }

    let mut seen = AHashSet::new();
    let mut variants = Vec::new();
    let mut positions: Vec<usize> = (0..depth).collect();

    loop {
        let mut variant = String::with_capacity(len - depth);
        let mut skip = positions.iter().peekable();
        for (i, &c) in chars.iter().enumerate() {
            if skip.peek() == Some(&&i) {
                skip.next();
            } else {
                variant.push(c);
            }
        }
        if seen.insert(variant.clone()) {
            variants.push(variant);
        }

        if !next_combination(&mut positions, len) {
            break;
        }
    }

    variants
}

/// Advance `positions` to the next `k`-combination of `0..n`.
///
/// Returns `false` once the last combination has been visited.
fn next_combination(positions: &mut [usize], n: usize) -> bool {
    let k = positions.len();
    let Some(i) = (0..k).rev().find(|&i| positions[i] < n - k + i) else {
        return false;
    };

    positions[i] += 1;
    for j in i + 1..k {
        positions[j] = positions[j - 1] + 1;
    }
    true
}
