//! Word frequency table backing the spelling index and the language model.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::AHashMap;
use log::debug;

use crate::error::{Result, SpellerError};

/// Counts assigned to corpus lines that carry no frequency column.
pub const DEFAULT_FREQUENCY: u64 = 1;

/// A word to occurrence-count table loaded from a frequency corpus.
///
/// Words are stored lowercased. Adding the same word twice sums its counts, so
/// corpora that list a word on several lines load the same as a pre-merged one.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    /// Words and their frequencies
    words: AHashMap<String, u64>,
    /// Sum of all frequencies
    total_count: u64,
    /// Length in chars of the longest word
    max_word_length: usize,
}

impl FrequencyTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        FrequencyTable {
            words: AHashMap::new(),
            total_count: 0,
            max_word_length: 0,
        }
    }

    /// Build a table from `(word, frequency)` pairs.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let mut table = FrequencyTable::new();
        for (word, frequency) in entries {
            table.add_word(word.as_ref(), frequency);
        }
        table
    }

    /// Add `frequency` occurrences of a word. Counts accumulate, saturating at
    /// `u64::MAX`.
    pub fn add_word(&mut self, word: &str, frequency: u64) {
        let normalized = word.to_lowercase();
        if normalized.is_empty() {
            return;
        }

        self.max_word_length = self.max_word_length.max(normalized.chars().count());
        let count = self.words.entry(normalized).or_insert(0);
        *count = count.saturating_add(frequency);
        self.total_count = self.total_count.saturating_add(frequency);
    }

    /// Check if a word exists in the table.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    /// Get the frequency of a word, 0 when absent.
    pub fn frequency(&self, word: &str) -> u64 {
        self.words.get(word).copied().unwrap_or(0)
    }

    /// Iterate over all words and their frequencies, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.words.iter().map(|(word, &freq)| (word.as_str(), freq))
    }

    /// Get the number of distinct words.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Check if the table holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Get the total frequency mass.
    pub fn total_frequency(&self) -> u64 {
        self.total_count
    }

    /// Length in chars of the longest word.
    pub fn max_word_length(&self) -> usize {
        self.max_word_length
    }

    /// Load a corpus file with one `word [frequency]` entry per line.
    ///
    /// Fails when the file cannot be read or yields no words at all.
    pub fn load_from_file<P: AsRef<Path>>(path: P, filter_initials: bool) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let table = Self::from_reader(BufReader::new(file), filter_initials)?;
        debug!(
            "Loaded {} words from {}",
            table.word_count(),
            path.display()
        );
        Ok(table)
    }

    /// Load a corpus from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R, filter_initials: bool) -> Result<Self> {
        let mut table = FrequencyTable::new();
        let mut skipped = 0usize;

        for line in reader.lines() {
            let line = line?;
            match parse_corpus_line(&line) {
                Some((word, frequency)) => {
                    if filter_initials && is_initial(&word) {
                        continue;
                    }
                    table.add_word(&word, frequency);
                }
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            debug!("Skipped {skipped} corpus lines without a word");
        }
        if table.is_empty() {
            return Err(SpellerError::corpus("corpus contains no words"));
        }

        Ok(table)
    }

    /// Load a corpus held in memory.
    pub fn from_corpus_str(text: &str, filter_initials: bool) -> Result<Self> {
        Self::from_reader(text.as_bytes(), filter_initials)
    }
}

/// Parse one `word [frequency]` corpus line.
///
/// Returns `None` for lines without a token. A missing or non-numeric frequency
/// column counts as [`DEFAULT_FREQUENCY`].
pub fn parse_corpus_line(line: &str) -> Option<(String, u64)> {
    let mut parts = line.split_whitespace();
    let word = parts.next()?.to_lowercase();
    let frequency = parts
        .next()
        .and_then(|f| f.parse::<u64>().ok())
        .unwrap_or(DEFAULT_FREQUENCY);
    Some((word, frequency))
}

/// A single letter that is not a standalone pronoun/article (`a`, `i`).
///
/// Frequency corpora are full of stray initials ("j", "k") that would otherwise
/// become cheap corrections for every two-letter typo.
pub fn is_initial(word: &str) -> bool {
    let mut chars = word.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c != 'a' && c != 'i',
        _ => false,
    }
}

/// The English frequency corpus shipped with the crate.
pub struct BuiltinCorpus;

impl BuiltinCorpus {
    /// Raw text of the bundled English corpus.
    pub const ENGLISH: &'static str = include_str!("../../resources/en_common.txt");

    /// Load the bundled English corpus.
    pub fn english() -> Result<FrequencyTable> {
        FrequencyTable::from_corpus_str(Self::ENGLISH, true)
    }
}
