//! Speller facade tying the frequency table, index, expander and scorer together.

use std::path::Path;
use std::sync::OnceLock;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpellerError};
use crate::spelling::deletes::DeletionIndex;
use crate::spelling::dictionary::{BuiltinCorpus, FrequencyTable};
use crate::spelling::expand::SentenceExpander;
use crate::spelling::scorer::{ProbabilityScorer, SentenceProbability};
use crate::spelling::suggest::{LookupEngine, SuggestionSet};

/// Deepest deletion index a configuration may request.
pub const MAX_SUPPORTED_DISTANCE: usize = 3;

/// Configuration for the speller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectorConfig {
    /// Maximum edit distance for suggestions, also the index depth.
    pub max_distance: usize,
    /// Number of sentence candidates to aim for when expanding.
    pub max_candidates: usize,
    /// Expand each token only with its closest suggestions. When off, every
    /// suggestion within `max_distance` competes on frequency alone.
    pub nearest_only: bool,
    /// Drop single-letter corpus words other than "a" and "i".
    pub filter_initials: bool,
}

impl Default for CorrectorConfig {
    fn default() -> Self {
        CorrectorConfig {
            max_distance: 2,
            max_candidates: 12,
            nearest_only: true,
            filter_initials: true,
        }
    }
}

impl CorrectorConfig {
    /// Check that the values describe a usable speller.
    pub fn validate(&self) -> Result<()> {
        if self.max_distance == 0 || self.max_distance > MAX_SUPPORTED_DISTANCE {
            return Err(SpellerError::config(format!(
                "max_distance must be between 1 and {MAX_SUPPORTED_DISTANCE}, got {}",
                self.max_distance
            )));
        }
        if self.max_candidates == 0 {
            return Err(SpellerError::config("max_candidates must be positive"));
        }
        Ok(())
    }

    /// Load and validate a JSON configuration file. Missing fields take defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: CorrectorConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

/// Statistics about a loaded speller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellerStats {
    /// Number of words in the dictionary.
    pub dictionary_words: usize,
    /// Total frequency count in dictionary.
    pub total_frequency: u64,
    /// Length in chars of the longest dictionary word.
    pub max_word_length: usize,
    /// Distinct deletion variants in the index.
    pub index_variants: usize,
    /// Variant to word registrations in the index.
    pub index_entries: usize,
    /// Index depth and default lookup distance.
    pub max_distance: usize,
}

/// Spelling and sentence corrector.
///
/// Built once from a corpus and read-only afterwards; every query takes
/// `&self`, so one instance can serve many threads.
#[derive(Debug, Clone)]
pub struct Speller {
    table: FrequencyTable,
    index: DeletionIndex,
    config: CorrectorConfig,
}

impl Speller {
    /// Create a speller over a frequency table with the default configuration.
    pub fn new(table: FrequencyTable) -> Result<Self> {
        Self::with_config(table, CorrectorConfig::default())
    }

    /// Create a speller over a frequency table with a custom configuration.
    pub fn with_config(table: FrequencyTable, config: CorrectorConfig) -> Result<Self> {
        config.validate()?;
        if table.is_empty() {
            return Err(SpellerError::corpus("cannot build a speller from an empty table"));
        }

        let index = DeletionIndex::build(&table, config.max_distance);
        info!(
            "Speller ready with {} words (max distance {}, {} candidates)",
            table.word_count(),
            config.max_distance,
            config.max_candidates
        );

        Ok(Speller {
            table,
            index,
            config,
        })
    }

    /// Load a corpus file and build a speller from it.
    pub fn from_file<P: AsRef<Path>>(path: P, config: CorrectorConfig) -> Result<Self> {
        config.validate()?;
        let table = FrequencyTable::load_from_file(path, config.filter_initials)?;
        Self::with_config(table, config)
    }

    /// Build a speller from the bundled English corpus.
    pub fn builtin() -> Result<Self> {
        Self::builtin_with_config(CorrectorConfig::default())
    }

    /// Build a speller from the bundled English corpus with a custom configuration.
    pub fn builtin_with_config(config: CorrectorConfig) -> Result<Self> {
        config.validate()?;
        let table = FrequencyTable::from_corpus_str(BuiltinCorpus::ENGLISH, config.filter_initials)?;
        Self::with_config(table, config)
    }

    fn engine(&self) -> LookupEngine<'_> {
        LookupEngine::new(&self.table, &self.index)
    }

    fn expander(&self) -> SentenceExpander<'_> {
        SentenceExpander::new(self.engine(), self.config.max_distance)
            .nearest_only(self.config.nearest_only)
    }

    /// Ranked suggestions for a word within the configured distance.
    pub fn lookup(&self, word: &str) -> SuggestionSet {
        self.engine().lookup(word, self.config.max_distance)
    }

    /// Ranked suggestions for a word within an explicit distance.
    pub fn lookup_within(&self, word: &str, max_distance: usize) -> SuggestionSet {
        self.engine().lookup(word, max_distance)
    }

    /// The best correction for a word, or the word itself when nothing is close.
    pub fn correct(&self, word: &str) -> String {
        let mut suggestions = self.lookup(word).into_suggestions();
        suggestions.swap_remove(0).word
    }

    /// All suggestions for a word, best first.
    pub fn candidates(&self, word: &str) -> Vec<String> {
        self.lookup(word).into_iter().map(|s| s.word).collect()
    }

    /// Alternative sentences built from per-token suggestions.
    pub fn expand(&self, sentence: &str) -> Vec<String> {
        self.expander().expand(sentence, self.config.max_candidates)
    }

    /// Candidate corrections of a sentence with normalized probabilities,
    /// most likely first.
    pub fn process(&self, sentence: &str) -> Vec<SentenceProbability> {
        let candidates = self.expand(sentence);
        let ranked = ProbabilityScorer::new(&self.table).rank(candidates);
        if let Some(best) = ranked.first() {
            debug!(
                "'{}' -> '{}' ({:.4}) among {} candidates",
                sentence,
                best.sentence,
                best.probability,
                ranked.len()
            );
        }
        ranked
    }

    /// Check if a word is in the dictionary.
    pub fn is_correct(&self, word: &str) -> bool {
        self.table.contains(&word.to_lowercase())
    }

    /// Get the configuration.
    pub fn config(&self) -> &CorrectorConfig {
        &self.config
    }

    /// Get the frequency table.
    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    /// Get statistics about the speller.
    pub fn stats(&self) -> SpellerStats {
        SpellerStats {
            dictionary_words: self.table.word_count(),
            total_frequency: self.table.total_frequency(),
            max_word_length: self.table.max_word_length(),
            index_variants: self.index.variant_count(),
            index_entries: self.index.entry_count(),
            max_distance: self.index.max_distance(),
        }
    }
}

static GLOBAL: OnceLock<Speller> = OnceLock::new();

/// Install the process-wide speller. Fails if one is already installed.
pub fn init_global(speller: Speller) -> Result<&'static Speller> {
    let mut installed = false;
    let global = GLOBAL.get_or_init(|| {
        installed = true;
        speller
    });

    if installed {
        Ok(global)
    } else {
        Err(SpellerError::other("global speller is already initialized"))
    }
}

/// The process-wide speller installed by [`init_global`].
pub fn global() -> Result<&'static Speller> {
    GLOBAL
        .get()
        .ok_or_else(|| SpellerError::other("global speller is not initialized"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn speller() -> Speller {
        let table = FrequencyTable::from_entries([
            ("the", 500),
            ("then", 80),
            ("than", 60),
            ("cat", 120),
            ("hat", 90),
            ("sat", 70),
            ("on", 300),
            ("mat", 40),
            ("a", 400),
        ]);
        Speller::new(table).unwrap()
    }

    #[test]
    fn test_speller_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Speller>();
    }

    #[test]
    fn test_default_config() {
        let config = CorrectorConfig::default();
        assert_eq!(config.max_distance, 2);
        assert_eq!(config.max_candidates, 12);
        assert!(config.nearest_only);
        assert!(config.filter_initials);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let config = CorrectorConfig {
            max_distance: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SpellerError::Config(_))));

        let config = CorrectorConfig {
            max_distance: 4,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = CorrectorConfig {
            max_candidates: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let table = FrequencyTable::from_entries([("word", 1)]);
        assert!(Speller::with_config(table, config).is_err());
    }

    #[test]
    fn test_config_json_defaults_missing_fields() {
        let config: CorrectorConfig = serde_json::from_str(r#"{"max_candidates": 20}"#).unwrap();
        assert_eq!(config.max_candidates, 20);
        assert_eq!(config.max_distance, 2);
    }

    #[test]
    fn test_empty_table_is_rejected() {
        let result = Speller::new(FrequencyTable::new());
        assert!(matches!(result, Err(SpellerError::Corpus(_))));
    }

    #[test]
    fn test_correct() {
        let speller = speller();
        assert_eq!(speller.correct("hte"), "the");
        assert_eq!(speller.correct("teh"), "the");
        assert_eq!(speller.correct("Cat"), "cat");
        assert_eq!(speller.correct("qqqqqq"), "qqqqqq");
        assert_eq!(speller.correct("$5"), "$5");
    }

    #[test]
    fn test_candidates() {
        let speller = speller();
        let candidates = speller.candidates("cst");
        assert_eq!(candidates[0], "cat");
        assert!(candidates.contains(&"sat".to_string()));

        let mut distinct = candidates.clone();
        distinct.sort();
        distinct.dedup();
        assert_eq!(distinct.len(), candidates.len());

        assert_eq!(speller.candidates("42"), vec!["42"]);
    }

    #[test]
    fn test_process() {
        let speller = speller();
        let results = speller.process("teh cst on");

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].sentence, "the cat on");
        assert!((results[0].probability - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_process_all_suggestions() {
        let config = CorrectorConfig {
            nearest_only: false,
            ..Default::default()
        };
        let speller = Speller::with_config(speller().table().clone(), config).unwrap();
        let results = speller.process("teh cst on");

        assert_eq!(results[0].sentence, "the cat on");
        assert!(results.len() >= 8);
        let total: f64 = results.iter().map(|r| r.probability).sum();
        assert!((total - 1.0).abs() < 1e-9);
        for pair in results.windows(2) {
            assert!(pair[0].probability >= pair[1].probability);
        }
    }

    #[test]
    fn test_process_prefers_nearest_correction() {
        // Each distance-2 neighbour is far more frequent than the real fix.
        let table = FrequencyTable::from_entries([
            ("above", 50),
            ("love", 5000),
            ("abroad", 40),
            ("road", 3000),
        ]);
        let speller = Speller::new(table.clone()).unwrap();
        assert_eq!(speller.lookup("aobve").distance_of("love"), Some(2));

        assert_eq!(speller.process("aobve")[0].sentence, "above");
        assert_eq!(speller.process("arboad")[0].sentence, "abroad");
        assert_eq!(speller.process("aobve arboad")[0].sentence, "above abroad");

        let config = CorrectorConfig {
            nearest_only: false,
            ..Default::default()
        };
        let frequency_only = Speller::with_config(table, config).unwrap();
        assert_eq!(frequency_only.process("aobve")[0].sentence, "love");
    }

    #[test]
    fn test_process_empty_sentence() {
        let speller = speller();
        assert!(speller.process("").is_empty());
    }

    #[test]
    fn test_is_correct() {
        let speller = speller();
        assert!(speller.is_correct("the"));
        assert!(speller.is_correct("THE"));
        assert!(!speller.is_correct("hte"));
    }

    #[test]
    fn test_stats() {
        let speller = speller();
        let stats = speller.stats();
        assert_eq!(stats.dictionary_words, 9);
        assert_eq!(stats.total_frequency, 1660);
        assert_eq!(stats.max_word_length, 4);
        assert_eq!(stats.max_distance, 2);
        assert!(stats.index_entries >= stats.index_variants);
    }

    #[test]
    fn test_builtin_speller() {
        let speller = Speller::builtin().unwrap();
        assert_eq!(speller.correct("teh"), "the");
        assert_eq!(speller.correct("recieve"), "receive");
        assert_eq!(speller.correct("speling"), "spelling");
        assert!(speller.stats().dictionary_words > 1000);
    }
}
