//! Unigram language-model scoring of candidate sentences.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::math::exp_normalize;
use crate::spelling::dictionary::FrequencyTable;
use crate::spelling::suggest::is_pass_through;

/// A candidate sentence with its normalized probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceProbability {
    /// The candidate sentence, tokens joined by single spaces.
    pub sentence: String,
    /// Probability among the ranked candidates, in `[0, 1]`.
    pub probability: f64,
}

/// Scores words and sentences against a frequency table.
///
/// Word probabilities use add-one smoothing, so unknown words get a small
/// non-zero probability instead of sinking a whole sentence to zero.
#[derive(Debug, Clone, Copy)]
pub struct ProbabilityScorer<'a> {
    table: &'a FrequencyTable,
    log_denominator: f64,
}

impl<'a> ProbabilityScorer<'a> {
    /// Create a scorer over a frequency table.
    pub fn new(table: &'a FrequencyTable) -> Self {
        let denominator = table.total_frequency() as f64 + table.word_count() as f64;
        ProbabilityScorer {
            table,
            log_denominator: denominator.ln(),
        }
    }

    /// `ln((frequency + 1) / (total frequency + vocabulary size))`.
    pub fn word_log_probability(&self, word: &str) -> f64 {
        let frequency = self.table.frequency(word) as f64;
        (frequency + 1.0).ln() - self.log_denominator
    }

    /// Sum of word log-probabilities, ignoring pass-through tokens.
    pub fn sentence_log_probability(&self, sentence: &str) -> f64 {
        sentence
            .split_whitespace()
            .filter(|token| !is_pass_through(token))
            .map(|token| self.word_log_probability(&token.to_lowercase()))
            .sum()
    }

    /// Rank candidate sentences by probability, most likely first.
    ///
    /// Duplicates are collapsed before normalizing, so the returned
    /// probabilities sum to one. Equal probabilities order by sentence.
    pub fn rank<I, S>(&self, candidates: I) -> Vec<SentenceProbability>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = AHashSet::new();
        let sentences: Vec<String> = candidates
            .into_iter()
            .map(Into::into)
            .filter(|sentence| seen.insert(sentence.clone()))
            .collect();

        if sentences.is_empty() {
            return Vec::new();
        }

        let log_probabilities: Vec<f64> = sentences
            .iter()
            .map(|sentence| self.sentence_log_probability(sentence))
            .collect();

        let mut ranked: Vec<SentenceProbability> = sentences
            .into_iter()
            .zip(exp_normalize(&log_probabilities))
            .map(|(sentence, probability)| SentenceProbability {
                sentence,
                probability,
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.probability
                .total_cmp(&a.probability)
                .then_with(|| a.sentence.cmp(&b.sentence))
        });
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> FrequencyTable {
        // total 10, vocabulary 3 -> denominator 13
        FrequencyTable::from_entries([("the", 6), ("cat", 3), ("hat", 1)])
    }

    #[test]
    fn test_word_log_probability() {
        let table = table();
        let scorer = ProbabilityScorer::new(&table);

        assert!((scorer.word_log_probability("the") - (7.0f64 / 13.0).ln()).abs() < 1e-12);
        assert!((scorer.word_log_probability("unknown") - (1.0f64 / 13.0).ln()).abs() < 1e-12);
    }

    #[test]
    fn test_sentence_log_probability_skips_pass_through() {
        let table = table();
        let scorer = ProbabilityScorer::new(&table);

        let plain = scorer.sentence_log_probability("the cat");
        let with_number = scorer.sentence_log_probability("the 42 cat $5");
        assert!((plain - with_number).abs() < 1e-12);
        assert_eq!(scorer.sentence_log_probability(""), 0.0);
    }

    #[test]
    fn test_rank_normalizes_and_orders() {
        let table = table();
        let scorer = ProbabilityScorer::new(&table);

        let ranked = scorer.rank(["the hat", "the cat", "the cat"]);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].sentence, "the cat");
        assert_eq!(ranked[1].sentence, "the hat");

        // P(cat) : P(hat) = 4 : 2
        assert!((ranked[0].probability - 2.0 / 3.0).abs() < 1e-12);
        let total: f64 = ranked.iter().map(|r| r.probability).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rank_ties_order_by_sentence() {
        let table = table();
        let scorer = ProbabilityScorer::new(&table);

        let ranked = scorer.rank(vec!["zzz".to_string(), "qqq".to_string()]);
        assert_eq!(ranked[0].sentence, "qqq");
        assert!((ranked[0].probability - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_rank_empty() {
        let table = table();
        let scorer = ProbabilityScorer::new(&table);
        assert!(scorer.rank(Vec::<String>::new()).is_empty());
    }
}
