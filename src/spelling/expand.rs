//! Expansion of a sentence into alternative full-sentence candidates.
//!
//! Each token contributes a ranked suggestion list. Starting from the best
//! suggestion at every position, the expander repeatedly widens whichever
//! position has the most frequent suggestion still waiting, until the number of
//! combinations reaches the requested count. The result is the cartesian
//! product of the widened lists.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use log::debug;

use crate::spelling::suggest::{LookupEngine, Suggestion};

/// Builds sentence candidates from per-token lookups.
#[derive(Debug, Clone, Copy)]
pub struct SentenceExpander<'a> {
    engine: LookupEngine<'a>,
    max_distance: usize,
    nearest_only: bool,
}

impl<'a> SentenceExpander<'a> {
    /// Create an expander that looks tokens up within `max_distance` edits.
    pub fn new(engine: LookupEngine<'a>, max_distance: usize) -> Self {
        SentenceExpander {
            engine,
            max_distance,
            nearest_only: true,
        }
    }

    /// Only expand each token with suggestions at its smallest distance.
    /// On by default.
    pub fn nearest_only(mut self, nearest_only: bool) -> Self {
        self.nearest_only = nearest_only;
        self
    }

    /// Ranked suggestion lists for each whitespace token of `sentence`.
    pub fn token_suggestions(&self, sentence: &str) -> Vec<Vec<Suggestion>> {
        sentence
            .to_lowercase()
            .split_whitespace()
            .map(|token| {
                let set = self.engine.lookup(token, self.max_distance);
                if self.nearest_only {
                    set.nearest().to_vec()
                } else {
                    set.into_suggestions()
                }
            })
            .collect()
    }

    /// Expand `sentence` into at least `max_candidates` alternatives when the
    /// suggestions allow it.
    ///
    /// The count can overshoot: widening one position multiplies the total by
    /// its new width. The first token varies slowest in the output.
    pub fn expand(&self, sentence: &str, max_candidates: usize) -> Vec<String> {
        let tokens = self.token_suggestions(sentence);
        if tokens.is_empty() {
            return Vec::new();
        }

        let widths = widen(&tokens, max_candidates);
        let choices: Vec<&[Suggestion]> = tokens
            .iter()
            .zip(&widths)
            .map(|(suggestions, &width)| &suggestions[..width])
            .collect();

        let candidates = cartesian_join(&choices);
        debug!(
            "Expanded {} tokens into {} candidates (widths {:?})",
            tokens.len(),
            candidates.len(),
            widths
        );
        candidates
    }
}

/// Number of suggestions to keep per position.
///
/// Positions are widened in order of the frequency of their next unused
/// suggestion, lower positions first on ties, while the product of widths is
/// below `max_candidates`.
fn widen(tokens: &[Vec<Suggestion>], max_candidates: usize) -> Vec<usize> {
    let horizon = |position: usize, width: usize| -> u64 {
        tokens[position]
            .get(width)
            .map(|s| s.frequency)
            .unwrap_or(0)
    };

    let mut widths = vec![1usize; tokens.len()];
    let mut frontier: BinaryHeap<(u64, Reverse<usize>)> = (0..tokens.len())
        .map(|position| (horizon(position, 1), Reverse(position)))
        .collect();

    let mut product = 1usize;
    while product < max_candidates {
        let Some((frequency, Reverse(position))) = frontier.pop() else {
            break;
        };
        if frequency == 0 {
            break;
        }

        widths[position] += 1;
        frontier.push((horizon(position, widths[position]), Reverse(position)));
        product = widths.iter().fold(1usize, |acc, &w| acc.saturating_mul(w));
    }

    widths
}

/// Every combination of one word per position, joined by single spaces.
fn cartesian_join(choices: &[&[Suggestion]]) -> Vec<String> {
    let mut sentences = vec![String::new()];

    for (position, options) in choices.iter().enumerate() {
        let mut next = Vec::with_capacity(sentences.len() * options.len());
        for prefix in &sentences {
            for option in options.iter() {
                let mut sentence = String::with_capacity(prefix.len() + option.word.len() + 1);
                sentence.push_str(prefix);
                if position > 0 {
                    sentence.push(' ');
                }
                sentence.push_str(&option.word);
                next.push(sentence);
            }
        }
        sentences = next;
    }

    sentences
}
