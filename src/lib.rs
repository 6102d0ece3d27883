//! # smart-speller
//!
//! Frequency-weighted spelling and sentence correction.
//!
//! ## Features
//!
//! - Damerau-Levenshtein distance with adjacent transpositions
//! - Deletion-index lookup of every dictionary word within an edit distance
//! - Sentence expansion into a bounded set of full-sentence candidates
//! - Log-space unigram scoring and normalization of candidates
//!
//! ## Example
//!
//! ```
//! use smart_speller::spelling::{FrequencyTable, Speller};
//!
//! let table = FrequencyTable::from_entries([("the", 100), ("cat", 40), ("sat", 20)]);
//! let speller = Speller::new(table).unwrap();
//!
//! assert_eq!(speller.correct("teh"), "the");
//! assert_eq!(speller.process("teh cat")[0].sentence, "the cat");
//! ```

pub mod cli;
pub mod error;
pub mod math;
pub mod spelling;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
