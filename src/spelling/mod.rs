//! Spelling and sentence correction.
//!
//! A [`FrequencyTable`] loaded from a corpus feeds a [`DeletionIndex`], which the
//! [`LookupEngine`] searches for words near a query. Sentences are expanded
//! token by token with [`SentenceExpander`] and ranked by [`ProbabilityScorer`].
//! [`Speller`] wraps the whole pipeline.

pub mod corrector;
pub mod deletes;
pub mod dictionary;
pub mod expand;
pub mod levenshtein;
pub mod scorer;
pub mod suggest;

// Re-export commonly used types
pub use corrector::*;
pub use deletes::*;
pub use dictionary::*;
pub use expand::*;
pub use levenshtein::*;
pub use scorer::*;
pub use suggest::*;
