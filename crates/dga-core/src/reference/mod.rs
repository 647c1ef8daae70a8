//! Reference Data Tables and Loader
//!
//! This module provides the CSV table layout and the loader for the three
//! static tables feature extraction consults: character probabilities,
//! common bigrams and common trigrams. Tables are loaded once at startup
//! and never mutated afterwards.

mod format;
mod loader;

pub use format::*;
pub use loader::*;

use std::collections::HashMap;

use crate::ngram::{NgramSet, BIGRAM, TRIGRAM};

// =============================================================================
// Character Probabilities
// =============================================================================

/// Character to probability map. Unknown characters have probability 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharProbabilities {
    probs: HashMap<char, f64>,
}

impl CharProbabilities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from (character, probability) pairs. Later pairs win.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (char, f64)>,
    {
        Self {
            probs: pairs.into_iter().collect(),
        }
    }

    /// Insert a probability, returning the previous one if present.
    pub fn insert(&mut self, c: char, prob: f64) -> Option<f64> {
        self.probs.insert(c, prob)
    }

    /// Probability of `c`, or 0 if the table does not list it.
    #[inline]
    pub fn get(&self, c: char) -> f64 {
        self.probs.get(&c).copied().unwrap_or(0.0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.probs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }
}

// =============================================================================
// Reference Data
// =============================================================================

/// All reference tables, bundled for the feature extractor.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceData {
    pub char_probs: CharProbabilities,
    pub bigrams: NgramSet,
    pub trigrams: NgramSet,
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self {
            char_probs: CharProbabilities::new(),
            bigrams: NgramSet::new(BIGRAM),
            trigrams: NgramSet::new(TRIGRAM),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_char_is_zero() {
        let probs = CharProbabilities::from_pairs([('a', 0.08)]);
        assert_eq!(probs.get('a'), 0.08);
        assert_eq!(probs.get('A'), 0.0);
        assert_eq!(probs.get('-'), 0.0);
    }

    #[test]
    fn test_later_pair_wins() {
        let probs = CharProbabilities::from_pairs([('a', 0.1), ('a', 0.2)]);
        assert_eq!(probs.len(), 1);
        assert_eq!(probs.get('a'), 0.2);
    }

    #[test]
    fn test_default_widths() {
        let data = ReferenceData::default();
        assert_eq!(data.bigrams.width(), BIGRAM);
        assert_eq!(data.trigrams.width(), TRIGRAM);
    }
}
