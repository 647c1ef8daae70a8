//! Lexical and statistical domain features
//!
//! Every function here is a pure function of its inputs. Per-character
//! counts are kept in an ordered map so floating-point sums always run in
//! the same order and repeated extraction is bit-for-bit identical.
//!
//! The stand-alone ratio functions expect a non-empty domain; the
//! orchestrator [`extract_features`] checks that once up front.

use std::collections::BTreeMap;

use crate::ngram::{avg_bigram, avg_trigram, count_bigram, count_trigram};
use crate::reference::{CharProbabilities, ReferenceData};
use crate::types::FeatureVector;

/// Characters counted by [`special_char_ratio`].
pub const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{}|;:\",.<>?/";

/// Vowels counted by [`vowel_consonant_ratio`]. Matching is case-sensitive.
pub const VOWELS: &str = "aeiou";

/// Decimal places kept for the entropy feature.
const ENTROPY_SCALE: f64 = 10_000.0;

/// Error type for feature extraction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("Domain is empty")]
    Empty,
}

// =============================================================================
// Character Statistics
// =============================================================================

/// Occurrences of each distinct character.
fn char_counts(domain: &str) -> BTreeMap<char, usize> {
    let mut counts = BTreeMap::new();
    for c in domain.chars() {
        *counts.entry(c).or_insert(0) += 1;
    }
    counts
}

/// Character count (not byte length).
#[inline]
pub fn domain_length(domain: &str) -> usize {
    domain.chars().count()
}

/// Shannon entropy of the domain's character distribution, in bits.
///
/// Zero for a single repeated character. An empty domain has no
/// distribution and also yields zero.
pub fn calculate_entropy(domain: &str) -> f64 {
    let total = domain_length(domain) as f64;
    let entropy: f64 = char_counts(domain)
        .values()
        .map(|&count| count as f64 / total)
        .filter(|&p| p > 0.0)
        .map(|p| p * p.log2())
        .sum();
    // Avoid returning -0.0
    if entropy == 0.0 {
        0.0
    } else {
        -entropy
    }
}

/// Round to the precision the classifier was trained with.
#[inline]
pub fn round_entropy(entropy: f64) -> f64 {
    (entropy * ENTROPY_SCALE).round() / ENTROPY_SCALE
}

/// Mean reference probability of the domain's characters.
///
/// Characters missing from the table count as probability 0. Returns 0
/// for an empty domain.
pub fn calculate_expected_value(domain: &str, char_probs: &CharProbabilities) -> f64 {
    let counts = char_counts(domain);
    let denominator: usize = counts.values().sum();
    if denominator == 0 {
        return 0.0;
    }

    let numerator: f64 = counts
        .iter()
        .map(|(&c, &count)| count as f64 * char_probs.get(c))
        .sum();

    numerator / denominator as f64
}

// =============================================================================
// Structural Ratios
// =============================================================================

#[inline]
fn is_vowel(c: char) -> bool {
    VOWELS.contains(c)
}

/// Vowels divided by alphabetic non-vowels; 0 when there are no consonants.
pub fn vowel_consonant_ratio(domain: &str) -> f64 {
    let vowels = domain.chars().filter(|&c| is_vowel(c)).count();
    let consonants = domain
        .chars()
        .filter(|&c| c.is_alphabetic() && !is_vowel(c))
        .count();
    if consonants == 0 {
        return 0.0;
    }
    vowels as f64 / consonants as f64
}

/// Digits divided by letters; 0 when there are no letters.
pub fn digit_letter_ratio(domain: &str) -> f64 {
    let digits = domain.chars().filter(|c| c.is_numeric()).count();
    let letters = domain.chars().filter(|c| c.is_alphabetic()).count();
    if letters == 0 {
        return 0.0;
    }
    digits as f64 / letters as f64
}

/// Fraction of characters drawn from [`SPECIAL_CHARS`].
///
/// The domain must be non-empty; an empty domain yields NaN.
pub fn special_char_ratio(domain: &str) -> f64 {
    let special = domain.chars().filter(|&c| SPECIAL_CHARS.contains(c)).count();
    special as f64 / domain_length(domain) as f64
}

// =============================================================================
// Feature Vector
// =============================================================================

/// Compute the full feature vector for a domain.
pub fn extract_features(domain: &str, reference: &ReferenceData) -> Result<FeatureVector, DomainError> {
    if domain.is_empty() {
        return Err(DomainError::Empty);
    }

    Ok(FeatureVector {
        entropy: round_entropy(calculate_entropy(domain)),
        expected_value: calculate_expected_value(domain, &reference.char_probs),
        length: domain_length(domain),
        vowel_consonant_ratio: vowel_consonant_ratio(domain),
        digit_letter_ratio: digit_letter_ratio(domain),
        special_char_ratio: special_char_ratio(domain),
        bigram_count: count_bigram(domain, &reference.bigrams),
        trigram_count: count_trigram(domain, &reference.trigrams),
        avg_bigram: avg_bigram(domain, &reference.bigrams),
        avg_trigram: avg_trigram(domain, &reference.trigrams),
    })
}
