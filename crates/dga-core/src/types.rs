//! Core type definitions for DGA detection
//!
//! These types carry the contract between the feature extractor and the
//! classifier: a fixed-order feature vector in, a binary label out.

use serde::Serialize;

// =============================================================================
// Prediction Label
// =============================================================================

/// Classifier verdict for a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Label {
    /// Ordinary, human-registered domain
    Benign = 0,
    /// Domain produced by a domain generation algorithm
    Dga = 1,
}

impl Label {
    /// Returns true if the domain was classified as DGA-generated.
    #[inline]
    pub const fn is_dga(self) -> bool {
        matches!(self, Self::Dga)
    }

    /// Human-readable verdict.
    pub const fn verdict(self) -> &'static str {
        match self {
            Self::Benign => "not a DGA botnet",
            Self::Dga => "is a DGA botnet",
        }
    }
}

impl TryFrom<u8> for Label {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Benign),
            1 => Ok(Self::Dga),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.verdict())
    }
}

// =============================================================================
// Feature Vector
// =============================================================================

/// Number of positions in a feature vector.
pub const FEATURE_COUNT: usize = 10;

/// Feature names in vector order. The model was trained on this exact order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "entropy",
    "expected_value",
    "length",
    "vowel_consonant_ratio",
    "digit_letter_ratio",
    "special_char_ratio",
    "bigram_count",
    "trigram_count",
    "avg_bigram",
    "avg_trigram",
];

/// Lexical and statistical summary of one domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector {
    /// Shannon entropy, rounded to 4 decimal places
    pub entropy: f64,
    /// Mean reference probability of the domain's characters
    pub expected_value: f64,
    /// Character count
    pub length: usize,
    pub vowel_consonant_ratio: f64,
    pub digit_letter_ratio: f64,
    pub special_char_ratio: f64,
    /// Common bigrams found (with repetition)
    pub bigram_count: usize,
    /// Common trigrams found (with repetition)
    pub trigram_count: usize,
    pub avg_bigram: f64,
    pub avg_trigram: f64,
}

impl FeatureVector {
    /// Flatten into classifier input order.
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.entropy,
            self.expected_value,
            self.length as f64,
            self.vowel_consonant_ratio,
            self.digit_letter_ratio,
            self.special_char_ratio,
            self.bigram_count as f64,
            self.trigram_count as f64,
            self.avg_bigram,
            self.avg_trigram,
        ]
    }

    /// Pair each value with its feature name.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> {
        FEATURE_NAMES.into_iter().zip(self.to_array())
    }
}

// =============================================================================
// Detection Result
// =============================================================================

/// Result of running one URL through the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    /// Domain extracted from the URL
    pub domain: String,
    /// Features the classifier saw
    pub features: FeatureVector,
    /// The classifier's verdict
    pub label: Label,
}
