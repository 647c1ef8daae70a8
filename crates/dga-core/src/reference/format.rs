//! Reference Table Layout
//!
//! Tables are CSV with a header row. Columns are selected by header name
//! and any extra columns are ignored.

/// Default character probability table file
pub const CHAR_PROBS_FILE: &str = "character_probabilities.csv";

/// Default common bigram table file
pub const BIGRAMS_FILE: &str = "DS_bi_gram.csv";

/// Default common trigram table file
pub const TRIGRAMS_FILE: &str = "DS_tri_gram.csv";

/// Header names.
pub mod column {
    /// Single character
    pub const CHARACTER: &str = "Character";
    /// Probability of the character
    pub const PROBABILITY: &str = "Probability";
    /// Two-character string
    pub const BIGRAM: &str = "bi_gram";
    /// Three-character string
    pub const TRIGRAM: &str = "tri_gram";
}
