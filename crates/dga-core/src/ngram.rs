//! N-gram generation and common n-gram statistics
//!
//! N-grams are contiguous, overlapping character windows (stride 1).
//! Membership in a reference set is an exact, case-sensitive string match.

use std::collections::HashSet;

/// Bigram window size.
pub const BIGRAM: usize = 2;

/// Trigram window size.
pub const TRIGRAM: usize = 3;

// =============================================================================
// Window Generation
// =============================================================================

/// All contiguous substrings of `n` characters, left to right.
///
/// Returns an empty vec if the domain is shorter than `n` (or `n` is 0).
/// Windows are slices into `domain` and respect char boundaries.
pub fn ngrams(domain: &str, n: usize) -> Vec<&str> {
    if n == 0 {
        return Vec::new();
    }

    let mut bounds: Vec<usize> = domain.char_indices().map(|(i, _)| i).collect();
    if bounds.len() < n {
        return Vec::new();
    }
    bounds.push(domain.len());

    bounds
        .windows(n + 1)
        .map(|w| &domain[w[0]..w[n]])
        .collect()
}

/// Number of windows `ngrams(domain, n)` produces.
#[inline]
pub fn ngram_count(domain: &str, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    (domain.chars().count() + 1).saturating_sub(n)
}

// =============================================================================
// Reference Sets
// =============================================================================

/// Fixed set of common n-grams of a single width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NgramSet {
    n: usize,
    grams: HashSet<String>,
}

impl NgramSet {
    /// Create an empty set for windows of `n` characters.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            grams: HashSet::new(),
        }
    }

    /// Build a set from an iterator of n-grams.
    ///
    /// Entries of the wrong width are kept out of the set; use
    /// [`NgramSet::insert`] to detect them.
    pub fn from_grams<I, S>(n: usize, grams: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new(n);
        for gram in grams {
            set.insert(gram.into());
        }
        set
    }

    /// Insert an n-gram. Returns false if its width is not `n`.
    pub fn insert(&mut self, gram: String) -> bool {
        if gram.chars().count() != self.n {
            return false;
        }
        self.grams.insert(gram);
        true
    }

    /// Window width of this set.
    #[inline]
    pub fn width(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.grams.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.grams.is_empty()
    }

    #[inline]
    pub fn contains(&self, gram: &str) -> bool {
        self.grams.contains(gram)
    }

    /// Count windows of `domain` found in this set (with repetition).
    pub fn count_common(&self, domain: &str) -> usize {
        ngrams(domain, self.n)
            .into_iter()
            .filter(|gram| self.contains(gram))
            .count()
    }

    /// Fraction of windows of `domain` found in this set; 0 if there are none.
    pub fn avg_common(&self, domain: &str) -> f64 {
        let total = ngram_count(domain, self.n);
        if total == 0 {
            return 0.0;
        }
        self.count_common(domain) as f64 / total as f64
    }
}

// =============================================================================
// Bigram / Trigram Helpers
// =============================================================================

/// Common bigrams in `domain`.
#[inline]
pub fn count_bigram(domain: &str, bigrams: &NgramSet) -> usize {
    debug_assert_eq!(bigrams.width(), BIGRAM);
    bigrams.count_common(domain)
}

/// Common trigrams in `domain`.
#[inline]
pub fn count_trigram(domain: &str, trigrams: &NgramSet) -> usize {
    debug_assert_eq!(trigrams.width(), TRIGRAM);
    trigrams.count_common(domain)
}

#[inline]
pub fn avg_bigram(domain: &str, bigrams: &NgramSet) -> f64 {
    bigrams.avg_common(domain)
}

#[inline]
pub fn avg_trigram(domain: &str, trigrams: &NgramSet) -> f64 {
    trigrams.avg_common(domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bigrams() -> NgramSet {
        NgramSet::from_grams(BIGRAM, ["go", "oo", "le", "in", "er"])
    }

    fn trigrams() -> NgramSet {
        NgramSet::from_grams(TRIGRAM, ["goo", "ing", "ter"])
    }

    #[test]
    fn test_ngrams_windows() {
        assert_eq!(ngrams("google", 2), vec!["go", "oo", "og", "gl", "le"]);
        assert_eq!(ngrams("google", 3), vec!["goo", "oog", "ogl", "gle"]);
        assert_eq!(ngrams("abc", 3), vec!["abc"]);
    }

    #[test]
    fn test_ngrams_short_input() {
        assert!(ngrams("a", 2).is_empty());
        assert!(ngrams("ab", 3).is_empty());
        assert!(ngrams("", 2).is_empty());
        assert!(ngrams("abc", 0).is_empty());
    }

    #[test]
    fn test_ngrams_multibyte() {
        assert_eq!(ngrams("héllo", 2), vec!["hé", "él", "ll", "lo"]);
        assert_eq!(ngram_count("héllo", 2), 4);
    }

    #[test]
    fn test_ngram_count_matches_windows() {
        for domain in ["", "a", "ab", "abcdef", "x1-y2.z3", "aaaa"] {
            for n in 1..=4 {
                let windows = ngrams(domain, n);
                let len = domain.chars().count();
                assert_eq!(windows.len(), (len + 1).saturating_sub(n));
                assert_eq!(windows.len(), ngram_count(domain, n));
                for w in windows {
                    assert_eq!(w.chars().count(), n);
                    assert!(domain.contains(w));
                }
            }
        }
    }

    #[test]
    fn test_set_rejects_wrong_width() {
        let mut set = NgramSet::new(BIGRAM);
        assert!(set.insert("ab".to_string()));
        assert!(!set.insert("abc".to_string()));
        assert!(!set.insert("a".to_string()));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_count_common_with_repetition() {
        let set = bigrams();
        // "go", "oo", "og", "gl", "le" -> go, oo, le
        assert_eq!(count_bigram("google", &set), 3);
        // "gogo": go, og, go -> 2
        assert_eq!(count_bigram("gogo", &set), 2);
        assert_eq!(count_trigram("google", &trigrams()), 1);
    }

    #[test]
    fn test_count_is_case_sensitive() {
        let set = bigrams();
        assert_eq!(count_bigram("GOOGLE", &set), 0);
        assert_eq!(count_bigram("Google", &set), 2);
    }

    #[test]
    fn test_avg_common() {
        let set = bigrams();
        assert!((avg_bigram("google", &set) - 0.6).abs() < 1e-12);
        assert_eq!(avg_bigram("g", &set), 0.0);
        assert_eq!(avg_trigram("go", &trigrams()), 0.0);
    }

    #[test]
    fn test_avg_all_common_is_one() {
        let set = bigrams();
        assert_eq!(avg_bigram("gooo", &set), 1.0);
        assert_eq!(avg_bigram("goo", &set), 1.0);
    }

    #[test]
    fn test_avg_in_unit_interval() {
        let set = bigrams();
        for domain in ["google", "xkcd", "inner", "q", "goooogle-1"] {
            let avg = avg_bigram(domain, &set);
            assert!((0.0..=1.0).contains(&avg));
            assert!(count_bigram(domain, &set) <= ngram_count(domain, BIGRAM));
        }
    }
}
