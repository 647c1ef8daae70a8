//! Reference Table Loader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::ngram::{NgramSet, BIGRAM, TRIGRAM};
use super::format::column;
use super::{CharProbabilities, ReferenceData};

/// Error type for reference table loading.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    #[error("Failed to read '{table}': {error}")]
    Io { table: String, error: std::io::Error },
    #[error("Malformed CSV in '{table}': {error}")]
    Csv { table: String, error: csv::Error },
    #[error("Missing column '{column}' in '{table}'")]
    MissingColumn { table: String, column: &'static str },
    #[error("Invalid character {value:?} in '{table}' row {row}: expected exactly one character")]
    InvalidCharacter { table: String, row: usize, value: String },
    #[error("Invalid probability {value:?} in '{table}' row {row}")]
    InvalidProbability { table: String, row: usize, value: String },
    #[error("Invalid n-gram {value:?} in '{table}' row {row}: expected {width} characters")]
    InvalidNgram { table: String, row: usize, value: String, width: usize },
    #[error("Table '{table}' has no rows")]
    EmptyTable { table: String },
}

// =============================================================================
// CSV Helpers
// =============================================================================

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::None)
        .from_reader(reader)
}

/// Find the index of a header by name.
fn column_index<R: Read>(
    reader: &mut csv::Reader<R>,
    table: &str,
    name: &'static str,
) -> Result<usize, ReferenceError> {
    let headers = reader.headers().map_err(|error| ReferenceError::Csv {
        table: table.to_string(),
        error,
    })?;

    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| ReferenceError::MissingColumn {
            table: table.to_string(),
            column: name,
        })
}

fn open_table(path: &Path) -> Result<File, ReferenceError> {
    File::open(path).map_err(|error| ReferenceError::Io {
        table: path.display().to_string(),
        error,
    })
}

// =============================================================================
// Character Probabilities
// =============================================================================

/// Parse a character probability table.
///
/// `table` names the source in error messages.
pub fn parse_char_probabilities<R: Read>(reader: R, table: &str) -> Result<CharProbabilities, ReferenceError> {
    let mut reader = csv_reader(reader);
    let char_idx = column_index(&mut reader, table, column::CHARACTER)?;
    let prob_idx = column_index(&mut reader, table, column::PROBABILITY)?;

    let mut probs = CharProbabilities::new();
    let mut rows = 0usize;

    for (i, record) in reader.records().enumerate() {
        let row = i + 1;
        let record = record.map_err(|error| ReferenceError::Csv {
            table: table.to_string(),
            error,
        })?;

        let raw_char = record.get(char_idx).unwrap_or_default();
        let mut chars = raw_char.chars();
        let c = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => {
                return Err(ReferenceError::InvalidCharacter {
                    table: table.to_string(),
                    row,
                    value: raw_char.to_string(),
                })
            }
        };

        let raw_prob = record.get(prob_idx).unwrap_or_default();
        let prob = match raw_prob.trim().parse::<f64>() {
            Ok(p) if p.is_finite() && p >= 0.0 => p,
            _ => {
                return Err(ReferenceError::InvalidProbability {
                    table: table.to_string(),
                    row,
                    value: raw_prob.to_string(),
                })
            }
        };

        if let Some(previous) = probs.insert(c, prob) {
            log::warn!(
                "Duplicate character {:?} in '{}' row {}: {} replaces {}",
                c, table, row, prob, previous
            );
        }
        rows += 1;
    }

    if rows == 0 {
        return Err(ReferenceError::EmptyTable {
            table: table.to_string(),
        });
    }

    Ok(probs)
}

/// Load a character probability table from disk.
pub fn load_char_probabilities(path: &Path) -> Result<CharProbabilities, ReferenceError> {
    let file = open_table(path)?;
    let probs = parse_char_probabilities(file, &path.display().to_string())?;
    log::info!("Loaded {} character probabilities from '{}'", probs.len(), path.display());
    Ok(probs)
}

// =============================================================================
// N-gram Sets
// =============================================================================

/// Parse a single-column n-gram table into a set of width `n`.
pub fn parse_ngram_set<R: Read>(
    reader: R,
    table: &str,
    name: &'static str,
    n: usize,
) -> Result<NgramSet, ReferenceError> {
    let mut reader = csv_reader(reader);
    let idx = column_index(&mut reader, table, name)?;

    let mut set = NgramSet::new(n);
    let mut rows = 0usize;

    for (i, record) in reader.records().enumerate() {
        let row = i + 1;
        let record = record.map_err(|error| ReferenceError::Csv {
            table: table.to_string(),
            error,
        })?;

        let gram = record.get(idx).unwrap_or_default();
        if !set.insert(gram.to_string()) {
            return Err(ReferenceError::InvalidNgram {
                table: table.to_string(),
                row,
                value: gram.to_string(),
                width: n,
            });
        }
        rows += 1;
    }

    if rows == 0 {
        return Err(ReferenceError::EmptyTable {
            table: table.to_string(),
        });
    }

    if set.len() < rows {
        log::warn!("'{}' lists {} rows but only {} distinct n-grams", table, rows, set.len());
    }

    Ok(set)
}

/// Load the common bigram table from disk.
pub fn load_bigrams(path: &Path) -> Result<NgramSet, ReferenceError> {
    let file = open_table(path)?;
    let set = parse_ngram_set(file, &path.display().to_string(), column::BIGRAM, BIGRAM)?;
    log::info!("Loaded {} common bigrams from '{}'", set.len(), path.display());
    Ok(set)
}

/// Load the common trigram table from disk.
pub fn load_trigrams(path: &Path) -> Result<NgramSet, ReferenceError> {
    let file = open_table(path)?;
    let set = parse_ngram_set(file, &path.display().to_string(), column::TRIGRAM, TRIGRAM)?;
    log::info!("Loaded {} common trigrams from '{}'", set.len(), path.display());
    Ok(set)
}

impl ReferenceData {
    /// Load all three reference tables. Fails on the first bad table.
    pub fn load(char_probs: &Path, bigrams: &Path, trigrams: &Path) -> Result<Self, ReferenceError> {
        Ok(Self {
            char_probs: load_char_probabilities(char_probs)?,
            bigrams: load_bigrams(bigrams)?,
            trigrams: load_trigrams(trigrams)?,
        })
    }
}
