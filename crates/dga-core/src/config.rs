//! Locations of the startup resources.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::classifier::MODEL_FILE;
use crate::reference::{BIGRAMS_FILE, CHAR_PROBS_FILE, TRIGRAMS_FILE};

/// Error type for reading a resource config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {error}")]
    Io { path: String, error: std::io::Error },
    #[error("Invalid config '{path}': {error}")]
    Parse { path: String, error: serde_json::Error },
}

/// Paths to the three reference tables and the model artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePaths {
    pub char_probabilities: PathBuf,
    pub bigrams: PathBuf,
    pub trigrams: PathBuf,
    pub model: PathBuf,
}

impl Default for ResourcePaths {
    fn default() -> Self {
        Self::in_dir(Path::new("."))
    }
}

impl ResourcePaths {
    /// Default file names under `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            char_probabilities: dir.join(CHAR_PROBS_FILE),
            bigrams: dir.join(BIGRAMS_FILE),
            trigrams: dir.join(TRIGRAMS_FILE),
            model: dir.join(MODEL_FILE),
        }
    }

    /// Read paths from a JSON file. Relative paths resolve against the
    /// file's directory.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
            path: path.display().to_string(),
            error,
        })?;
        let paths: Self = serde_json::from_str(&content).map_err(|error| ConfigError::Parse {
            path: path.display().to_string(),
            error,
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(paths.relative_to(base))
    }

    fn relative_to(self, base: &Path) -> Self {
        let resolve = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };
        Self {
            char_probabilities: resolve(self.char_probabilities),
            bigrams: resolve(self.bigrams),
            trigrams: resolve(self.trigrams),
            model: resolve(self.model),
        }
    }
}
