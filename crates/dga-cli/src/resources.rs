use std::path::PathBuf;

use clap::Args;

use dga_core::reference::ReferenceData;
use dga_core::{Detector, RandomForest, ResourcePaths};

/// Resource location flags shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct ResourceArgs {
    /// Directory holding the reference tables and model
    #[arg(long, env = "DGA_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// JSON file listing resource paths (overrides --data-dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Character probability table
    #[arg(long)]
    pub char_probs: Option<PathBuf>,

    /// Common bigram table
    #[arg(long)]
    pub bigrams: Option<PathBuf>,

    /// Common trigram table
    #[arg(long)]
    pub trigrams: Option<PathBuf>,

    /// Model artifact
    #[arg(long)]
    pub model: Option<PathBuf>,
}

impl ResourceArgs {
    /// Resolve the final set of paths: config file or data dir, then
    /// per-file overrides.
    pub fn paths(&self) -> Result<ResourcePaths, String> {
        let mut paths = match &self.config {
            Some(config) => ResourcePaths::from_json_file(config).map_err(|e| e.to_string())?,
            None => ResourcePaths::in_dir(&self.data_dir),
        };

        if let Some(p) = &self.char_probs {
            paths.char_probabilities = p.clone();
        }
        if let Some(p) = &self.bigrams {
            paths.bigrams = p.clone();
        }
        if let Some(p) = &self.trigrams {
            paths.trigrams = p.clone();
        }
        if let Some(p) = &self.model {
            paths.model = p.clone();
        }

        log::debug!("Resource paths: {:?}", paths);
        Ok(paths)
    }
}

pub fn load_reference(paths: &ResourcePaths) -> Result<ReferenceData, String> {
    ReferenceData::load(&paths.char_probabilities, &paths.bigrams, &paths.trigrams)
        .map_err(|e| format!("Failed to load reference tables: {}", e))
}

pub fn load_detector(paths: &ResourcePaths) -> Result<Detector<RandomForest>, String> {
    Detector::load(paths).map_err(|e| format!("Failed to load resources: {}", e))
}
