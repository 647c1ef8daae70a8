//! Random forest loaded from a JSON model artifact.
//!
//! Each tree uses the flat node-array layout of scikit-learn's fitted trees:
//! node `i` is a leaf when `children_left[i] == -1`, otherwise samples with
//! `x[feature[i]] <= threshold[i]` go left. Leaf `value` rows hold the
//! per-class weights `[benign, dga]`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::Classifier;
use crate::types::{Label, FEATURE_COUNT, FEATURE_NAMES};

/// Default model artifact file
pub const MODEL_FILE: &str = "rf_model.json";

/// Child index marking a leaf.
const LEAF: i64 = -1;

/// Error type for model loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Failed to read model '{path}': {error}")]
    Io { path: String, error: std::io::Error },
    #[error("Model JSON parse error: {0}")]
    ParseJson(#[from] serde_json::Error),
    #[error("Model expects {got} features, pipeline produces {expected}")]
    FeatureCountMismatch { expected: usize, got: usize },
    #[error("Feature {index} is named '{got}', expected '{expected}'")]
    FeatureNameMismatch { index: usize, expected: &'static str, got: String },
    #[error("Model has no trees")]
    NoTrees,
    #[error("Tree {tree}: node arrays are empty or differ in length")]
    NodeArrayLength { tree: usize },
    #[error("Tree {tree} node {node}: invalid child index")]
    InvalidChild { tree: usize, node: usize },
    #[error("Tree {tree} node {node}: feature index {feature} out of range")]
    InvalidFeature { tree: usize, node: usize, feature: i64 },
    #[error("Tree {tree} node {node}: non-finite threshold {threshold}")]
    NonFiniteThreshold { tree: usize, node: usize, threshold: f64 },
    #[error("Tree {tree} node {node}: leaf class weights must be nonnegative with a positive sum")]
    InvalidLeafValue { tree: usize, node: usize },
}

// =============================================================================
// Tree
// =============================================================================

/// One fitted decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<[f64; 2]>,
}

impl Tree {
    fn node_count(&self) -> usize {
        self.children_left.len()
    }

    fn validate(&self, tree: usize, n_features: usize) -> Result<(), ModelError> {
        let n = self.node_count();
        if n == 0
            || self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err(ModelError::NodeArrayLength { tree });
        }

        for node in 0..n {
            let left = self.children_left[node];
            let right = self.children_right[node];

            if left == LEAF {
                if right != LEAF {
                    return Err(ModelError::InvalidChild { tree, node });
                }
                let [benign, dga] = self.value[node];
                let valid = benign.is_finite() && dga.is_finite() && benign >= 0.0 && dga >= 0.0;
                if !valid || benign + dga <= 0.0 {
                    return Err(ModelError::InvalidLeafValue { tree, node });
                }
                continue;
            }

            // Children always follow their parent, which rules out cycles
            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(ModelError::InvalidChild { tree, node });
                }
            }

            let feature = self.feature[node];
            if feature < 0 || feature as usize >= n_features {
                return Err(ModelError::InvalidFeature { tree, node, feature });
            }

            let threshold = self.threshold[node];
            if !threshold.is_finite() {
                return Err(ModelError::NonFiniteThreshold { tree, node, threshold });
            }
        }

        Ok(())
    }

    /// Walk to a leaf and return its DGA class probability.
    fn dga_probability(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        let mut node = 0usize;
        while self.children_left[node] != LEAF {
            // Trees are trained on single-precision inputs
            let x = features[self.feature[node] as usize] as f32 as f64;
            node = if x <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }

        let [benign, dga] = self.value[node];
        dga / (benign + dga)
    }
}

// =============================================================================
// Random Forest
// =============================================================================

/// Averaging ensemble of decision trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    /// Human-readable model identifier.
    #[serde(default)]
    pub model_id: String,
    /// Input width the model was trained on.
    pub n_features: usize,
    /// Feature names, in training order (optional, checked when present).
    #[serde(default)]
    pub feature_names: Vec<String>,
    pub trees: Vec<Tree>,
}

impl RandomForest {
    /// Check that the model is structurally sound and matches the pipeline.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.n_features != FEATURE_COUNT {
            return Err(ModelError::FeatureCountMismatch {
                expected: FEATURE_COUNT,
                got: self.n_features,
            });
        }

        if !self.feature_names.is_empty() {
            if self.feature_names.len() != FEATURE_COUNT {
                return Err(ModelError::FeatureCountMismatch {
                    expected: FEATURE_COUNT,
                    got: self.feature_names.len(),
                });
            }
            for (index, (got, expected)) in self.feature_names.iter().zip(FEATURE_NAMES).enumerate() {
                if got != expected {
                    return Err(ModelError::FeatureNameMismatch {
                        index,
                        expected,
                        got: got.clone(),
                    });
                }
            }
        }

        if self.trees.is_empty() {
            return Err(ModelError::NoTrees);
        }

        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(i, self.n_features)?;
        }

        Ok(())
    }

    /// Load and validate a model from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let model: Self = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    /// Load and validate a model from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path).map_err(|error| ModelError::Io {
            path: path.display().to_string(),
            error,
        })?;
        let model = Self::from_json(&content)?;
        log::info!(
            "Loaded model '{}' ({} trees) from '{}'",
            model.model_id,
            model.trees.len(),
            path.display()
        );
        Ok(model)
    }

    /// Mean DGA probability across trees.
    pub fn predict_proba(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        let total: f64 = self.trees.iter().map(|t| t.dga_probability(features)).sum();
        total / self.trees.len() as f64
    }
}

impl Classifier for RandomForest {
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Label {
        let dga = self.predict_proba(features);
        // Ties go to the first class
        if dga > 1.0 - dga {
            Label::Dga
        } else {
            Label::Benign
        }
    }
}
