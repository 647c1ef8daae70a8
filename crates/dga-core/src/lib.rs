//! DGA Detection Core Library
//!
//! This crate classifies a domain name as algorithmically generated (DGA)
//! or benign from a raw URL, using a pre-trained classifier over
//! hand-engineered lexical and statistical features.
//!
//! # Architecture
//!
//! A URL is reduced to its domain (host minus the final suffix segment),
//! the domain is summarized as a fixed-order, 10-position feature vector,
//! and the vector is handed to an opaque classifier. Reference tables and
//! the model are loaded once at startup and never mutated afterwards.
//!
//! # Modules
//!
//! - `url`: URL host parsing and domain extraction
//! - `ngram`: Sliding-window n-grams and common n-gram statistics
//! - `features`: Entropy, expected value, ratio features and the extractor
//! - `reference`: Character probability and common n-gram tables
//! - `classifier`: Classifier seam and the random forest model
//! - `config`: Resource file locations
//! - `detector`: URL to verdict pipeline
//! - `types`: Shared type definitions

pub mod classifier;
pub mod config;
pub mod detector;
pub mod features;
pub mod ngram;
pub mod reference;
pub mod types;
pub mod url;

// Re-export commonly used types
pub use classifier::{Classifier, ModelError, RandomForest};
pub use config::{ConfigError, ResourcePaths};
pub use detector::{DetectError, Detector, LoadError};
pub use features::{extract_features, DomainError};
pub use ngram::{ngrams, NgramSet};
pub use reference::{CharProbabilities, ReferenceData, ReferenceError};
pub use types::{Detection, FeatureVector, Label, FEATURE_COUNT, FEATURE_NAMES};
pub use url::extract_domain;
