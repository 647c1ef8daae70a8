//! Classifier Adapter
//!
//! The trained model is an opaque function from a feature vector to a
//! label. [`Classifier`] is that seam: the pipeline hands the vector over
//! unchanged, in [`FEATURE_NAMES`](crate::types::FEATURE_NAMES) order.

mod forest;

pub use forest::{ModelError, RandomForest, Tree, MODEL_FILE};

use crate::types::{Label, FEATURE_COUNT};

/// A trained, side-effect-free binary classifier.
///
/// Implementations must be immutable once loaded so a single instance can
/// serve concurrent requests without locking.
pub trait Classifier: Send + Sync {
    /// Predict the label for one feature vector.
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Label;
}

impl<C: Classifier + ?Sized> Classifier for &C {
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Label {
        (**self).predict(features)
    }
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Label {
        (**self).predict(features)
    }
}

impl<C: Classifier + ?Sized> Classifier for std::sync::Arc<C> {
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Label {
        (**self).predict(features)
    }
}
