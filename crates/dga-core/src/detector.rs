//! URL to verdict pipeline
//!
//! A [`Detector`] owns the reference tables and the classifier, both
//! loaded once and read-only afterwards, so it can be shared across
//! threads (`Arc<Detector<_>>`) without locking.

use crate::classifier::{Classifier, ModelError, RandomForest};
use crate::config::ResourcePaths;
use crate::features::extract_features;
use crate::reference::{ReferenceData, ReferenceError};
use crate::types::{Detection, FeatureVector, Label};
use crate::url::extract_domain;

/// Error type for startup resource loading. Always fatal.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Reference(#[from] ReferenceError),
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Error type for a single request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DetectError {
    /// The input produced no usable domain.
    #[error("Invalid domain: no domain could be extracted from {0:?}")]
    InvalidDomain(String),
}

/// Feature extraction plus classification over fixed reference data.
#[derive(Debug)]
pub struct Detector<C> {
    reference: ReferenceData,
    classifier: C,
}

impl Detector<RandomForest> {
    /// Load every resource eagerly; any failure aborts startup.
    pub fn load(paths: &ResourcePaths) -> Result<Self, LoadError> {
        let reference = ReferenceData::load(&paths.char_probabilities, &paths.bigrams, &paths.trigrams)?;
        let classifier = RandomForest::from_file(&paths.model)?;
        Ok(Self::new(reference, classifier))
    }
}

impl<C: Classifier> Detector<C> {
    pub fn new(reference: ReferenceData, classifier: C) -> Self {
        Self { reference, classifier }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Feature vector for a domain; no model involved.
    pub fn features(&self, domain: &str) -> Result<FeatureVector, DetectError> {
        extract_features(domain, &self.reference)
            .map_err(|_| DetectError::InvalidDomain(domain.to_string()))
    }

    /// Classify a domain string directly.
    pub fn inspect_domain(&self, domain: &str) -> Result<Detection, DetectError> {
        let features = self.features(domain)?;
        let label = self.classifier.predict(&features.to_array());
        log::debug!("domain={:?} features={:?} label={:?}", domain, features.to_array(), label);

        Ok(Detection {
            domain: domain.to_string(),
            features,
            label,
        })
    }

    /// Extract the domain from a URL and classify it.
    pub fn inspect(&self, url: &str) -> Result<Detection, DetectError> {
        let domain = extract_domain(url);
        if domain.is_empty() {
            return Err(DetectError::InvalidDomain(url.to_string()));
        }
        self.inspect_domain(domain)
    }

    /// Label for a URL.
    pub fn classify(&self, url: &str) -> Result<Label, DetectError> {
        self.inspect(url).map(|detection| detection.label)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::classifier::Tree;
    use crate::ngram::{NgramSet, BIGRAM, TRIGRAM};
    use crate::reference::CharProbabilities;
    use crate::types::FEATURE_COUNT;

    /// Records every vector it is handed.
    #[derive(Default)]
    struct RecordingClassifier {
        seen: Mutex<Vec<[f64; FEATURE_COUNT]>>,
        label: Option<Label>,
    }

    impl Classifier for RecordingClassifier {
        fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Label {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(*features);
            }
            self.label.unwrap_or(Label::Benign)
        }
    }

    /// Counts calls; used to prove invalid input never reaches the model.
    #[derive(Default)]
    struct CountingClassifier {
        calls: AtomicUsize,
    }

    impl Classifier for CountingClassifier {
        fn predict(&self, _features: &[f64; FEATURE_COUNT]) -> Label {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Label::Dga
        }
    }

    fn reference() -> ReferenceData {
        ReferenceData {
            char_probs: CharProbabilities::from_pairs([
                ('e', 0.11),
                ('g', 0.03),
                ('l', 0.05),
                ('o', 0.08),
                ('w', 0.02),
                ('.', 0.0),
            ]),
            bigrams: NgramSet::from_grams(BIGRAM, ["go", "oo", "og", "gl", "le", "ww"]),
            trigrams: NgramSet::from_grams(TRIGRAM, ["goo", "gle", "www"]),
        }
    }

    /// Long, low-bigram domains are DGA; everything else is benign.
    fn demo_forest() -> RandomForest {
        RandomForest {
            model_id: "demo".to_string(),
            n_features: FEATURE_COUNT,
            feature_names: Vec::new(),
            trees: vec![
                Tree {
                    children_left: vec![1, -1, -1],
                    children_right: vec![2, -1, -1],
                    feature: vec![8, -2, -2],
                    threshold: vec![0.3, -2.0, -2.0],
                    value: vec![[1.0, 1.0], [0.2, 0.8], [0.9, 0.1]],
                },
                Tree {
                    children_left: vec![1, -1, -1],
                    children_right: vec![2, -1, -1],
                    feature: vec![2, -2, -2],
                    threshold: vec![12.5, -2.0, -2.0],
                    value: vec![[1.0, 1.0], [0.7, 0.3], [0.1, 0.9]],
                },
            ],
        }
    }

    #[test]
    fn google_url_is_benign() {
        let detector = Detector::new(reference(), demo_forest());
        let detection = detector.inspect("http://www.google.com").expect("valid url");
        assert_eq!(detection.domain, "www.google");
        assert_eq!(detection.label, Label::Benign);
        assert_eq!(detection.features.length, 10);
        assert!((detection.features.special_char_ratio - 0.1).abs() < 1e-12);
    }

    #[test]
    fn random_looking_domain_is_dga() {
        let detector = Detector::new(reference(), demo_forest());
        let label = detector.classify("https://xkqzjvbrtpwmnhd.info/gate.php").expect("valid url");
        assert_eq!(label, Label::Dga);
    }

    #[test]
    fn repeated_char_domain_uses_zero_fallbacks() {
        let detector = Detector::new(reference(), demo_forest());
        let fv = detector.features("aaaa").expect("non-empty domain");
        assert_eq!(fv.entropy, 0.0);
        assert_eq!(fv.vowel_consonant_ratio, 0.0);
        assert_eq!(fv.digit_letter_ratio, 0.0);
        assert!(fv.to_array().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn empty_domain_is_invalid_and_skips_model() {
        let detector = Detector::new(reference(), CountingClassifier::default());
        assert_eq!(
            detector.inspect_domain(""),
            Err(DetectError::InvalidDomain(String::new()))
        );
        for url in ["", "google.com", "http://.com", "http:///path", "not a url"] {
            assert_eq!(
                detector.inspect(url),
                Err(DetectError::InvalidDomain(url.to_string())),
                "{url}"
            );
        }
        assert_eq!(detector.classifier().calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn all_common_bigrams_give_full_average() {
        let detector = Detector::new(reference(), CountingClassifier::default());
        // go, oo, og, gl, le are all common
        let fv = detector.features("google").expect("non-empty domain");
        assert_eq!(fv.avg_bigram, 1.0);
        assert_eq!(fv.bigram_count, 5);
    }

    #[test]
    fn classifier_receives_vector_unchanged() {
        let classifier = RecordingClassifier {
            label: Some(Label::Dga),
            ..Default::default()
        };
        let detector = Detector::new(reference(), classifier);
        let detection = detector.inspect("https://user@www.google.com:443/search?q=1").expect("valid url");
        assert_eq!(detection.domain, "www.google");
        assert_eq!(detection.label, Label::Dga);

        let seen = detector.classifier().seen.lock().expect("lock");
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], detection.features.to_array());
    }

    #[test]
    fn repeated_inspection_is_identical() {
        let detector = Detector::new(reference(), demo_forest());
        let a = detector.inspect("http://q7x-zk9.example.net").expect("valid url");
        let b = detector.inspect("http://q7x-zk9.example.net").expect("valid url");
        assert_eq!(a, b);
        assert_eq!(
            a.features.to_array().map(f64::to_bits),
            b.features.to_array().map(f64::to_bits)
        );
    }

    #[test]
    fn detector_is_shareable_across_threads() {
        let detector = Arc::new(Detector::new(reference(), demo_forest()));
        let handles: Vec<_> = ["http://www.google.com", "http://xkqzjvbrtpwmnhd.ru"]
            .into_iter()
            .map(|url| {
                let detector = Arc::clone(&detector);
                std::thread::spawn(move || detector.classify(url))
            })
            .collect();

        let labels: Vec<_> = handles
            .into_iter()
            .map(|h| h.join().expect("thread should not panic"))
            .collect();
        assert_eq!(labels, vec![Ok(Label::Benign), Ok(Label::Dga)]);
    }

    #[test]
    fn loads_all_resources_from_dir() {
        let dir = tempfile::tempdir().expect("temp dir");
        let paths = ResourcePaths::in_dir(dir.path());
        std::fs::write(&paths.char_probabilities, "Character,Probability\ng,0.03\no,0.08\n").expect("write");
        std::fs::write(&paths.bigrams, "bi_gram\ngo\noo\n").expect("write");
        std::fs::write(&paths.trigrams, "tri_gram\ngoo\n").expect("write");
        let model = serde_json::to_string(&demo_forest()).expect("serialize");
        std::fs::write(&paths.model, model).expect("write");

        let detector = Detector::load(&paths).expect("resources should load");
        assert_eq!(detector.reference().bigrams.len(), 2);
        assert_eq!(detector.classifier().trees.len(), 2);
        assert_eq!(detector.classify("http://google.com"), Ok(Label::Benign));
    }

    #[test]
    fn missing_model_fails_load() {
        let dir = tempfile::tempdir().expect("temp dir");
        let paths = ResourcePaths::in_dir(dir.path());
        std::fs::write(&paths.char_probabilities, "Character,Probability\ng,0.03\n").expect("write");
        std::fs::write(&paths.bigrams, "bi_gram\ngo\n").expect("write");
        std::fs::write(&paths.trigrams, "tri_gram\ngoo\n").expect("write");

        let err = Detector::load(&paths).unwrap_err();
        assert!(matches!(err, LoadError::Model(ModelError::Io { .. })));
    }
}
