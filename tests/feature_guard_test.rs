//! Contract tests for the feature registry.

use jocosa::analysis::token::Token;
use jocosa::corpus::TextRecord;
use jocosa::features::{Feature, FeatureRegistry};

fn record_with_tokens(words: &[&str]) -> TextRecord {
    let mut record = TextRecord::new(words.join(" "));
    record.tokens = words
        .iter()
        .enumerate()
        .map(|(i, w)| Token::new(*w, i))
        .collect();
    record
}

/// Shared guard check: a feature must return a defined, finite value for a
/// record with zero tokens.
fn assert_defined_on_empty(feature: &dyn Feature) {
    let empty = TextRecord::new("");
    let value = feature.compute(&empty);
    assert!(
        value.is_finite(),
        "feature {:?} produced {value} on an empty record",
        feature.name()
    );
}

#[test]
fn every_registered_feature_is_defined_on_empty_records() {
    let registry = FeatureRegistry::with_defaults().unwrap();
    assert!(!registry.is_empty());
    for name in registry.ordered_names() {
        let feature = registry.get(name).unwrap();
        assert_defined_on_empty(feature);
    }
}

#[test]
fn every_registered_feature_is_finite_on_real_text() {
    let registry = FeatureRegistry::with_defaults().unwrap();
    let record = record_with_tokens(&["jajaja", "no", "me", "lo", "creo", "!"]);
    for name in registry.ordered_names() {
        let feature = registry.get(name).unwrap();
        let value = feature.compute(&record);
        assert!(value.is_finite(), "feature {name:?} produced {value}");
    }
}

#[test]
fn negation_scenario_from_the_annotation_campaign() {
    let registry = FeatureRegistry::with_defaults().unwrap();
    let record = record_with_tokens(&["no", "tal", "vez", "no"]);
    let negation = registry.get("negation").unwrap();
    assert_eq!(negation.compute(&record), 1.0);
}

#[test]
fn compute_missing_twice_is_idempotent() {
    let registry = FeatureRegistry::with_defaults().unwrap();
    let mut corpus = vec![
        record_with_tokens(&["no", "se"]),
        record_with_tokens(&["jajaja"]),
    ];

    registry.compute_missing(&mut corpus);
    let after_first: Vec<_> = corpus.iter().map(|r| r.features.clone()).collect();

    registry.compute_missing(&mut corpus);
    let after_second: Vec<_> = corpus.iter().map(|r| r.features.clone()).collect();

    assert_eq!(after_first, after_second);
}

#[test]
fn vectors_are_emitted_in_canonical_order() {
    struct Named(&'static str, f64);

    impl Feature for Named {
        fn name(&self) -> &'static str {
            self.0
        }
        fn description(&self) -> &'static str {
            "test feature"
        }
        fn compute(&self, _record: &TextRecord) -> f64 {
            self.1
        }
    }

    // Register B before A; the emitted vector must still be [A, B].
    let mut registry = FeatureRegistry::new();
    registry.register(Box::new(Named("B", 2.0))).unwrap();
    registry.register(Box::new(Named("A", 1.0))).unwrap();

    let mut record = TextRecord::new("x");
    registry.compute_one(std::slice::from_mut(&mut record), "B").unwrap();
    registry.compute_one(std::slice::from_mut(&mut record), "A").unwrap();

    assert_eq!(registry.ordered_names(), vec!["A", "B"]);
    assert_eq!(registry.vector(&record), vec![1.0, 2.0]);
}
