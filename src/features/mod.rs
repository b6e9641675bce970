//! Scalar feature calculators and the registry that runs them.
//!
//! Every feature is a named, self-describing, stateless unit of computation
//! deriving one number from a preprocessed [`TextRecord`]. Features are
//! independent: a feature may only read the record's tokens and raw text,
//! never another feature's output.
//!
//! # The zero-token contract
//!
//! `compute` is total. For a record with zero tokens every feature must
//! return a defined, finite value (a ratio-style feature returns `0.0`
//! rather than dividing by zero). The shared [`sqrt_normalized`] helper
//! encodes the guard once for the count-style features, and the test suite
//! verifies the contract for the whole registry.

pub mod lexical;
pub mod orthography;
pub mod twitter;

pub use lexical::{LaughterCount, MeanWordLength, NegationCount, TokenCount};
pub use orthography::{DialogueMarker, ExclamationCount, QuestionCount, UppercaseRatio};
pub use twitter::{HashtagCount, LinkCount, MentionCount};

use std::fmt;

use crate::corpus::TextRecord;
use crate::error::{JocosaError, Result};

/// A named deterministic scalar computed from a record's tokens.
pub trait Feature: Send + Sync {
    /// Unique name of this feature across the registry.
    fn name(&self) -> &'static str;

    /// Human-readable documentation of the metric.
    fn description(&self) -> &'static str;

    /// Compute the feature value for one record.
    ///
    /// Must be deterministic given the record's tokens and must return a
    /// defined, finite value for a record with zero tokens.
    fn compute(&self, record: &TextRecord) -> f64;
}

/// Count over the square root of the token count, `0.0` on empty records.
///
/// Square-root normalization dampens the bias toward longer texts without
/// removing length sensitivity the way linear normalization would.
pub(crate) fn sqrt_normalized(count: usize, token_count: usize) -> f64 {
    if token_count == 0 {
        0.0
    } else {
        count as f64 / (token_count as f64).sqrt()
    }
}

/// The set of known features, in canonical (lexicographic) name order.
///
/// Downstream classifiers require a fixed column order across training and
/// evaluation, so every vector the registry emits follows
/// [`ordered_names`](FeatureRegistry::ordered_names).
pub struct FeatureRegistry {
    /// Registered features, kept sorted by name.
    features: Vec<Box<dyn Feature>>,
}

impl fmt::Debug for FeatureRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureRegistry")
            .field("features", &self.ordered_names())
            .finish()
    }
}

impl FeatureRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        FeatureRegistry {
            features: Vec::new(),
        }
    }

    /// Create a registry with the full default feature set.
    pub fn with_defaults() -> Result<Self> {
        let mut registry = FeatureRegistry::new();
        registry.register(Box::new(NegationCount))?;
        registry.register(Box::new(LaughterCount::new()?))?;
        registry.register(Box::new(TokenCount))?;
        registry.register(Box::new(MeanWordLength))?;
        registry.register(Box::new(ExclamationCount))?;
        registry.register(Box::new(QuestionCount))?;
        registry.register(Box::new(UppercaseRatio))?;
        registry.register(Box::new(DialogueMarker))?;
        registry.register(Box::new(MentionCount))?;
        registry.register(Box::new(HashtagCount))?;
        registry.register(Box::new(LinkCount))?;
        Ok(registry)
    }

    /// Register a feature. Fails if the name is already taken.
    pub fn register(&mut self, feature: Box<dyn Feature>) -> Result<()> {
        match self
            .features
            .binary_search_by(|f| f.name().cmp(feature.name()))
        {
            Ok(_) => Err(JocosaError::invalid_operation(format!(
                "feature {:?} is already registered",
                feature.name()
            ))),
            Err(index) => {
                self.features.insert(index, feature);
                Ok(())
            }
        }
    }

    /// Number of registered features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Feature names in canonical (lexicographic) order.
    pub fn ordered_names(&self) -> Vec<&'static str> {
        self.features.iter().map(|f| f.name()).collect()
    }

    /// Look up a feature by name.
    pub fn get(&self, name: &str) -> Option<&dyn Feature> {
        self.features
            .binary_search_by(|f| f.name().cmp(name))
            .ok()
            .map(|index| self.features[index].as_ref())
    }

    /// `(name, description)` pairs in canonical order.
    pub fn descriptions(&self) -> Vec<(&'static str, &'static str)> {
        self.features
            .iter()
            .map(|f| (f.name(), f.description()))
            .collect()
    }

    /// Recompute every feature for every record, overwriting stored values.
    pub fn compute_all(&self, corpus: &mut [TextRecord]) {
        for record in corpus.iter_mut() {
            for feature in &self.features {
                let value = feature.compute(record);
                record.set_feature(feature.name(), value);
            }
        }
        log::debug!(
            "recomputed {} features for {} records",
            self.features.len(),
            corpus.len()
        );
    }

    /// Recompute a single named feature for every record.
    pub fn compute_one(&self, corpus: &mut [TextRecord], name: &str) -> Result<()> {
        let feature = self
            .get(name)
            .ok_or_else(|| JocosaError::unknown_feature(name))?;

        for record in corpus.iter_mut() {
            let value = feature.compute(record);
            record.set_feature(feature.name(), value);
        }
        log::debug!("recomputed feature {name:?} for {} records", corpus.len());
        Ok(())
    }

    /// Compute only features whose value is absent from a record.
    ///
    /// Records that already carry every feature are untouched, so running
    /// this twice in succession is a no-op the second time.
    pub fn compute_missing(&self, corpus: &mut [TextRecord]) {
        let mut computed = 0usize;
        for record in corpus.iter_mut() {
            for feature in &self.features {
                if !record.has_feature(feature.name()) {
                    let value = feature.compute(record);
                    record.set_feature(feature.name(), value);
                    computed += 1;
                }
            }
        }
        log::debug!("filled in {computed} missing feature values");
    }

    /// Build the flat numeric vector for one record in canonical order.
    ///
    /// Stored values are used when present; anything missing is computed on
    /// the fly without being written back.
    pub fn vector(&self, record: &TextRecord) -> Vec<f64> {
        self.features
            .iter()
            .map(|feature| {
                record
                    .feature(feature.name())
                    .unwrap_or_else(|| feature.compute(record))
            })
            .collect()
    }

    /// Build aligned feature-matrix/label-vector pairs for a corpus.
    pub fn matrix_and_labels(&self, records: &[TextRecord]) -> (Vec<Vec<f64>>, Vec<bool>) {
        let matrix = records.iter().map(|r| self.vector(r)).collect();
        let labels = records.iter().map(|r| r.is_humor).collect();
        (matrix, labels)
    }
}

impl Default for FeatureRegistry {
    fn default() -> Self {
        Self::with_defaults().expect("Default feature set should register cleanly")
    }
}
