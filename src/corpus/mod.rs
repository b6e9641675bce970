//! The labeled text corpus and its curation.
//!
//! A [`TextRecord`] is one crowd-labeled message: the raw text, the tokens
//! produced by preprocessing, the vote counts behind its label, and the
//! feature values computed for it so far.

pub mod curation;
pub mod split;

pub use curation::filter_by_vote_confidence;
pub use split::stratified_split;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A labeled text unit flowing through the pipeline.
///
/// The `features` map is keyed by feature name; a missing key means "not
/// yet computed", which is distinct from a computed `0.0`. The map is a
/// `BTreeMap` so iterating it always yields names in lexicographic order,
/// the same canonical order the feature registry uses for vectors.
///
/// Tokens are preprocessing output and are not persisted; storage backends
/// only see the raw text, the votes, the labels, and the feature values.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TextRecord {
    /// Raw input text.
    pub text: String,

    /// Tokens produced by the tokenizer collaborator.
    #[serde(skip)]
    pub tokens: Vec<Token>,

    /// Total crowd votes cast on this record.
    #[serde(default)]
    pub votes: u32,

    /// Votes that judged the record humorous.
    #[serde(default)]
    pub humor_votes: u32,

    /// Current working label, mutable by the curator.
    #[serde(default)]
    pub is_humor: bool,

    /// True if the record is reserved for evaluation rather than training.
    #[serde(default)]
    pub held_out: bool,

    /// Computed feature values, keyed by feature name.
    #[serde(default)]
    pub features: BTreeMap<String, f64>,
}

impl TextRecord {
    /// Create a new unlabeled record from raw text.
    pub fn new<S: Into<String>>(text: S) -> Self {
        TextRecord {
            text: text.into(),
            tokens: Vec::new(),
            votes: 0,
            humor_votes: 0,
            is_humor: false,
            held_out: false,
            features: BTreeMap::new(),
        }
    }

    /// Set the crowd vote counts. `humor_votes` must not exceed `votes`.
    pub fn with_votes(mut self, votes: u32, humor_votes: u32) -> Self {
        debug_assert!(humor_votes <= votes);
        self.votes = votes;
        self.humor_votes = humor_votes;
        self
    }

    /// Set the working label.
    pub fn with_label(mut self, is_humor: bool) -> Self {
        self.is_humor = is_humor;
        self
    }

    /// Reserve this record for evaluation.
    pub fn with_held_out(mut self, held_out: bool) -> Self {
        self.held_out = held_out;
        self
    }

    /// Populate `tokens` by running the tokenizer over the raw text.
    ///
    /// Must complete before any feature computation.
    pub fn preprocess(&mut self, tokenizer: &dyn Tokenizer) -> Result<()> {
        self.tokens = tokenizer.tokenize(&self.text)?;
        Ok(())
    }

    /// Fraction of votes that judged this record humorous, or `None` when
    /// no votes were cast at all.
    pub fn humor_vote_ratio(&self) -> Option<f64> {
        if self.votes == 0 {
            None
        } else {
            Some(f64::from(self.humor_votes) / f64::from(self.votes))
        }
    }

    /// Get a computed feature value by name.
    pub fn feature(&self, name: &str) -> Option<f64> {
        self.features.get(name).copied()
    }

    /// Check whether a feature value has been computed.
    pub fn has_feature(&self, name: &str) -> bool {
        self.features.contains_key(name)
    }

    /// Store a computed feature value.
    pub fn set_feature<S: Into<String>>(&mut self, name: S, value: f64) {
        self.features.insert(name.into(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::tokenizer::PatternTokenizer;

    #[test]
    fn test_record_creation() {
        let record = TextRecord::new("hola mundo");
        assert_eq!(record.text, "hola mundo");
        assert!(record.tokens.is_empty());
        assert!(!record.is_humor);
        assert!(!record.held_out);
        assert!(record.features.is_empty());
    }

    #[test]
    fn test_vote_ratio() {
        let record = TextRecord::new("x").with_votes(10, 7);
        assert_eq!(record.humor_vote_ratio(), Some(0.7));

        let unvoted = TextRecord::new("x");
        assert_eq!(unvoted.humor_vote_ratio(), None);
    }

    #[test]
    fn test_feature_absence_is_not_zero() {
        let mut record = TextRecord::new("x");
        assert!(!record.has_feature("negation"));
        assert_eq!(record.feature("negation"), None);

        record.set_feature("negation", 0.0);
        assert!(record.has_feature("negation"));
        assert_eq!(record.feature("negation"), Some(0.0));
    }

    #[test]
    fn test_preprocess_populates_tokens() {
        let tokenizer = PatternTokenizer::new().unwrap();
        let mut record = TextRecord::new("no tal vez");
        record.preprocess(&tokenizer).unwrap();
        assert_eq!(record.tokens.len(), 3);
    }

    #[test]
    fn test_serialization_skips_tokens() {
        let tokenizer = PatternTokenizer::new().unwrap();
        let mut record = TextRecord::new("ja ja").with_votes(5, 4).with_label(true);
        record.preprocess(&tokenizer).unwrap();
        record.set_feature("laughter", 1.0);

        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("tokens"));

        let restored: TextRecord = serde_json::from_str(&json).unwrap();
        assert!(restored.tokens.is_empty());
        assert_eq!(restored.feature("laughter"), Some(1.0));
        assert!(restored.is_humor);
    }
}
