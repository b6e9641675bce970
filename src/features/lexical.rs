//! Features over the token stream itself.

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::TokenTag;
use crate::corpus::TextRecord;
use crate::error::{JocosaError, Result};
use crate::features::{sqrt_normalized, Feature};

/// Counts occurrences of the negation particle.
pub struct NegationCount;

impl Feature for NegationCount {
    fn name(&self) -> &'static str {
        "negation"
    }

    fn description(&self) -> &'static str {
        "Number of 'no' tokens, divided by the square root of the token count."
    }

    fn compute(&self, record: &TextRecord) -> f64 {
        let negations = record
            .tokens
            .iter()
            .filter(|token| token.text.to_lowercase() == "no")
            .count();
        sqrt_normalized(negations, record.tokens.len())
    }
}

/// Pattern for onomatopoeic laughter: repeated ja/je/ha syllables and the
/// usual internet shorthands.
const LAUGHTER_PATTERN: &str = r"(?i)^(?:(?:[jh]+[aeiou]+){2,}[jh]*|lo+l+|lmao+|xd+)$";

/// Counts tokens that spell out laughter.
pub struct LaughterCount {
    pattern: Regex,
}

impl LaughterCount {
    /// Create the feature, compiling the laughter pattern.
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(LAUGHTER_PATTERN)
            .map_err(|e| JocosaError::analysis(format!("Invalid laughter pattern: {e}")))?;
        Ok(LaughterCount { pattern })
    }
}

impl Feature for LaughterCount {
    fn name(&self) -> &'static str {
        "laughter"
    }

    fn description(&self) -> &'static str {
        "Number of tokens spelling out laughter (jajaja, jeje, lol), divided by the \
         square root of the token count."
    }

    fn compute(&self, record: &TextRecord) -> f64 {
        let laughs = record
            .tokens
            .iter()
            .filter(|token| self.pattern.is_match(&token.text))
            .count();
        sqrt_normalized(laughs, record.tokens.len())
    }
}

/// Raw token count.
pub struct TokenCount;

impl Feature for TokenCount {
    fn name(&self) -> &'static str {
        "token_count"
    }

    fn description(&self) -> &'static str {
        "Number of tokens in the record."
    }

    fn compute(&self, record: &TextRecord) -> f64 {
        record.tokens.len() as f64
    }
}

/// Mean grapheme length of word tokens.
pub struct MeanWordLength;

impl Feature for MeanWordLength {
    fn name(&self) -> &'static str {
        "mean_word_length"
    }

    fn description(&self) -> &'static str {
        "Mean length in graphemes of the word tokens, 0 when there are none."
    }

    fn compute(&self, record: &TextRecord) -> f64 {
        let words: Vec<_> = record
            .tokens
            .iter()
            .filter(|token| token.tag == TokenTag::Word)
            .collect();
        if words.is_empty() {
            return 0.0;
        }
        let total: usize = words
            .iter()
            .map(|token| token.text.graphemes(true).count())
            .sum();
        total as f64 / words.len() as f64
    }
}
