//! Features over the raw written form of the text.

use crate::corpus::TextRecord;
use crate::features::{sqrt_normalized, Feature};

/// Counts exclamation marks.
pub struct ExclamationCount;

impl Feature for ExclamationCount {
    fn name(&self) -> &'static str {
        "exclamation"
    }

    fn description(&self) -> &'static str {
        "Number of exclamation marks ('!' and its opening form), divided by the \
         square root of the token count."
    }

    fn compute(&self, record: &TextRecord) -> f64 {
        let marks = record
            .text
            .chars()
            .filter(|c| matches!(c, '!' | '¡'))
            .count();
        sqrt_normalized(marks, record.tokens.len())
    }
}

/// Counts question marks.
pub struct QuestionCount;

impl Feature for QuestionCount {
    fn name(&self) -> &'static str {
        "question"
    }

    fn description(&self) -> &'static str {
        "Number of question marks ('?' and its opening form), divided by the \
         square root of the token count."
    }

    fn compute(&self, record: &TextRecord) -> f64 {
        let marks = record
            .text
            .chars()
            .filter(|c| matches!(c, '?' | '¿'))
            .count();
        sqrt_normalized(marks, record.tokens.len())
    }
}

/// Share of letters written in uppercase.
pub struct UppercaseRatio;

impl Feature for UppercaseRatio {
    fn name(&self) -> &'static str {
        "uppercase_ratio"
    }

    fn description(&self) -> &'static str {
        "Uppercase letters over total letters in the raw text, 0 when there are no letters."
    }

    fn compute(&self, record: &TextRecord) -> f64 {
        let letters = record.text.chars().filter(|c| c.is_alphabetic()).count();
        if letters == 0 {
            return 0.0;
        }
        let uppercase = record.text.chars().filter(|c| c.is_uppercase()).count();
        uppercase as f64 / letters as f64
    }
}

/// Detects dialogue-style lines.
pub struct DialogueMarker;

impl Feature for DialogueMarker {
    fn name(&self) -> &'static str {
        "dialogue"
    }

    fn description(&self) -> &'static str {
        "1 when any line of the raw text starts with a dash, the usual way a \
         joke quotes a dialogue, 0 otherwise."
    }

    fn compute(&self, record: &TextRecord) -> f64 {
        let has_dialogue = record
            .text
            .lines()
            .any(|line| line.trim_start().starts_with('-'));
        if has_dialogue { 1.0 } else { 0.0 }
    }
}
