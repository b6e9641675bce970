//! Token types produced by tokenization.
//!
//! A [`Token`] is the unit every feature calculator works on: the surface
//! form as written, a lowercased lemma, and a coarse lexical tag assigned
//! by the tokenizer.
//!
//! # Examples
//!
//! ```
//! use jocosa::analysis::token::{Token, TokenTag};
//!
//! let token = Token::new("Jajaja", 0);
//! assert_eq!(token.text, "Jajaja");
//! assert_eq!(token.lemma, "jajaja");
//! assert_eq!(token.tag, TokenTag::Word);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse lexical category assigned by the tokenizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenTag {
    /// Alphabetic word.
    Word,
    /// Numeric value.
    Number,
    /// Punctuation run.
    Punctuation,
    /// `@user` mention.
    Mention,
    /// `#tag` hashtag.
    Hashtag,
    /// URL.
    Url,
    /// Anything else.
    Other,
}

/// A single unit of text after tokenization.
///
/// # Fields
///
/// - `text` - The surface form as written
/// - `lemma` - Lowercased normal form (a stand-in for the lemma an external
///   morphological analyzer would provide)
/// - `tag` - Coarse lexical category
/// - `position` - Position in the token stream (0-based)
/// - `start_offset` / `end_offset` - Byte offsets in the original text
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The surface form of the token.
    pub text: String,

    /// Lowercased normal form.
    pub lemma: String,

    /// Coarse lexical category.
    pub tag: TokenTag,

    /// The position of the token in the token stream (0-based).
    pub position: usize,

    /// The byte offset where this token starts in the original text.
    pub start_offset: usize,

    /// The byte offset where this token ends in the original text.
    pub end_offset: usize,
}

impl Token {
    /// Create a new token with the given text and position.
    ///
    /// The lemma defaults to the lowercased surface form and the tag to
    /// [`TokenTag::Word`].
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        let text = text.into();
        let lemma = text.to_lowercase();
        Token {
            text,
            lemma,
            tag: TokenTag::Word,
            position,
            start_offset: 0,
            end_offset: 0,
        }
    }

    /// Create a new token with text, position, and byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        let mut token = Token::new(text, position);
        token.start_offset = start_offset;
        token.end_offset = end_offset;
        token
    }

    /// Set the lexical tag.
    pub fn with_tag(mut self, tag: TokenTag) -> Self {
        self.tag = tag;
        self
    }

    /// Set the lemma.
    pub fn with_lemma<S: Into<String>>(mut self, lemma: S) -> Self {
        self.lemma = lemma.into();
        self
    }

    /// Get the length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::new("Hola", 0);
        assert_eq!(token.text, "Hola");
        assert_eq!(token.lemma, "hola");
        assert_eq!(token.tag, TokenTag::Word);
        assert_eq!(token.position, 0);
        assert_eq!(token.start_offset, 0);
        assert_eq!(token.end_offset, 0);
    }

    #[test]
    fn test_token_with_offsets() {
        let token = Token::with_offsets("mundo", 1, 5, 10);
        assert_eq!(token.text, "mundo");
        assert_eq!(token.position, 1);
        assert_eq!(token.start_offset, 5);
        assert_eq!(token.end_offset, 10);
    }

    #[test]
    fn test_token_builders() {
        let token = Token::new("@amigo", 0)
            .with_tag(TokenTag::Mention)
            .with_lemma("amigo");
        assert_eq!(token.tag, TokenTag::Mention);
        assert_eq!(token.lemma, "amigo");
    }

    #[test]
    fn test_token_display() {
        let token = Token::new("ja", 0);
        assert_eq!(format!("{token}"), "ja");
    }
}
