//! Tokenizer trait and the bundled pattern tokenizer.
//!
//! The [`Tokenizer`] trait is the boundary to the external NLP collaborator:
//! it is purely functional, takes raw text, and returns annotated tokens.
//! Any implementation can be swapped in; the pipeline only sees the trait.

use std::sync::Arc;

use regex::Regex;

use crate::analysis::token::{Token, TokenTag};
use crate::error::{JocosaError, Result};

/// Trait for tokenizers that convert raw text into annotated tokens.
///
/// Implementations must be purely functional: no shared state across calls.
///
/// # Examples
///
/// ```
/// use jocosa::analysis::tokenizer::{PatternTokenizer, Tokenizer};
///
/// let tokenizer = PatternTokenizer::new().unwrap();
/// let tokens = tokenizer.tokenize("jajaja no puede ser").unwrap();
/// assert_eq!(tokens.len(), 4);
/// ```
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a sequence of tokens.
    fn tokenize(&self, text: &str) -> Result<Vec<Token>>;

    /// Get the name of this tokenizer.
    fn name(&self) -> &'static str;
}

/// Pattern for one token: a URL, a mention, a hashtag, a word, or a
/// punctuation run, in that priority order.
const TOKEN_PATTERN: &str = r"https?://\S+|@\w+|#\w+|\w+|[^\s\w]+";

/// A regex-based tokenizer for social-media text.
///
/// Mentions, hashtags, URLs, and punctuation runs are kept as single
/// tokens so the surface features can count them directly. The lemma of
/// every token is its lowercased surface form.
#[derive(Clone, Debug)]
pub struct PatternTokenizer {
    /// The regex used to extract tokens.
    pattern: Arc<Regex>,
}

impl PatternTokenizer {
    /// Create a new pattern tokenizer with the default token pattern.
    pub fn new() -> Result<Self> {
        let regex = Regex::new(TOKEN_PATTERN)
            .map_err(|e| JocosaError::analysis(format!("Invalid token pattern: {e}")))?;

        Ok(PatternTokenizer {
            pattern: Arc::new(regex),
        })
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    fn classify(text: &str) -> TokenTag {
        let mut chars = text.chars();
        let first = match chars.next() {
            Some(c) => c,
            None => return TokenTag::Other,
        };

        if text.starts_with("http://") || text.starts_with("https://") {
            TokenTag::Url
        } else if first == '@' && text.len() > 1 {
            TokenTag::Mention
        } else if first == '#' && text.len() > 1 {
            TokenTag::Hashtag
        } else if first.is_numeric() {
            TokenTag::Number
        } else if first.is_alphabetic() || first == '_' {
            TokenTag::Word
        } else {
            TokenTag::Punctuation
        }
    }
}

impl Default for PatternTokenizer {
    fn default() -> Self {
        Self::new().expect("Default token pattern should be valid")
    }
}

impl Tokenizer for PatternTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        let tokens = self
            .pattern
            .find_iter(text)
            .enumerate()
            .map(|(position, mat)| {
                Token::with_offsets(mat.as_str(), position, mat.start(), mat.end())
                    .with_tag(Self::classify(mat.as_str()))
            })
            .collect();

        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "pattern"
    }
}
