//! Text preprocessing for short social-media messages.
//!
//! Tokenization is the only preprocessing step the classifier depends on.
//! The [`tokenizer::Tokenizer`] trait is the seam where an external
//! morphological analyzer can be plugged in; the bundled
//! [`tokenizer::PatternTokenizer`] covers the surface-level annotations the
//! feature calculators need.

pub mod token;
pub mod tokenizer;

pub use token::{Token, TokenTag};
pub use tokenizer::{PatternTokenizer, Tokenizer};
