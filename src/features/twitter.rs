//! Features over the social-media markup in the token stream.

use crate::analysis::token::TokenTag;
use crate::corpus::TextRecord;
use crate::features::{sqrt_normalized, Feature};

fn count_tag(record: &TextRecord, tag: TokenTag) -> f64 {
    let count = record.tokens.iter().filter(|t| t.tag == tag).count();
    sqrt_normalized(count, record.tokens.len())
}

/// Counts `@user` mentions.
pub struct MentionCount;

impl Feature for MentionCount {
    fn name(&self) -> &'static str {
        "mentions"
    }

    fn description(&self) -> &'static str {
        "Number of @user mentions, divided by the square root of the token count."
    }

    fn compute(&self, record: &TextRecord) -> f64 {
        count_tag(record, TokenTag::Mention)
    }
}

/// Counts `#tag` hashtags.
pub struct HashtagCount;

impl Feature for HashtagCount {
    fn name(&self) -> &'static str {
        "hashtags"
    }

    fn description(&self) -> &'static str {
        "Number of #tag hashtags, divided by the square root of the token count."
    }

    fn compute(&self, record: &TextRecord) -> f64 {
        count_tag(record, TokenTag::Hashtag)
    }
}

/// Counts URLs.
pub struct LinkCount;

impl Feature for LinkCount {
    fn name(&self) -> &'static str {
        "links"
    }

    fn description(&self) -> &'static str {
        "Number of URLs, divided by the square root of the token count."
    }

    fn compute(&self, record: &TextRecord) -> f64 {
        count_tag(record, TokenTag::Url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::tokenizer::{PatternTokenizer, Tokenizer};

    fn preprocessed(text: &str) -> TextRecord {
        let tokenizer = PatternTokenizer::new().unwrap();
        let mut record = TextRecord::new(text);
        record.tokens = tokenizer.tokenize(text).unwrap();
        record
    }

    #[test]
    fn test_mention_count() {
        let record = preprocessed("@ana @luis hola mundo");
        let expected = 2.0 / 4.0_f64.sqrt();
        assert!((MentionCount.compute(&record) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_hashtag_count() {
        let record = preprocessed("#humor al fin");
        let expected = 1.0 / 3.0_f64.sqrt();
        assert!((HashtagCount.compute(&record) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_link_count() {
        let record = preprocessed("mira https://example.com/chiste");
        let expected = 1.0 / 2.0_f64.sqrt();
        assert!((LinkCount.compute(&record) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_all_zero_on_empty_record() {
        let record = TextRecord::new("");
        assert_eq!(MentionCount.compute(&record), 0.0);
        assert_eq!(HashtagCount.compute(&record), 0.0);
        assert_eq!(LinkCount.compute(&record), 0.0);
    }
}
