//! Vote-confidence curation of the raw corpus.
//!
//! Crowd labels are noisy: a record marked humorous by the collection tool
//! may have been voted down by most annotators. This filter relabels or
//! drops humor-labeled records based on how the votes actually fell, and
//! keeps non-humor records untouched.

use crate::corpus::TextRecord;

/// Minimum humor-vote ratio for a humor label to be kept.
pub const KEEP_RATIO: f64 = 0.60;

/// Maximum humor-vote ratio at which the label is flipped to non-humor.
pub const FLIP_RATIO: f64 = 0.30;

/// Filter a corpus by vote confidence.
///
/// For each record currently labeled humorous:
///
/// - zero total votes: dropped (insufficient evidence);
/// - ratio >= [`KEEP_RATIO`]: kept as humor;
/// - ratio <= [`FLIP_RATIO`]: relabeled non-humor and kept;
/// - anything in between: dropped (ambiguous crowd signal).
///
/// Records labeled non-humor are always kept unchanged. The thresholds are
/// empirical tuning carried over from the corpus annotation campaign.
pub fn filter_by_vote_confidence(corpus: Vec<TextRecord>) -> Vec<TextRecord> {
    let before = corpus.len();
    let mut kept = Vec::with_capacity(corpus.len());
    let mut flipped = 0usize;

    for mut record in corpus {
        if !record.is_humor {
            kept.push(record);
            continue;
        }
        match record.humor_vote_ratio() {
            None => {}
            Some(ratio) if ratio >= KEEP_RATIO => kept.push(record),
            Some(ratio) if ratio <= FLIP_RATIO => {
                record.is_humor = false;
                flipped += 1;
                kept.push(record);
            }
            Some(_) => {}
        }
    }

    log::debug!(
        "vote filter kept {}/{} records, {} relabeled non-humor",
        kept.len(),
        before,
        flipped
    );

    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn humor_record(votes: u32, humor_votes: u32) -> TextRecord {
        TextRecord::new("x")
            .with_votes(votes, humor_votes)
            .with_label(true)
    }

    #[test]
    fn test_confident_humor_is_kept() {
        let kept = filter_by_vote_confidence(vec![humor_record(10, 7)]);
        assert_eq!(kept.len(), 1);
        assert!(kept[0].is_humor);
    }

    #[test]
    fn test_voted_down_humor_is_flipped_and_kept() {
        let kept = filter_by_vote_confidence(vec![humor_record(10, 2)]);
        assert_eq!(kept.len(), 1);
        assert!(!kept[0].is_humor);
    }

    #[test]
    fn test_ambiguous_humor_is_dropped() {
        let kept = filter_by_vote_confidence(vec![humor_record(10, 4)]);
        assert!(kept.is_empty());
    }

    #[test]
    fn test_unvoted_humor_is_dropped() {
        let kept = filter_by_vote_confidence(vec![humor_record(0, 0)]);
        assert!(kept.is_empty());
    }

    #[test]
    fn test_boundary_ratios() {
        // Exactly 0.60 keeps the label, exactly 0.30 flips it.
        let kept = filter_by_vote_confidence(vec![humor_record(10, 6), humor_record(10, 3)]);
        assert_eq!(kept.len(), 2);
        assert!(kept[0].is_humor);
        assert!(!kept[1].is_humor);
    }

    #[test]
    fn test_non_humor_always_kept() {
        let records = vec![
            TextRecord::new("a").with_votes(0, 0),
            TextRecord::new("b").with_votes(10, 9),
        ];
        let kept = filter_by_vote_confidence(records);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|r| !r.is_humor));
    }

    #[test]
    fn test_never_increases_humor_count() {
        let records = vec![
            humor_record(10, 10),
            humor_record(10, 5),
            humor_record(10, 1),
            humor_record(0, 0),
            TextRecord::new("plain"),
        ];
        let humor_before = records.iter().filter(|r| r.is_humor).count();
        let kept = filter_by_vote_confidence(records);
        let humor_after = kept.iter().filter(|r| r.is_humor).count();
        assert!(humor_after <= humor_before);
    }
}
