//! Scenario tests for corpus curation and the stratified split.

use jocosa::corpus::{filter_by_vote_confidence, stratified_split, TextRecord};

fn humor_record(text: &str, votes: u32, humor_votes: u32) -> TextRecord {
    TextRecord::new(text)
        .with_votes(votes, humor_votes)
        .with_label(true)
}

#[test]
fn confident_humor_survives_curation() {
    let kept = filter_by_vote_confidence(vec![humor_record("a", 10, 7)]);
    assert_eq!(kept.len(), 1);
    assert!(kept[0].is_humor);
}

#[test]
fn voted_down_humor_is_relabeled() {
    let kept = filter_by_vote_confidence(vec![humor_record("a", 10, 2)]);
    assert_eq!(kept.len(), 1);
    assert!(!kept[0].is_humor);
}

#[test]
fn ambiguous_humor_is_dropped() {
    let kept = filter_by_vote_confidence(vec![humor_record("a", 10, 4)]);
    assert!(kept.is_empty());
}

#[test]
fn every_flipped_record_was_voted_down() {
    let corpus: Vec<TextRecord> = (0..=10)
        .map(|humor_votes| humor_record(&format!("r{humor_votes}"), 10, humor_votes))
        .collect();

    let kept = filter_by_vote_confidence(corpus);

    for record in kept.iter().filter(|r| !r.is_humor) {
        let ratio = record.humor_vote_ratio().unwrap();
        assert!(ratio <= 0.30, "flipped record had ratio {ratio}");
    }
    for record in kept.iter().filter(|r| r.is_humor) {
        let ratio = record.humor_vote_ratio().unwrap();
        assert!(ratio >= 0.60, "kept humor record had ratio {ratio}");
    }
}

#[test]
fn curation_never_adds_humor_labels() {
    let corpus = vec![
        humor_record("a", 10, 9),
        humor_record("b", 10, 1),
        TextRecord::new("c"),
        TextRecord::new("d").with_votes(10, 9),
    ];
    let humor_before = corpus.iter().filter(|r| r.is_humor).count();

    let kept = filter_by_vote_confidence(corpus);
    let humor_after = kept.iter().filter(|r| r.is_humor).count();

    assert!(humor_after <= humor_before);
}

#[test]
fn split_preserves_class_balance_and_is_deterministic() {
    let mut corpus = Vec::new();
    for i in 0..30 {
        corpus.push(TextRecord::new(format!("humor {i}")).with_label(true));
    }
    for i in 0..70 {
        corpus.push(TextRecord::new(format!("rest {i}")));
    }

    let (train, eval) = stratified_split(corpus.clone(), 0.2, 99).unwrap();
    assert_eq!(train.len() + eval.len(), 100);
    assert_eq!(eval.iter().filter(|r| r.is_humor).count(), 6);
    assert_eq!(train.iter().filter(|r| r.is_humor).count(), 24);

    // No record leaks into both partitions.
    for record in &eval {
        assert!(!train.iter().any(|t| t.text == record.text));
    }

    // Same seed, same partition.
    let (train_again, _) = stratified_split(corpus, 0.2, 99).unwrap();
    let texts = |records: &[TextRecord]| -> Vec<String> {
        records.iter().map(|r| r.text.clone()).collect()
    };
    assert_eq!(texts(&train), texts(&train_again));
}
