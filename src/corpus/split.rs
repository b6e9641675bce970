//! Stratified train/evaluation splitting.
//!
//! A naive random split of an imbalanced corpus can produce a degenerate
//! evaluation set with almost no positive examples. The split here is
//! proportional: each class is shuffled and cut separately, so both
//! partitions preserve the corpus class frequencies.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::corpus::TextRecord;
use crate::error::{JocosaError, Result};

/// Split a corpus into `(training, evaluation)` partitions.
///
/// The split is stratified on the working label and deterministic given the
/// same seed. No record appears in both partitions.
pub fn stratified_split(
    corpus: Vec<TextRecord>,
    eval_fraction: f64,
    seed: u64,
) -> Result<(Vec<TextRecord>, Vec<TextRecord>)> {
    if !(0.0..1.0).contains(&eval_fraction) {
        return Err(JocosaError::invalid_operation(format!(
            "evaluation fraction must be in [0, 1), got {eval_fraction}"
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let (humor, rest): (Vec<_>, Vec<_>) = corpus.into_iter().partition(|r| r.is_humor);

    let mut training = Vec::new();
    let mut evaluation = Vec::new();
    for class in [humor, rest] {
        let (train, eval) = split_class(class, eval_fraction, &mut rng);
        training.extend(train);
        evaluation.extend(eval);
    }

    log::debug!(
        "stratified split: {} training records, {} evaluation records",
        training.len(),
        evaluation.len()
    );

    Ok((training, evaluation))
}

/// Shuffle one class and cut off the evaluation share.
fn split_class(
    mut records: Vec<TextRecord>,
    eval_fraction: f64,
    rng: &mut StdRng,
) -> (Vec<TextRecord>, Vec<TextRecord>) {
    records.shuffle(rng);
    let eval_len = (records.len() as f64 * eval_fraction).round() as usize;
    let training = records.split_off(eval_len);
    (training, records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(humor: usize, rest: usize) -> Vec<TextRecord> {
        let mut records = Vec::new();
        for i in 0..humor {
            records.push(TextRecord::new(format!("humor {i}")).with_label(true));
        }
        for i in 0..rest {
            records.push(TextRecord::new(format!("rest {i}")));
        }
        records
    }

    #[test]
    fn test_partitions_are_disjoint_and_complete() {
        let (train, eval) = stratified_split(corpus(20, 80), 0.2, 7).unwrap();
        assert_eq!(train.len() + eval.len(), 100);

        let mut texts: Vec<_> = train
            .iter()
            .chain(eval.iter())
            .map(|r| r.text.clone())
            .collect();
        texts.sort();
        texts.dedup();
        assert_eq!(texts.len(), 100);
    }

    #[test]
    fn test_class_frequencies_preserved() {
        let (train, eval) = stratified_split(corpus(20, 80), 0.25, 7).unwrap();
        assert_eq!(eval.len(), 25);
        assert_eq!(eval.iter().filter(|r| r.is_humor).count(), 5);
        assert_eq!(train.iter().filter(|r| r.is_humor).count(), 15);
    }

    #[test]
    fn test_deterministic_given_seed() {
        let (train_a, eval_a) = stratified_split(corpus(10, 30), 0.2, 42).unwrap();
        let (train_b, eval_b) = stratified_split(corpus(10, 30), 0.2, 42).unwrap();

        let texts = |records: &[TextRecord]| -> Vec<String> {
            records.iter().map(|r| r.text.clone()).collect()
        };
        assert_eq!(texts(&train_a), texts(&train_b));
        assert_eq!(texts(&eval_a), texts(&eval_b));
    }

    #[test]
    fn test_invalid_fraction_rejected() {
        assert!(stratified_split(corpus(2, 2), 1.0, 0).is_err());
        assert!(stratified_split(corpus(2, 2), -0.1, 0).is_err());
    }

    #[test]
    fn test_empty_corpus() {
        let (train, eval) = stratified_split(Vec::new(), 0.2, 0).unwrap();
        assert!(train.is_empty());
        assert!(eval.is_empty());
    }
}
