//! Classification metrics and the verified confusion-matrix report.
//!
//! The report partitions the evaluated records into the four confusion
//! groups and, independently, tallies a 2x2 confusion matrix from the label
//! arrays alone. The two computations must agree cell by cell; a mismatch
//! halts the report instead of printing wrong statistics.

use std::fmt;

use crate::classifier::{self, ClassifierKind};
use crate::corpus::TextRecord;
use crate::error::{JocosaError, Result};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// A 2x2 confusion matrix with the fixed label order {humor, not-humor}.
///
/// Rows are the true class, columns the predicted class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfusionMatrix {
    pub true_positives: usize,
    pub false_negatives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,
}

impl ConfusionMatrix {
    /// Tally the matrix from aligned truth/prediction arrays.
    pub fn from_labels(truth: &[bool], predicted: &[bool]) -> Self {
        let count = |t: bool, p: bool| -> usize {
            truth
                .iter()
                .zip(predicted)
                .filter(|&(&actual, &guess)| actual == t && guess == p)
                .count()
        };
        ConfusionMatrix {
            true_positives: count(true, true),
            false_negatives: count(true, false),
            false_positives: count(false, true),
            true_negatives: count(false, false),
        }
    }

    /// Total number of evaluated records.
    pub fn total(&self) -> usize {
        self.true_positives + self.false_negatives + self.false_positives + self.true_negatives
    }

    /// Overall accuracy, 0 on an empty matrix.
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.true_positives + self.true_negatives) as f64 / total as f64
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Confusion matrix:")?;
        writeln!(f)?;
        writeln!(f, "\t\t(classified as)")?;
        writeln!(f, "\t\tP\tN")?;
        writeln!(f, "(is)\tP\t{}\t{}", self.true_positives, self.false_negatives)?;
        write!(f, "(is)\tN\t{}\t{}", self.false_positives, self.true_negatives)
    }
}

/// Per-class precision/recall/F1 and its support.
#[derive(Clone, Copy, Debug)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

impl ClassMetrics {
    fn new(relevant_predicted: usize, predicted: usize, relevant: usize) -> Self {
        let precision = ratio(relevant_predicted, predicted);
        let recall = ratio(relevant_predicted, relevant);
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };
        ClassMetrics {
            precision,
            recall,
            f1,
            support: relevant,
        }
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// The printable classification report.
#[derive(Clone, Copy, Debug)]
pub struct ClassificationReport {
    pub humor: ClassMetrics,
    pub not_humor: ClassMetrics,
    pub accuracy: f64,
}

/// Compute per-class metrics and overall accuracy.
pub fn classification_report(truth: &[bool], predicted: &[bool]) -> ClassificationReport {
    let matrix = ConfusionMatrix::from_labels(truth, predicted);
    ClassificationReport {
        humor: ClassMetrics::new(
            matrix.true_positives,
            matrix.true_positives + matrix.false_positives,
            matrix.true_positives + matrix.false_negatives,
        ),
        not_humor: ClassMetrics::new(
            matrix.true_negatives,
            matrix.true_negatives + matrix.false_negatives,
            matrix.true_negatives + matrix.false_positives,
        ),
        accuracy: matrix.accuracy(),
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "class\tprecision\trecall\tf1\tsupport")?;
        for (label, metrics) in [("P", &self.humor), ("N", &self.not_humor)] {
            writeln!(
                f,
                "{label}\t{:.4}\t\t{:.4}\t{:.4}\t{}",
                metrics.precision, metrics.recall, metrics.f1, metrics.support
            )?;
        }
        writeln!(f)?;
        write!(f, "Accuracy: {:.4}", self.accuracy)
    }
}

/// The evaluated records partitioned into the four confusion groups.
#[derive(Debug)]
pub struct ConfusionPartition<'a> {
    pub true_positives: Vec<&'a TextRecord>,
    pub false_negatives: Vec<&'a TextRecord>,
    pub false_positives: Vec<&'a TextRecord>,
    pub true_negatives: Vec<&'a TextRecord>,
}

/// Partition records by the cross of true and predicted label, verifying
/// the group sizes against an independently tallied confusion matrix.
///
/// Fails with [`JocosaError::InconsistentConfusionMatrix`] if any group
/// size disagrees with its matrix cell; that is an internal consistency
/// error and the statistics must not be reported.
pub fn confusion_report<'a>(
    records: &'a [TextRecord],
    truth: &[bool],
    predicted: &[bool],
) -> Result<ConfusionPartition<'a>> {
    if records.len() != truth.len() || truth.len() != predicted.len() {
        return Err(JocosaError::invalid_operation(format!(
            "confusion report needs aligned inputs, got {} records, {} true labels, {} predictions",
            records.len(),
            truth.len(),
            predicted.len()
        )));
    }

    let mut partition = ConfusionPartition {
        true_positives: Vec::new(),
        false_negatives: Vec::new(),
        false_positives: Vec::new(),
        true_negatives: Vec::new(),
    };
    for (i, record) in records.iter().enumerate() {
        match (truth[i], predicted[i]) {
            (true, true) => partition.true_positives.push(record),
            (true, false) => partition.false_negatives.push(record),
            (false, true) => partition.false_positives.push(record),
            (false, false) => partition.true_negatives.push(record),
        }
    }

    let matrix = ConfusionMatrix::from_labels(truth, predicted);
    let checks = [
        ("true positives", partition.true_positives.len(), matrix.true_positives),
        ("false negatives", partition.false_negatives.len(), matrix.false_negatives),
        ("false positives", partition.false_positives.len(), matrix.false_positives),
        ("true negatives", partition.true_negatives.len(), matrix.true_negatives),
    ];
    for (cell, tallied, expected) in checks {
        if tallied != expected {
            return Err(JocosaError::InconsistentConfusionMatrix {
                cell,
                tallied,
                matrix: expected,
            });
        }
    }

    Ok(partition)
}

/// K-fold cross-validation accuracy for one classifier kind.
///
/// Records are shuffled once with the given seed, cut into `folds` chunks,
/// and each chunk is evaluated against a model trained on the rest.
pub fn cross_validate(
    kind: ClassifierKind,
    vectors: &[Vec<f64>],
    labels: &[bool],
    folds: usize,
    seed: u64,
) -> Result<Vec<f64>> {
    if folds < 2 {
        return Err(JocosaError::invalid_operation(
            "cross-validation needs at least 2 folds",
        ));
    }
    if vectors.len() < folds {
        return Err(JocosaError::invalid_operation(format!(
            "cross-validation needs at least {folds} records, got {}",
            vectors.len()
        )));
    }

    let mut order: Vec<usize> = (0..vectors.len()).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    order.shuffle(&mut rng);

    let mut accuracies = Vec::with_capacity(folds);
    for fold in 0..folds {
        let start = fold * order.len() / folds;
        let end = (fold + 1) * order.len() / folds;
        let eval_indices = &order[start..end];

        let mut train_vectors = Vec::new();
        let mut train_labels = Vec::new();
        for (position, &i) in order.iter().enumerate() {
            if position < start || position >= end {
                train_vectors.push(vectors[i].clone());
                train_labels.push(labels[i]);
            }
        }

        let mut model = classifier::build(kind, seed);
        model.fit(&train_vectors, &train_labels)?;

        let eval_vectors: Vec<Vec<f64>> =
            eval_indices.iter().map(|&i| vectors[i].clone()).collect();
        let predicted = model.predict(&eval_vectors)?;

        let correct = eval_indices
            .iter()
            .zip(&predicted)
            .filter(|&(&i, &guess)| labels[i] == guess)
            .count();
        accuracies.push(ratio(correct, eval_indices.len()));
    }

    Ok(accuracies)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: usize) -> Vec<TextRecord> {
        (0..n).map(|i| TextRecord::new(format!("r{i}"))).collect()
    }

    #[test]
    fn test_matrix_from_labels() {
        let truth = vec![true, true, false, false, true];
        let predicted = vec![true, false, true, false, true];
        let matrix = ConfusionMatrix::from_labels(&truth, &predicted);
        assert_eq!(matrix.true_positives, 2);
        assert_eq!(matrix.false_negatives, 1);
        assert_eq!(matrix.false_positives, 1);
        assert_eq!(matrix.true_negatives, 1);
        assert_eq!(matrix.total(), 5);
        assert_eq!(matrix.accuracy(), 3.0 / 5.0);
    }

    #[test]
    fn test_partition_matches_matrix() {
        let truth = vec![true, true, false, false, true, false];
        let predicted = vec![true, false, true, false, true, false];
        let all = records(6);

        let partition = confusion_report(&all, &truth, &predicted).unwrap();
        let matrix = ConfusionMatrix::from_labels(&truth, &predicted);

        assert_eq!(partition.true_positives.len(), matrix.true_positives);
        assert_eq!(partition.false_negatives.len(), matrix.false_negatives);
        assert_eq!(partition.false_positives.len(), matrix.false_positives);
        assert_eq!(partition.true_negatives.len(), matrix.true_negatives);

        let group_total = partition.true_positives.len()
            + partition.false_negatives.len()
            + partition.false_positives.len()
            + partition.true_negatives.len();
        assert_eq!(group_total, all.len());
    }

    #[test]
    fn test_misaligned_inputs_rejected() {
        let all = records(3);
        let err = confusion_report(&all, &[true, false], &[true, false]).unwrap_err();
        assert!(matches!(err, JocosaError::InvalidOperation(_)));
    }

    #[test]
    fn test_classification_report_metrics() {
        // 2 TP, 1 FN, 1 FP, 1 TN.
        let truth = vec![true, true, false, false, true];
        let predicted = vec![true, false, true, false, true];
        let report = classification_report(&truth, &predicted);

        assert_eq!(report.humor.precision, 2.0 / 3.0);
        assert_eq!(report.humor.recall, 2.0 / 3.0);
        assert_eq!(report.humor.support, 3);
        assert_eq!(report.not_humor.precision, 1.0 / 2.0);
        assert_eq!(report.not_humor.recall, 1.0 / 2.0);
        assert_eq!(report.not_humor.support, 2);
        assert_eq!(report.accuracy, 3.0 / 5.0);
    }

    #[test]
    fn test_report_on_empty_input() {
        let report = classification_report(&[], &[]);
        assert_eq!(report.accuracy, 0.0);
        assert_eq!(report.humor.f1, 0.0);
    }

    #[test]
    fn test_matrix_display_layout() {
        let matrix = ConfusionMatrix {
            true_positives: 4,
            false_negatives: 2,
            false_positives: 1,
            true_negatives: 3,
        };
        let printed = matrix.to_string();
        assert!(printed.contains("(classified as)"));
        assert!(printed.contains("(is)\tP\t4\t2"));
        assert!(printed.contains("(is)\tN\t1\t3"));
    }

    #[test]
    fn test_cross_validation_on_separable_data() {
        let mut vectors = Vec::new();
        let mut labels = Vec::new();
        for i in 0..15 {
            vectors.push(vec![3.0 + (i % 4) as f64 * 0.1]);
            labels.push(true);
            vectors.push(vec![-3.0 - (i % 4) as f64 * 0.1]);
            labels.push(false);
        }

        let accuracies =
            cross_validate(ClassifierKind::Gnb, &vectors, &labels, 5, 17).unwrap();
        assert_eq!(accuracies.len(), 5);
        for accuracy in accuracies {
            assert!(accuracy > 0.8);
        }
    }

    #[test]
    fn test_cross_validation_rejects_bad_fold_counts() {
        let vectors = vec![vec![0.0]; 4];
        let labels = vec![true, false, true, false];
        assert!(cross_validate(ClassifierKind::Gnb, &vectors, &labels, 1, 0).is_err());
        assert!(cross_validate(ClassifierKind::Gnb, &vectors, &labels, 5, 0).is_err());
    }
}
