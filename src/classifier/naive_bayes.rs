//! Naive Bayes classifiers.

use std::f64::consts::PI;

use crate::classifier::{check_prediction_set, check_training_set, Classifier};
use crate::error::{JocosaError, Result};

/// Index 0 holds the non-humor class, index 1 the humor class.
const CLASSES: usize = 2;

fn class_index(label: bool) -> usize {
    usize::from(label)
}

/// Gaussian naive Bayes.
///
/// Each feature is modeled per class as an independent normal distribution;
/// prediction picks the class with the higher joint log-likelihood.
pub struct GaussianNb {
    priors: [f64; CLASSES],
    means: [Vec<f64>; CLASSES],
    variances: [Vec<f64>; CLASSES],
    dimension: usize,
    trained: bool,
}

impl GaussianNb {
    /// Create an untrained model.
    pub fn new() -> Self {
        GaussianNb {
            priors: [0.0; CLASSES],
            means: [Vec::new(), Vec::new()],
            variances: [Vec::new(), Vec::new()],
            dimension: 0,
            trained: false,
        }
    }

    fn log_likelihood(&self, class: usize, vector: &[f64]) -> f64 {
        let mut score = self.priors[class].ln();
        for (feature, &value) in vector.iter().enumerate() {
            let mean = self.means[class][feature];
            let variance = self.variances[class][feature];
            score += -0.5 * (2.0 * PI * variance).ln()
                - (value - mean).powi(2) / (2.0 * variance);
        }
        score
    }
}

impl Default for GaussianNb {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for GaussianNb {
    fn name(&self) -> &'static str {
        "gaussian_nb"
    }

    fn fit(&mut self, vectors: &[Vec<f64>], labels: &[bool]) -> Result<()> {
        let dimension = check_training_set(vectors, labels)?;
        let total = vectors.len() as f64;

        let mut counts = [0usize; CLASSES];
        let mut sums = [vec![0.0; dimension], vec![0.0; dimension]];
        for (vector, &label) in vectors.iter().zip(labels) {
            let class = class_index(label);
            counts[class] += 1;
            for (feature, &value) in vector.iter().enumerate() {
                sums[class][feature] += value;
            }
        }

        let mut means = [vec![0.0; dimension], vec![0.0; dimension]];
        for class in 0..CLASSES {
            for feature in 0..dimension {
                means[class][feature] = sums[class][feature] / counts[class] as f64;
            }
        }

        let mut variances = [vec![0.0; dimension], vec![0.0; dimension]];
        for (vector, &label) in vectors.iter().zip(labels) {
            let class = class_index(label);
            for (feature, &value) in vector.iter().enumerate() {
                variances[class][feature] += (value - means[class][feature]).powi(2);
            }
        }
        // Smooth with a fraction of the largest variance so constant
        // features never produce a zero denominator.
        let largest = variances
            .iter()
            .flatten()
            .fold(0.0_f64, |acc, &v| acc.max(v));
        let smoothing = 1e-9 * largest.max(1.0);
        for class in 0..CLASSES {
            for feature in 0..dimension {
                variances[class][feature] =
                    variances[class][feature] / counts[class] as f64 + smoothing;
            }
        }

        self.priors = [counts[0] as f64 / total, counts[1] as f64 / total];
        self.means = means;
        self.variances = variances;
        self.dimension = dimension;
        self.trained = true;
        Ok(())
    }

    fn predict(&self, vectors: &[Vec<f64>]) -> Result<Vec<bool>> {
        check_prediction_set(vectors, self.dimension, self.trained)?;
        Ok(vectors
            .iter()
            .map(|vector| self.log_likelihood(1, vector) > self.log_likelihood(0, vector))
            .collect())
    }
}

/// Multinomial naive Bayes with Laplace smoothing.
///
/// Treats each feature value as a (fractional) event count, which is why it
/// requires non-negative features; all registry features satisfy that by
/// construction.
pub struct MultinomialNb {
    class_log_priors: [f64; CLASSES],
    feature_log_probs: [Vec<f64>; CLASSES],
    dimension: usize,
    trained: bool,
}

/// Laplace smoothing constant.
const ALPHA: f64 = 1.0;

impl MultinomialNb {
    /// Create an untrained model.
    pub fn new() -> Self {
        MultinomialNb {
            class_log_priors: [0.0; CLASSES],
            feature_log_probs: [Vec::new(), Vec::new()],
            dimension: 0,
            trained: false,
        }
    }
}

impl Default for MultinomialNb {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for MultinomialNb {
    fn name(&self) -> &'static str {
        "multinomial_nb"
    }

    fn fit(&mut self, vectors: &[Vec<f64>], labels: &[bool]) -> Result<()> {
        let dimension = check_training_set(vectors, labels)?;
        if vectors.iter().flatten().any(|&value| value < 0.0) {
            return Err(JocosaError::training(
                "multinomial naive Bayes requires non-negative feature values",
            ));
        }

        let total = vectors.len() as f64;
        let mut counts = [0usize; CLASSES];
        let mut feature_counts = [vec![0.0; dimension], vec![0.0; dimension]];
        for (vector, &label) in vectors.iter().zip(labels) {
            let class = class_index(label);
            counts[class] += 1;
            for (feature, &value) in vector.iter().enumerate() {
                feature_counts[class][feature] += value;
            }
        }

        let mut feature_log_probs = [vec![0.0; dimension], vec![0.0; dimension]];
        for class in 0..CLASSES {
            let class_total: f64 = feature_counts[class].iter().sum();
            let denominator = class_total + ALPHA * dimension as f64;
            for feature in 0..dimension {
                feature_log_probs[class][feature] =
                    ((feature_counts[class][feature] + ALPHA) / denominator).ln();
            }
        }

        self.class_log_priors = [
            (counts[0] as f64 / total).ln(),
            (counts[1] as f64 / total).ln(),
        ];
        self.feature_log_probs = feature_log_probs;
        self.dimension = dimension;
        self.trained = true;
        Ok(())
    }

    fn predict(&self, vectors: &[Vec<f64>]) -> Result<Vec<bool>> {
        check_prediction_set(vectors, self.dimension, self.trained)?;
        Ok(vectors
            .iter()
            .map(|vector| {
                let score = |class: usize| -> f64 {
                    self.class_log_priors[class]
                        + vector
                            .iter()
                            .enumerate()
                            .map(|(feature, &value)| {
                                value * self.feature_log_probs[class][feature]
                            })
                            .sum::<f64>()
                };
                score(1) > score(0)
            })
            .collect())
    }
}
