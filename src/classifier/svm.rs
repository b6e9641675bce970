//! Linear support vector machine trained with the Pegasos subgradient
//! method.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::classifier::{check_prediction_set, check_training_set, Classifier};
use crate::error::Result;

/// Regularization strength.
const LAMBDA: f64 = 0.01;

/// Passes over the training set.
const EPOCHS: usize = 200;

/// Linear SVM over standardized features.
///
/// Features are standardized internally at fit time (the scales are stored
/// and re-applied at prediction), so large-magnitude features like the raw
/// token count do not dominate the margin.
pub struct LinearSvm {
    weights: Vec<f64>,
    bias: f64,
    feature_means: Vec<f64>,
    feature_scales: Vec<f64>,
    seed: u64,
    trained: bool,
}

impl LinearSvm {
    /// Create an untrained model with the given shuffle seed.
    pub fn new(seed: u64) -> Self {
        LinearSvm {
            weights: Vec::new(),
            bias: 0.0,
            feature_means: Vec::new(),
            feature_scales: Vec::new(),
            seed,
            trained: false,
        }
    }

    fn standardize(&self, vector: &[f64]) -> Vec<f64> {
        vector
            .iter()
            .enumerate()
            .map(|(feature, &value)| {
                (value - self.feature_means[feature]) / self.feature_scales[feature]
            })
            .collect()
    }

    fn margin(&self, standardized: &[f64]) -> f64 {
        let dot: f64 = self
            .weights
            .iter()
            .zip(standardized)
            .map(|(w, x)| w * x)
            .sum();
        dot + self.bias
    }
}

impl Classifier for LinearSvm {
    fn name(&self) -> &'static str {
        "linear_svm"
    }

    fn fit(&mut self, vectors: &[Vec<f64>], labels: &[bool]) -> Result<()> {
        let dimension = check_training_set(vectors, labels)?;
        let count = vectors.len();

        // Standardization parameters over the training set.
        let mut means = vec![0.0; dimension];
        for vector in vectors {
            for (feature, &value) in vector.iter().enumerate() {
                means[feature] += value;
            }
        }
        for mean in means.iter_mut() {
            *mean /= count as f64;
        }
        let mut scales = vec![0.0; dimension];
        for vector in vectors {
            for (feature, &value) in vector.iter().enumerate() {
                scales[feature] += (value - means[feature]).powi(2);
            }
        }
        for scale in scales.iter_mut() {
            *scale = (*scale / count as f64).sqrt();
            if *scale == 0.0 {
                *scale = 1.0;
            }
        }
        self.feature_means = means;
        self.feature_scales = scales;

        let standardized: Vec<Vec<f64>> = vectors.iter().map(|v| self.standardize(v)).collect();
        let targets: Vec<f64> = labels.iter().map(|&l| if l { 1.0 } else { -1.0 }).collect();

        let mut weights = vec![0.0; dimension];
        let mut bias = 0.0;
        let mut order: Vec<usize> = (0..count).collect();
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut step = 1usize;

        for _ in 0..EPOCHS {
            order.shuffle(&mut rng);
            for &i in &order {
                let eta = 1.0 / (LAMBDA * step as f64);
                let x = &standardized[i];
                let y = targets[i];
                let margin: f64 =
                    weights.iter().zip(x).map(|(w, v)| w * v).sum::<f64>() + bias;

                let decay = 1.0 - eta * LAMBDA;
                for w in weights.iter_mut() {
                    *w *= decay;
                }
                if y * margin < 1.0 {
                    for (w, &v) in weights.iter_mut().zip(x) {
                        *w += eta * y * v;
                    }
                    bias += eta * y;
                }
                step += 1;
            }
        }

        self.weights = weights;
        self.bias = bias;
        self.trained = true;
        Ok(())
    }

    fn predict(&self, vectors: &[Vec<f64>]) -> Result<Vec<bool>> {
        check_prediction_set(vectors, self.weights.len(), self.trained)?;
        Ok(vectors
            .iter()
            .map(|vector| self.margin(&self.standardize(vector)) > 0.0)
            .collect())
    }
}
