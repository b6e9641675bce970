//! Extremely randomized trees.
//!
//! An ensemble of binary decision trees whose split thresholds are drawn at
//! random rather than optimized exhaustively. Used both as a classifier and
//! as the source of the feature-importance ranking: every split records the
//! Gini impurity decrease it achieved, attributed to its feature.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::classifier::{check_prediction_set, check_training_set, Classifier};
use crate::error::{JocosaError, Result};

/// Number of trees in the ensemble.
const TREES: usize = 50;

/// Maximum tree depth.
const MAX_DEPTH: usize = 12;

/// Minimum node size eligible for splitting.
const MIN_SAMPLES_SPLIT: usize = 2;

enum TreeNode {
    Leaf {
        humor_fraction: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    fn predict(&self, vector: &[f64]) -> f64 {
        match self {
            TreeNode::Leaf { humor_fraction } => *humor_fraction,
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if vector[*feature] <= *threshold {
                    left.predict(vector)
                } else {
                    right.predict(vector)
                }
            }
        }
    }
}

/// Randomized-trees ensemble classifier.
pub struct ExtraTreesClassifier {
    trees: Vec<TreeNode>,
    importances: Vec<f64>,
    dimension: usize,
    seed: u64,
    trained: bool,
}

impl ExtraTreesClassifier {
    /// Create an untrained ensemble with the given randomness seed.
    pub fn new(seed: u64) -> Self {
        ExtraTreesClassifier {
            trees: Vec::new(),
            importances: Vec::new(),
            dimension: 0,
            seed,
            trained: false,
        }
    }

    /// Mean impurity-decrease importance per feature, normalized to sum to 1.
    ///
    /// Columns follow the same canonical order as the training matrix.
    pub fn feature_importances(&self) -> Result<Vec<f64>> {
        if !self.trained {
            return Err(JocosaError::training("model is not trained"));
        }
        let total: f64 = self.importances.iter().sum();
        if total == 0.0 {
            return Ok(self.importances.clone());
        }
        Ok(self.importances.iter().map(|i| i / total).collect())
    }

    fn build_tree(
        vectors: &[Vec<f64>],
        labels: &[bool],
        indices: &[usize],
        total: usize,
        depth: usize,
        rng: &mut StdRng,
        importances: &mut [f64],
    ) -> TreeNode {
        let positives = indices.iter().filter(|&&i| labels[i]).count();
        let fraction = positives as f64 / indices.len() as f64;

        if depth >= MAX_DEPTH
            || indices.len() < MIN_SAMPLES_SPLIT
            || positives == 0
            || positives == indices.len()
        {
            return TreeNode::Leaf {
                humor_fraction: fraction,
            };
        }

        let dimension = vectors[0].len();
        let candidates = (dimension as f64).sqrt().ceil() as usize;
        let mut features: Vec<usize> = (0..dimension).collect();
        features.shuffle(rng);
        features.truncate(candidates.max(1));

        let parent_gini = gini(positives, indices.len());
        let mut best: Option<(usize, f64, f64)> = None;

        for &feature in &features {
            let mut lo = f64::INFINITY;
            let mut hi = f64::NEG_INFINITY;
            for &i in indices {
                lo = lo.min(vectors[i][feature]);
                hi = hi.max(vectors[i][feature]);
            }
            if lo >= hi {
                continue;
            }
            let threshold = lo + rng.random::<f64>() * (hi - lo);

            let mut left_total = 0usize;
            let mut left_positives = 0usize;
            for &i in indices {
                if vectors[i][feature] <= threshold {
                    left_total += 1;
                    if labels[i] {
                        left_positives += 1;
                    }
                }
            }
            let right_total = indices.len() - left_total;
            if left_total == 0 || right_total == 0 {
                continue;
            }
            let right_positives = positives - left_positives;

            let weighted = (left_total as f64 * gini(left_positives, left_total)
                + right_total as f64 * gini(right_positives, right_total))
                / indices.len() as f64;
            let decrease = parent_gini - weighted;

            if best.is_none_or(|(_, _, d)| decrease > d) {
                best = Some((feature, threshold, decrease));
            }
        }

        let (feature, threshold, decrease) = match best {
            Some(split) => split,
            None => {
                return TreeNode::Leaf {
                    humor_fraction: fraction,
                };
            }
        };

        importances[feature] += decrease * indices.len() as f64 / total as f64;

        let (left_indices, right_indices): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .copied()
            .partition(|&i| vectors[i][feature] <= threshold);

        let left = Self::build_tree(
            vectors,
            labels,
            &left_indices,
            total,
            depth + 1,
            rng,
            importances,
        );
        let right = Self::build_tree(
            vectors,
            labels,
            &right_indices,
            total,
            depth + 1,
            rng,
            importances,
        );

        TreeNode::Split {
            feature,
            threshold,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// Gini impurity of a binary node.
fn gini(positives: usize, total: usize) -> f64 {
    let p = positives as f64 / total as f64;
    1.0 - p * p - (1.0 - p) * (1.0 - p)
}

impl Classifier for ExtraTreesClassifier {
    fn name(&self) -> &'static str {
        "extra_trees"
    }

    fn fit(&mut self, vectors: &[Vec<f64>], labels: &[bool]) -> Result<()> {
        let dimension = check_training_set(vectors, labels)?;
        let indices: Vec<usize> = (0..vectors.len()).collect();
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut importances = vec![0.0; dimension];

        self.trees = (0..TREES)
            .map(|_| {
                Self::build_tree(
                    vectors,
                    labels,
                    &indices,
                    vectors.len(),
                    0,
                    &mut rng,
                    &mut importances,
                )
            })
            .collect();

        // Average the accumulated decreases over the ensemble.
        for importance in importances.iter_mut() {
            *importance /= TREES as f64;
        }
        self.importances = importances;
        self.dimension = dimension;
        self.trained = true;
        Ok(())
    }

    fn predict(&self, vectors: &[Vec<f64>]) -> Result<Vec<bool>> {
        check_prediction_set(vectors, self.dimension, self.trained)?;
        Ok(vectors
            .iter()
            .map(|vector| {
                let mean: f64 = self
                    .trees
                    .iter()
                    .map(|tree| tree.predict(vector))
                    .sum::<f64>()
                    / self.trees.len() as f64;
                mean > 0.5
            })
            .collect())
    }
}
