//! The batch pipeline: load, compute features, curate, split, train,
//! evaluate, and optionally serve.
//!
//! All behavior is driven by an explicit [`PipelineConfig`]; there is no
//! ambient global state. Infeasible flag combinations are not fatal: the
//! driver runs the feasible subset and logs what it skipped.

use crate::classifier::{self, Classifier, ClassifierKind, ExtraTreesClassifier};
use crate::corpus::{filter_by_vote_confidence, stratified_split, TextRecord};
use crate::error::{JocosaError, Result};
use crate::evaluation::{
    classification_report, confusion_report, cross_validate, ConfusionMatrix,
};
use crate::features::FeatureRegistry;
use crate::serve::{self, AppState};
use crate::storage::Storage;
use crate::analysis::tokenizer::Tokenizer;

/// Cross-validation fold count.
const FOLDS: usize = 5;

/// Which feature-computation policy to run before curation.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum FeatureMode {
    /// Leave stored feature values as they are.
    #[default]
    None,
    /// Recompute every feature for every record.
    RecomputeAll,
    /// Recompute a single named feature.
    RecomputeOne(String),
    /// Compute only features that are missing.
    FillMissing,
}

/// Explicit configuration for one pipeline run.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Classifier used for training and prediction.
    pub classifier: ClassifierKind,
    /// Feature-computation policy.
    pub feature_mode: FeatureMode,
    /// Run k-fold cross-validation before training.
    pub cross_validation: bool,
    /// Evaluate against the held-out records instead of a fresh split.
    pub evaluate: bool,
    /// Report the importance of each feature.
    pub feature_importances: bool,
    /// List the available features and stop.
    pub explain_features: bool,
    /// Start the classification server after training.
    pub serve: bool,
    /// Address the classification server listens on.
    pub listen: String,
    /// Cap on the number of records loaded.
    pub limit: Option<usize>,
    /// Fraction of records reserved for evaluation when splitting.
    pub eval_fraction: f64,
    /// Seed for the split and classifier randomness.
    pub seed: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            classifier: ClassifierKind::Svm,
            feature_mode: FeatureMode::None,
            cross_validation: false,
            evaluate: false,
            feature_importances: false,
            explain_features: false,
            serve: false,
            listen: "0.0.0.0:5000".to_string(),
            limit: None,
            eval_fraction: 0.2,
            seed: 37,
        }
    }
}

/// Run the full pipeline.
pub fn run(
    config: &PipelineConfig,
    storage: &dyn Storage,
    tokenizer: Box<dyn Tokenizer>,
) -> Result<()> {
    let registry = FeatureRegistry::with_defaults()?;

    if config.explain_features {
        for (name, description) in registry.descriptions() {
            println!("{name}:");
            println!("    {description}");
        }
        return Ok(());
    }

    // LOAD: the corpus must be fully preprocessed before any feature runs.
    let mut corpus = storage.load(config.limit)?;
    log::info!("loaded {} records", corpus.len());
    for record in corpus.iter_mut() {
        record.preprocess(tokenizer.as_ref())?;
    }

    compute_features(config, &registry, storage, &mut corpus)?;

    // CURATE
    let corpus = filter_by_vote_confidence(corpus);
    log::info!("{} records after vote-confidence curation", corpus.len());

    // SPLIT
    let (training, evaluation) = if config.evaluate {
        let (held_out, rest): (Vec<_>, Vec<_>) =
            corpus.into_iter().partition(|r| r.held_out);
        (rest, held_out)
    } else {
        let working: Vec<TextRecord> =
            corpus.into_iter().filter(|r| !r.held_out).collect();
        stratified_split(working, config.eval_fraction, config.seed)?
    };
    log::info!(
        "{} training records, {} evaluation records",
        training.len(),
        evaluation.len()
    );

    let (train_matrix, train_labels) = registry.matrix_and_labels(&training);
    let (eval_matrix, eval_labels) = registry.matrix_and_labels(&evaluation);

    // The whole working corpus, for cross-validation and importances.
    let full_matrix: Vec<Vec<f64>> = train_matrix
        .iter()
        .chain(eval_matrix.iter())
        .cloned()
        .collect();
    let full_labels: Vec<bool> = train_labels
        .iter()
        .chain(eval_labels.iter())
        .copied()
        .collect();

    if config.feature_importances {
        if let Err(e) = report_feature_importances(&registry, &full_matrix, &full_labels, config.seed)
        {
            log::warn!("feature importance report skipped: {e}");
        }
    }

    if config.cross_validation && !config.evaluate {
        match cross_validate(config.classifier, &full_matrix, &full_labels, FOLDS, config.seed) {
            Ok(accuracies) => {
                println!("Cross-validation accuracy per fold:");
                for (fold, accuracy) in accuracies.iter().enumerate() {
                    println!("    fold {fold}: {accuracy:.4}");
                }
                let mean = accuracies.iter().sum::<f64>() / accuracies.len() as f64;
                println!("Mean accuracy: {mean:.4}");
                println!();
            }
            Err(e) => log::warn!("cross-validation skipped: {e}"),
        }
    }

    if training.is_empty() {
        log::warn!("no training records; skipping training and evaluation");
        return Ok(());
    }

    // TRAIN / PREDICT
    let mut model = classifier::build(config.classifier, config.seed);
    log::info!("training {} on {} records", model.name(), training.len());
    model.fit(&train_matrix, &train_labels)?;

    if evaluation.is_empty() {
        log::warn!("no evaluation records; skipping the report");
    } else {
        let predicted = model.predict(&eval_matrix)?;

        // REPORT
        let partition = confusion_report(&evaluation, &eval_labels, &predicted)?;
        log::debug!(
            "confusion groups: {} TP, {} FN, {} FP, {} TN",
            partition.true_positives.len(),
            partition.false_negatives.len(),
            partition.false_positives.len(),
            partition.true_negatives.len()
        );

        println!("{}", classification_report(&eval_labels, &predicted));
        println!();
        println!("{}", ConfusionMatrix::from_labels(&eval_labels, &predicted));
    }

    // SERVE
    if config.serve {
        let state = AppState {
            classifier: model,
            registry,
            tokenizer,
        };
        serve::serve_blocking(&config.listen, state)?;
    }

    Ok(())
}

/// Run the configured feature-computation policy and persist the result.
///
/// An unknown feature name aborts only this stage: the error is surfaced in
/// the log and the rest of the pipeline continues on the stored values.
fn compute_features(
    config: &PipelineConfig,
    registry: &FeatureRegistry,
    storage: &dyn Storage,
    corpus: &mut Vec<TextRecord>,
) -> Result<()> {
    match &config.feature_mode {
        FeatureMode::None => {}
        FeatureMode::RecomputeAll => {
            registry.compute_all(corpus);
            storage.save_features(corpus, None)?;
        }
        FeatureMode::RecomputeOne(name) => match registry.compute_one(corpus, name) {
            Ok(()) => storage.save_features(corpus, Some(name))?,
            Err(JocosaError::UnknownFeature(name)) => {
                log::error!("skipping feature recomputation: no feature named {name:?}");
            }
            Err(e) => return Err(e),
        },
        FeatureMode::FillMissing => {
            registry.compute_missing(corpus);
            storage.save_features(corpus, None)?;
        }
    }
    Ok(())
}

/// Fit a randomized-trees ensemble and print features ranked by importance.
fn report_feature_importances(
    registry: &FeatureRegistry,
    vectors: &[Vec<f64>],
    labels: &[bool],
    seed: u64,
) -> Result<()> {
    let mut ensemble = ExtraTreesClassifier::new(seed);
    ensemble.fit(vectors, labels)?;
    let importances = ensemble.feature_importances()?;

    let mut ranking: Vec<(&str, f64)> = registry
        .ordered_names()
        .into_iter()
        .zip(importances)
        .collect();
    ranking.sort_by(|a, b| b.1.total_cmp(&a.1));

    println!("Feature ranking:");
    for (name, importance) in ranking {
        println!("    {name}: {importance:.4}");
    }
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.classifier, ClassifierKind::Svm);
        assert_eq!(config.feature_mode, FeatureMode::None);
        assert_eq!(config.eval_fraction, 0.2);
        assert!(!config.serve);
    }

    #[test]
    fn test_feature_mode_default() {
        assert_eq!(FeatureMode::default(), FeatureMode::None);
    }
}
