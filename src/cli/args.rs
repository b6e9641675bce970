//! Command line argument parsing for the Jocosa CLI using clap.

use std::path::PathBuf;

use clap::Parser;

use crate::classifier::ClassifierKind;
use crate::pipeline::{FeatureMode, PipelineConfig};

/// Jocosa - humor classification for short social-media text
#[derive(Parser, Debug, Clone)]
#[command(name = "jocosa")]
#[command(about = "Classifies humor in short social-media text")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct JocosaArgs {
    /// Corpus file in JSON Lines format
    #[arg(long, default_value = "corpus.jsonl", value_name = "PATH")]
    pub corpus: PathBuf,

    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Recompute the value of every feature for every record
    #[arg(short = 's', long)]
    pub recompute_features: bool,

    /// Recompute the value of a single feature
    #[arg(short = 'f', long, value_name = "FEATURE")]
    pub recompute_feature: Option<String>,

    /// Compute the features each record is still missing
    #[arg(short = 'a', long)]
    pub fill_missing_features: bool,

    /// Classifier used for training and prediction
    #[arg(short, long, value_enum, default_value_t = ClassifierKind::Svm)]
    pub classifier: ClassifierKind,

    /// Run 5-fold cross-validation before training
    #[arg(short = 'x', long)]
    pub cross_validation: bool,

    /// Evaluate against the held-out evaluation records
    #[arg(short, long)]
    pub evaluate: bool,

    /// List the available features and exit
    #[arg(short = 'b', long)]
    pub explain_features: bool,

    /// Report the importance of each feature
    #[arg(short = 'i', long)]
    pub feature_importances: bool,

    /// Cap the number of records processed
    #[arg(short, long, value_name = "N")]
    pub limit: Option<usize>,

    /// Start the classification server after training
    #[arg(short = 'r', long)]
    pub serve: bool,

    /// Address the classification server listens on
    #[arg(long, default_value = "0.0.0.0:5000", value_name = "ADDR")]
    pub listen: String,

    /// Fraction of records reserved for evaluation when splitting
    #[arg(long, default_value_t = 0.2, value_name = "FRACTION")]
    pub eval_fraction: f64,

    /// Seed for the stratified split and classifier randomness
    #[arg(long, default_value_t = 37)]
    pub seed: u64,
}

impl JocosaArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// The feature-computation policy the flags select.
    ///
    /// Recompute-all wins over recompute-one, which wins over fill-missing,
    /// so combining them never aborts the run.
    pub fn feature_mode(&self) -> FeatureMode {
        if self.recompute_features {
            FeatureMode::RecomputeAll
        } else if let Some(name) = &self.recompute_feature {
            FeatureMode::RecomputeOne(name.clone())
        } else if self.fill_missing_features {
            FeatureMode::FillMissing
        } else {
            FeatureMode::None
        }
    }

    /// Convert the parsed flags into a pipeline configuration.
    pub fn to_config(&self) -> PipelineConfig {
        PipelineConfig {
            classifier: self.classifier,
            feature_mode: self.feature_mode(),
            cross_validation: self.cross_validation,
            evaluate: self.evaluate,
            feature_importances: self.feature_importances,
            explain_features: self.explain_features,
            serve: self.serve,
            listen: self.listen.clone(),
            limit: self.limit,
            eval_fraction: self.eval_fraction,
            seed: self.seed,
        }
    }
}
