//! Training and evaluation of the learning-style model.
//!
//! [`Trainer::fit`] runs the whole batch pipeline on a
//! [`TrainingDataset`]:
//!
//! 1. build the feature matrix in canonical column order,
//! 2. fit the [`MinMaxScaler`] on every row,
//! 3. split the scaled rows into train/test partitions stratified by label,
//! 4. fit the [`DecisionTreeClassifier`] on the train partition,
//! 5. evaluate on the test partition.
//!
//! The result is a [`TrainingRun`], which [`crate::artifacts::ArtifactStore`]
//! persists as one version.

use crate::config::TrainingConfig;
use crate::data::TrainingDataset;
use crate::error::Result;
use crate::features::FEATURE_NAMES;
use crate::metrics::{confusion_matrix, format_confusion_matrix, ClassificationReport};
use crate::model_selection::stratified_split;
use crate::preprocessing::MinMaxScaler;
use crate::primitives::Matrix;
use crate::style::LearningStyle;
use crate::traits::{Classifier, Transformer};
use crate::tree::{export_text, DecisionTreeClassifier};
use std::fmt::Write;

/// Runs the training pipeline with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Trainer {
    config: TrainingConfig,
}

impl Trainer {
    /// Creates a trainer.
    #[must_use]
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Fits scaler and tree on `dataset` and evaluates on a held-out split.
    ///
    /// Identical dataset and configuration always yield an identical tree
    /// and identical metrics.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the scaler rejects
    /// a constant column, or the labels cannot be stratified.
    pub fn fit(&self, dataset: &TrainingDataset) -> Result<TrainingRun> {
        self.config.validate()?;
        tracing::info!(
            rows = dataset.len(),
            source = %dataset.source().display(),
            max_depth = self.config.max_depth,
            test_size = self.config.test_size,
            random_state = self.config.random_state,
            "training decision tree"
        );

        let x = dataset.feature_matrix();
        let y = dataset.label_indices();

        let mut scaler = MinMaxScaler::new()
            .with_feature_names(&FEATURE_NAMES)
            .with_degenerate_policy(self.config.degenerate_policy);
        let x_scaled = scaler.fit_transform(&x)?;

        let split = stratified_split(&y, self.config.test_size, self.config.random_state)?;
        let x_train = x_scaled.select_rows(&split.train);
        let x_test = x_scaled.select_rows(&split.test);
        let y_train: Vec<usize> = split.train.iter().map(|&i| y[i]).collect();
        let y_test: Vec<usize> = split.test.iter().map(|&i| y[i]).collect();

        let mut model = DecisionTreeClassifier::new()
            .with_max_depth(self.config.max_depth)
            .with_min_samples_split(self.config.min_samples_split)
            .with_random_state(self.config.random_state)
            .with_n_classes(LearningStyle::COUNT);
        model.fit(&x_train, &y_train)?;

        let y_pred = model.predict(&x_test)?;
        let evaluation = Evaluation::new(&y_pred, &y_test)?;

        tracing::info!(
            accuracy = evaluation.accuracy(),
            n_train = split.train.len(),
            n_test = split.test.len(),
            depth = model.depth().unwrap_or(0),
            leaves = model.n_leaves().unwrap_or(0),
            "training finished"
        );

        Ok(TrainingRun {
            config: self.config.clone(),
            model,
            scaler,
            evaluation,
            n_train: split.train.len(),
            n_test: split.test.len(),
        })
    }
}

/// Held-out metrics of a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    report: ClassificationReport,
    confusion: Matrix<usize>,
}

impl Evaluation {
    /// Evaluates predictions against true class indices.
    ///
    /// # Errors
    ///
    /// Returns an error if the slices differ in length, are empty, or hold
    /// an index outside [`LearningStyle::ALL`].
    pub fn new(y_pred: &[usize], y_true: &[usize]) -> Result<Self> {
        let labels = LearningStyle::ALL.map(LearningStyle::name);
        Ok(Self {
            report: ClassificationReport::new(y_pred, y_true, &labels)?,
            confusion: confusion_matrix(y_pred, y_true, LearningStyle::COUNT)?,
        })
    }

    /// Test-set accuracy.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        self.report.accuracy()
    }

    /// Per-class precision/recall/F1.
    #[must_use]
    pub fn report(&self) -> &ClassificationReport {
        &self.report
    }

    /// Rows = true style, columns = predicted style.
    #[must_use]
    pub fn confusion_matrix(&self) -> &Matrix<usize> {
        &self.confusion
    }
}

/// Everything one training run produced.
#[derive(Debug, Clone)]
pub struct TrainingRun {
    config: TrainingConfig,
    model: DecisionTreeClassifier,
    scaler: MinMaxScaler,
    evaluation: Evaluation,
    n_train: usize,
    n_test: usize,
}

impl TrainingRun {
    /// Configuration the run used.
    #[must_use]
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// The fitted tree.
    #[must_use]
    pub fn model(&self) -> &DecisionTreeClassifier {
        &self.model
    }

    /// The scaler fitted on the full dataset.
    #[must_use]
    pub fn scaler(&self) -> &MinMaxScaler {
        &self.scaler
    }

    /// Held-out metrics.
    #[must_use]
    pub fn evaluation(&self) -> &Evaluation {
        &self.evaluation
    }

    /// Train/test partition sizes.
    #[must_use]
    pub fn split_sizes(&self) -> (usize, usize) {
        (self.n_train, self.n_test)
    }

    /// The tree as nested threshold rules on scaled feature values.
    #[must_use]
    pub fn rules(&self) -> String {
        let classes = LearningStyle::ALL.map(LearningStyle::name);
        self.model
            .tree()
            .map(|root| export_text(root, &FEATURE_NAMES, &classes))
            .unwrap_or_default()
    }

    /// Human-readable metrics: accuracy, classification report, confusion
    /// matrix and feature importances.
    #[must_use]
    pub fn metrics_text(&self) -> String {
        let classes = LearningStyle::ALL.map(LearningStyle::name);
        let mut out = String::new();
        let _ = writeln!(out, "Accuracy: {}", self.evaluation.accuracy());
        let _ = writeln!(out);
        let _ = writeln!(out, "Classification report:");
        let _ = writeln!(out, "{}", self.evaluation.report());
        let _ = writeln!(out, "Confusion matrix:");
        out.push_str(&format_confusion_matrix(
            self.evaluation.confusion_matrix(),
            &classes,
        ));
        if let Some(importances) = self.model.feature_importances() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Feature importances:");
            for (name, imp) in FEATURE_NAMES.iter().zip(importances) {
                let _ = writeln!(out, "{name:<20} {imp:.4}");
            }
        }
        out
    }
}
