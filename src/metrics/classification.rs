//! Classification metrics for evaluating classifier performance.
//!
//! Provides accuracy, precision, recall, F1-score, and confusion matrix
//! computation for multi-class classification tasks. Labels are class
//! indices in `0..n_classes`; the class count is always passed explicitly so
//! a class missing from a small test partition still gets its row.

use crate::error::{LearnStyleError, Result};
use crate::primitives::Matrix;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Averaging strategy for multi-class metrics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Average {
    /// Calculate metrics for each label, return unweighted mean.
    Macro,
    /// Calculate metrics globally by counting total TP, FP, FN.
    Micro,
    /// Weighted mean by support (number of true instances per label).
    Weighted,
}

fn check_labels(y_pred: &[usize], y_true: &[usize], n_classes: usize) -> Result<()> {
    if y_pred.len() != y_true.len() {
        return Err(LearnStyleError::dimension_mismatch(
            format!("{} predictions", y_true.len()),
            format!("{} predictions", y_pred.len()),
        ));
    }
    if y_true.is_empty() {
        return Err(LearnStyleError::invalid_input(
            "y_true",
            "[]",
            "cannot evaluate on an empty partition",
        ));
    }
    if let Some(&label) = y_true.iter().chain(y_pred).find(|&&l| l >= n_classes) {
        return Err(LearnStyleError::invalid_input(
            "label",
            label.to_string(),
            format!("class index must be below {n_classes}"),
        ));
    }
    Ok(())
}

/// Compute classification accuracy.
///
/// accuracy = `correct_predictions` / `total_predictions`
///
/// # Errors
///
/// Returns an error if the slices differ in length or are empty.
///
/// # Examples
///
/// ```
/// use learnstyle::metrics::classification::accuracy;
///
/// let y_true = vec![0, 1, 2, 0, 1, 2];
/// let y_pred = vec![0, 2, 1, 0, 0, 1];
/// let acc = accuracy(&y_pred, &y_true).expect("same length");
/// assert!((acc - 0.333333).abs() < 0.001);
/// ```
pub fn accuracy(y_pred: &[usize], y_true: &[usize]) -> Result<f64> {
    let n_classes = y_true
        .iter()
        .chain(y_pred)
        .max()
        .map_or(0, |&m| m + 1);
    check_labels(y_pred, y_true, n_classes)?;

    let correct = y_pred
        .iter()
        .zip(y_true.iter())
        .filter(|(p, t)| p == t)
        .count();

    Ok(correct as f64 / y_true.len() as f64)
}

/// Compute precision for a class given true positives and false positives.
fn class_precision(tp: usize, fp: usize) -> f64 {
    if tp + fp == 0 {
        0.0
    } else {
        tp as f64 / (tp + fp) as f64
    }
}

/// Compute recall for a class given true positives and false negatives.
fn class_recall(tp: usize, fn_count: usize) -> f64 {
    if tp + fn_count == 0 {
        0.0
    } else {
        tp as f64 / (tp + fn_count) as f64
    }
}

/// Compute F1 score from precision and recall.
fn f1_from_prec_rec(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

/// Compute confusion matrix.
///
/// Element `[i, j]` is the count of samples with true label `i` and
/// predicted label `j`.
///
/// # Errors
///
/// Returns an error if the slices differ in length, are empty, or hold a
/// label `>= n_classes`.
///
/// # Examples
///
/// ```
/// use learnstyle::metrics::classification::confusion_matrix;
///
/// let y_true = vec![0, 0, 1, 1, 2, 2];
/// let y_pred = vec![0, 1, 1, 1, 2, 0];
/// let cm = confusion_matrix(&y_pred, &y_true, 3).expect("valid labels");
/// assert_eq!(cm.shape(), (3, 3));
/// assert_eq!(cm.get(2, 0), 1);
/// ```
pub fn confusion_matrix(y_pred: &[usize], y_true: &[usize], n_classes: usize) -> Result<Matrix<usize>> {
    check_labels(y_pred, y_true, n_classes)?;

    let mut data = vec![0usize; n_classes * n_classes];
    for (&true_label, &pred_label) in y_true.iter().zip(y_pred.iter()) {
        data[true_label * n_classes + pred_label] += 1;
    }

    Matrix::from_vec(n_classes, n_classes, data)
}

/// Helper function to compute TP, FP, FN and support for each class.
fn compute_tp_fp_fn(
    y_pred: &[usize],
    y_true: &[usize],
    n_classes: usize,
) -> (Vec<usize>, Vec<usize>, Vec<usize>, Vec<usize>) {
    let mut tp = vec![0usize; n_classes];
    let mut fp = vec![0usize; n_classes];
    let mut fn_counts = vec![0usize; n_classes];
    let mut support = vec![0usize; n_classes];

    for (&true_label, &pred_label) in y_true.iter().zip(y_pred.iter()) {
        support[true_label] += 1;
        if true_label == pred_label {
            tp[true_label] += 1;
        } else {
            fp[pred_label] += 1;
            fn_counts[true_label] += 1;
        }
    }

    (tp, fp, fn_counts, support)
}

/// Precision, recall, F1 and support for one class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of true instances of the class.
    pub support: usize,
}

/// Per-class precision/recall/F1 table with accuracy and averages.
///
/// Rendered through [`fmt::Display`] in the familiar tabular layout:
///
/// ```text
///               precision    recall  f1-score   support
///
///     Auditory       1.00      0.50      0.67         2
///  ...
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    labels: Vec<String>,
    classes: Vec<ClassMetrics>,
    accuracy: f64,
}

impl ClassificationReport {
    /// Builds the report for `n_classes = labels.len()` classes.
    ///
    /// # Errors
    ///
    /// Returns an error if the slices differ in length, are empty, or hold a
    /// label outside `labels`.
    pub fn new<S: AsRef<str>>(y_pred: &[usize], y_true: &[usize], labels: &[S]) -> Result<Self> {
        let n_classes = labels.len();
        check_labels(y_pred, y_true, n_classes)?;

        let (tp, fp, fn_counts, support) = compute_tp_fp_fn(y_pred, y_true, n_classes);
        let classes = (0..n_classes)
            .map(|i| {
                let precision = class_precision(tp[i], fp[i]);
                let recall = class_recall(tp[i], fn_counts[i]);
                ClassMetrics {
                    precision,
                    recall,
                    f1: f1_from_prec_rec(precision, recall),
                    support: support[i],
                }
            })
            .collect();

        let correct: usize = tp.iter().sum();
        Ok(Self {
            labels: labels.iter().map(|l| l.as_ref().to_string()).collect(),
            classes,
            accuracy: correct as f64 / y_true.len() as f64,
        })
    }

    /// Class names in report order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Metrics of the class at `idx`.
    #[must_use]
    pub fn class(&self, idx: usize) -> Option<&ClassMetrics> {
        self.classes.get(idx)
    }

    /// Fraction of correct predictions.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    /// Total number of evaluated samples.
    #[must_use]
    pub fn total_support(&self) -> usize {
        self.classes.iter().map(|c| c.support).sum()
    }

    /// Precision, recall and F1 averaged with the given strategy.
    ///
    /// `Average::Micro` collapses to accuracy for single-label problems.
    #[must_use]
    pub fn average(&self, average: Average) -> ClassMetrics {
        let total = self.total_support();
        if average == Average::Micro {
            return ClassMetrics {
                precision: self.accuracy,
                recall: self.accuracy,
                f1: self.accuracy,
                support: total,
            };
        }

        let k = self.classes.len().max(1) as f64;
        let weight = |c: &ClassMetrics| match average {
            Average::Weighted if total > 0 => c.support as f64 / total as f64,
            Average::Weighted => 0.0,
            _ => 1.0 / k,
        };
        let mean = |f: fn(&ClassMetrics) -> f64| {
            self.classes.iter().map(|c| f(c) * weight(c)).sum::<f64>()
        };
        ClassMetrics {
            precision: mean(|c| c.precision),
            recall: mean(|c| c.recall),
            f1: mean(|c| c.f1),
            support: total,
        }
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .labels
            .iter()
            .map(String::len)
            .chain(std::iter::once("weighted avg".len()))
            .max()
            .unwrap_or(0);

        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for (label, c) in self.labels.iter().zip(&self.classes) {
            writeln!(
                f,
                "{label:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                c.precision, c.recall, c.f1, c.support
            )?;
        }
        writeln!(f)?;
        let total = self.total_support();
        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy", "", "", self.accuracy, total
        )?;
        for (name, avg) in [("macro avg", Average::Macro), ("weighted avg", Average::Weighted)] {
            let m = self.average(avg);
            writeln!(
                f,
                "{name:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                m.precision, m.recall, m.f1, m.support
            )?;
        }
        Ok(())
    }
}

/// Renders a confusion matrix with row and column labels.
///
/// Rows are true classes, columns predicted classes.
#[must_use]
pub fn format_confusion_matrix<S: AsRef<str>>(cm: &Matrix<usize>, labels: &[S]) -> String {
    let name = |i: usize| labels.get(i).map_or_else(|| i.to_string(), |l| l.as_ref().to_string());
    let width = (0..cm.n_rows().max(cm.n_cols()))
        .map(|i| name(i).len())
        .chain(cm.as_slice().iter().map(|v| v.to_string().len()))
        .max()
        .unwrap_or(1);

    let mut out = format!("{:>width$}", "");
    for j in 0..cm.n_cols() {
        out.push_str(&format!(" {:>width$}", name(j)));
    }
    out.push('\n');
    for i in 0..cm.n_rows() {
        out.push_str(&format!("{:>width$}", name(i)));
        for v in cm.row(i) {
            out.push_str(&format!(" {v:>width$}"));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[path = "classification_tests.rs"]
mod tests;
