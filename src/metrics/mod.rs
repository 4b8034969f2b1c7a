//! Evaluation metrics for the learning-style classifier.
//!
//! Accuracy, per-class precision/recall/F1 with macro and weighted
//! averages, and the confusion matrix.

pub mod classification;

pub use classification::{
    accuracy, confusion_matrix, format_confusion_matrix, Average, ClassMetrics,
    ClassificationReport,
};
