//! Error types for learnstyle operations.
//!
//! Every variant carries enough context (field, column, file) for an
//! operator to fix the input and retry.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias used across the crate.
pub type Result<T> = std::result::Result<T, LearnStyleError>;

/// Main error type for the learning-style pipeline.
///
/// # Examples
///
/// ```
/// use learnstyle::error::LearnStyleError;
///
/// let err = LearnStyleError::InvalidInput {
///     field: "catatan".to_string(),
///     value: "7".to_string(),
///     reason: "Likert answer must be between 1 and 5".to_string(),
/// };
/// assert!(err.to_string().contains("catatan"));
/// ```
#[derive(Debug, Error)]
pub enum LearnStyleError {
    /// A raw questionnaire answer could not be interpreted.
    #[error("Invalid answer for '{field}': {value:?} ({reason})")]
    InvalidInput {
        /// Question the answer belongs to
        field: String,
        /// Raw value as supplied
        value: String,
        /// What was expected
        reason: String,
    },

    /// Training data is missing required columns or holds malformed values.
    #[error("Dataset error in {}: {message}", path.display())]
    Dataset {
        /// Dataset file (or `<memory>` for in-memory readers)
        path: PathBuf,
        /// Description of the problem
        message: String,
    },

    /// No complete model/scaler pair could be found.
    #[error("No model/scaler artifacts found in {}", dir.display())]
    ArtifactNotFound {
        /// Directory that was searched
        dir: PathBuf,
    },

    /// Refusing to overwrite an artifact of an existing version.
    #[error("Artifact already exists: {}", path.display())]
    ArtifactExists {
        /// Path that already exists
        path: PathBuf,
    },

    /// Version tag does not follow the `%Y%m%d_%H%M%S` layout.
    #[error("Invalid artifact version tag: {tag:?}")]
    InvalidVersion {
        /// Offending tag
        tag: String,
    },

    /// A feature column has zero variance and the scaler policy rejects it.
    #[error("Feature column '{column}' is constant (every value = {value}); cannot min-max scale")]
    DegenerateColumn {
        /// Column name
        column: String,
        /// The single value the column holds
        value: f64,
    },

    /// Matrix/vector dimensions don't match for the operation.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// A model or transformer was used before being fitted.
    #[error("{component} is not fitted; call fit() first")]
    NotFitted {
        /// Component name
        component: &'static str,
    },

    /// Invalid hyperparameter or split configuration.
    #[error("Invalid hyperparameter: {param} = {value}, expected {constraint}")]
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Configuration file could not be read or parsed.
    #[error("Configuration error in {}: {message}", path.display())]
    Config {
        /// Config file path
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// I/O error (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Binary artifact (de)serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    /// CSV reading or writing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl LearnStyleError {
    /// Shorthand for an [`LearnStyleError::InvalidInput`].
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`LearnStyleError::Dataset`].
    pub fn dataset(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Dataset {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`LearnStyleError::DimensionMismatch`].
    pub fn dimension_mismatch(expected: impl ToString, actual: impl ToString) -> Self {
        Self::DimensionMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Shorthand for an [`LearnStyleError::InvalidHyperparameter`].
    pub fn invalid_hyperparameter(
        param: impl Into<String>,
        value: impl ToString,
        constraint: impl Into<String>,
    ) -> Self {
        Self::InvalidHyperparameter {
            param: param.into(),
            value: value.to_string(),
            constraint: constraint.into(),
        }
    }
}
