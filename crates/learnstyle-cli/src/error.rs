//! Error types for the learnstyle CLI.

use learnstyle::LearnStyleError;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Result type alias for CLI operations
pub(crate) type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub(crate) enum CliError {
    /// No trained model in the artifact directory
    #[error("No trained model found in {}; run `learnstyle train --data <csv>` first", .0.display())]
    ArtifactsMissing(PathBuf),

    /// Input file not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// An answer or flag value was rejected
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Training data could not be used
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Configuration file or hyperparameter problem
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Any other library error
    #[error("{0}")]
    Library(String),
}

impl CliError {
    /// Numeric process status for this error
    pub(crate) fn status(&self) -> u8 {
        match self {
            Self::ArtifactsMissing(_) | Self::FileNotFound(_) => 3,
            Self::InvalidInput(_) => 4,
            Self::Dataset(_) => 5,
            Self::Config(_) => 6,
            Self::Io(_) => 7,
            Self::Json(_) | Self::Library(_) => 1,
        }
    }

    /// Get exit code for this error
    pub(crate) fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.status())
    }
}

impl From<LearnStyleError> for CliError {
    fn from(e: LearnStyleError) -> Self {
        match e {
            LearnStyleError::ArtifactNotFound { dir } => Self::ArtifactsMissing(dir),
            LearnStyleError::Io(io) => Self::Io(io),
            LearnStyleError::InvalidInput { .. } | LearnStyleError::InvalidVersion { .. } => {
                Self::InvalidInput(e.to_string())
            }
            LearnStyleError::Dataset { .. }
            | LearnStyleError::DegenerateColumn { .. }
            | LearnStyleError::Csv(_) => Self::Dataset(e.to_string()),
            LearnStyleError::Config { .. } | LearnStyleError::InvalidHyperparameter { .. } => {
                Self::Config(e.to_string())
            }
            other => Self::Library(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_artifacts_suggests_train() {
        let err = CliError::from(LearnStyleError::ArtifactNotFound {
            dir: PathBuf::from("models"),
        });
        let msg = err.to_string();
        assert!(msg.contains("models"));
        assert!(msg.contains("learnstyle train"));
        assert_eq!(err.status(), 3);
    }

    #[test]
    fn test_library_errors_map_to_categories() {
        let invalid = CliError::from(LearnStyleError::InvalidInput {
            field: "catatan".into(),
            value: "9".into(),
            reason: "between 1 and 5".into(),
        });
        assert!(matches!(invalid, CliError::InvalidInput(ref m) if m.contains("catatan")));

        let degenerate = CliError::from(LearnStyleError::DegenerateColumn {
            column: "AttendanceRate".into(),
            value: 1.0,
        });
        assert!(matches!(degenerate, CliError::Dataset(_)));

        let not_fitted = CliError::from(LearnStyleError::NotFitted { component: "scaler" });
        assert!(matches!(not_fitted, CliError::Library(_)));
        assert_eq!(not_fitted.status(), 1);
    }
}
