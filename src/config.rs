//! Training configuration.
//!
//! Hyperparameters can be set through builder methods or read from the
//! `[training]` table of a TOML file. Keys left out of the file keep their
//! defaults.
//!
//! ```toml
//! [training]
//! max_depth = 6
//! test_size = 0.3
//! random_state = 42
//! min_samples_split = 2
//! degenerate_policy = "zero"
//! ```

use crate::error::{LearnStyleError, Result};
use crate::preprocessing::DegeneratePolicy;
use crate::tree::{DEFAULT_MAX_DEPTH, DEFAULT_RANDOM_STATE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Hyperparameters of one training run.
///
/// # Examples
///
/// ```
/// use learnstyle::config::TrainingConfig;
///
/// let config = TrainingConfig::default().with_max_depth(4).with_test_size(0.25);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.random_state, 42);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainingConfig {
    /// Maximum tree depth (root has depth 0)
    pub max_depth: usize,
    /// Fraction of rows held out for evaluation
    pub test_size: f64,
    /// Seed for the split and the tree's feature permutation
    pub random_state: u64,
    /// Minimum node size eligible for splitting
    pub min_samples_split: usize,
    /// What the scaler does with constant columns
    pub degenerate_policy: DegeneratePolicy,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            test_size: 0.3,
            random_state: DEFAULT_RANDOM_STATE,
            min_samples_split: 2,
            degenerate_policy: DegeneratePolicy::Zero,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    training: TrainingConfig,
}

impl TrainingConfig {
    /// Sets the maximum tree depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the held-out fraction.
    #[must_use]
    pub fn with_test_size(mut self, test_size: f64) -> Self {
        self.test_size = test_size;
        self
    }

    /// Sets the seed.
    #[must_use]
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = random_state;
        self
    }

    /// Sets the minimum node size eligible for splitting.
    #[must_use]
    pub fn with_min_samples_split(mut self, min_samples_split: usize) -> Self {
        self.min_samples_split = min_samples_split;
        self
    }

    /// Sets the degenerate-column policy of the scaler.
    #[must_use]
    pub fn with_degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate_policy = policy;
        self
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`LearnStyleError::InvalidHyperparameter`] when `test_size` is
    /// outside `(0, 1)` or `min_samples_split < 2`.
    pub fn validate(&self) -> Result<()> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(LearnStyleError::invalid_hyperparameter(
                "test_size",
                self.test_size,
                "strictly between 0 and 1",
            ));
        }
        if self.min_samples_split < 2 {
            return Err(LearnStyleError::invalid_hyperparameter(
                "min_samples_split",
                self.min_samples_split,
                ">= 2",
            ));
        }
        Ok(())
    }

    /// Parses the `[training]` table of a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`LearnStyleError::Config`] on syntax errors, unknown keys or
    /// out-of-range values.
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self> {
        let file: ConfigFile = toml::from_str(text).map_err(|e| LearnStyleError::Config {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;
        file.training.validate().map_err(|e| LearnStyleError::Config {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(file.training)
    }

    /// Loads the configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`LearnStyleError::Config`] if the file cannot be read or
    /// parsed.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| LearnStyleError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml_str(&text, path)?;
        tracing::debug!(path = %path.display(), ?config, "training config loaded");
        Ok(config)
    }
}
