//! Preprocessing transformers for feature normalization.
//!
//! # Example
//!
//! ```
//! use learnstyle::prelude::*;
//!
//! let data = Matrix::from_vec(3, 2, vec![
//!     0.0, 0.0,
//!     5.0, 10.0,
//!     10.0, 20.0,
//! ]).expect("valid matrix dimensions");
//!
//! let mut scaler = MinMaxScaler::new();
//! let scaled = scaler.fit_transform(&data).expect("fit_transform should succeed");
//!
//! assert!((scaled.get(0, 0) - 0.0).abs() < 1e-12);
//! assert!((scaled.get(1, 0) - 0.5).abs() < 1e-12);
//! assert!((scaled.get(2, 1) - 1.0).abs() < 1e-12);
//! ```

use crate::error::{LearnStyleError, Result};
use crate::primitives::Matrix;
use crate::traits::Transformer;
use serde::{Deserialize, Serialize};

/// What a [`MinMaxScaler`] does with a constant (zero-range) column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Map every value of the column to 0.0 and log a warning.
    #[default]
    Zero,
    /// Fail the fit with [`LearnStyleError::DegenerateColumn`].
    Reject,
}

/// Scales features to `[0, 1]` using the training minimum and maximum.
///
/// The transformation is: `X_scaled = (X - X_min) / (X_max - X_min)`.
///
/// Inputs outside the fitted range are not clamped, so they map outside
/// `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    /// Minimum value of each feature (computed during fit).
    data_min: Option<Vec<f64>>,
    /// Maximum value of each feature (computed during fit).
    data_max: Option<Vec<f64>>,
    /// Column names used in diagnostics.
    #[serde(default)]
    feature_names: Vec<String>,
    #[serde(default)]
    degenerate_policy: DegeneratePolicy,
}

impl Default for MinMaxScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl MinMaxScaler {
    /// Creates an unfitted scaler with the [`DegeneratePolicy::Zero`] fallback.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data_min: None,
            data_max: None,
            feature_names: Vec::new(),
            degenerate_policy: DegeneratePolicy::Zero,
        }
    }

    /// Names the columns, for warnings and errors.
    #[must_use]
    pub fn with_feature_names<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.feature_names = names.iter().map(|n| n.as_ref().to_string()).collect();
        self
    }

    /// Sets how constant columns are handled.
    #[must_use]
    pub fn with_degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate_policy = policy;
        self
    }

    /// Returns the minimum value of each feature.
    ///
    /// # Errors
    ///
    /// Returns an error if the scaler is not fitted.
    pub fn data_min(&self) -> Result<&[f64]> {
        self.data_min.as_deref().ok_or_else(Self::not_fitted)
    }

    /// Returns the maximum value of each feature.
    ///
    /// # Errors
    ///
    /// Returns an error if the scaler is not fitted.
    pub fn data_max(&self) -> Result<&[f64]> {
        self.data_max.as_deref().ok_or_else(Self::not_fitted)
    }

    /// Returns true if the scaler has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.data_min.is_some()
    }

    /// Number of features seen during fit.
    #[must_use]
    pub fn n_features(&self) -> Option<usize> {
        self.data_min.as_ref().map(Vec::len)
    }

    /// Policy applied to constant columns.
    #[must_use]
    pub fn degenerate_policy(&self) -> DegeneratePolicy {
        self.degenerate_policy
    }

    /// Scales a single row.
    ///
    /// # Errors
    ///
    /// Returns an error if the scaler is not fitted or the row length differs
    /// from the fitted feature count.
    pub fn transform_one(&self, row: &[f64]) -> Result<Vec<f64>> {
        let (data_min, data_max) = self.fitted_bounds(row.len())?;
        Ok(row
            .iter()
            .zip(data_min.iter().zip(data_max))
            .map(|(&val, (&lo, &hi))| scale_value(val, lo, hi))
            .collect())
    }

    /// Transforms data back to original scale.
    ///
    /// Constant columns map back to their single training value.
    ///
    /// # Errors
    ///
    /// Returns an error if the scaler is not fitted or dimensions mismatch.
    pub fn inverse_transform(&self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        let (data_min, data_max) = self.fitted_bounds(x.n_cols())?;
        let mut result = Vec::with_capacity(x.n_rows() * x.n_cols());
        for row in x.rows() {
            for (j, &val) in row.iter().enumerate() {
                let range = data_max[j] - data_min[j];
                result.push(if range > 0.0 {
                    val * range + data_min[j]
                } else {
                    data_min[j]
                });
            }
        }
        Matrix::from_vec(x.n_rows(), x.n_cols(), result)
    }

    fn fitted_bounds(&self, n_features: usize) -> Result<(&[f64], &[f64])> {
        let data_min = self.data_min()?;
        let data_max = self.data_max()?;
        if n_features != data_min.len() {
            return Err(LearnStyleError::dimension_mismatch(
                format!("{} features", data_min.len()),
                format!("{n_features} features"),
            ));
        }
        if data_max.len() != data_min.len() {
            return Err(LearnStyleError::dimension_mismatch(
                format!("{} upper bounds", data_min.len()),
                format!("{} upper bounds", data_max.len()),
            ));
        }
        Ok((data_min, data_max))
    }

    fn column_name(&self, j: usize) -> String {
        self.feature_names
            .get(j)
            .cloned()
            .unwrap_or_else(|| format!("column {j}"))
    }

    fn not_fitted() -> LearnStyleError {
        LearnStyleError::NotFitted {
            component: "MinMaxScaler",
        }
    }
}

fn scale_value(val: f64, lo: f64, hi: f64) -> f64 {
    let range = hi - lo;
    if range > 0.0 {
        (val - lo) / range
    } else {
        0.0
    }
}

impl Transformer for MinMaxScaler {
    /// Computes the min and max of each feature.
    fn fit(&mut self, x: &Matrix<f64>) -> Result<()> {
        let (n_samples, n_features) = x.shape();

        if n_samples == 0 {
            return Err(LearnStyleError::invalid_hyperparameter(
                "n_samples",
                0,
                "at least one sample to fit the scaler",
            ));
        }
        if !self.feature_names.is_empty() && self.feature_names.len() != n_features {
            return Err(LearnStyleError::dimension_mismatch(
                format!("{} named features", self.feature_names.len()),
                format!("{n_features} columns"),
            ));
        }

        let mut data_min = vec![f64::INFINITY; n_features];
        let mut data_max = vec![f64::NEG_INFINITY; n_features];

        for row in x.rows() {
            for (j, &val) in row.iter().enumerate() {
                if val < data_min[j] {
                    data_min[j] = val;
                }
                if val > data_max[j] {
                    data_max[j] = val;
                }
            }
        }

        for j in 0..n_features {
            if data_max[j] > data_min[j] {
                continue;
            }
            let column = self.column_name(j);
            match self.degenerate_policy {
                DegeneratePolicy::Zero => {
                    tracing::warn!(
                        column = %column,
                        value = data_min[j],
                        "constant feature column; scaled values fixed at 0.0"
                    );
                }
                DegeneratePolicy::Reject => {
                    return Err(LearnStyleError::DegenerateColumn {
                        column,
                        value: data_min[j],
                    });
                }
            }
        }

        self.data_min = Some(data_min);
        self.data_max = Some(data_max);

        Ok(())
    }

    /// Scales the data with the fitted bounds.
    fn transform(&self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        let (data_min, data_max) = self.fitted_bounds(x.n_cols())?;
        let mut result = Vec::with_capacity(x.n_rows() * x.n_cols());
        for row in x.rows() {
            for (j, &val) in row.iter().enumerate() {
                result.push(scale_value(val, data_min[j], data_max[j]));
            }
        }
        Matrix::from_vec(x.n_rows(), x.n_cols(), result)
    }
}
