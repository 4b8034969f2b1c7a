//! Core traits for transformers and classifiers.
//!
//! These traits define the API contracts the training pipeline is written
//! against.

use crate::error::Result;
use crate::primitives::Matrix;

/// Trait for data transformers (scalers).
///
/// ```
/// use learnstyle::prelude::*;
///
/// let x = Matrix::from_vec(2, 1, vec![0.0, 4.0]).unwrap();
/// let mut scaler = MinMaxScaler::new();
/// let scaled = scaler.fit_transform(&x).unwrap();
/// assert_eq!(scaled.as_slice(), &[0.0, 1.0]);
/// ```
pub trait Transformer {
    /// Fits the transformer to data.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails.
    fn fit(&mut self, x: &Matrix<f64>) -> Result<()>;

    /// Transforms data using fitted parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if transformer is not fitted or dimensions mismatch.
    fn transform(&self, x: &Matrix<f64>) -> Result<Matrix<f64>>;

    /// Fits and transforms in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails.
    fn fit_transform(&mut self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        self.fit(x)?;
        self.transform(x)
    }
}

/// Trait for probabilistic classifiers over class indices `0..n_classes`.
pub trait Classifier {
    /// Fits the classifier to features `x` and class indices `y`.
    ///
    /// # Errors
    ///
    /// Returns an error if inputs are inconsistent or empty.
    fn fit(&mut self, x: &Matrix<f64>, y: &[usize]) -> Result<()>;

    /// Class-probability rows, one per sample, `n_classes` columns each.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or feature counts differ.
    fn predict_proba(&self, x: &Matrix<f64>) -> Result<Matrix<f64>>;

    /// Number of classes the model distinguishes.
    fn n_classes(&self) -> usize;

    /// Most probable class per sample; ties go to the lowest class index.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Classifier::predict_proba`].
    fn predict(&self, x: &Matrix<f64>) -> Result<Vec<usize>> {
        let proba = self.predict_proba(x)?;
        Ok(proba.rows().map(argmax).collect())
    }
}

/// Index of the first maximal value.
pub(crate) fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LearnStyleError;

    // Always predicts the class distribution it was fitted on
    struct PriorClassifier {
        prior: Option<Vec<f64>>,
        n_classes: usize,
    }

    impl Classifier for PriorClassifier {
        fn fit(&mut self, x: &Matrix<f64>, y: &[usize]) -> Result<()> {
            if x.n_rows() != y.len() {
                return Err(LearnStyleError::dimension_mismatch(x.n_rows(), y.len()));
            }
            let mut counts = vec![0.0; self.n_classes];
            for &label in y {
                counts[label] += 1.0;
            }
            let n = y.len() as f64;
            self.prior = Some(counts.into_iter().map(|c| c / n).collect());
            Ok(())
        }

        fn predict_proba(&self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
            let prior = self.prior.as_ref().ok_or(LearnStyleError::NotFitted {
                component: "PriorClassifier",
            })?;
            let rows: Vec<Vec<f64>> = (0..x.n_rows()).map(|_| prior.clone()).collect();
            Matrix::from_rows(&rows)
        }

        fn n_classes(&self) -> usize {
            self.n_classes
        }
    }

    #[test]
    fn test_predict_default_uses_argmax() {
        let mut clf = PriorClassifier {
            prior: None,
            n_classes: 3,
        };
        let x = Matrix::from_vec(4, 1, vec![0.0, 1.0, 2.0, 3.0]).expect("matrix");
        clf.fit(&x, &[2, 2, 1, 0]).expect("fit should succeed");

        let predictions = clf.predict(&x).expect("predict should succeed");
        assert_eq!(predictions, vec![2, 2, 2, 2]);
    }

    #[test]
    fn test_predict_before_fit_is_error() {
        let clf = PriorClassifier {
            prior: None,
            n_classes: 2,
        };
        let x = Matrix::from_vec(1, 1, vec![0.0]).expect("matrix");
        assert!(matches!(
            clf.predict(&x),
            Err(LearnStyleError::NotFitted { .. })
        ));
    }

    #[test]
    fn test_argmax_first_maximum_wins() {
        assert_eq!(argmax(&[0.5, 0.5, 0.0]), 0);
        assert_eq!(argmax(&[0.1, 0.2, 0.7]), 2);
        assert_eq!(argmax(&[]), 0);
    }
}
