//! Train/test splitting.
//!
//! The learning-style dataset is small and its classes are not always
//! balanced, so the hold-out partition is stratified by label: each class
//! contributes to the test set in proportion to its size.

use crate::error::{LearnStyleError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;

/// Row indices of a train/test partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    /// Rows used for fitting
    pub train: Vec<usize>,
    /// Held-out rows used for evaluation
    pub test: Vec<usize>,
}

/// Validates the split ratio and returns the total test count.
fn validate_split_inputs(n_samples: usize, test_size: f64) -> Result<usize> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(LearnStyleError::invalid_hyperparameter(
            "test_size",
            test_size,
            "strictly between 0 and 1",
        ));
    }

    let n_test = (n_samples as f64 * test_size).ceil() as usize;
    if n_test == 0 || n_test >= n_samples {
        return Err(LearnStyleError::invalid_hyperparameter(
            "test_size",
            test_size,
            format!(
                "a split with non-empty train and test partitions (n_samples={n_samples}, n_test={n_test})"
            ),
        ));
    }
    Ok(n_test)
}

/// Per-class test counts by the largest-remainder method.
///
/// Each class first gets `floor(n_c * test_size)`; the remaining slots up to
/// `n_test` go to the classes with the largest fractional parts, lower class
/// index first on equal fractions.
fn allocate_test_counts(class_sizes: &[usize], test_size: f64, n_test: usize) -> Vec<usize> {
    let quotas: Vec<f64> = class_sizes
        .iter()
        .map(|&n| n as f64 * test_size)
        .collect();
    let mut counts: Vec<usize> = quotas.iter().map(|q| q.floor() as usize).collect();

    let mut order: Vec<usize> = (0..class_sizes.len()).collect();
    order.sort_by(|&a, &b| {
        let fa = quotas[a] - quotas[a].floor();
        let fb = quotas[b] - quotas[b].floor();
        fb.total_cmp(&fa).then(a.cmp(&b))
    });

    let mut remaining = n_test.saturating_sub(counts.iter().sum());
    for idx in order {
        if remaining == 0 {
            break;
        }
        if counts[idx] < class_sizes[idx] {
            counts[idx] += 1;
            remaining -= 1;
        }
    }
    counts
}

/// Splits row indices into train and test partitions stratified by label.
///
/// The test partition holds `ceil(n * test_size)` rows. Each class keeps its
/// proportion within one sample. Every class is shuffled with a generator
/// seeded by `random_state`, and both partitions are shuffled once more, so
/// the same labels and seed always give the same split.
///
/// # Errors
///
/// Returns [`LearnStyleError::InvalidHyperparameter`] if `test_size` is not
/// in `(0, 1)`, a class has fewer than 2 members, or either partition would
/// be empty.
///
/// # Example
///
/// ```
/// use learnstyle::model_selection::stratified_split;
///
/// let y = [0, 0, 0, 0, 1, 1, 1, 1, 2, 2];
/// let split = stratified_split(&y, 0.3, 42).expect("valid split");
/// assert_eq!(split.test.len(), 3);
/// assert_eq!(split.train.len(), 7);
/// ```
pub fn stratified_split(y: &[usize], test_size: f64, random_state: u64) -> Result<SplitIndices> {
    let n_test = validate_split_inputs(y.len(), test_size)?;

    let mut by_class: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (i, &label) in y.iter().enumerate() {
        by_class.entry(label).or_default().push(i);
    }

    if let Some((label, members)) = by_class.iter().find(|(_, m)| m.len() < 2) {
        return Err(LearnStyleError::invalid_hyperparameter(
            "class_size",
            members.len(),
            format!("at least 2 samples per class for stratification (class {label})"),
        ));
    }

    let sizes: Vec<usize> = by_class.values().map(Vec::len).collect();
    let test_counts = allocate_test_counts(&sizes, test_size, n_test);

    let mut rng = StdRng::seed_from_u64(random_state);
    let mut train = Vec::with_capacity(y.len() - n_test);
    let mut test = Vec::with_capacity(n_test);
    for (members, &k) in by_class.values_mut().zip(&test_counts) {
        members.shuffle(&mut rng);
        test.extend_from_slice(&members[..k]);
        train.extend_from_slice(&members[k..]);
    }

    if train.is_empty() || test.is_empty() {
        return Err(LearnStyleError::invalid_hyperparameter(
            "test_size",
            test_size,
            "a split with non-empty train and test partitions",
        ));
    }

    train.shuffle(&mut rng);
    test.shuffle(&mut rng);

    tracing::debug!(
        n_train = train.len(),
        n_test = test.len(),
        classes = by_class.len(),
        "stratified split"
    );

    Ok(SplitIndices { train, test })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(counts: &[usize]) -> Vec<usize> {
        counts
            .iter()
            .enumerate()
            .flat_map(|(class, &n)| std::iter::repeat(class).take(n))
            .collect()
    }

    fn count(y: &[usize], rows: &[usize], class: usize) -> usize {
        rows.iter().filter(|&&i| y[i] == class).count()
    }

    #[test]
    fn test_split_sizes_use_ceiling() {
        let y = labels(&[5, 5]);
        let split = stratified_split(&y, 0.25, 0).expect("valid");
        // ceil(10 * 0.25) = 3
        assert_eq!(split.test.len(), 3);
        assert_eq!(split.train.len(), 7);
    }

    #[test]
    fn test_split_is_a_partition() {
        let y = labels(&[7, 4, 9]);
        let split = stratified_split(&y, 0.3, 42).expect("valid");
        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..y.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_preserves_proportions() {
        let y = labels(&[14, 9, 23]);
        let split = stratified_split(&y, 0.3, 42).expect("valid");
        for (class, &n) in [14usize, 9, 23].iter().enumerate() {
            let expected_train = n as f64 * 0.7;
            let got = count(&y, &split.train, class) as f64;
            assert!(
                (got - expected_train).abs() <= 1.0,
                "class {class}: {got} vs {expected_train}"
            );
        }
    }

    #[test]
    fn test_split_is_deterministic() {
        let y = labels(&[6, 6, 6]);
        let a = stratified_split(&y, 0.3, 9).expect("valid");
        let b = stratified_split(&y, 0.3, 9).expect("valid");
        assert_eq!(a, b);

        let c = stratified_split(&y, 0.3, 10).expect("valid");
        assert_ne!(a, c);
    }

    #[test]
    fn test_largest_remainder_allocation() {
        // quotas 1.5, 0.9, 0.6 -> floors 1, 0, 0; n_test = ceil(3.0) = 3
        let counts = allocate_test_counts(&[5, 3, 2], 0.3, 3);
        assert_eq!(counts, vec![1, 1, 1]);

        // quotas 0.6, 0.6 -> tie on fraction goes to the lower class index
        let counts = allocate_test_counts(&[2, 2], 0.3, 2);
        assert_eq!(counts, vec![1, 1]);
        let counts = allocate_test_counts(&[2, 2], 0.3, 1);
        assert_eq!(counts, vec![1, 0]);
    }

    #[test]
    fn test_split_rejects_singleton_class() {
        let y = labels(&[5, 1, 5]);
        let err = stratified_split(&y, 0.3, 42).unwrap_err();
        assert!(matches!(err, LearnStyleError::InvalidHyperparameter { .. }));
    }

    #[test]
    fn test_split_rejects_bad_ratio() {
        let y = labels(&[4, 4]);
        for ratio in [0.0, 1.0, -0.2, 1.5, f64::NAN] {
            assert!(stratified_split(&y, ratio, 42).is_err(), "ratio {ratio}");
        }
    }

    #[test]
    fn test_split_rejects_empty_partition() {
        // ceil(4 * 0.99) = 4 leaves nothing to train on
        let y = labels(&[2, 2]);
        assert!(stratified_split(&y, 0.99, 42).is_err());
        assert!(stratified_split(&[], 0.3, 42).is_err());
    }
}
